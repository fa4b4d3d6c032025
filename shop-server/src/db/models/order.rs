//! Order Model
//!
//! 订单与订单行。record link 字段以 "table:key" 字符串存储，
//! 与 API 线格式一致，查询按字符串比较。

use serde::{Deserialize, Serialize};
use shared::OrderStatus;
use surrealdb::RecordId;

use super::serde_helpers;

/// Order entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    #[serde(
        default,
        with = "serde_helpers::option_record_id",
        skip_serializing_if = "Option::is_none"
    )]
    pub id: Option<RecordId>,
    pub discord_username: String,
    pub minecraft_username: String,
    /// Number of cart lines, assigned at creation and never re-derived
    pub item_count: i64,
    /// Sum of buyer-offered line totals, as supplied by the caller
    pub total_price: f64,
    pub status: OrderStatus,
    pub created_at: Option<String>,
}

impl Order {
    pub fn new(
        discord_username: String,
        minecraft_username: String,
        item_count: i64,
        total_price: f64,
    ) -> Self {
        Self {
            id: None,
            discord_username,
            minecraft_username,
            item_count,
            total_price,
            status: OrderStatus::Pending,
            created_at: Some(chrono::Utc::now().to_rfc3339()),
        }
    }
}

/// Order line, immutable after creation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderItem {
    #[serde(
        default,
        with = "serde_helpers::option_record_id",
        skip_serializing_if = "Option::is_none"
    )]
    pub id: Option<RecordId>,
    /// "order:key" of the owning order
    pub order_id: String,
    /// "enchantment:key" of the purchased enchantment
    pub enchantment_id: String,
    /// Denormalized name snapshot at order time
    pub enchantment_name: String,
    /// Offered line total = offered price × quantity
    pub price: f64,
    pub quantity: i64,
}

/// Direction of a stock adjustment
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum AdjustmentDirection {
    /// Stock decrement at order creation
    Debit,
    /// Stock restoration at cancellation
    Credit,
}

/// Idempotency ledger entry for one logical stock adjustment
///
/// Record id 即幂等 token（order + enchantment + direction），
/// 重放同一调整会撞上重复 id，整个事务中止，不再触碰库存。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StockAdjustment {
    #[serde(
        default,
        with = "serde_helpers::option_record_id",
        skip_serializing_if = "Option::is_none"
    )]
    pub id: Option<RecordId>,
    pub order_id: String,
    pub enchantment_id: String,
    pub direction: AdjustmentDirection,
    pub amount: i64,
    pub applied_at: String,
}
