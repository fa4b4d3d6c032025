//! Order wire types
//!
//! 订单生命周期: pending → completed | cancelled，每个订单只发生一次转换。
//! 提交请求使用 camelCase 字段（店面客户端的原始线格式），
//! 订单行视图保持数据库的 snake_case 字段。

use serde::{Deserialize, Serialize};

/// Order lifecycle status
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Pending,
    Completed,
    Cancelled,
}

impl OrderStatus {
    /// Terminal states accept no further transition
    pub fn is_terminal(&self) -> bool {
        !matches!(self, OrderStatus::Pending)
    }
}

/// Order as returned by the management endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    pub id: String,
    pub discord_username: String,
    pub minecraft_username: String,
    pub item_count: i64,
    /// Sum of buyer-offered line totals, not catalog price
    pub total_price: f64,
    pub status: OrderStatus,
    pub created_at: Option<String>,
}

/// Order line as persisted alongside an order
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderItem {
    pub id: String,
    pub order_id: String,
    pub enchantment_id: String,
    /// Denormalized name snapshot at order time
    pub enchantment_name: String,
    /// Offered line total = offered price × quantity
    pub price: f64,
    pub quantity: i64,
}

/// One cart line in a submission request
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItemInput {
    /// Display name of the enchantment
    pub enchantment: String,
    pub enchantment_id: String,
    /// Buyer-chosen price per unit
    pub offered_price: f64,
    pub quantity: i64,
}

impl OrderItemInput {
    /// Offered line total
    pub fn line_total(&self) -> f64 {
        self.offered_price * self.quantity as f64
    }
}

/// Order submission request
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitOrderRequest {
    pub discord_username: String,
    pub minecraft_username: String,
    pub items: Vec<OrderItemInput>,
    pub total_price: f64,
}

/// Order submission response
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitOrderResponse {
    pub success: bool,
    pub order_id: String,
}

/// Management actions on the admin orders endpoint
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum AdminOrderAction {
    List,
    Complete,
    Cancel,
}

/// Management request — every call carries the shared admin secret
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminOrderRequest {
    pub action: AdminOrderAction,
    pub password: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order_id: Option<String>,
}

/// Management list response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminOrderListResponse {
    pub orders: Vec<Order>,
}

/// Management acknowledgement for complete/cancel
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminOrderAck {
    pub success: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn submit_request_uses_camel_case_wire_names() {
        let json = r#"{
            "discordUsername": "steve#0001",
            "minecraftUsername": "steve",
            "items": [{
                "enchantment": "Sharpness",
                "enchantmentId": "enchantment:sharpness",
                "offeredPrice": 15.0,
                "quantity": 2
            }],
            "totalPrice": 30.0
        }"#;

        let req: SubmitOrderRequest = serde_json::from_str(json).unwrap();
        assert_eq!(req.items.len(), 1);
        assert_eq!(req.items[0].line_total(), 30.0);
        assert_eq!(req.total_price, 30.0);
    }

    #[test]
    fn status_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&OrderStatus::Pending).unwrap(),
            r#""pending""#
        );
        assert_eq!(
            serde_json::to_string(&OrderStatus::Cancelled).unwrap(),
            r#""cancelled""#
        );
    }

    #[test]
    fn terminal_states() {
        assert!(!OrderStatus::Pending.is_terminal());
        assert!(OrderStatus::Completed.is_terminal());
        assert!(OrderStatus::Cancelled.is_terminal());
    }

    #[test]
    fn admin_action_parses_from_wire() {
        let req: AdminOrderRequest = serde_json::from_str(
            r#"{"action":"cancel","password":"s3cret","orderId":"order:abc"}"#,
        )
        .unwrap();
        assert_eq!(req.action, AdminOrderAction::Cancel);
        assert_eq!(req.order_id.as_deref(), Some("order:abc"));
    }
}
