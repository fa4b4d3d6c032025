//! Order Repository
//!
//! 订单生命周期与库存调账。多步写入在单个数据库事务里完成，
//! 每个逻辑库存调整都有 `stock_adjustment` 台账记录作为幂等 token：
//! 重放会撞上重复的 record id，事务中止，库存不会被重复调整。

use serde::Serialize;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use super::{BaseRepository, RepoError, RepoResult, record_key, record_ref};
use crate::db::models::{Order, OrderItem, StockAdjustment};
use shared::{OrderItemInput, OrderStatus};

const ORDER_TABLE: &str = "order";

/// Per-line payload for the item/stock application transaction
#[derive(Debug, Serialize)]
struct ItemApply {
    order_id: String,
    enchantment_id: String,
    enchantment_name: String,
    price: f64,
    quantity: i64,
    /// Bare enchantment key for type::thing()
    enchantment_key: String,
    /// Idempotency token, doubles as the ledger record id
    token: String,
    applied_at: String,
}

#[derive(Clone)]
pub struct OrderRepository {
    base: BaseRepository,
}

impl OrderRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Insert the order row (`status = pending`)
    ///
    /// 这是提交流程里唯一对调用方可见的失败点。
    pub async fn create(&self, order: Order) -> RepoResult<Order> {
        let created: Option<Order> = self.base.db().create(ORDER_TABLE).content(order).await?;
        created.ok_or_else(|| RepoError::Database("order insert returned no record".into()))
    }

    /// Apply order items and stock decrements in one transaction
    ///
    /// Per line: insert the order_item row, write a debit ledger entry and
    /// decrement the enchantment's stock clamped at zero. A ledger replay
    /// aborts the whole transaction without touching stock.
    pub async fn apply_items_and_stock(
        &self,
        order: &Order,
        items: &[OrderItemInput],
    ) -> RepoResult<()> {
        let order_id = order
            .id
            .as_ref()
            .ok_or_else(|| RepoError::Validation("order has no id".into()))?;
        let order_key = order_id.key().to_string();
        let order_ref = format!("{ORDER_TABLE}:{order_key}");
        let now = chrono::Utc::now().to_rfc3339();

        let applies: Vec<ItemApply> = items
            .iter()
            .map(|item| ItemApply {
                order_id: order_ref.clone(),
                enchantment_id: record_ref("enchantment", &item.enchantment_id),
                enchantment_name: item.enchantment.clone(),
                price: item.line_total(),
                quantity: item.quantity,
                enchantment_key: record_key("enchantment", &item.enchantment_id).to_string(),
                token: format!(
                    "{}_{}_debit",
                    order_key,
                    record_ref("enchantment", &item.enchantment_id).replace(':', "_")
                ),
                applied_at: now.clone(),
            })
            .collect();

        let response = self
            .base
            .db()
            .query(
                r#"
                BEGIN TRANSACTION;
                FOR $item IN $items {
                    CREATE order_item CONTENT {
                        order_id: $item.order_id,
                        enchantment_id: $item.enchantment_id,
                        enchantment_name: $item.enchantment_name,
                        price: $item.price,
                        quantity: $item.quantity
                    };
                    CREATE type::thing('stock_adjustment', $item.token) CONTENT {
                        order_id: $item.order_id,
                        enchantment_id: $item.enchantment_id,
                        direction: 'debit',
                        amount: $item.quantity,
                        applied_at: $item.applied_at
                    };
                    UPDATE type::thing('enchantment', $item.enchantment_key) SET
                        stock = math::max(stock - $item.quantity, 0),
                        updated_at = $item.applied_at;
                };
                COMMIT TRANSACTION;
                "#,
            )
            .bind(("items", applies))
            .await?;

        response.check().map_err(map_txn_error)?;
        Ok(())
    }

    /// All orders, newest first, no pagination
    pub async fn find_all(&self) -> RepoResult<Vec<Order>> {
        let orders: Vec<Order> = self
            .base
            .db()
            .query("SELECT * FROM order ORDER BY created_at DESC")
            .await?
            .take(0)?;
        Ok(orders)
    }

    /// Find order by id
    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Order>> {
        let key = record_key(ORDER_TABLE, id);
        let order: Option<Order> = self.base.db().select((ORDER_TABLE, key)).await?;
        Ok(order)
    }

    /// Order lines of one order
    pub async fn find_items(&self, order_id: &str) -> RepoResult<Vec<OrderItem>> {
        let order_ref = record_ref(ORDER_TABLE, order_id);
        let items: Vec<OrderItem> = self
            .base
            .db()
            .query("SELECT * FROM order_item WHERE order_id = $order_ref")
            .bind(("order_ref", order_ref))
            .await?
            .take(0)?;
        Ok(items)
    }

    /// Stock adjustment ledger entries of one order
    pub async fn find_adjustments(&self, order_id: &str) -> RepoResult<Vec<StockAdjustment>> {
        let order_ref = record_ref(ORDER_TABLE, order_id);
        let entries: Vec<StockAdjustment> = self
            .base
            .db()
            .query("SELECT * FROM stock_adjustment WHERE order_id = $order_ref")
            .bind(("order_ref", order_ref))
            .await?
            .take(0)?;
        Ok(entries)
    }

    /// Guarded transition pending → completed
    ///
    /// 不触碰库存。非 pending 订单返回 Conflict。
    pub async fn complete(&self, id: &str) -> RepoResult<Order> {
        let key = record_key(ORDER_TABLE, id).to_string();
        let updated: Vec<Order> = self
            .base
            .db()
            .query(
                "UPDATE type::thing('order', $key) SET status = 'completed' \
                 WHERE status = 'pending' RETURN AFTER",
            )
            .bind(("key", key))
            .await?
            .take(0)?;

        match updated.into_iter().next() {
            Some(order) => Ok(order),
            None => Err(self.transition_failure(id).await?),
        }
    }

    /// Guarded transition pending → cancelled, restoring stock
    ///
    /// One transaction: assert the order is pending, credit stock back per
    /// order line (amount = quantity, defaulting to 1) with a ledger entry
    /// each, then set the status. Double cancellation trips the pending
    /// guard and never double-restores.
    pub async fn cancel(&self, id: &str) -> RepoResult<Order> {
        let key = record_key(ORDER_TABLE, id).to_string();
        let order_ref = format!("{ORDER_TABLE}:{key}");
        let now = chrono::Utc::now().to_rfc3339();

        let response = self
            .base
            .db()
            .query(
                r#"
                BEGIN TRANSACTION;
                LET $ord = (SELECT * FROM ONLY type::thing('order', $key));
                IF $ord == NONE { THROW 'order_not_found' };
                IF $ord.status != 'pending' { THROW 'order_not_pending' };
                LET $items = (SELECT * FROM order_item WHERE order_id = $order_ref);
                FOR $item IN $items {
                    CREATE type::thing('stock_adjustment', string::concat(
                        $key, '_', string::replace($item.enchantment_id, ':', '_'), '_credit'
                    )) CONTENT {
                        order_id: $item.order_id,
                        enchantment_id: $item.enchantment_id,
                        direction: 'credit',
                        amount: $item.quantity ?? 1,
                        applied_at: $now
                    };
                    UPDATE type::thing('enchantment', string::split($item.enchantment_id, ':')[1]) SET
                        stock = stock + ($item.quantity ?? 1),
                        updated_at = $now;
                };
                UPDATE type::thing('order', $key) SET status = 'cancelled';
                COMMIT TRANSACTION;
                "#,
            )
            .bind(("key", key))
            .bind(("order_ref", order_ref))
            .bind(("now", now))
            .await?;

        response.check().map_err(map_txn_error)?;

        self.find_by_id(id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Order {} not found", id)))
    }

    /// Distinguish NotFound from Conflict after a guarded UPDATE matched nothing
    async fn transition_failure(&self, id: &str) -> RepoResult<RepoError> {
        match self.find_by_id(id).await? {
            None => Ok(RepoError::NotFound(format!("Order {} not found", id))),
            Some(order) => Ok(RepoError::Conflict(format!(
                "Order {} is already {}",
                id,
                status_name(order.status)
            ))),
        }
    }
}

fn status_name(status: OrderStatus) -> &'static str {
    match status {
        OrderStatus::Pending => "pending",
        OrderStatus::Completed => "completed",
        OrderStatus::Cancelled => "cancelled",
    }
}

/// Map THROW / duplicate-id failures out of a transaction error
fn map_txn_error(err: surrealdb::Error) -> RepoError {
    let msg = err.to_string();
    if msg.contains("order_not_found") {
        RepoError::NotFound("Order not found".into())
    } else if msg.contains("order_not_pending") {
        RepoError::Conflict("Order is no longer pending".into())
    } else if msg.contains("already exists") {
        RepoError::Conflict("Stock adjustment already applied".into())
    } else {
        RepoError::Database(msg)
    }
}
