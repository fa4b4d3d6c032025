//! 订单生命周期集成测试
//!
//! 使用 ServerState::initialize 完整初始化（含目录种子），
//! 直接驱动 repository 层验证库存扣减/回补与生命周期守卫。

use shop_server::db::models::{AdjustmentDirection, Order};
use shop_server::db::repository::{EnchantmentRepository, OrderRepository, RepoError};
use shop_server::{Config, ServerState};
use shared::{EnchantmentUpdate, OrderItemInput, OrderStatus, SubmitOrderRequest};

const SHARPNESS: &str = "enchantment:sharpness";

async fn test_state() -> (ServerState, tempfile::TempDir) {
    let dir = tempfile::tempdir().expect("tempdir");
    let mut config = Config::with_overrides(dir.path().to_string_lossy().to_string(), 0);
    config.admin_password = "test-secret".into();
    config.discord_webhook_url = None;
    let state = ServerState::initialize(&config).await.expect("state");
    (state, dir)
}

/// Set the seeded Sharpness entry to a known stock level
async fn set_stock(state: &ServerState, stock: i64) {
    let repo = EnchantmentRepository::new(state.db.clone());
    repo.update(
        SHARPNESS,
        EnchantmentUpdate {
            stock: Some(stock),
            ..Default::default()
        },
    )
    .await
    .expect("set stock");
}

async fn stock_of(state: &ServerState, id: &str) -> i64 {
    let repo = EnchantmentRepository::new(state.db.clone());
    repo.find_by_id(id)
        .await
        .expect("find")
        .expect("enchantment exists")
        .stock
}

fn sharpness_request(quantity: i64, offered_price: f64) -> SubmitOrderRequest {
    SubmitOrderRequest {
        discord_username: "steve#0001".into(),
        minecraft_username: "steve".into(),
        items: vec![OrderItemInput {
            enchantment: "Sharpness".into(),
            enchantment_id: SHARPNESS.into(),
            offered_price,
            quantity,
        }],
        total_price: offered_price * quantity as f64,
    }
}

/// Submit an order the way the submission handler does
async fn submit(state: &ServerState, request: &SubmitOrderRequest) -> Order {
    let repo = OrderRepository::new(state.db.clone());
    let order = repo
        .create(Order::new(
            request.discord_username.clone(),
            request.minecraft_username.clone(),
            request.items.len() as i64,
            request.total_price,
        ))
        .await
        .expect("order insert");
    repo.apply_items_and_stock(&order, &request.items)
        .await
        .expect("items and stock");
    order
}

#[tokio::test]
async fn submit_decrements_stock_and_records_lines() {
    let (state, _dir) = test_state().await;
    set_stock(&state, 5).await;

    let order = submit(&state, &sharpness_request(2, 15.0)).await;
    let order_id = order.id.as_ref().unwrap().to_string();

    assert_eq!(order.item_count, 1);
    assert_eq!(order.total_price, 30.0);
    assert_eq!(order.status, OrderStatus::Pending);
    assert_eq!(stock_of(&state, SHARPNESS).await, 3);

    let repo = OrderRepository::new(state.db.clone());
    let items = repo.find_items(&order_id).await.unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].enchantment_name, "Sharpness");
    assert_eq!(items[0].price, 30.0);
    assert_eq!(items[0].quantity, 2);

    let ledger = repo.find_adjustments(&order_id).await.unwrap();
    assert_eq!(ledger.len(), 1);
    assert_eq!(ledger[0].direction, AdjustmentDirection::Debit);
    assert_eq!(ledger[0].amount, 2);
}

#[tokio::test]
async fn cancel_restores_stock_exactly_once() {
    let (state, _dir) = test_state().await;
    set_stock(&state, 5).await;

    let order = submit(&state, &sharpness_request(2, 15.0)).await;
    let order_id = order.id.as_ref().unwrap().to_string();
    assert_eq!(stock_of(&state, SHARPNESS).await, 3);

    let repo = OrderRepository::new(state.db.clone());
    let cancelled = repo.cancel(&order_id).await.unwrap();
    assert_eq!(cancelled.status, OrderStatus::Cancelled);
    assert_eq!(stock_of(&state, SHARPNESS).await, 5);

    // 台账: 一条 debit 一条 credit
    let ledger = repo.find_adjustments(&order_id).await.unwrap();
    assert_eq!(ledger.len(), 2);

    // Double cancellation trips the pending guard, stock untouched
    let err = repo.cancel(&order_id).await.unwrap_err();
    assert!(matches!(err, RepoError::Conflict(_)), "got {err:?}");
    assert_eq!(stock_of(&state, SHARPNESS).await, 5);
}

#[tokio::test]
async fn complete_does_not_touch_stock_and_is_terminal() {
    let (state, _dir) = test_state().await;
    set_stock(&state, 5).await;

    let order = submit(&state, &sharpness_request(2, 15.0)).await;
    let order_id = order.id.as_ref().unwrap().to_string();

    let repo = OrderRepository::new(state.db.clone());
    let completed = repo.complete(&order_id).await.unwrap();
    assert_eq!(completed.status, OrderStatus::Completed);
    assert_eq!(stock_of(&state, SHARPNESS).await, 3);

    // No transition out of a terminal state
    let err = repo.complete(&order_id).await.unwrap_err();
    assert!(matches!(err, RepoError::Conflict(_)));
    let err = repo.cancel(&order_id).await.unwrap_err();
    assert!(matches!(err, RepoError::Conflict(_)));
    assert_eq!(stock_of(&state, SHARPNESS).await, 3);
}

#[tokio::test]
async fn decrement_clamps_at_zero_but_restore_does_not() {
    let (state, _dir) = test_state().await;
    set_stock(&state, 1).await;

    let order = submit(&state, &sharpness_request(3, 12.0)).await;
    let order_id = order.id.as_ref().unwrap().to_string();
    assert_eq!(stock_of(&state, SHARPNESS).await, 0);

    // Restoration credits the full recorded quantity
    let repo = OrderRepository::new(state.db.clone());
    repo.cancel(&order_id).await.unwrap();
    assert_eq!(stock_of(&state, SHARPNESS).await, 3);
}

#[tokio::test]
async fn replayed_stock_application_is_a_noop() {
    let (state, _dir) = test_state().await;
    set_stock(&state, 5).await;

    let request = sharpness_request(2, 15.0);
    let repo = OrderRepository::new(state.db.clone());
    let order = repo
        .create(Order::new(
            request.discord_username.clone(),
            request.minecraft_username.clone(),
            1,
            request.total_price,
        ))
        .await
        .unwrap();

    repo.apply_items_and_stock(&order, &request.items)
        .await
        .unwrap();
    assert_eq!(stock_of(&state, SHARPNESS).await, 3);

    // 重放撞上台账 record id，事务中止，库存不变
    let err = repo
        .apply_items_and_stock(&order, &request.items)
        .await
        .unwrap_err();
    assert!(matches!(err, RepoError::Conflict(_)), "got {err:?}");
    assert_eq!(stock_of(&state, SHARPNESS).await, 3);

    let order_id = order.id.as_ref().unwrap().to_string();
    let items = repo.find_items(&order_id).await.unwrap();
    assert_eq!(items.len(), 1, "replay must not duplicate order lines");
}

#[tokio::test]
async fn list_returns_orders_newest_first() {
    let (state, _dir) = test_state().await;
    set_stock(&state, 10).await;

    let first = submit(&state, &sharpness_request(1, 10.0)).await;
    tokio::time::sleep(std::time::Duration::from_millis(5)).await;
    let second = submit(&state, &sharpness_request(1, 10.0)).await;

    let repo = OrderRepository::new(state.db.clone());
    let orders = repo.find_all().await.unwrap();
    assert_eq!(orders.len(), 2);
    assert_eq!(orders[0].id, second.id);
    assert_eq!(orders[1].id, first.id);
}
