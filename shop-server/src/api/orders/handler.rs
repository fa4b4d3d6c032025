//! Order Submission Handler
//!
//! 提交流程：订单主行写入失败是唯一对外失败；
//! 订单行 + 库存扣减在一个事务里尽力执行，失败只记日志；
//! webhook 通知尽力而为。

use axum::{Json, extract::State};

use crate::core::ServerState;
use crate::db::models::Order;
use crate::db::repository::OrderRepository;
use crate::utils::validation::{MAX_USERNAME_LEN, validate_required_text};
use crate::utils::{AppError, AppResult};
use shared::{SubmitOrderRequest, SubmitOrderResponse};

/// POST /api/orders - 提交订单
pub async fn submit(
    State(state): State<ServerState>,
    Json(payload): Json<SubmitOrderRequest>,
) -> AppResult<Json<SubmitOrderResponse>> {
    validate_required_text(&payload.discord_username, "discordUsername", MAX_USERNAME_LEN)?;
    validate_required_text(
        &payload.minecraft_username,
        "minecraftUsername",
        MAX_USERNAME_LEN,
    )?;
    if payload.items.is_empty() {
        return Err(AppError::validation("items must not be empty"));
    }
    for item in &payload.items {
        if item.quantity < 1 {
            return Err(AppError::validation(format!(
                "quantity for {} must be at least 1",
                item.enchantment
            )));
        }
    }

    tracing::info!(
        discord = %payload.discord_username,
        minecraft = %payload.minecraft_username,
        item_count = payload.items.len(),
        total_price = payload.total_price,
        "Received order"
    );

    let repo = OrderRepository::new(state.db.clone());

    // Step 1: order row. 此处失败是唯一对调用方可见的失败。
    let order = repo
        .create(Order::new(
            payload.discord_username.clone(),
            payload.minecraft_username.clone(),
            payload.items.len() as i64,
            payload.total_price,
        ))
        .await?;

    let order_id = order.id.as_ref().map(|id| id.to_string()).unwrap_or_default();
    tracing::info!(%order_id, "Order created");

    // Steps 2-3: order lines + ledgered stock decrements, one transaction.
    // 失败记日志吞掉，请求仍然成功。
    if let Err(e) = repo.apply_items_and_stock(&order, &payload.items).await {
        tracing::error!(%order_id, error = %e, "Failed to apply order items and stock");
    }

    // Step 4: best-effort webhook notification
    state.notifier.notify_order(&payload, &order_id).await;

    // Step 5: invalidate cached catalog/order views
    state.broadcast_sync("enchantment", "stock_changed", None);
    state.broadcast_sync("order", "created", Some(&order_id));

    Ok(Json(SubmitOrderResponse {
        success: true,
        order_id,
    }))
}
