//! Order Management Handler
//!
//! 生命周期转换带 pending 守卫：complete/cancel 只作用于 pending 订单，
//! 重复取消不会二次回补库存。

use axum::{
    Json,
    extract::State,
    response::{IntoResponse, Response},
};

use crate::api::convert;
use crate::core::ServerState;
use crate::db::repository::OrderRepository;
use crate::utils::{AppError, AppResult};
use shared::order::{AdminOrderAck, AdminOrderListResponse};
use shared::{AdminOrderAction, AdminOrderRequest};

/// POST /api/admin/orders - 订单管理
pub async fn manage(
    State(state): State<ServerState>,
    Json(payload): Json<AdminOrderRequest>,
) -> AppResult<Response> {
    // 密钥校验先于任何动作
    if !state.admin.verify(&payload.password) {
        tracing::warn!(
            target: "security",
            action = ?payload.action,
            "unauthorized management request"
        );
        return Err(AppError::Unauthorized);
    }

    tracing::info!(action = ?payload.action, "Admin orders action");

    let repo = OrderRepository::new(state.db.clone());

    match payload.action {
        AdminOrderAction::List => {
            let orders = repo.find_all().await?;
            tracing::info!(count = orders.len(), "Found orders");
            Ok(Json(AdminOrderListResponse {
                orders: orders.into_iter().map(convert::order_view).collect(),
            })
            .into_response())
        }

        AdminOrderAction::Complete => {
            let order_id = required_order_id(&payload)?;
            repo.complete(order_id).await?;

            state.broadcast_sync("order", "completed", Some(order_id));

            Ok(Json(AdminOrderAck { success: true }).into_response())
        }

        AdminOrderAction::Cancel => {
            let order_id = required_order_id(&payload)?;
            repo.cancel(order_id).await?;

            state.broadcast_sync("order", "cancelled", Some(order_id));
            state.broadcast_sync("enchantment", "stock_changed", None);

            Ok(Json(AdminOrderAck { success: true }).into_response())
        }
    }
}

fn required_order_id(payload: &AdminOrderRequest) -> AppResult<&str> {
    payload
        .order_id
        .as_deref()
        .ok_or_else(|| AppError::validation("orderId is required"))
}
