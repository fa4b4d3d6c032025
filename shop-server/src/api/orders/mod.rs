//! Order Submission API 模块
//!
//! 公开的下单入口。订单状态的后续变更走 admin_orders。

mod handler;

use axum::{Router, routing::post};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().route("/api/orders", post(handler::submit))
}
