//! Order Management API 模块
//!
//! 单一入口，action 分发（list / complete / cancel）。
//! 密钥在请求体里，由 handler 自己校验（线格式来自店面客户端）。

mod handler;

use axum::{Router, routing::post};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().route("/api/admin/orders", post(handler::manage))
}
