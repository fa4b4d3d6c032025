//! 目录变更推送模块
//!
//! WebSocket 单向推送 [`shared::SyncMessage`] JSON 帧。
//! 尽力而为：慢消费者丢帧，无顺序保证。

mod handler;

use axum::{Router, routing::get};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().route("/api/sync", get(handler::ws))
}
