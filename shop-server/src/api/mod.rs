//! API 路由模块
//!
//! # 结构
//!
//! - [`health`] - 健康检查
//! - [`enchantments`] - 目录查询与后台目录管理
//! - [`orders`] - 订单提交
//! - [`admin_orders`] - 订单管理 (list / complete / cancel)
//! - [`sync`] - 目录变更 WebSocket 推送

pub mod convert;

pub mod admin_orders;
pub mod enchantments;
pub mod health;
pub mod orders;
pub mod sync;

use axum::Router;
use http::{HeaderName, HeaderValue};
use tower_http::compression::CompressionLayer;
use tower_http::cors::CorsLayer;
use tower_http::request_id::{
    MakeRequestId, PropagateRequestIdLayer, RequestId, SetRequestIdLayer,
};
use tower_http::trace::TraceLayer;
use uuid::Uuid;

use crate::core::ServerState;

// Re-export common types for handlers
pub use crate::utils::{AppError, AppResult};

/// Custom request ID generator
#[derive(Clone)]
struct XRequestId;

impl MakeRequestId for XRequestId {
    fn make_request_id<B>(&mut self, _request: &http::Request<B>) -> Option<RequestId> {
        let id = Uuid::new_v4().to_string();
        HeaderValue::from_str(&id).ok().map(RequestId::new)
    }
}

/// Build a router with all routes registered (no middleware)
pub fn build_router(state: &ServerState) -> Router<ServerState> {
    Router::new()
        // Catalog - public list plus admin CRUD
        .merge(enchantments::router(state))
        // Order submission - public
        .merge(orders::router())
        // Order management - password carried in the request body
        .merge(admin_orders::router())
        // Catalog change feed - public
        .merge(sync::router())
        // Health - public
        .merge(health::router())
}

/// Build a fully configured application with all middleware
pub fn build_app(state: &ServerState) -> Router<ServerState> {
    build_router(state)
        // ========== Tower HTTP Middleware ==========
        // CORS - Handle cross-origin requests
        .layer(CorsLayer::permissive())
        // Compression - Gzip compress responses
        .layer(CompressionLayer::new())
        // Trace - Request tracing (logs at INFO level)
        .layer(TraceLayer::new_for_http())
        // Request ID - Generate unique ID for each request
        .layer(SetRequestIdLayer::new(
            HeaderName::from_static("x-request-id"),
            XRequestId,
        ))
        // Propagate request ID to response
        .layer(PropagateRequestIdLayer::new(HeaderName::from_static(
            "x-request-id",
        )))
}
