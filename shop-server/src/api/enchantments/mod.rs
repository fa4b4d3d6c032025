//! Enchantment API 模块
//!
//! 公共目录查询 + 后台目录管理（`x-admin-password` 头认证）。

mod handler;

use axum::{
    Router,
    middleware as axum_middleware,
    routing::{get, put},
};

use crate::core::ServerState;

pub fn router(state: &ServerState) -> Router<ServerState> {
    Router::new()
        .nest("/api/enchantments", public_routes())
        .nest("/api/admin/enchantments", admin_routes(state))
}

fn public_routes() -> Router<ServerState> {
    // 商店目录：仅返回 is_active 条目，无需认证
    Router::new()
        .route("/", get(handler::list))
        .route("/{id}", get(handler::get_by_id))
}

fn admin_routes(state: &ServerState) -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::admin_list).post(handler::create))
        .route("/{id}", put(handler::update).delete(handler::delete))
        .layer(axum_middleware::from_fn_with_state(
            state.clone(),
            crate::auth::require_admin,
        ))
}
