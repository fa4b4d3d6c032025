//! Health Check Handler

use axum::{Json, extract::State};
use serde::Serialize;

use crate::core::ServerState;

/// 健康检查响应
#[derive(Serialize)]
pub struct HealthResponse {
    /// 状态 (ok | degraded)
    status: &'static str,
    /// 版本号
    version: &'static str,
    /// 数据库可达性
    database: &'static str,
}

/// GET /api/health
pub async fn health(State(state): State<ServerState>) -> Json<HealthResponse> {
    let database = match state.db.query("RETURN 1").await {
        Ok(_) => "ok",
        Err(e) => {
            tracing::error!(error = %e, "Database health check failed");
            "error"
        }
    };

    Json(HealthResponse {
        status: if database == "ok" { "ok" } else { "degraded" },
        version: env!("CARGO_PKG_VERSION"),
        database,
    })
}
