//! 管理密钥校验
//!
//! 整个后台只有一个共享密钥。比较在 SHA-256 摘要上做常量时间校验，
//! 未配置密钥时拒绝所有管理请求。

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use ring::constant_time::verify_slices_are_equal;
use sha2::{Digest, Sha256};

use crate::core::ServerState;
use crate::utils::AppError;

/// Header carrying the shared secret on admin catalog routes
pub const ADMIN_PASSWORD_HEADER: &str = "x-admin-password";

/// Shared-secret verifier
#[derive(Clone)]
pub struct AdminAuth {
    /// SHA-256 of the configured secret; None when no secret is configured
    digest: Option<[u8; 32]>,
}

impl AdminAuth {
    pub fn new(secret: &str) -> Self {
        if secret.is_empty() {
            tracing::warn!("ADMIN_PASSWORD not set, all management requests will be rejected");
            return Self { digest: None };
        }

        let digest: [u8; 32] = Sha256::digest(secret.as_bytes()).into();
        let fingerprint = hex::encode(digest);
        tracing::info!(fingerprint = %&fingerprint[..8], "admin secret configured");
        Self {
            digest: Some(digest),
        }
    }

    /// Constant-time comparison of the candidate against the configured secret
    pub fn verify(&self, candidate: &str) -> bool {
        let Some(expected) = &self.digest else {
            return false;
        };
        let candidate: [u8; 32] = Sha256::digest(candidate.as_bytes()).into();
        verify_slices_are_equal(expected, &candidate).is_ok()
    }
}

/// Middleware guarding admin catalog routes via the `x-admin-password` header
pub async fn require_admin(
    State(state): State<ServerState>,
    req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let provided = req
        .headers()
        .get(ADMIN_PASSWORD_HEADER)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("");

    if !state.admin.verify(provided) {
        tracing::warn!(
            target: "security",
            path = %req.uri().path(),
            "unauthorized admin request"
        );
        return Err(AppError::Unauthorized);
    }

    Ok(next.run(req).await)
}
