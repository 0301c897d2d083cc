//! 공통 에러 타입
//!
//! Pasekit 전체에서 사용되는 에러 타입을 정의합니다.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Pasekit 공통 에러
#[derive(Debug, Error)]
pub enum Error {
    // ─────────────────────────────────────────────────────────────────────────────
    // Key / Build Errors
    // ─────────────────────────────────────────────────────────────────────────────
    #[error("invalid key: {reason}")]
    InvalidKey { reason: String },

    #[error("token build failed: {reason}")]
    BuildFailure { reason: String },

    // ─────────────────────────────────────────────────────────────────────────────
    // Token Errors
    // ─────────────────────────────────────────────────────────────────────────────
    #[error("token expired")]
    TokenExpired,

    #[error("invalid token: {reason}")]
    TokenInvalid { reason: String },

    #[error("token blacklisted")]
    TokenBlacklisted,

    // ─────────────────────────────────────────────────────────────────────────────
    // Collaborator Errors
    // ─────────────────────────────────────────────────────────────────────────────
    #[error("invalid configuration: {message}")]
    Config { message: String },

    #[error("identity provider error: {message}")]
    Provider { message: String },

    // ─────────────────────────────────────────────────────────────────────────────
    // Serialization Errors
    // ─────────────────────────────────────────────────────────────────────────────
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// HTTP 상태 코드로 변환
    pub fn status_code(&self) -> u16 {
        match self {
            // 401 Unauthorized
            Error::TokenExpired | Error::TokenInvalid { .. } => 401,

            // 403 Forbidden
            Error::TokenBlacklisted => 403,

            // 500 Internal Server Error
            Error::InvalidKey { .. }
            | Error::BuildFailure { .. }
            | Error::Config { .. }
            | Error::Provider { .. }
            | Error::Json(_) => 500,
        }
    }

    /// 에러 코드 (클라이언트용)
    pub fn code(&self) -> &'static str {
        match self {
            Error::InvalidKey { .. } => "INVALID_KEY",
            Error::BuildFailure { .. } => "TOKEN_BUILD_FAILED",
            Error::TokenExpired => "TOKEN_EXPIRED",
            Error::TokenInvalid { .. } => "TOKEN_INVALID",
            Error::TokenBlacklisted => "TOKEN_BLACKLISTED",
            Error::Config { .. } => "CONFIG_ERROR",
            Error::Provider { .. } => "PROVIDER_ERROR",
            Error::Json(_) => "JSON_ERROR",
        }
    }
}
