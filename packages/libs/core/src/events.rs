//! 토큰 수명주기 이벤트
//!
//! 발급/인증/폐기 시점에 fire-and-forget으로 발행됩니다.
//! 전달/순서 보장은 sink 구현체의 책임입니다.

use crate::claims::Claims;

/// 토큰 수명주기 이벤트
#[derive(Debug, Clone)]
pub enum TokenEvent {
    /// 토큰 발급됨
    Generated { subject_id: String, token: String },

    /// 토큰으로 사용자 인증됨
    Authenticated { subject_id: String },

    /// 토큰 폐기됨
    Revoked { payload: Claims },
}

/// 이벤트 sink
///
/// 전역 디스패처 대신 Guard/발급 경로에 주입해 사용합니다.
pub trait EventSink: Send + Sync {
    fn publish(&self, event: TokenEvent);
}

/// 이벤트를 버리는 sink
pub struct NullSink;

impl EventSink for NullSink {
    fn publish(&self, _event: TokenEvent) {}
}

/// tracing 레코드로 이벤트를 남기는 sink
pub struct TracingSink;

impl EventSink for TracingSink {
    fn publish(&self, event: TokenEvent) {
        match event {
            TokenEvent::Generated { subject_id, .. } => {
                tracing::info!(subject_id = %subject_id, "token generated");
            }
            TokenEvent::Authenticated { subject_id } => {
                tracing::info!(subject_id = %subject_id, "token authenticated");
            }
            TokenEvent::Revoked { payload } => {
                tracing::info!(jti = %payload.jti, "token revoked");
            }
        }
    }
}
