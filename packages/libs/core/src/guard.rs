//! 인증 Guard
//!
//! 토큰 검증기, 폐기 장부, identity provider를 조합한 인증 상태 머신입니다.
//! Guard는 요청(해석 사이클) 하나당 새로 만들어지는 단명 값이며,
//! 프로세스 전역 싱글턴으로 쓰면 안 됩니다.
//!
//! 해석 순서는 보안상 고정되어 있습니다:
//! parse → blacklist 확인 → identity provider 조회.
//! 폐기된 토큰은 identity provider까지 도달하지 못합니다.

use std::sync::Arc;

use crate::blacklist::Blacklist;
use crate::claims::Claims;
use crate::error::{Error, Result};
use crate::events::{EventSink, TokenEvent};
use crate::provider::{Credentials, IdentityProvider};
use crate::token::TokenValidator;

/// 요청에서 bearer 토큰 추출
///
/// `Authorization: Bearer <token>` 헤더를 우선하고, 없으면 요청 스코프의
/// 토큰 필드(예: query/form의 `token`)를 사용합니다. 둘 다 없으면 `None` —
/// 토큰 부재는 에러가 아닙니다.
pub fn bearer_from_request(auth_header: Option<&str>, token_field: Option<&str>) -> Option<String> {
    if let Some(value) = auth_header {
        if let Some(token) = value.strip_prefix("Bearer ") {
            return Some(token.to_string());
        }
    }

    token_field.map(|t| t.to_string())
}

/// 인증 Guard (해석 사이클 하나의 상태)
pub struct Guard<P: IdentityProvider> {
    validator: TokenValidator,
    blacklist: Blacklist,
    provider: P,
    events: Arc<dyn EventSink>,

    /// 이 사이클의 bearer 토큰
    token: Option<String>,

    /// 마지막으로 파싱된 페이로드 (memoized)
    payload: Option<Claims>,

    /// 해석된 사용자 (memoized)
    user: Option<P::Identity>,

    /// 이 사이클에서 해석이 완료되었는지 여부
    resolved: bool,

    /// 테스트용: memoization을 무시하고 항상 재해석
    always_resolve: bool,
}

impl<P: IdentityProvider> Guard<P> {
    pub fn new(
        validator: TokenValidator,
        blacklist: Blacklist,
        provider: P,
        events: Arc<dyn EventSink>,
        token: Option<String>,
    ) -> Self {
        Self {
            validator,
            blacklist,
            provider,
            events,
            token,
            payload: None,
            user: None,
            resolved: false,
            always_resolve: false,
        }
    }

    /// memoization을 끄고 항상 재해석 (테스트 전용 모드)
    pub fn with_always_resolve(mut self) -> Self {
        self.always_resolve = true;
        self
    }

    /// 현재 토큰으로 사용자 해석
    ///
    /// - 토큰 없음 → `Ok(None)` (에러 아님)
    /// - 파싱 실패 → `TokenExpired` / `TokenInvalid` 그대로 전파
    /// - 폐기된 토큰 → `TokenBlacklisted` (identity provider 조회 전에 차단)
    /// - provider에 사용자 없음 → `Ok(None)`
    pub fn resolve(&mut self) -> Result<Option<P::Identity>> {
        if self.resolved && !self.always_resolve {
            return Ok(self.user.clone());
        }

        let payload = match self.token_payload()? {
            Some(payload) => payload,
            None => {
                self.user = None;
                self.resolved = true;
                return Ok(None);
            }
        };

        if self.blacklist.has(&payload) {
            tracing::debug!(jti = %payload.jti, "blacklisted token rejected");
            return Err(Error::TokenBlacklisted);
        }

        let subject_id = payload.sub.clone().ok_or_else(|| Error::TokenInvalid {
            reason: "missing sub claim".to_string(),
        })?;

        let user = self.provider.retrieve_by_id(&subject_id)?;

        if user.is_some() {
            self.events
                .publish(TokenEvent::Authenticated { subject_id });
        }

        self.user = user.clone();
        self.resolved = true;
        Ok(user)
    }

    /// 자격 증명으로 인증 시도 (토큰을 거치지 않음)
    ///
    /// 성공하면 이 사이클의 해석 결과로 고정하고 사용자를 반환합니다.
    /// 실패하면 이전에 기억된 사용자도 비워집니다.
    pub fn attempt(&mut self, credentials: &Credentials) -> Result<Option<P::Identity>> {
        let user = match self.provider.retrieve_by_credentials(credentials)? {
            Some(identity) if self.provider.validate_credentials(&identity, credentials)? => {
                Some(identity)
            }
            _ => None,
        };

        self.user = user.clone();
        self.resolved = user.is_some();

        Ok(user)
    }

    /// 자격 증명 유효성 확인
    pub fn validate(&mut self, credentials: &Credentials) -> Result<bool> {
        Ok(self.attempt(credentials)?.is_some())
    }

    /// 로그아웃: 토큰을 폐기하고 해석 상태를 비움
    ///
    /// 페이로드를 얻었고 폐기 마커가 실제로 저장된 경우에만
    /// `TokenRevoked` 이벤트를 발행합니다. 해석된 사용자는 폐기 결과와
    /// 무관하게 비워집니다.
    pub fn logout(&mut self) -> Result<()> {
        let payload = self.token_payload()?;

        if let Some(payload) = payload {
            if self.blacklist.add(&payload).stored() {
                self.events.publish(TokenEvent::Revoked { payload });
            }
        }

        self.user = None;
        self.resolved = true;
        Ok(())
    }

    /// 현재 토큰의 페이로드 (memoized)
    ///
    /// 검증기는 사이클당 최대 한 번만 호출됩니다.
    pub fn token_payload(&mut self) -> Result<Option<Claims>> {
        if let Some(ref payload) = self.payload {
            return Ok(Some(payload.clone()));
        }

        let token = match self.token.as_deref() {
            Some(token) => token,
            None => return Ok(None),
        };

        let claims = self.validator.parse(token)?;
        self.payload = Some(claims.clone());
        Ok(Some(claims))
    }
}
