//! 토큰 subject capability
//!
//! 토큰의 대상이 될 수 있는 엔티티(보통 사용자)가 제공해야 하는 정보와,
//! 설정/엔티티/호출별 옵션을 병합해 토큰을 발급하는 경로입니다.

use chrono::{DateTime, Duration, Utc};
use serde_json::{Map, Value};

use crate::config::PasetoConfig;
use crate::error::Result;
use crate::events::{EventSink, TokenEvent};
use crate::paseto::Paseto;

/// 토큰화 대상이 제공해야 하는 capability
pub trait TokenSubject {
    /// 토큰 식별자 (jti). 기본은 새 ULID
    fn token_id(&self) -> String {
        ulid::Ulid::new().to_string()
    }

    /// Subject 식별자 (sub)
    fn subject_id(&self) -> String;

    /// 유효 시작 시각 (nbf)
    fn valid_from(&self) -> Option<DateTime<Utc>> {
        None
    }

    /// 만료 시각 (exp). `None`이면 설정의 만료 정책을 따름
    fn valid_until(&self) -> Option<DateTime<Utc>> {
        None
    }

    /// 엔티티별 커스텀 claim
    fn custom_claims(&self) -> Map<String, Value> {
        Map::new()
    }
}

/// 호출별 발급 옵션 (subject/설정 값보다 우선)
#[derive(Debug, Clone, Default)]
pub struct TokenOptions {
    pub id: Option<String>,
    pub valid_from: Option<DateTime<Utc>>,
    pub valid_until: Option<DateTime<Utc>>,
    pub claims: Option<Map<String, Value>>,
}

/// subject에 대한 토큰 발급
///
/// 우선순위: 호출별 옵션 > subject > 설정.
/// 커스텀 claim은 설정의 기본 claim 위에 subject/호출별 claim을 덮어씁니다.
/// 발급에 성공하면 `TokenGenerated` 이벤트를 발행합니다.
pub fn issue_token<S: TokenSubject>(
    paseto: &Paseto,
    config: &PasetoConfig,
    subject: &S,
    opts: TokenOptions,
    events: &dyn EventSink,
) -> Result<String> {
    let nbf = opts.valid_from.or_else(|| subject.valid_from());

    let exp = opts
        .valid_until
        .or_else(|| subject.valid_until())
        .or_else(|| {
            config
                .expiration
                .map(|minutes| Utc::now() + Duration::minutes(minutes))
        });

    let mut claims = config.default_claims.clone();
    for (key, value) in opts.claims.unwrap_or_else(|| subject.custom_claims()) {
        claims.insert(key, value);
    }

    let mut builder = paseto
        .builder()
        .set_subject(subject.subject_id())
        .set_not_before(nbf)
        .set_expiration(exp)
        .set_jti(opts.id.unwrap_or_else(|| subject.token_id()))
        .set_claims(claims);

    if let Some(ref issuer) = config.issuer {
        builder = builder.set_issuer(issuer.clone());
    }
    if let Some(ref audience) = config.audience {
        builder = builder.set_audience(audience.clone());
    }

    let token = builder.get_token()?;

    events.publish(TokenEvent::Generated {
        subject_id: subject.subject_id(),
        token: token.clone(),
    });

    Ok(token)
}
