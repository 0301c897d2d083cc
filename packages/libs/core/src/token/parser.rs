//! 토큰 검증기
//!
//! v4.local 토큰을 복호화한 뒤 rule pipeline을 순서대로 평가합니다.
//! 시간 규칙(ValidAt/NotExpired) 위반은 `TokenExpired`,
//! 그 외 모든 규칙 위반은 `TokenInvalid`로 구분됩니다 —
//! 에러 메시지 문자열이 아니라 규칙의 종류가 에러 종류를 결정합니다.

use chrono::{DateTime, Utc};
use rusty_paseto::core::{Key, Local, Paseto, PasetoSymmetricKey, V4};

use crate::claims::Claims;
use crate::error::{Error, Result};
use crate::key::KeyMaterial;
use crate::token::TOKEN_HEADER;

/// 검증 규칙
///
/// ValidAt과 NotExpired는 항상 평가되는 기본 규칙이고,
/// IssuedBy/ForAudience는 설정 시 추가됩니다.
#[derive(Debug, Clone, PartialEq)]
pub enum Rule {
    /// 현재 시각이 [nbf, exp] 구간 안이어야 함
    ValidAt,
    /// exp가 지나지 않았어야 함 (ValidAt과 중복이지만 명시적으로 유지)
    NotExpired,
    /// iss가 기대값과 일치해야 함
    IssuedBy(String),
    /// aud가 기대값과 일치해야 함
    ForAudience(String),
}

impl Rule {
    fn check(&self, claims: &Claims, now: DateTime<Utc>) -> Result<()> {
        match self {
            Rule::ValidAt => {
                if !claims.valid_at(now) {
                    return Err(Error::TokenExpired);
                }
                Ok(())
            }
            Rule::NotExpired => {
                if let Some(exp) = claims.exp {
                    if now > exp {
                        return Err(Error::TokenExpired);
                    }
                }
                Ok(())
            }
            Rule::IssuedBy(expected) => match claims.iss.as_deref() {
                Some(iss) if iss == expected => Ok(()),
                _ => Err(Error::TokenInvalid {
                    reason: "issuer mismatch".to_string(),
                }),
            },
            Rule::ForAudience(expected) => match claims.aud.as_deref() {
                Some(aud) if aud == expected => Ok(()),
                _ => Err(Error::TokenInvalid {
                    reason: "audience mismatch".to_string(),
                }),
            },
        }
    }
}

/// v4.local 토큰 검증기
///
/// 하나의 키에 바인딩되며 v4/local 외의 토큰은 받지 않습니다.
pub struct TokenValidator {
    key: KeyMaterial,
    rules: Vec<Rule>,
}

impl TokenValidator {
    pub(crate) fn new(key: KeyMaterial) -> Self {
        Self {
            key,
            rules: vec![Rule::ValidAt, Rule::NotExpired],
        }
    }

    /// 발급자(iss) 검증 규칙 추가
    pub fn set_issued_by(mut self, issuer: impl Into<String>) -> Self {
        self.rules.push(Rule::IssuedBy(issuer.into()));
        self
    }

    /// 대상(aud) 검증 규칙 추가
    pub fn set_for_audience(mut self, audience: impl Into<String>) -> Self {
        self.rules.push(Rule::ForAudience(audience.into()));
        self
    }

    /// 토큰 복호화 및 검증
    ///
    /// 1. v4.local 헤더 확인
    /// 2. 복호화/인증 (rusty_paseto)
    /// 3. claim 역직렬화
    /// 4. rule pipeline 평가 (추가된 순서대로)
    ///
    /// 어느 단계든 실패하면 복호화된 claim은 버려집니다.
    pub fn parse(&self, token: &str) -> Result<Claims> {
        if !token.starts_with(TOKEN_HEADER) {
            return Err(Error::TokenInvalid {
                reason: "not a v4.local token".to_string(),
            });
        }

        let key = PasetoSymmetricKey::<V4, Local>::from(Key::from(self.key.bytes()));

        let payload = Paseto::<V4, Local>::try_decrypt(token, &key, None, None).map_err(|_| {
            Error::TokenInvalid {
                reason: "decryption or authentication failed".to_string(),
            }
        })?;

        let claims: Claims = serde_json::from_str(&payload).map_err(|_| Error::TokenInvalid {
            reason: "malformed claim payload".to_string(),
        })?;

        let now = Utc::now();
        for rule in &self.rules {
            rule.check(&claims, now)?;
        }

        Ok(claims)
    }
}
