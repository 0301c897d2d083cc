//! Pasekit 설정
//!
//! 전역 조회 없이 생성 시점에 명시적으로 전달되는 설정 구조체입니다.

use std::env;

use serde_json::{Map, Value};

use crate::error::{Error, Result};

/// 토큰 발급 설정
#[derive(Debug, Clone)]
pub struct PasetoConfig {
    /// hex 인코딩된 32바이트 비밀키
    pub secret_key: String,

    /// 토큰 만료 (분). `None`이면 무기한 토큰
    pub expiration: Option<i64>,

    /// 발급자 claim (iss)
    pub issuer: Option<String>,

    /// 대상 claim (aud)
    pub audience: Option<String>,

    /// 모든 토큰에 포함되는 기본 커스텀 claim
    pub default_claims: Map<String, Value>,
}

impl PasetoConfig {
    pub fn new(secret_key: impl Into<String>) -> Self {
        Self {
            secret_key: secret_key.into(),
            expiration: Some(60 * 24),
            issuer: None,
            audience: None,
            default_claims: Map::new(),
        }
    }

    /// 환경변수에서 설정 로드
    ///
    /// - `PASETO_SECRET_KEY`: 필수
    /// - `PASETO_EXPIRATION`: 분 단위. 빈 값이면 무기한
    /// - `PASETO_ISSUER`, `PASETO_AUDIENCE`
    /// - `PASETO_CLAIMS`: JSON object 문자열
    pub fn from_env() -> Result<Self> {
        let secret_key = env::var("PASETO_SECRET_KEY").map_err(|_| Error::Config {
            message: "PASETO_SECRET_KEY is not set".to_string(),
        })?;

        let expiration = match env::var("PASETO_EXPIRATION") {
            Ok(raw) if !raw.trim().is_empty() => {
                Some(raw.trim().parse::<i64>().map_err(|_| Error::Config {
                    message: format!("invalid PASETO_EXPIRATION: {raw}"),
                })?)
            }
            Ok(_) => None,
            Err(_) => Some(60 * 24),
        };

        let default_claims = match env::var("PASETO_CLAIMS") {
            Ok(raw) => match serde_json::from_str::<Value>(&raw) {
                Ok(Value::Object(map)) => map,
                _ => {
                    return Err(Error::Config {
                        message: "PASETO_CLAIMS must be a JSON object".to_string(),
                    })
                }
            },
            Err(_) => Map::new(),
        };

        Ok(Self {
            secret_key,
            expiration,
            issuer: env::var("PASETO_ISSUER").ok(),
            audience: env::var("PASETO_AUDIENCE").ok(),
            default_claims,
        })
    }
}
