//! 토큰 Claims
//!
//! PASETO v4.local 페이로드 구조입니다. 예약 필드(iss/aud/sub/exp/nbf/iat/jti)와
//! 커스텀 claim 영역으로 구성되며, 직렬화/역직렬화를 거쳐도 내용이 보존됩니다.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// 예약된 claim 키
pub const RESERVED_CLAIMS: &[&str] = &["iss", "aud", "sub", "exp", "nbf", "iat", "jti"];

/// 토큰 페이로드
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Claims {
    /// 발급자 (iss)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub iss: Option<String>,

    /// 대상 (aud)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub aud: Option<String>,

    /// Subject (sub)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sub: Option<String>,

    /// 만료 시각 (exp) - 없으면 무기한 토큰
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exp: Option<DateTime<Utc>>,

    /// 유효 시작 시각 (nbf) - 없으면 즉시 유효
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nbf: Option<DateTime<Utc>>,

    /// 발급 시각 (iat)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub iat: Option<DateTime<Utc>>,

    /// 토큰 식별자 (jti, revocation/audit용)
    pub jti: String,

    /// 커스텀 claim 영역
    #[serde(flatten)]
    pub custom: Map<String, Value>,
}

impl Claims {
    /// 만료 여부 확인
    pub fn is_expired(&self) -> bool {
        match self.exp {
            Some(exp) => Utc::now() > exp,
            None => false,
        }
    }

    /// 주어진 시각에 유효한지 확인 (nbf ≤ now ≤ exp)
    pub fn valid_at(&self, now: DateTime<Utc>) -> bool {
        if let Some(nbf) = self.nbf {
            if now < nbf {
                return false;
            }
        }
        if let Some(exp) = self.exp {
            if now > exp {
                return false;
            }
        }
        true
    }

    /// 남은 TTL (초). exp가 없으면 None
    pub fn remaining_ttl(&self) -> Option<i64> {
        let exp = self.exp?;
        let diff = exp - Utc::now();
        Some(diff.num_seconds().max(0))
    }

    /// 커스텀 claim 조회
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.custom.get(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn base_claims() -> Claims {
        Claims {
            iss: Some("https://issuer.test".to_string()),
            aud: Some("https://audience.test".to_string()),
            sub: Some("user_123".to_string()),
            exp: Some(Utc::now() + Duration::hours(1)),
            nbf: None,
            iat: Some(Utc::now()),
            jti: ulid::Ulid::new().to_string(),
            custom: Map::new(),
        }
    }

    #[test]
    fn test_expiry() {
        let mut claims = base_claims();
        assert!(!claims.is_expired());
        assert!(claims.remaining_ttl().unwrap() > 3500);

        claims.exp = Some(Utc::now() - Duration::seconds(10));
        assert!(claims.is_expired());
        assert_eq!(claims.remaining_ttl(), Some(0));

        claims.exp = None;
        assert!(!claims.is_expired());
        assert_eq!(claims.remaining_ttl(), None);
    }

    #[test]
    fn test_valid_at_window() {
        let now = Utc::now();
        let mut claims = base_claims();
        assert!(claims.valid_at(now));

        claims.nbf = Some(now + Duration::minutes(5));
        assert!(!claims.valid_at(now));
        assert!(claims.valid_at(now + Duration::minutes(6)));
    }

    #[test]
    fn test_custom_claims_round_trip() {
        let mut claims = base_claims();
        claims.custom.insert("role".to_string(), Value::String("admin".to_string()));
        claims.custom.insert("level".to_string(), Value::from(3));

        let json = serde_json::to_string(&claims).unwrap();
        let parsed: Claims = serde_json::from_str(&json).unwrap();

        assert_eq!(parsed, claims);
        assert_eq!(parsed.get("role"), Some(&Value::String("admin".to_string())));
    }
}
