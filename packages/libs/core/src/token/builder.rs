//! 토큰 빌더
//!
//! Fluent 체인으로 claim을 조립한 뒤 v4.local 토큰 문자열을 생성합니다.
//! iat은 빌더 생성 시각으로 고정되며 호출자가 덮어쓸 수 없습니다.

use chrono::{DateTime, Utc};
use rusty_paseto::core::{Key, Local, Paseto, PasetoNonce, PasetoSymmetricKey, Payload, V4};
use serde_json::{Map, Value};

use crate::claims::{Claims, RESERVED_CLAIMS};
use crate::error::{Error, Result};
use crate::key::KeyMaterial;

/// v4.local 토큰 빌더
pub struct TokenBuilder {
    key: KeyMaterial,
    iss: Option<String>,
    aud: Option<String>,
    sub: Option<String>,
    exp: Option<DateTime<Utc>>,
    nbf: Option<DateTime<Utc>>,
    iat: DateTime<Utc>,
    jti: Option<String>,
    custom: Map<String, Value>,
}

impl TokenBuilder {
    pub(crate) fn new(key: KeyMaterial) -> Self {
        Self {
            key,
            iss: None,
            aud: None,
            sub: None,
            exp: None,
            nbf: None,
            iat: Utc::now(),
            jti: None,
            custom: Map::new(),
        }
    }

    /// 발급자 claim (iss) 설정
    pub fn set_issuer(mut self, issuer: impl Into<String>) -> Self {
        self.iss = Some(issuer.into());
        self
    }

    /// 대상 claim (aud) 설정
    pub fn set_audience(mut self, audience: impl Into<String>) -> Self {
        self.aud = Some(audience.into());
        self
    }

    /// Subject claim (sub) 설정
    pub fn set_subject(mut self, subject: impl Into<String>) -> Self {
        self.sub = Some(subject.into());
        self
    }

    /// 만료 claim (exp) 설정
    ///
    /// `None`은 무기한 토큰을 의도적으로 허용합니다.
    pub fn set_expiration(mut self, time: Option<DateTime<Utc>>) -> Self {
        self.exp = time;
        self
    }

    /// 유효 시작 claim (nbf) 설정
    ///
    /// `None`이면 즉시 유효한 토큰입니다.
    pub fn set_not_before(mut self, time: Option<DateTime<Utc>>) -> Self {
        self.nbf = time;
        self
    }

    /// 토큰 식별자 claim (jti) 설정
    pub fn set_jti(mut self, jti: impl Into<String>) -> Self {
        self.jti = Some(jti.into());
        self
    }

    /// 커스텀 claim 설정
    ///
    /// 예약 키(iss/aud/sub/exp/nbf/iat/jti)는 무시됩니다.
    pub fn set_claims(mut self, claims: Map<String, Value>) -> Self {
        for (key, value) in claims {
            if RESERVED_CLAIMS.contains(&key.as_str()) {
                continue;
            }
            self.custom.insert(key, value);
        }
        self
    }

    /// 토큰 생성
    ///
    /// jti가 설정되지 않았으면 ULID를 생성해 채웁니다.
    pub fn get_token(self) -> Result<String> {
        let claims = Claims {
            iss: self.iss,
            aud: self.aud,
            sub: self.sub,
            exp: self.exp,
            nbf: self.nbf,
            iat: Some(self.iat),
            jti: self.jti.unwrap_or_else(|| ulid::Ulid::new().to_string()),
            custom: self.custom,
        };

        let payload = serde_json::to_string(&claims).map_err(|e| Error::BuildFailure {
            reason: format!("claim encoding failed: {e}"),
        })?;

        let key = PasetoSymmetricKey::<V4, Local>::from(Key::from(self.key.bytes()));

        // 토큰마다 새 랜덤 nonce
        let nonce = Key::<32>::try_new_random().map_err(|e| Error::BuildFailure {
            reason: format!("nonce generation failed: {e}"),
        })?;
        let nonce = PasetoNonce::<V4, Local>::from(&nonce);

        Paseto::<V4, Local>::builder()
            .set_payload(Payload::from(payload.as_str()))
            .try_encrypt(&key, &nonce)
            .map_err(|e| Error::BuildFailure {
                reason: format!("encryption failed: {e}"),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::token::TOKEN_HEADER;

    const KEY_HEX: &str = "000102030405060708090a0b0c0d0e0f101112131415161718191a1b1c1d1e1f";

    #[test]
    fn test_token_has_v4_local_header() {
        let key = KeyMaterial::from_hex(KEY_HEX).unwrap();
        let token = TokenBuilder::new(key)
            .set_subject("user_1")
            .get_token()
            .unwrap();

        assert!(token.starts_with(TOKEN_HEADER));
    }

    #[test]
    fn test_reserved_keys_not_shadowed() {
        let key = KeyMaterial::from_hex(KEY_HEX).unwrap();
        let mut custom = Map::new();
        custom.insert("sub".to_string(), Value::String("evil".to_string()));
        custom.insert("role".to_string(), Value::String("admin".to_string()));

        let token = TokenBuilder::new(key.clone())
            .set_subject("user_1")
            .set_claims(custom)
            .get_token()
            .unwrap();

        let claims = crate::token::TokenValidator::new(key).parse(&token).unwrap();
        assert_eq!(claims.sub.as_deref(), Some("user_1"));
        assert_eq!(claims.get("role"), Some(&Value::String("admin".to_string())));
        assert!(claims.get("sub").is_none());
    }

    #[test]
    fn test_same_claims_produce_distinct_tokens() {
        // nonce가 토큰마다 랜덤이므로 동일한 claim도 다른 암호문이 된다
        let key = KeyMaterial::from_hex(KEY_HEX).unwrap();

        let first = TokenBuilder::new(key.clone())
            .set_subject("user_1")
            .set_jti("jti-1")
            .get_token()
            .unwrap();
        let second = TokenBuilder::new(key.clone())
            .set_subject("user_1")
            .set_jti("jti-1")
            .get_token()
            .unwrap();

        assert_ne!(first, second);

        let claims = crate::token::TokenValidator::new(key).parse(&second).unwrap();
        assert_eq!(claims.jti, "jti-1");
    }

    #[test]
    fn test_jti_generated_when_unset() {
        let key = KeyMaterial::from_hex(KEY_HEX).unwrap();
        let token = TokenBuilder::new(key.clone()).get_token().unwrap();

        let claims = crate::token::TokenValidator::new(key).parse(&token).unwrap();
        assert_eq!(claims.jti.len(), 26); // ULID
    }
}
