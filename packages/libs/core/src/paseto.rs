//! Paseto 진입점
//!
//! 하나의 비밀키를 보관하며, 그 키에 바인딩된 빌더/검증기를 생성합니다.

use crate::error::Result;
use crate::key::KeyMaterial;
use crate::token::{TokenBuilder, TokenValidator};

/// 토큰 발급/검증 진입점
#[derive(Debug, Clone)]
pub struct Paseto {
    key: KeyMaterial,
}

impl Paseto {
    /// hex 인코딩된 비밀키로 생성
    ///
    /// 키가 유효하지 않으면 `InvalidKey`.
    pub fn new(secret_key: &str) -> Result<Self> {
        Ok(Self {
            key: KeyMaterial::from_hex(secret_key)?,
        })
    }

    /// 이 키에 바인딩된 새 토큰 빌더
    pub fn builder(&self) -> TokenBuilder {
        TokenBuilder::new(self.key.clone())
    }

    /// 이 키에 바인딩된 새 토큰 검증기
    pub fn validator(&self) -> TokenValidator {
        TokenValidator::new(self.key.clone())
    }
}
