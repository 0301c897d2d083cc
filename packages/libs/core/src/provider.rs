//! Identity provider capability
//!
//! subject id를 사용자 레코드로 해석하고, 자격 증명(credential)을 검증하는
//! 외부 협력자의 인터페이스입니다. Guard가 이 인터페이스만 바라봅니다.

use std::collections::HashMap;

use crate::error::Result;

/// 로그인 자격 증명 (예: email/password)
pub type Credentials = HashMap<String, String>;

/// 사용자 조회/검증 capability
pub trait IdentityProvider {
    /// 해석된 사용자 타입
    type Identity: Clone;

    /// subject id로 사용자 조회. 없으면 `None` (에러가 아님)
    fn retrieve_by_id(&self, subject_id: &str) -> Result<Option<Self::Identity>>;

    /// 자격 증명으로 사용자 조회. 없으면 `None`
    fn retrieve_by_credentials(&self, credentials: &Credentials) -> Result<Option<Self::Identity>>;

    /// 자격 증명이 해당 사용자의 것인지 검증
    fn validate_credentials(
        &self,
        identity: &Self::Identity,
        credentials: &Credentials,
    ) -> Result<bool>;
}
