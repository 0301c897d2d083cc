//! 토큰 빌더와 검증기
//!
//! 암호화/복호화는 rusty_paseto(core layer)에 위임하고,
//! claim 조립과 rule pipeline은 이 모듈이 담당합니다.

mod builder;
mod parser;

pub use builder::TokenBuilder;
pub use parser::{Rule, TokenValidator};

/// v4.local 토큰 헤더 (version + purpose)
pub const TOKEN_HEADER: &str = "v4.local.";
