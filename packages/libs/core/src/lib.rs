//! psk-core: Pasekit 핵심 라이브러리
//!
//! PASETO v4.local 토큰의 발급, 검증, 폐기(blacklist)와
//! 이를 조합한 인증 Guard를 제공합니다.
//!
//! # 모듈 구조
//!
//! - `key`: 32바이트 대칭키 검증 및 보관
//! - `claims`: 토큰 페이로드(Claims) 구조
//! - `token`: 토큰 빌더와 검증기(rule pipeline)
//! - `blacklist`: jti 기반 폐기 장부
//! - `guard`: 인증 상태 머신 (resolve / attempt / logout)
//! - `config`: 명시적 설정 구조체
//! - `events`: 토큰 수명주기 이벤트
//! - `error`: 공통 에러 타입

pub mod blacklist;
pub mod claims;
pub mod config;
pub mod error;
pub mod events;
pub mod guard;
pub mod key;
pub mod paseto;
pub mod provider;
pub mod subject;
pub mod token;

pub use claims::Claims;
pub use error::{Error, Result};
pub use paseto::Paseto;
