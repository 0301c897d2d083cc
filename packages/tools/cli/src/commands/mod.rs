//! CLI 명령어

pub mod key;
pub mod token;
