//! 대칭키 검증 및 보관
//!
//! hex 인코딩된 32바이트 비밀키를 검증하고 보관합니다.
//! 원본 바이트는 빌더/검증기 생성 경로에서만 접근할 수 있으며,
//! 로그나 직렬화 경로로 노출되지 않습니다.

use crate::error::{Error, Result};

/// PASETO v4.local 대칭키 (정확히 32바이트)
#[derive(Clone)]
pub struct KeyMaterial {
    bytes: [u8; 32],
}

impl KeyMaterial {
    /// hex 문자열에서 키 생성
    ///
    /// 유효한 hex가 아니거나 디코딩 결과가 32바이트가 아니면 `InvalidKey`.
    pub fn from_hex(secret: &str) -> Result<Self> {
        let trimmed = secret.trim();

        if !trimmed.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(Error::InvalidKey {
                reason: "secret key must be a hex encoded string".to_string(),
            });
        }

        let decoded = decode_hex(trimmed).ok_or_else(|| Error::InvalidKey {
            reason: "failed converting secret key to binary".to_string(),
        })?;

        let bytes: [u8; 32] = decoded.as_slice().try_into().map_err(|_| Error::InvalidKey {
            reason: format!("secret key must be 32 bytes, got {}", decoded.len()),
        })?;

        Ok(Self { bytes })
    }

    /// 원본 키 바이트 (crate 내부 전용)
    pub(crate) fn bytes(&self) -> [u8; 32] {
        self.bytes
    }
}

// 키 내용은 절대 출력하지 않음
impl std::fmt::Debug for KeyMaterial {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("KeyMaterial(..)")
    }
}

fn decode_hex(input: &str) -> Option<Vec<u8>> {
    if input.len() % 2 != 0 {
        return None;
    }

    let mut bytes = Vec::with_capacity(input.len() / 2);
    let mut chars = input.chars();
    while let (Some(h), Some(l)) = (chars.next(), chars.next()) {
        let hi = h.to_digit(16)?;
        let lo = l.to_digit(16)?;
        bytes.push(((hi << 4) | lo) as u8);
    }
    Some(bytes)
}
