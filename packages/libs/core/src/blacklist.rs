//! 토큰 폐기 장부 (Blacklist)
//!
//! 로그아웃 등으로 무효화된 토큰의 jti를, 해당 토큰의 남은 수명 동안만
//! TTL 저장소에 보관합니다. 자연 만료된 엔트리는 저장소가 스스로 제거하므로
//! 명시적 삭제 경로는 없습니다.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use std::time::{Duration, Instant};

use crate::claims::Claims;

/// 폐기 키 네임스페이스 (다른 캐시 엔트리와의 충돌 방지)
const KEY_PREFIX: &str = "paseto_blacklist:";

/// 저장되는 마커 값
const MARKER: &str = "blacklisted";

/// TTL 저장소 capability
///
/// 키 단위 put/get이 원자적이라고 가정합니다. 타임아웃/재시도는
/// 구현체의 책임입니다.
pub trait BlacklistStore: Send + Sync {
    /// 마커 저장. 저장소가 쓰기를 수락하면 true
    fn put(&self, key: &str, marker: &str, ttl_seconds: u64) -> bool;

    /// 살아있는(미제거) 엔트리 존재 확인
    fn has(&self, key: &str) -> bool;
}

/// `Blacklist::add`의 결과
///
/// 원본 설계는 "이미 만료됨"과 "저장소 쓰기 실패"를 모두 false로
/// 뭉뚱그렸지만, 여기서는 명시적으로 구분합니다.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlacklistAdd {
    /// 폐기 마커가 저장됨
    Stored,
    /// 이미 만료되었거나 exp가 없어 보관할 것이 없음
    NotRevocable,
    /// 저장소가 쓰기를 거부함
    Rejected,
}

impl BlacklistAdd {
    /// 폐기 마커가 실제로 저장되었는지 여부
    pub fn stored(&self) -> bool {
        matches!(self, BlacklistAdd::Stored)
    }
}

/// jti 기반 폐기 장부
#[derive(Clone)]
pub struct Blacklist {
    store: Arc<dyn BlacklistStore>,
}

impl Blacklist {
    pub fn new(store: Arc<dyn BlacklistStore>) -> Self {
        Self { store }
    }

    /// 토큰을 남은 수명 동안 폐기 목록에 추가
    ///
    /// 이미 만료된 토큰은 검증 단계에서 어차피 거부되므로 저장하지 않습니다.
    pub fn add(&self, payload: &Claims) -> BlacklistAdd {
        let remaining = match payload.remaining_ttl() {
            Some(seconds) if seconds > 0 => seconds as u64,
            _ => return BlacklistAdd::NotRevocable,
        };

        if self.store.put(&self.key(payload), MARKER, remaining) {
            tracing::debug!(jti = %payload.jti, ttl = remaining, "token blacklisted");
            BlacklistAdd::Stored
        } else {
            BlacklistAdd::Rejected
        }
    }

    /// 토큰이 폐기 목록에 있는지 확인
    pub fn has(&self, payload: &Claims) -> bool {
        self.store.has(&self.key(payload))
    }

    fn key(&self, payload: &Claims) -> String {
        format!("{}{}", KEY_PREFIX, payload.jti)
    }
}

/// 인메모리 TTL 저장소
///
/// 테스트와 단일 노드 개발 환경용입니다. 만료된 엔트리는 조회 시점에
/// 지연 제거됩니다.
#[derive(Default)]
pub struct MemoryBlacklistStore {
    entries: RwLock<HashMap<String, Instant>>,
}

impl MemoryBlacklistStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl BlacklistStore for MemoryBlacklistStore {
    fn put(&self, key: &str, _marker: &str, ttl_seconds: u64) -> bool {
        let deadline = Instant::now() + Duration::from_secs(ttl_seconds);
        let mut entries = self.entries.write().unwrap();
        entries.insert(key.to_string(), deadline);
        true
    }

    fn has(&self, key: &str) -> bool {
        let now = Instant::now();

        {
            let entries = self.entries.read().unwrap();
            match entries.get(key) {
                Some(deadline) if *deadline > now => return true,
                None => return false,
                _ => {}
            }
        }

        // 만료된 엔트리 제거
        let mut entries = self.entries.write().unwrap();
        if let Some(deadline) = entries.get(key) {
            if *deadline <= now {
                entries.remove(key);
            }
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration as ChronoDuration, Utc};
    use serde_json::Map;

    fn claims_with_exp(jti: &str, exp: Option<chrono::DateTime<Utc>>) -> Claims {
        Claims {
            iss: None,
            aud: None,
            sub: Some("user_1".to_string()),
            exp,
            nbf: None,
            iat: Some(Utc::now()),
            jti: jti.to_string(),
            custom: Map::new(),
        }
    }

    fn blacklist() -> Blacklist {
        Blacklist::new(Arc::new(MemoryBlacklistStore::new()))
    }

    #[test]
    fn test_add_and_has() {
        let blacklist = blacklist();
        let payload = claims_with_exp("abc", Some(Utc::now() + ChronoDuration::seconds(5)));

        assert_eq!(blacklist.add(&payload), BlacklistAdd::Stored);
        assert!(blacklist.has(&payload));

        // 다른 jti는 영향 없음
        let other = claims_with_exp("def", Some(Utc::now() + ChronoDuration::seconds(5)));
        assert!(!blacklist.has(&other));
    }

    #[test]
    fn test_already_expired_not_stored() {
        let blacklist = blacklist();
        let payload = claims_with_exp("abc", Some(Utc::now() - ChronoDuration::seconds(5)));

        assert_eq!(blacklist.add(&payload), BlacklistAdd::NotRevocable);
        assert!(!blacklist.has(&payload));
    }

    #[test]
    fn test_no_expiry_not_stored() {
        let blacklist = blacklist();
        let payload = claims_with_exp("abc", None);

        assert_eq!(blacklist.add(&payload), BlacklistAdd::NotRevocable);
        assert!(!blacklist.has(&payload));
    }

    #[test]
    fn test_entry_evicted_after_ttl() {
        let blacklist = blacklist();
        let payload = claims_with_exp("abc", Some(Utc::now() + ChronoDuration::seconds(2)));

        assert_eq!(blacklist.add(&payload), BlacklistAdd::Stored);
        assert!(blacklist.has(&payload));

        std::thread::sleep(std::time::Duration::from_millis(2200));
        assert!(!blacklist.has(&payload));
    }

    #[test]
    fn test_store_rejection_reported() {
        struct RejectingStore;
        impl BlacklistStore for RejectingStore {
            fn put(&self, _key: &str, _marker: &str, _ttl_seconds: u64) -> bool {
                false
            }
            fn has(&self, _key: &str) -> bool {
                false
            }
        }

        let blacklist = Blacklist::new(Arc::new(RejectingStore));
        let payload = claims_with_exp("abc", Some(Utc::now() + ChronoDuration::seconds(5)));

        assert_eq!(blacklist.add(&payload), BlacklistAdd::Rejected);
    }
}
