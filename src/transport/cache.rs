//! The cache capability and a bundled in-memory implementation.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, Instant};

/// A capability that stores raw response bodies under their request URL.
///
/// Freshness is the capability's job: the client only hands over the TTL it
/// was configured with and trusts the answer. No eviction or size policy is
/// mandated.
pub trait ResponseCache: Send + Sync {
    /// Whether a body stored under `key` is still within `ttl`.
    fn is_fresh(&self, key: &str, ttl: Duration) -> bool;

    /// Returns the stored body, if any.
    fn get(&self, key: &str) -> Option<String>;

    /// Stores `body` under `key`, replacing any previous entry.
    fn put(&self, key: &str, body: &str);
}

/// An in-memory, TTL-checked response cache.
///
/// Entries live for the process lifetime unless overwritten; freshness is
/// judged against the insertion instant on every lookup.
#[derive(Debug, Default)]
pub struct MemoryCache {
    entries: Mutex<HashMap<String, (Instant, String)>>,
}

impl MemoryCache {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ResponseCache for MemoryCache {
    fn is_fresh(&self, key: &str, ttl: Duration) -> bool {
        let entries = self.entries.lock().unwrap();
        entries
            .get(key)
            .is_some_and(|(stored_at, _)| stored_at.elapsed() <= ttl)
    }

    fn get(&self, key: &str) -> Option<String> {
        let entries = self.entries.lock().unwrap();
        entries.get(key).map(|(_, body)| body.clone())
    }

    fn put(&self, key: &str, body: &str) {
        let mut entries = self.entries.lock().unwrap();
        entries.insert(key.to_string(), (Instant::now(), body.to_string()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stored_bodies_come_back_verbatim() {
        let cache = MemoryCache::new();
        cache.put("http://example/a", "body-a");
        assert_eq!(cache.get("http://example/a").as_deref(), Some("body-a"));
        assert_eq!(cache.get("http://example/b"), None);
    }

    #[test]
    fn freshness_follows_the_ttl() {
        let cache = MemoryCache::new();
        cache.put("k", "v");
        assert!(cache.is_fresh("k", Duration::from_secs(60)));
        assert!(!cache.is_fresh("k", Duration::ZERO));
        assert!(!cache.is_fresh("missing", Duration::from_secs(60)));
    }

    #[test]
    fn put_overwrites_previous_entries() {
        let cache = MemoryCache::new();
        cache.put("k", "old");
        cache.put("k", "new");
        assert_eq!(cache.get("k").as_deref(), Some("new"));
    }
}
