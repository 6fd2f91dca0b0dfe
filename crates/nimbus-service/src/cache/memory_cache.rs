//! In-process cache backed by a `HashMap` behind a reader/writer lock.

use super::WeatherCache;
use bytes::Bytes;
use parking_lot::RwLock;
use shaku::Component;
use std::collections::HashMap;
use std::time::{Duration, Instant};
use tracing::debug;

/// Lifetime of a cached upstream response (2 minutes).
pub const CACHE_TTL: Duration = Duration::from_secs(120);

/// A stored payload and the instant it stops being served.
#[derive(Debug, Clone)]
pub struct CacheEntry {
    payload: Bytes,
    /// `None` when `now + ttl` does not fit in an `Instant`.
    expires_at: Option<Instant>,
}

impl CacheEntry {
    /// Creates an entry that expires `ttl` after `now`.
    #[must_use]
    pub fn new(payload: Bytes, now: Instant, ttl: Duration) -> Self {
        Self {
            payload,
            expires_at: now.checked_add(ttl),
        }
    }

    /// An entry is valid only while `now` is strictly before its expiry.
    #[must_use]
    pub fn is_valid_at(&self, now: Instant) -> bool {
        self.expires_at.map_or(true, |expires_at| now < expires_at)
    }

    /// Returns the stored payload.
    #[must_use]
    pub fn payload(&self) -> &Bytes {
        &self.payload
    }
}

/// Shared in-memory weather cache.
#[derive(Component, Default)]
#[shaku(interface = WeatherCache)]
pub struct MemoryWeatherCache {
    #[shaku(default)]
    entries: RwLock<HashMap<String, CacheEntry>>,
}

impl MemoryWeatherCache {
    /// Creates an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl WeatherCache for MemoryWeatherCache {
    fn get(&self, key: &str) -> Option<Bytes> {
        let entries = self.entries.read();
        let now = Instant::now();

        match entries.get(key) {
            Some(entry) if entry.is_valid_at(now) => Some(entry.payload().clone()),
            Some(_) => {
                debug!("Cache entry for key '{}' has expired", key);
                None
            }
            None => None,
        }
    }

    fn put(&self, key: &str, payload: Bytes, ttl: Duration) {
        let entry = CacheEntry::new(payload, Instant::now(), ttl);
        self.entries.write().insert(key.to_string(), entry);
        debug!("Cached key '{}' with TTL {}s", key, ttl.as_secs());
    }

    fn len(&self) -> usize {
        self.entries.read().len()
    }
}

impl std::fmt::Debug for MemoryWeatherCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemoryWeatherCache")
            .field("entries", &self.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn test_miss_on_empty_cache() {
        let cache = MemoryWeatherCache::new();
        assert!(cache.get("London").is_none());
        assert!(cache.is_empty());
    }

    #[test]
    fn test_hit_returns_stored_bytes() {
        let cache = MemoryWeatherCache::new();
        cache.put("London", Bytes::from_static(b"{\"temp\":12}"), CACHE_TTL);

        assert_eq!(cache.get("London"), Some(Bytes::from_static(b"{\"temp\":12}")));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_keys_are_independent() {
        let cache = MemoryWeatherCache::new();
        cache.put("London", Bytes::from_static(b"1"), CACHE_TTL);
        cache.put("51.5,-0.12", Bytes::from_static(b"2"), CACHE_TTL);

        assert_eq!(cache.get("London"), Some(Bytes::from_static(b"1")));
        assert_eq!(cache.get("51.5,-0.12"), Some(Bytes::from_static(b"2")));
        assert!(cache.get("Paris").is_none());
    }

    #[test]
    fn test_zero_ttl_is_immediately_stale() {
        let cache = MemoryWeatherCache::new();
        cache.put("London", Bytes::from_static(b"{}"), Duration::ZERO);

        assert!(cache.get("London").is_none());
        // stale entries are kept, not purged
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_put_overwrites_previous_entry() {
        let cache = MemoryWeatherCache::new();
        cache.put("London", Bytes::from_static(b"old"), Duration::ZERO);
        cache.put("London", Bytes::from_static(b"new"), CACHE_TTL);

        assert_eq!(cache.get("London"), Some(Bytes::from_static(b"new")));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_entry_validity_is_strict() {
        let now = Instant::now();
        let entry = CacheEntry::new(Bytes::new(), now, Duration::from_secs(120));

        assert!(entry.is_valid_at(now));
        assert!(entry.is_valid_at(now + Duration::from_secs(119)));
        assert!(!entry.is_valid_at(now + Duration::from_secs(120)));
        assert!(!entry.is_valid_at(now + Duration::from_secs(121)));
    }

    #[test]
    fn test_unrepresentable_expiry_never_expires() {
        let now = Instant::now();
        let entry = CacheEntry::new(Bytes::new(), now, Duration::MAX);
        assert!(entry.is_valid_at(now + Duration::from_secs(86_400)));
    }

    #[test]
    fn test_concurrent_readers_and_writers() {
        let cache = Arc::new(MemoryWeatherCache::new());

        std::thread::scope(|scope| {
            for writer in 0..4 {
                let cache = Arc::clone(&cache);
                scope.spawn(move || {
                    for i in 0..100 {
                        let key = format!("city-{}", i % 10);
                        cache.put(&key, Bytes::from(format!("{}-{}", writer, i)), CACHE_TTL);
                    }
                });
            }
            for _ in 0..4 {
                let cache = Arc::clone(&cache);
                scope.spawn(move || {
                    for i in 0..100 {
                        let _ = cache.get(&format!("city-{}", i % 10));
                    }
                });
            }
        });

        assert_eq!(cache.len(), 10);
        for i in 0..10 {
            assert!(cache.get(&format!("city-{}", i)).is_some());
        }
    }
}
