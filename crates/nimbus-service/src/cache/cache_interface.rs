//! Cache interface trait.

use bytes::Bytes;
use nimbus_core::Interface;
use std::time::Duration;

/// Key-value store for raw upstream payloads with per-entry expiry.
///
/// Implementations must allow concurrent readers; a write excludes readers
/// and other writers.
pub trait WeatherCache: Interface + Send + Sync {
    /// Returns the payload stored under `key` if it has not yet expired.
    fn get(&self, key: &str) -> Option<Bytes>;

    /// Stores `payload` under `key`, replacing any previous entry.
    fn put(&self, key: &str, payload: Bytes, ttl: Duration);

    /// Number of stored entries, including expired ones not yet overwritten.
    fn len(&self) -> usize;

    /// Returns `true` if nothing has ever been stored.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
