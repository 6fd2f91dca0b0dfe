//! Upstream interface trait.

use bytes::Bytes;
use nimbus_core::{Interface, NimbusResult, WeatherQuery};
use async_trait::async_trait;

/// A successful upstream response: the raw body and its decoded form.
#[derive(Debug, Clone, PartialEq)]
pub struct UpstreamPayload {
    /// Body exactly as received, stored in the cache.
    pub raw: Bytes,
    /// Decoded JSON returned to the caller.
    pub json: serde_json::Value,
}

/// Source of current-weather payloads.
///
/// One call issues at most one outbound request; implementations never retry.
#[async_trait]
pub trait WeatherUpstream: Interface + Send + Sync {
    /// Fetches current weather for `query`.
    ///
    /// # Errors
    ///
    /// - `UpstreamUnavailable` when the request cannot be sent or no response arrives
    /// - `UpstreamStatus` when the upstream answers with a non-success status
    /// - `MalformedUpstream` when the body cannot be read or is not JSON
    async fn fetch(&self, query: &WeatherQuery) -> NimbusResult<UpstreamPayload>;
}
