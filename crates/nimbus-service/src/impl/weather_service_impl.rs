//! Cache-first weather service.

use crate::cache::WeatherCache;
use crate::upstream::WeatherUpstream;
use crate::weather_service::WeatherService;
use async_trait::async_trait;
use nimbus_core::{NimbusResult, WeatherQuery};
use serde_json::Value;
use shaku::Component;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

/// Weather service backed by an injected cache and upstream.
///
/// Concurrent misses for the same key are not coalesced; each fetches and
/// the last write wins.
#[derive(Component)]
#[shaku(interface = WeatherService)]
pub struct WeatherServiceComponent {
    #[shaku(inject)]
    cache: Arc<dyn WeatherCache>,
    #[shaku(inject)]
    upstream: Arc<dyn WeatherUpstream>,
    ttl: Duration,
}

impl WeatherServiceComponent {
    /// Creates a service outside of a DI module.
    pub fn new(cache: Arc<dyn WeatherCache>, upstream: Arc<dyn WeatherUpstream>, ttl: Duration) -> Self {
        Self { cache, upstream, ttl }
    }

    /// Builds the DI parameters for a given entry lifetime.
    #[must_use]
    pub fn parameters(ttl: Duration) -> WeatherServiceComponentParameters {
        WeatherServiceComponentParameters { ttl }
    }

    fn cached(&self, key: &str) -> Option<Value> {
        let payload = self.cache.get(key)?;
        match serde_json::from_slice(&payload) {
            Ok(value) => Some(value),
            Err(e) => {
                warn!("Ignoring undecodable cached payload for key '{}': {}", key, e);
                None
            }
        }
    }
}

#[async_trait]
impl WeatherService for WeatherServiceComponent {
    async fn current_weather(&self, query: &WeatherQuery) -> NimbusResult<Value> {
        let key = query.cache_key();

        if let Some(value) = self.cached(&key) {
            debug!("Cache hit for key '{}'", key);
            return Ok(value);
        }
        debug!("Cache miss for key '{}'", key);

        let payload = self.upstream.fetch(query).await?;
        self.cache.put(&key, payload.raw, self.ttl);

        Ok(payload.json)
    }
}

impl std::fmt::Debug for WeatherServiceComponent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WeatherServiceComponent")
            .field("ttl", &self.ttl)
            .finish_non_exhaustive()
    }
}
