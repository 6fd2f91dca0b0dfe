//! Weather service trait definition.

use async_trait::async_trait;
use nimbus_core::{Interface, NimbusResult, WeatherQuery};

/// Current-weather lookup with response caching.
#[async_trait]
pub trait WeatherService: Interface + Send + Sync {
    /// Returns the current weather for `query`, from cache when still fresh.
    async fn current_weather(&self, query: &WeatherQuery) -> NimbusResult<serde_json::Value>;
}
