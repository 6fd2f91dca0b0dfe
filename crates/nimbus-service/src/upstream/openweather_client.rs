//! OpenWeatherMap current-weather client.

use super::{UpstreamPayload, WeatherUpstream};
use async_trait::async_trait;
use nimbus_config::UpstreamConfig;
use nimbus_core::{NimbusError, NimbusResult, WeatherQuery};
use reqwest::Client;
use serde_json::Value;
use shaku::Component;
use tracing::{debug, warn};

/// HTTP client for the OpenWeatherMap `weather` endpoint.
#[derive(Component)]
#[shaku(interface = WeatherUpstream)]
pub struct OpenWeatherClient {
    client: Client,
    base_url: String,
    api_key: String,
    units: String,
}

impl OpenWeatherClient {
    /// Creates a client from upstream configuration.
    pub fn from_config(config: &UpstreamConfig) -> NimbusResult<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.timeout() {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| NimbusError::Internal(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self::with_client(client, config))
    }

    /// Creates a client around an existing `reqwest::Client`.
    #[must_use]
    pub fn with_client(client: Client, config: &UpstreamConfig) -> Self {
        Self {
            client,
            base_url: config.base_url.clone(),
            api_key: config.api_key.clone(),
            units: config.units.clone(),
        }
    }

    /// Converts this client into its DI component parameters.
    #[must_use]
    pub fn into_parameters(self) -> OpenWeatherClientParameters {
        OpenWeatherClientParameters {
            client: self.client,
            base_url: self.base_url,
            api_key: self.api_key,
            units: self.units,
        }
    }

    fn location_params(query: &WeatherQuery) -> Vec<(&'static str, &str)> {
        match query {
            WeatherQuery::City(name) => vec![("q", name.as_str())],
            WeatherQuery::Coordinates { lat, lon } => vec![("lat", lat.as_str()), ("lon", lon.as_str())],
        }
    }
}

#[async_trait]
impl WeatherUpstream for OpenWeatherClient {
    async fn fetch(&self, query: &WeatherQuery) -> NimbusResult<UpstreamPayload> {
        debug!("Fetching upstream weather for {}", query);

        // without_url() keeps the appid out of error messages
        let response = self
            .client
            .get(&self.base_url)
            .query(&Self::location_params(query))
            .query(&[("appid", self.api_key.as_str()), ("units", self.units.as_str())])
            .send()
            .await
            .map_err(|e| {
                let e = e.without_url();
                warn!("Upstream request for {} failed: {}", query, e);
                NimbusError::upstream_unavailable(e)
            })?;

        let status = response.status();
        if !status.is_success() {
            warn!("Upstream returned {} for {}", status, query);
            return Err(NimbusError::upstream_status(status.as_u16(), status.to_string()));
        }

        let raw = response.bytes().await.map_err(|e| {
            let e = e.without_url();
            warn!("Failed reading upstream body for {}: {}", query, e);
            NimbusError::malformed_upstream(e)
        })?;

        // Only the first JSON value is served; anything after it is dropped.
        let mut values = serde_json::Deserializer::from_slice(&raw).into_iter::<Value>();
        let json = match values.next() {
            Some(Ok(json)) => json,
            Some(Err(e)) => {
                warn!("Upstream body for {} is not valid JSON: {}", query, e);
                return Err(NimbusError::malformed_upstream(e));
            }
            None => {
                warn!("Upstream body for {} is empty", query);
                return Err(NimbusError::malformed_upstream("empty body"));
            }
        };
        let raw = raw.slice(..values.byte_offset());

        Ok(UpstreamPayload { raw, json })
    }
}

impl std::fmt::Debug for OpenWeatherClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenWeatherClient")
            .field("base_url", &self.base_url)
            .field("units", &self.units)
            .finish_non_exhaustive()
    }
}
