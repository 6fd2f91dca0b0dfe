//! Application configuration structures.

use nimbus_core::telemetry::TelemetryConfig;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// Default upstream endpoint for current weather lookups.
pub const DEFAULT_UPSTREAM_URL: &str = "https://api.openweathermap.org/data/2.5/weather";

/// Local development origins allowed by default.
pub const DEFAULT_CORS_ORIGINS: [&str; 2] = ["http://localhost:5173", "http://localhost:3000"];

/// Root application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Application name and metadata.
    #[serde(default)]
    pub app: AppMetadata,

    /// HTTP server configuration.
    #[serde(default)]
    pub server: ServerConfig,

    /// Upstream weather API configuration.
    #[serde(default)]
    pub upstream: UpstreamConfig,

    /// Response cache configuration.
    #[serde(default)]
    pub cache: CacheConfig,

    /// Logging and tracing configuration.
    #[serde(default)]
    pub observability: TelemetryConfig,
}

/// Application metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppMetadata {
    /// Application name.
    pub name: String,
    /// Application version.
    pub version: String,
    /// Environment (development, staging, production).
    pub environment: String,
}

impl Default for AppMetadata {
    fn default() -> Self {
        Self {
            name: "nimbus".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            environment: "development".to_string(),
        }
    }
}

/// HTTP server configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Bind host.
    pub host: String,
    /// Bind port (`PORT` overrides).
    pub port: u16,
    /// Origins allowed to call the API from a browser.
    pub cors_origins: Vec<String>,
    /// How long browsers may cache a preflight response, in seconds.
    pub cors_max_age_secs: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            cors_origins: DEFAULT_CORS_ORIGINS.iter().map(ToString::to_string).collect(),
            cors_max_age_secs: 12 * 60 * 60,
        }
    }
}

impl ServerConfig {
    /// Returns the socket address to bind.
    #[must_use]
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Returns the CORS preflight max age as a Duration.
    #[must_use]
    pub const fn cors_max_age(&self) -> Duration {
        Duration::from_secs(self.cors_max_age_secs)
    }
}

/// Upstream weather API configuration.
#[derive(Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct UpstreamConfig {
    /// API key sent as `appid` (`OPENWEATHER_API_KEY` overrides).
    #[serde(skip_serializing)]
    pub api_key: String,
    /// Current-weather endpoint URL.
    pub base_url: String,
    /// Unit system requested from the upstream.
    pub units: String,
    /// Optional request timeout; unset means the transport default.
    pub timeout_secs: Option<u64>,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: DEFAULT_UPSTREAM_URL.to_string(),
            units: "metric".to_string(),
            timeout_secs: None,
        }
    }
}

impl UpstreamConfig {
    /// Returns the request timeout, if one is configured.
    #[must_use]
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}

impl fmt::Debug for UpstreamConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let api_key = if self.api_key.is_empty() { "<unset>" } else { "<redacted>" };
        f.debug_struct("UpstreamConfig")
            .field("api_key", &api_key)
            .field("base_url", &self.base_url)
            .field("units", &self.units)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

/// Response cache configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Lifetime of a cached upstream response in seconds.
    pub ttl_secs: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self { ttl_secs: 120 }
    }
}

impl CacheConfig {
    /// Returns the entry lifetime as a Duration.
    #[must_use]
    pub const fn ttl(&self) -> Duration {
        Duration::from_secs(self.ttl_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.addr(), "0.0.0.0:8080");
        assert_eq!(config.server.cors_origins, vec!["http://localhost:5173", "http://localhost:3000"]);
        assert_eq!(config.server.cors_max_age(), Duration::from_secs(43_200));
        assert_eq!(config.upstream.base_url, DEFAULT_UPSTREAM_URL);
        assert_eq!(config.upstream.units, "metric");
        assert!(config.upstream.timeout().is_none());
        assert_eq!(config.cache.ttl(), Duration::from_secs(120));
    }

    #[test]
    fn test_debug_redacts_api_key() {
        let upstream = UpstreamConfig {
            api_key: "super-secret".to_string(),
            ..UpstreamConfig::default()
        };
        let rendered = format!("{:?}", upstream);
        assert!(!rendered.contains("super-secret"));
        assert!(rendered.contains("<redacted>"));
    }

    #[test]
    fn test_partial_source_keeps_defaults() {
        let config: AppConfig = from_json(r#"{"server": {"port": 9000}}"#);
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.cache.ttl_secs, 120);
    }

    fn from_json(json: &str) -> AppConfig {
        config::Config::builder()
            .add_source(config::File::from_str(json, config::FileFormat::Json))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap()
    }
}
