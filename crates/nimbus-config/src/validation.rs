//! Configuration validation module.
//!
//! Checks every configuration value up front and reports all problems at
//! once, so the process fails before binding rather than on the first request.

use crate::AppConfig;
use std::fmt;
use url::Url;

/// Configuration validation error variants.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigValidationError {
    /// No upstream API key was supplied.
    MissingApiKey,
    /// Port number is invalid (must be 1-65535).
    InvalidPort { name: String, value: u16 },
    /// URL format is invalid.
    InvalidUrl { url_type: String, message: String },
    /// A CORS origin is not a valid `scheme://host[:port]` origin.
    InvalidCorsOrigin { value: String },
    /// Duration value must be positive.
    NonPositiveDuration { name: String, value: u64 },
    /// Sampling ratio must be between 0.0 and 1.0.
    InvalidSamplingRatio { value: f64 },
    /// Log level is invalid.
    InvalidLogLevel { value: String },
    /// Unit system is not one the upstream understands.
    InvalidUnits { value: String },
}

impl fmt::Display for ConfigValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingApiKey => {
                write!(f, "Please set OPENWEATHER_API_KEY environment variable")
            }
            Self::InvalidPort { name, value } => {
                write!(f, "Invalid port for {}: {} (must be 1-65535)", name, value)
            }
            Self::InvalidUrl { url_type, message } => {
                write!(f, "Invalid {} URL: {}", url_type, message)
            }
            Self::InvalidCorsOrigin { value } => {
                write!(f, "Invalid CORS origin: '{}'", value)
            }
            Self::NonPositiveDuration { name, value } => {
                write!(f, "Duration '{}' must be positive, got {}", name, value)
            }
            Self::InvalidSamplingRatio { value } => {
                write!(
                    f,
                    "Invalid sampling ratio: {} (must be between 0.0 and 1.0)",
                    value
                )
            }
            Self::InvalidLogLevel { value } => {
                write!(
                    f,
                    "Invalid log level: '{}' (valid: trace, debug, info, warn, error)",
                    value
                )
            }
            Self::InvalidUnits { value } => {
                write!(
                    f,
                    "Invalid units: '{}' (valid: standard, metric, imperial)",
                    value
                )
            }
        }
    }
}

impl std::error::Error for ConfigValidationError {}

/// Configuration validator.
pub struct ConfigValidator;

impl ConfigValidator {
    /// Valid log levels.
    const VALID_LOG_LEVELS: &'static [&'static str] = &["trace", "debug", "info", "warn", "error"];
    /// Unit systems accepted by the upstream.
    const VALID_UNITS: &'static [&'static str] = &["standard", "metric", "imperial"];

    /// Validates the entire application configuration.
    ///
    /// Returns Ok(()) if valid, or Err with all validation errors found.
    pub fn validate(config: &AppConfig) -> Result<(), Vec<ConfigValidationError>> {
        let mut errors = Vec::new();

        Self::validate_upstream(&config.upstream, &mut errors);
        Self::validate_server(&config.server, &mut errors);
        Self::validate_cache(&config.cache, &mut errors);
        Self::validate_observability(&config.observability, &mut errors);

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    fn validate_upstream(config: &crate::UpstreamConfig, errors: &mut Vec<ConfigValidationError>) {
        if config.api_key.trim().is_empty() {
            errors.push(ConfigValidationError::MissingApiKey);
        }

        match Url::parse(&config.base_url) {
            Ok(url) if matches!(url.scheme(), "http" | "https") => {}
            Ok(url) => errors.push(ConfigValidationError::InvalidUrl {
                url_type: "upstream".to_string(),
                message: format!("unsupported scheme '{}'", url.scheme()),
            }),
            Err(e) => errors.push(ConfigValidationError::InvalidUrl {
                url_type: "upstream".to_string(),
                message: e.to_string(),
            }),
        }

        if !Self::VALID_UNITS.contains(&config.units.as_str()) {
            errors.push(ConfigValidationError::InvalidUnits {
                value: config.units.clone(),
            });
        }

        if config.timeout_secs == Some(0) {
            errors.push(ConfigValidationError::NonPositiveDuration {
                name: "upstream.timeout_secs".to_string(),
                value: 0,
            });
        }
    }

    fn validate_server(config: &crate::ServerConfig, errors: &mut Vec<ConfigValidationError>) {
        // 0 would bind an ephemeral port nobody knows about
        if config.port == 0 {
            errors.push(ConfigValidationError::InvalidPort {
                name: "server.port".to_string(),
                value: config.port,
            });
        }

        for origin in &config.cors_origins {
            if !Self::is_origin(origin) {
                errors.push(ConfigValidationError::InvalidCorsOrigin {
                    value: origin.clone(),
                });
            }
        }
    }

    fn validate_cache(config: &crate::CacheConfig, errors: &mut Vec<ConfigValidationError>) {
        if config.ttl_secs == 0 {
            errors.push(ConfigValidationError::NonPositiveDuration {
                name: "cache.ttl_secs".to_string(),
                value: 0,
            });
        }
    }

    fn validate_observability(
        config: &nimbus_core::telemetry::TelemetryConfig,
        errors: &mut Vec<ConfigValidationError>,
    ) {
        let level = config.log_level.to_lowercase();
        if !Self::VALID_LOG_LEVELS.contains(&level.as_str()) {
            errors.push(ConfigValidationError::InvalidLogLevel {
                value: config.log_level.clone(),
            });
        }

        if !(0.0..=1.0).contains(&config.sampling_ratio) {
            errors.push(ConfigValidationError::InvalidSamplingRatio {
                value: config.sampling_ratio,
            });
        }

        if let Some(ref endpoint) = config.otlp_endpoint {
            if Url::parse(endpoint).is_err() {
                errors.push(ConfigValidationError::InvalidUrl {
                    url_type: "otlp_endpoint".to_string(),
                    message: format!("Invalid URL format: {}", endpoint),
                });
            }
        }
    }

    /// An origin is an http(s) URL with a host and nothing after the authority.
    fn is_origin(value: &str) -> bool {
        match Url::parse(value) {
            Ok(url) => {
                matches!(url.scheme(), "http" | "https")
                    && url.host_str().is_some()
                    && url.path() == "/"
                    && !value.ends_with('/')
                    && url.query().is_none()
                    && url.fragment().is_none()
            }
            Err(_) => false,
        }
    }
}

/// Formats validation errors for display.
#[must_use]
pub fn format_validation_errors(errors: &[ConfigValidationError]) -> String {
    let mut output = String::from("Configuration validation failed:\n");
    for (i, error) in errors.iter().enumerate() {
        output.push_str(&format!("  {}. {}\n", i + 1, error));
    }
    output
}
