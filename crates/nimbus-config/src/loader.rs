//! Configuration loader with layered sources.

use crate::{format_validation_errors, AppConfig, ConfigValidator};
use config::{Config, ConfigError, Environment, File};
use nimbus_core::NimbusError;
use std::path::Path;
use tracing::{debug, info};

/// Environment variable holding the upstream API key.
pub const API_KEY_ENV: &str = "OPENWEATHER_API_KEY";

/// Environment variable holding the listen port.
pub const PORT_ENV: &str = "PORT";

/// Well-known, unprefixed environment variables that override everything else.
#[derive(Debug, Clone, Default)]
pub struct EnvOverrides {
    /// Value of `OPENWEATHER_API_KEY`.
    pub api_key: Option<String>,
    /// Value of `PORT`.
    pub port: Option<String>,
}

impl EnvOverrides {
    /// Reads the overrides from the process environment, treating empty values as unset.
    #[must_use]
    pub fn from_env() -> Self {
        let read = |name: &str| std::env::var(name).ok().filter(|v| !v.is_empty());
        Self {
            api_key: read(API_KEY_ENV),
            port: read(PORT_ENV),
        }
    }
}

/// Loads the layered application configuration.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Loads configuration from `config_dir` and the process environment.
    ///
    /// Configuration is loaded from multiple sources in order:
    /// 1. `config/default.toml` - Default values
    /// 2. `config/{environment}.toml` - Environment-specific overrides
    /// 3. `config/local.toml` - Uncommitted local overrides
    /// 4. Environment variables with `NIMBUS__` prefix (e.g. `NIMBUS__CACHE__TTL_SECS`)
    /// 5. `OPENWEATHER_API_KEY` and `PORT`
    pub fn load(config_dir: &str) -> Result<AppConfig, NimbusError> {
        // Load .env file if present
        if let Err(e) = dotenvy::dotenv() {
            debug!("No .env file found or error loading it: {}", e);
        }

        Self::load_config(config_dir, &EnvOverrides::from_env())
    }

    /// Loads configuration from the default location (`./config`).
    pub fn from_default_location() -> Result<AppConfig, NimbusError> {
        Self::load("./config")
    }

    /// Loads and validates configuration from the specified directory.
    pub fn load_config(config_dir: &str, overrides: &EnvOverrides) -> Result<AppConfig, NimbusError> {
        let environment =
            std::env::var("NIMBUS_ENVIRONMENT").unwrap_or_else(|_| "development".to_string());

        info!("Loading configuration for environment: {}", environment);

        let mut builder = Config::builder();

        for name in ["default", environment.as_str(), "local"] {
            let path = format!("{}/{}.toml", config_dir, name);
            if Path::new(&path).exists() {
                debug!("Loading config from: {}", path);
                builder = builder.add_source(File::with_name(&path).required(false));
            }
        }

        builder = builder
            .add_source(
                Environment::with_prefix("NIMBUS")
                    .separator("__")
                    .try_parsing(true),
            )
            .set_override_option("upstream.api_key", overrides.api_key.clone())
            .map_err(config_error_to_nimbus_error)?
            .set_override_option("server.port", overrides.port.clone())
            .map_err(config_error_to_nimbus_error)?;

        let app_config: AppConfig = builder
            .build()
            .and_then(|config| config.try_deserialize())
            .map_err(config_error_to_nimbus_error)?;

        ConfigValidator::validate(&app_config)
            .map_err(|errors| NimbusError::Configuration(format_validation_errors(&errors)))?;

        Ok(app_config)
    }
}

fn config_error_to_nimbus_error(err: ConfigError) -> NimbusError {
    NimbusError::Configuration(err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn with_key() -> EnvOverrides {
        EnvOverrides {
            api_key: Some("test-key".to_string()),
            port: None,
        }
    }

    #[test]
    fn test_missing_api_key_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let err = ConfigLoader::load_config(dir.path().to_str().unwrap(), &EnvOverrides::default())
            .unwrap_err();

        assert!(matches!(err, NimbusError::Configuration(_)));
        assert!(err.to_string().contains("OPENWEATHER_API_KEY"));
    }

    #[test]
    fn test_defaults_with_api_key() {
        let dir = tempfile::tempdir().unwrap();
        let config = ConfigLoader::load_config(dir.path().to_str().unwrap(), &with_key()).unwrap();

        assert_eq!(config.upstream.api_key, "test-key");
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.cache.ttl_secs, 120);
    }

    #[test]
    fn test_port_override() {
        let dir = tempfile::tempdir().unwrap();
        let overrides = EnvOverrides {
            port: Some("9191".to_string()),
            ..with_key()
        };
        let config = ConfigLoader::load_config(dir.path().to_str().unwrap(), &overrides).unwrap();

        assert_eq!(config.server.port, 9191);
    }

    #[test]
    fn test_non_numeric_port_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let overrides = EnvOverrides {
            port: Some("eighty".to_string()),
            ..with_key()
        };

        assert!(ConfigLoader::load_config(dir.path().to_str().unwrap(), &overrides).is_err());
    }

    #[test]
    fn test_file_layers() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("default.toml"),
            "[server]\nport = 7000\n\n[cache]\nttl_secs = 30\n",
        )
        .unwrap();
        fs::write(dir.path().join("local.toml"), "[cache]\nttl_secs = 45\n").unwrap();

        let config = ConfigLoader::load_config(dir.path().to_str().unwrap(), &with_key()).unwrap();

        assert_eq!(config.server.port, 7000);
        assert_eq!(config.cache.ttl_secs, 45);
    }

    #[test]
    fn test_env_overrides_beat_files() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("default.toml"),
            "[server]\nport = 7000\n\n[upstream]\napi_key = \"from-file\"\n",
        )
        .unwrap();
        let overrides = EnvOverrides {
            api_key: Some("from-env".to_string()),
            port: Some("7100".to_string()),
        };

        let config = ConfigLoader::load_config(dir.path().to_str().unwrap(), &overrides).unwrap();

        assert_eq!(config.upstream.api_key, "from-env");
        assert_eq!(config.server.port, 7100);
    }

    #[test]
    fn test_invalid_file_values_are_reported() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("default.toml"), "[cache]\nttl_secs = 0\n").unwrap();

        let err = ConfigLoader::load_config(dir.path().to_str().unwrap(), &with_key()).unwrap_err();
        assert!(err.to_string().contains("cache.ttl_secs"));
    }
}
