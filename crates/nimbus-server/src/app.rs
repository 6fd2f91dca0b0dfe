//! Application builder.

use crate::di::{build_proxy_module, weather_service};
use axum::Router;
use nimbus_config::AppConfig;
use nimbus_core::NimbusResult;
use nimbus_rest::{create_router, AppState};

/// Application builder for constructing the HTTP router.
pub struct AppBuilder {
    config: Option<AppConfig>,
}

impl AppBuilder {
    /// Creates a new application builder.
    pub fn new() -> Self {
        Self { config: None }
    }

    /// Sets the configuration.
    pub fn with_config(mut self, config: AppConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Wires the DI module and returns the ready-to-serve router.
    pub fn build(self) -> NimbusResult<Router> {
        let config = self.config.unwrap_or_default();
        let module = build_proxy_module(&config)?;
        let state = AppState::new(weather_service(&module));
        Ok(create_router(state, &config.server))
    }
}

impl Default for AppBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_builder_new() {
        let builder = AppBuilder::new();
        assert!(builder.config.is_none());
    }

    #[test]
    fn test_app_builder_with_config() {
        let builder = AppBuilder::default().with_config(AppConfig::default());
        assert!(builder.config.is_some());
    }

    #[test]
    fn test_app_builder_build_with_default_config() {
        assert!(AppBuilder::new().build().is_ok());
    }
}
