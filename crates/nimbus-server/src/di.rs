//! Dependency injection module using Shaku.

use nimbus_config::AppConfig;
use nimbus_core::{module, HasComponent, NimbusResult};
use nimbus_service::{MemoryWeatherCache, OpenWeatherClient, WeatherService, WeatherServiceComponent};
use std::sync::Arc;

// Single-process proxy module.
// The service resolves its cache and upstream from the same module, so every
// request shares one cache for the lifetime of the process.
module! {
    pub ProxyModule {
        components = [
            MemoryWeatherCache,
            OpenWeatherClient,
            WeatherServiceComponent,
        ],
        providers = [],
    }
}

/// Builds the proxy module from application configuration.
pub fn build_proxy_module(config: &AppConfig) -> NimbusResult<Arc<ProxyModule>> {
    let client = OpenWeatherClient::from_config(&config.upstream)?;

    let module = ProxyModule::builder()
        .with_component_parameters::<OpenWeatherClient>(client.into_parameters())
        .with_component_parameters::<WeatherServiceComponent>(WeatherServiceComponent::parameters(
            config.cache.ttl(),
        ))
        .build();

    Ok(Arc::new(module))
}

/// Resolves the weather service from the module.
pub fn weather_service(module: &ProxyModule) -> Arc<dyn WeatherService> {
    module.resolve()
}
