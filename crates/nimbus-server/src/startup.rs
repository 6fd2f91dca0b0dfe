//! Server startup utilities.

use nimbus_config::AppConfig;
use tracing::info;

/// Prints the startup banner.
pub fn print_banner() {
    info!(r#"
    _   ___           __
   / | / (_)___ ___  / /_  __  _______
  /  |/ / / __ `__ \/ __ \/ / / / ___/
 / /|  / / / / / / / /_/ / /_/ (__  )
/_/ |_/_/_/ /_/ /_/_.___/\__,_/____/

                weather proxy
    "#);
}

/// Prints server startup information.
pub fn print_startup_info(config: &AppConfig) {
    let separator = "=".repeat(60);
    let addr = config.server.addr();
    info!("{}", separator);
    info!("Weather:   http://{}/weather?city=<name>", addr);
    info!("Health:    http://{}/health", addr);
    info!("API Docs:  http://{}/api-docs/openapi.json", addr);
    info!("Upstream:  {}", config.upstream.base_url);
    info!("Cache TTL: {}s", config.cache.ttl_secs);
    info!("CORS:      {}", config.server.cors_origins.join(", "));
    info!("{}", separator);
}
