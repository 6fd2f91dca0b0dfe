//! # Nimbus Server
//!
//! Entry point for the Nimbus caching weather proxy.

use nimbus_config::{AppConfig, ConfigLoader};
use nimbus_core::{
    telemetry::{init_telemetry, shutdown_telemetry, TelemetryConfig},
    NimbusError, NimbusResult,
};
use nimbus_server::{app::AppBuilder, startup};
use tokio::signal;
use tracing::{error, info, warn};

#[tokio::main]
async fn main() {
    let config = match ConfigLoader::from_default_location() {
        Ok(config) => config,
        Err(e) => {
            // Logging is configured from the config we failed to load.
            let _ = init_telemetry(&TelemetryConfig::default());
            error!("{}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = init_telemetry(&config.observability) {
        eprintln!("{}", e);
        std::process::exit(1);
    }

    startup::print_banner();
    info!("Version: {}", env!("CARGO_PKG_VERSION"));
    info!("Environment: {}", config.app.environment);

    let result = run(config).await;
    shutdown_telemetry();

    if let Err(e) = result {
        error!("Application error: {}", e);
        std::process::exit(1);
    }
}

async fn run(config: AppConfig) -> NimbusResult<()> {
    let router = AppBuilder::new().with_config(config.clone()).build()?;

    let addr = config.server.addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| NimbusError::Internal(format!("Failed to bind {}: {}", addr, e)))?;

    startup::print_startup_info(&config);
    info!("listening on {}", addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| NimbusError::Internal(format!("Server error: {}", e)))?;

    info!("Server shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                warn!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            info!("Received Ctrl+C, initiating graceful shutdown...");
        }
        () = terminate => {
            info!("Received terminate signal, initiating graceful shutdown...");
        }
    }
}
