//! Application state for Axum handlers.

use nimbus_service::WeatherService;
use std::sync::Arc;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub weather_service: Arc<dyn WeatherService>,
}

impl AppState {
    /// Creates a new application state.
    pub fn new(weather_service: Arc<dyn WeatherService>) -> Self {
        Self { weather_service }
    }
}
