//! Cached current-weather controller.

use crate::{
    extractors::{WeatherLookup, WeatherParams},
    responses::ApiResult,
    state::AppState,
};
use axum::{extract::State, routing::get, Json, Router};
use nimbus_core::ErrorResponse;
use serde_json::Value;
use tracing::debug;

/// Creates the weather router.
pub fn router() -> Router<AppState> {
    Router::new().route("/weather", get(get_weather))
}

/// Current weather for a city or a coordinate pair.
///
/// The body is the upstream JSON, passed through unchanged.
#[utoipa::path(
    get,
    path = "/weather",
    tag = "weather",
    params(WeatherParams),
    responses(
        (status = 200, description = "Upstream weather payload", body = serde_json::Value),
        (status = 400, description = "Neither city nor lat & lon supplied", body = ErrorResponse),
        (status = 404, description = "Upstream status forwarded, e.g. unknown city", body = ErrorResponse),
        (status = 500, description = "Upstream body was not valid JSON", body = ErrorResponse),
        (status = 502, description = "Upstream unreachable", body = ErrorResponse)
    )
)]
pub async fn get_weather(
    State(state): State<AppState>,
    WeatherLookup(query): WeatherLookup,
) -> ApiResult<Value> {
    debug!("Weather request: {}", query);

    let weather = state.weather_service.current_weather(&query).await?;
    Ok(Json(weather))
}
