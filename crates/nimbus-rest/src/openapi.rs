//! OpenAPI documentation for the REST API.

use crate::controllers::HealthResponse;
use nimbus_core::ErrorResponse;
use utoipa::OpenApi;

/// OpenAPI documentation for the Nimbus weather proxy.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Nimbus Weather Proxy",
        description = "Caching proxy in front of the OpenWeatherMap current-weather API",
        license(
            name = "MIT",
            url = "https://opensource.org/licenses/MIT"
        )
    ),
    paths(
        crate::controllers::weather_controller::get_weather,
        crate::controllers::health_controller::health_check,
    ),
    components(schemas(ErrorResponse, HealthResponse)),
    tags(
        (name = "weather", description = "Cached weather lookups"),
        (name = "health", description = "Liveness")
    )
)]
pub struct ApiDoc;
