//! Upstream weather API access.

mod openweather_client;
mod upstream_interface;

pub use openweather_client::{OpenWeatherClient, OpenWeatherClientParameters};
pub use upstream_interface::{UpstreamPayload, WeatherUpstream};
