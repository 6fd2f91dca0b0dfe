//! Weather lookup extractor.

use crate::responses::AppError;
use axum::{
    async_trait,
    extract::{FromRequestParts, Query},
    http::request::Parts,
};
use nimbus_core::{NimbusError, WeatherQuery};
use serde::Deserialize;
use utoipa::IntoParams;

/// Raw query parameters accepted by `GET /weather`.
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct WeatherParams {
    /// City name, e.g. `London`. Takes precedence over coordinates.
    pub city: Option<String>,
    /// Latitude; requires `lon`.
    pub lat: Option<String>,
    /// Longitude; requires `lat`.
    pub lon: Option<String>,
}

impl WeatherParams {
    /// Collects the known parameters from decoded query pairs.
    ///
    /// When a key repeats, the first occurrence wins; unknown keys are ignored.
    pub fn from_pairs<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let mut params = Self::default();
        for (key, value) in pairs {
            let slot = match key.as_str() {
                "city" => &mut params.city,
                "lat" => &mut params.lat,
                "lon" => &mut params.lon,
                _ => continue,
            };
            if slot.is_none() {
                *slot = Some(value);
            }
        }
        params
    }
}

impl TryFrom<WeatherParams> for WeatherQuery {
    type Error = NimbusError;

    fn try_from(params: WeatherParams) -> Result<Self, Self::Error> {
        WeatherQuery::from_params(
            params.city.as_deref(),
            params.lat.as_deref(),
            params.lon.as_deref(),
        )
    }
}

/// Extracts a validated [`WeatherQuery`] from the query string.
///
/// Rejects with 400 when neither a city nor both coordinates are present.
#[derive(Debug, Clone)]
pub struct WeatherLookup(pub WeatherQuery);

#[async_trait]
impl<S> FromRequestParts<S> for WeatherLookup
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(pairs) = Query::<Vec<(String, String)>>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| AppError(NimbusError::validation(rejection.body_text())))?;

        Ok(Self(WeatherQuery::try_from(WeatherParams::from_pairs(pairs))?))
    }
}
