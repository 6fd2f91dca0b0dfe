//! Weather query model and cache key derivation.

use crate::{NimbusError, NimbusResult};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A validated weather lookup.
///
/// Coordinates keep the caller's literal strings so the cache key matches the
/// request exactly; no numeric normalization is applied.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WeatherQuery {
    /// Lookup by city name.
    City(String),
    /// Lookup by latitude and longitude.
    Coordinates { lat: String, lon: String },
}

impl WeatherQuery {
    /// Builds a query from raw, optional request parameters.
    ///
    /// Empty values count as absent. A non-empty `city` wins over coordinates;
    /// otherwise both `lat` and `lon` must be non-empty.
    pub fn from_params(
        city: Option<&str>,
        lat: Option<&str>,
        lon: Option<&str>,
    ) -> NimbusResult<Self> {
        fn present(value: Option<&str>) -> Option<&str> {
            value.filter(|v| !v.is_empty())
        }

        if let Some(city) = present(city) {
            return Ok(Self::City(city.to_string()));
        }

        match (present(lat), present(lon)) {
            (Some(lat), Some(lon)) => Ok(Self::Coordinates {
                lat: lat.to_string(),
                lon: lon.to_string(),
            }),
            _ => Err(NimbusError::missing_location()),
        }
    }

    /// Creates a city query.
    #[must_use]
    pub fn city(name: impl Into<String>) -> Self {
        Self::City(name.into())
    }

    /// Creates a coordinate query.
    #[must_use]
    pub fn coordinates(lat: impl Into<String>, lon: impl Into<String>) -> Self {
        Self::Coordinates {
            lat: lat.into(),
            lon: lon.into(),
        }
    }

    /// Returns the cache key: the city name, or `"<lat>,<lon>"`.
    #[must_use]
    pub fn cache_key(&self) -> String {
        match self {
            Self::City(name) => name.clone(),
            Self::Coordinates { lat, lon } => format!("{},{}", lat, lon),
        }
    }
}

impl fmt::Display for WeatherQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::City(name) => write!(f, "city={}", name),
            Self::Coordinates { lat, lon } => write!(f, "lat={} lon={}", lat, lon),
        }
    }
}
