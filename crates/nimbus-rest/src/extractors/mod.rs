//! Custom Axum extractors.

mod weather_query;

pub use weather_query::*;
