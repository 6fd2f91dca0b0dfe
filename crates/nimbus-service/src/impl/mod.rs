//! Service implementations.

mod weather_service_impl;

pub use weather_service_impl::*;
