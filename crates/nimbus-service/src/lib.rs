//! # Nimbus Service
//!
//! Weather lookup use case for the Nimbus proxy: a TTL response cache, the
//! upstream weather API client, and the service that ties them together.

pub mod cache;
mod r#impl;
pub mod upstream;
pub mod weather_service;

pub use cache::*;
pub use r#impl::*;
pub use upstream::*;
pub use weather_service::*;
