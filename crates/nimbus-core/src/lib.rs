//! # Nimbus Core
//!
//! Core types, the weather query model, and error definitions shared by every
//! layer of the Nimbus weather proxy.

pub mod error;
pub mod query;
pub mod result;
pub mod telemetry;

pub use error::*;
pub use query::*;
pub use result::*;

// Re-export shaku for dependency injection
pub use shaku::{module, Component, HasComponent, Interface};
