//! # Nimbus Server Library
//!
//! Dependency injection wiring and application assembly for the Nimbus
//! weather proxy binary.

pub mod app;
pub mod di;
pub mod startup;
