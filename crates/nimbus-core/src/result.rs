//! Result type aliases for Nimbus.

use crate::NimbusError;

/// A specialized `Result` type for Nimbus operations.
pub type NimbusResult<T> = Result<T, NimbusError>;
