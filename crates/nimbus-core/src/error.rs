//! Unified error type for the proxy.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Message returned when neither a city nor a full coordinate pair is supplied.
pub const MISSING_LOCATION_MESSAGE: &str = "please provide city OR lat & lon";

/// Unified error type for all layers of Nimbus.
///
/// Upstream failures keep their diagnostic detail in a `reason` field that is
/// logged but never rendered to clients; the rendered message is the
/// `Display` output.
#[derive(Error, Debug)]
pub enum NimbusError {
    // ============ Request Errors ============
    /// The request is missing or has malformed parameters.
    #[error("{0}")]
    Validation(String),

    // ============ Upstream Errors ============
    /// The upstream weather API could not be reached.
    #[error("failed fetching upstream")]
    UpstreamUnavailable { reason: String },

    /// The upstream weather API answered with a non-success status.
    #[error("upstream status: {status_text}")]
    UpstreamStatus { status: u16, status_text: String },

    /// The upstream body could not be read or decoded as JSON.
    #[error("invalid upstream response")]
    MalformedUpstream { reason: String },

    // ============ Infrastructure Errors ============
    /// Configuration error
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl NimbusError {
    /// Returns the HTTP status code for this error.
    ///
    /// Upstream status errors forward the upstream's own code.
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        match self {
            Self::Validation(_) => 400,
            Self::UpstreamUnavailable { .. } => 502,
            Self::UpstreamStatus { status, .. } => *status,
            Self::MalformedUpstream { .. }
            | Self::Configuration(_)
            | Self::Internal(_) => 500,
        }
    }

    /// Returns a machine-readable error code.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::UpstreamUnavailable { .. } => "UPSTREAM_UNAVAILABLE",
            Self::UpstreamStatus { .. } => "UPSTREAM_ERROR",
            Self::MalformedUpstream { .. } => "MALFORMED_UPSTREAM",
            Self::Configuration(_) => "CONFIGURATION_ERROR",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Creates a validation error.
    #[must_use]
    pub fn validation<T: Into<String>>(message: T) -> Self {
        Self::Validation(message.into())
    }

    /// Creates the error for a request that names no location.
    #[must_use]
    pub fn missing_location() -> Self {
        Self::Validation(MISSING_LOCATION_MESSAGE.to_string())
    }

    /// Creates an upstream-unreachable error.
    #[must_use]
    pub fn upstream_unavailable<T: ToString>(reason: T) -> Self {
        Self::UpstreamUnavailable {
            reason: reason.to_string(),
        }
    }

    /// Creates an upstream status error from a numeric code and its status line.
    #[must_use]
    pub fn upstream_status<T: Into<String>>(status: u16, status_text: T) -> Self {
        Self::UpstreamStatus {
            status,
            status_text: status_text.into(),
        }
    }

    /// Creates a malformed-upstream-payload error.
    #[must_use]
    pub fn malformed_upstream<T: ToString>(reason: T) -> Self {
        Self::MalformedUpstream {
            reason: reason.to_string(),
        }
    }

    /// Creates an internal error.
    #[must_use]
    pub fn internal<T: Into<String>>(message: T) -> Self {
        Self::Internal(message.into())
    }

    /// Checks if this error originated at the upstream weather API.
    #[must_use]
    pub const fn is_upstream(&self) -> bool {
        matches!(
            self,
            Self::UpstreamUnavailable { .. }
                | Self::UpstreamStatus { .. }
                | Self::MalformedUpstream { .. }
        )
    }
}

/// Serializable error body returned to API clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct ErrorResponse {
    /// Human-readable error message
    pub error: String,
    /// Machine-readable error code
    pub code: String,
}

impl ErrorResponse {
    /// Creates a new error response from a `NimbusError`.
    #[must_use]
    pub fn from_error(error: &NimbusError) -> Self {
        Self {
            error: error.to_string(),
            code: error.error_code().to_string(),
        }
    }
}

impl From<&NimbusError> for ErrorResponse {
    fn from(error: &NimbusError) -> Self {
        Self::from_error(error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_status_codes() {
        assert_eq!(NimbusError::missing_location().status_code(), 400);
        assert_eq!(NimbusError::upstream_unavailable("refused").status_code(), 502);
        assert_eq!(NimbusError::malformed_upstream("eof").status_code(), 500);
        assert_eq!(NimbusError::internal("oops").status_code(), 500);
        assert_eq!(NimbusError::Configuration("bad".to_string()).status_code(), 500);
    }

    #[test]
    fn test_upstream_status_is_forwarded() {
        assert_eq!(NimbusError::upstream_status(404, "404 Not Found").status_code(), 404);
        assert_eq!(NimbusError::upstream_status(401, "401 Unauthorized").status_code(), 401);
        assert_eq!(
            NimbusError::upstream_status(503, "503 Service Unavailable").status_code(),
            503
        );
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(NimbusError::validation("x").error_code(), "VALIDATION_ERROR");
        assert_eq!(NimbusError::upstream_unavailable("x").error_code(), "UPSTREAM_UNAVAILABLE");
        assert_eq!(NimbusError::upstream_status(404, "404 Not Found").error_code(), "UPSTREAM_ERROR");
        assert_eq!(NimbusError::malformed_upstream("x").error_code(), "MALFORMED_UPSTREAM");
        assert_eq!(NimbusError::Configuration("x".to_string()).error_code(), "CONFIGURATION_ERROR");
        assert_eq!(NimbusError::internal("x").error_code(), "INTERNAL_ERROR");
    }

    #[test]
    fn test_messages_hide_upstream_detail() {
        let err = NimbusError::upstream_unavailable("connection refused (os error 111)");
        assert_eq!(err.to_string(), "failed fetching upstream");

        let err = NimbusError::malformed_upstream("expected value at line 1 column 1");
        assert_eq!(err.to_string(), "invalid upstream response");
    }

    #[test]
    fn test_upstream_status_message_mentions_status() {
        let err = NimbusError::upstream_status(404, "404 Not Found");
        assert_eq!(err.to_string(), "upstream status: 404 Not Found");
    }

    #[test]
    fn test_is_upstream() {
        assert!(NimbusError::upstream_unavailable("x").is_upstream());
        assert!(NimbusError::upstream_status(500, "500 Internal Server Error").is_upstream());
        assert!(NimbusError::malformed_upstream("x").is_upstream());
        assert!(!NimbusError::missing_location().is_upstream());
        assert!(!NimbusError::internal("x").is_upstream());
    }

    #[test]
    fn test_error_response_from_error() {
        let response = ErrorResponse::from_error(&NimbusError::missing_location());
        assert_eq!(response.error, "please provide city OR lat & lon");
        assert_eq!(response.code, "VALIDATION_ERROR");
    }

    #[test]
    fn test_error_response_serializes_error_field() {
        let response = ErrorResponse::from(&NimbusError::upstream_status(404, "404 Not Found"));
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["error"], "upstream status: 404 Not Found");
        assert_eq!(json["code"], "UPSTREAM_ERROR");
    }
}
