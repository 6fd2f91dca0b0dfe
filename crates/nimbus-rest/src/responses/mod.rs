//! API response types.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use nimbus_core::{ErrorResponse, NimbusError};
use tracing::{error, warn};

/// Application error type for Axum.
#[derive(Debug)]
pub struct AppError(pub NimbusError);

impl From<NimbusError> for AppError {
    fn from(err: NimbusError) -> Self {
        Self(err)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.0.status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        if self.0.is_upstream() {
            warn!(status = %status.as_u16(), "Upstream failure: {:?}", self.0);
        } else if status.is_server_error() {
            error!(status = %status.as_u16(), "Request failed: {}", self.0);
        }

        (status, Json(ErrorResponse::from_error(&self.0))).into_response()
    }
}

/// Result type for Axum handlers.
pub type ApiResult<T> = Result<Json<T>, AppError>;
