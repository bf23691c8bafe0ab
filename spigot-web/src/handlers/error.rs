//! Error-to-response mapping for the JSON API.
//!
//! Every failure surfaces as `{"error": "<message>"}` with a status code
//! derived from the failing subsystem: validation errors are 400, missing
//! streams 404, oversized inline downloads 413, upstream failures 502.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use serde_json::json;
use spigot_core::delivery::DeliveryError;
use spigot_core::extract::ExtractError;
use spigot_core::select::SelectionError;

/// A failed API request: status code plus human-readable message.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    /// Creates an error with an explicit status.
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    /// 400 Bad Request.
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    /// 404 Not Found.
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, message)
    }

    /// 500 Internal Server Error.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, message)
    }

    /// Wraps an extraction failure with endpoint context.
    pub fn extract(context: &str, error: ExtractError) -> Self {
        let status = match &error {
            ExtractError::InvalidUrl { .. } => StatusCode::BAD_REQUEST,
            ExtractError::Unavailable { .. } => StatusCode::BAD_GATEWAY,
            ExtractError::Library { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        };
        Self::new(status, format!("{context}: {error}"))
    }

    /// Status code this error maps to.
    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// Human-readable message returned in the JSON body.
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl From<SelectionError> for ApiError {
    fn from(error: SelectionError) -> Self {
        let status = match &error {
            SelectionError::NotFound { .. } => StatusCode::NOT_FOUND,
            SelectionError::InvalidQuality { .. } => StatusCode::BAD_REQUEST,
        };
        Self::new(status, error.to_string())
    }
}

impl From<DeliveryError> for ApiError {
    fn from(error: DeliveryError) -> Self {
        let status = match &error {
            DeliveryError::TooLarge { .. } => StatusCode::PAYLOAD_TOO_LARGE,
            DeliveryError::Http { .. } => StatusCode::BAD_GATEWAY,
            DeliveryError::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        Self::new(status, error.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(json!({ "error": self.message }))).into_response()
    }
}
