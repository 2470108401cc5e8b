use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;

use crate::relay::RelayError;

/// Errors surfaced to HTTP callers of the gateway.
///
/// Validation failures never reach the relay and are always reported as 400
/// with the list of fields the endpoint requires; relay failures are
/// propagated as 500 and left to the caller's own retry policy.
#[derive(Debug, Error)]
pub enum GatewayError {
    /// A required field was absent or empty.
    #[error("Missing required fields: {0}")]
    Validation(&'static str),
    /// The relay call itself failed.
    #[error("{0}")]
    Relay(#[from] RelayError),
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        let status = match self {
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::Relay(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}
