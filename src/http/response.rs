//! Error responses.
//!
//! # Responsibilities
//! - Map client service errors to HTTP status codes
//! - Reject requests missing a required header
//!
//! # Design Decisions
//! - Upstream failures surface as a generic 500 with a plain-text body
//! - The error detail goes to the log, not to the caller

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use crate::client::ClientError;

impl IntoResponse for ClientError {
    fn into_response(self) -> Response {
        tracing::error!(error = %self, "Upstream call failed");
        (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error").into_response()
    }
}

/// 400 response for a required header that is absent.
pub fn missing_header(name: &str) -> Response {
    tracing::warn!(header = %name, "Required request header missing");
    (
        StatusCode::BAD_REQUEST,
        format!("Required request header '{name}' is not present"),
    )
        .into_response()
}
