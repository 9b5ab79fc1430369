//! HTTP error type and the JSON body of every failed request.
//!
//! Handlers return `Result<_, AppError>`. The response body is an
//! [`ErrorResponse`]:
//!
//! ```json
//! {
//!   "timestamp": "2024-03-01T10:00:00Z",
//!   "http_status_code": 400,
//!   "http_status": "BAD_REQUEST",
//!   "reason": "BAD REQUEST",
//!   "message": "Username already exists"
//! }
//! ```
//!
//! Server errors are logged with their full chain and answered with
//! [`INTERNAL_SERVER_ERROR_MSG`]; their details never reach the client.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::error;

pub const INTERNAL_SERVER_ERROR_MSG: &str = "An error occurred while processing the request";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub timestamp: DateTime<Utc>,
    pub http_status_code: u16,
    /// Upper snake case status name, e.g. `NOT_FOUND`
    pub http_status: String,
    /// Upper case reason phrase, e.g. `NOT FOUND`
    pub reason: String,
    pub message: String,
}

impl ErrorResponse {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        let reason = status
            .canonical_reason()
            .unwrap_or("Unknown")
            .to_ascii_uppercase();

        Self {
            timestamp: Utc::now(),
            http_status_code: status.as_u16(),
            http_status: reason.replace([' ', '-'], "_"),
            reason,
            message: message.into(),
        }
    }
}

#[derive(Debug)]
pub struct AppError {
    pub status: StatusCode,
    pub error: anyhow::Error,
}

impl AppError {
    pub fn new<E>(status: StatusCode, err: E) -> Self
    where
        E: Into<anyhow::Error>,
    {
        Self {
            status,
            error: err.into(),
        }
    }

    pub fn bad_request<E>(err: E) -> Self
    where
        E: Into<anyhow::Error>,
    {
        Self::new(StatusCode::BAD_REQUEST, err)
    }

    pub fn not_found<E>(err: E) -> Self
    where
        E: Into<anyhow::Error>,
    {
        Self::new(StatusCode::NOT_FOUND, err)
    }

    pub fn forbidden(message: &'static str) -> Self {
        Self::new(StatusCode::FORBIDDEN, anyhow::anyhow!(message))
    }

    pub fn internal<E>(err: E) -> Self
    where
        E: Into<anyhow::Error>,
    {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, err)
    }

    /// The message the client sees.
    pub fn message(&self) -> String {
        if self.status.is_server_error() {
            INTERNAL_SERVER_ERROR_MSG.to_string()
        } else {
            self.error.to_string()
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if self.status.is_server_error() {
            let chain = format!("{:#}", self.error);
            error!(status = self.status.as_u16(), error = %chain, "Request failed");
        }

        let body = ErrorResponse::new(self.status, self.message());
        (self.status, Json(body)).into_response()
    }
}

/// Anything that is not mapped explicitly is a server error.
impl<E> From<E> for AppError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        AppError::internal(err)
    }
}
