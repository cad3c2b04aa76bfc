//! JSON error responses shared by the API routes.
//!
//! Every failure answers `{ "success": false, "error": "..." }`. Backend
//! failures are logged with their detail and surfaced as a generic message.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use tracing::error;

use crate::services::directory::DirectoryError;
use crate::services::intake::IntakeError;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),
    #[error("{0}")]
    NotFound(String),
    #[error("internal server error")]
    Internal,
}

impl ApiError {
    #[must_use]
    pub fn status(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = serde_json::json!({ "success": false, "error": self.to_string() });
        (self.status(), Json(body)).into_response()
    }
}

impl From<DirectoryError> for ApiError {
    fn from(err: DirectoryError) -> Self {
        match err {
            DirectoryError::NotFound(key) => Self::NotFound(format!("lawyer not found: {key}")),
            DirectoryError::Backend(e) => {
                error!(kind = e.kind.as_str(), code = ?e.code, error = %e, "directory read failed");
                Self::Internal
            }
        }
    }
}

impl From<IntakeError> for ApiError {
    fn from(err: IntakeError) -> Self {
        match err {
            IntakeError::Validation(msg) => Self::BadRequest(msg),
            IntakeError::UnknownLawyer(id) => Self::BadRequest(format!("unknown lawyer: {id}")),
            IntakeError::Backend(e) => {
                error!(kind = e.kind.as_str(), code = ?e.code, error = %e, "intake write failed");
                Self::Internal
            }
        }
    }
}
