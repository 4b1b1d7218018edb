//! JSON error responses shared by both services.

use crate::audit::services::AuditLogError;
use crate::task::{ports::TaskRepositoryError, services::TaskLifecycleError};
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use tracing::error;

/// Body of every error response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorBody {
    /// Human-readable message.
    pub error: String,
}

/// Errors returned by HTTP handlers.
///
/// Storage failures carry only a generic message; their cause is logged
/// when the error is built and never sent to the client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// Client sent malformed or incomplete input (400).
    Validation(String),
    /// Referenced task does not exist (404).
    NotFound,
    /// Storage failed (500).
    Storage(&'static str),
}

impl ApiError {
    /// Rejection for bodies that are not valid JSON of the expected shape.
    #[must_use]
    pub fn invalid_body() -> Self {
        Self::Validation("invalid json body".to_owned())
    }

    /// Maps a task service error, using `storage_message` for storage
    /// failures.
    #[must_use]
    pub fn from_task(err: TaskLifecycleError, storage_message: &'static str) -> Self {
        match err {
            TaskLifecycleError::Domain(domain) => Self::Validation(domain.to_string()),
            TaskLifecycleError::Repository(TaskRepositoryError::NotFound(_))
            | TaskLifecycleError::MalformedId(_) => Self::NotFound,
            TaskLifecycleError::Repository(cause) => {
                error!(error = %cause, "{storage_message}");
                Self::Storage(storage_message)
            }
        }
    }

    /// Maps an audit log service error, using `storage_message` for storage
    /// failures.
    #[must_use]
    pub fn from_audit(err: AuditLogError, storage_message: &'static str) -> Self {
        match err {
            AuditLogError::Domain(domain) => Self::Validation(domain.to_string()),
            AuditLogError::Repository(cause) => {
                error!(error = %cause, "{storage_message}");
                Self::Storage(storage_message)
            }
        }
    }

    fn status(&self) -> StatusCode {
        match self {
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn message(&self) -> String {
        match self {
            Self::Validation(message) => message.clone(),
            Self::NotFound => "task not found".to_owned(),
            Self::Storage(message) => (*message).to_owned(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            error: self.message(),
        };
        (self.status(), Json(body)).into_response()
    }
}
