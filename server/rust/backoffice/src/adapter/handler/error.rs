use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use std::sync::OnceLock;

use estate_server_common::{ErrorCode, ErrorDetail};

use crate::error::BackofficeError;

/// Whether 500 responses echo the underlying error text. Set once at
/// startup from the configured environment; defaults to verbose for
/// development and tests.
static VERBOSE_ERRORS: OnceLock<bool> = OnceLock::new();

pub fn set_verbose_errors(verbose: bool) {
    let _ = VERBOSE_ERRORS.set(verbose);
}

fn verbose_errors() -> bool {
    *VERBOSE_ERRORS.get().unwrap_or(&true)
}

#[derive(Debug)]
pub struct AppError {
    pub status: StatusCode,
    pub code: ErrorCode,
    pub message: String,
    pub details: Vec<ErrorDetail>,
}

impl AppError {
    fn new(status: StatusCode, code: impl Into<ErrorCode>, message: &str) -> Self {
        Self {
            status,
            code: code.into(),
            message: message.to_string(),
            details: vec![],
        }
    }

    pub fn not_found(code: impl Into<ErrorCode>, message: &str) -> Self {
        Self::new(StatusCode::NOT_FOUND, code, message)
    }

    pub fn bad_request(code: impl Into<ErrorCode>, message: &str) -> Self {
        Self::new(StatusCode::BAD_REQUEST, code, message)
    }

    pub fn conflict(code: impl Into<ErrorCode>, message: &str) -> Self {
        Self::new(StatusCode::CONFLICT, code, message)
    }

    pub fn unauthorized(code: impl Into<ErrorCode>, message: &str) -> Self {
        Self::new(StatusCode::UNAUTHORIZED, code, message)
    }

    pub fn forbidden(code: impl Into<ErrorCode>, message: &str) -> Self {
        Self::new(StatusCode::FORBIDDEN, code, message)
    }

    pub fn internal(code: impl Into<ErrorCode>, message: &str) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, code, message)
    }

    pub fn with_details(mut self, details: Vec<ErrorDetail>) -> Self {
        self.details = details;
        self
    }

    /// Maps a domain outcome onto an HTTP error for the given service
    /// area (`MASTER`, `TXN`, `USER`, ...).
    pub fn from_domain(area: &str, err: BackofficeError) -> Self {
        match err {
            BackofficeError::Validation(message) => {
                Self::bad_request(ErrorCode::validation(area), &message)
            }
            BackofficeError::Fields(details) => {
                Self::bad_request(ErrorCode::validation(area), "validation failed")
                    .with_details(details)
            }
            BackofficeError::NotFound(what) => {
                Self::not_found(ErrorCode::not_found(area), &format!("{} not found", what))
            }
            BackofficeError::Conflict { field, message } => {
                let mut error = Self::conflict(ErrorCode::conflict(area), &message);
                if let Some(field) = field {
                    error.details = vec![ErrorDetail::new(&field, "DUPLICATE", &message)];
                }
                error
            }
            BackofficeError::DuplicateFields(details) => {
                Self::conflict(ErrorCode::conflict(area), "duplicate field values")
                    .with_details(details)
            }
            BackofficeError::Forbidden(message) => {
                Self::forbidden(ErrorCode::forbidden(area), &message)
            }
            BackofficeError::Unauthorized => {
                Self::unauthorized(ErrorCode::unauthorized(area), "invalid credentials")
            }
            BackofficeError::Internal(e) => {
                tracing::error!(area, error = %e, "unhandled error");
                let message = if verbose_errors() {
                    e.to_string()
                } else {
                    "internal server error".to_string()
                };
                Self::internal(ErrorCode::internal(area), &message)
            }
        }
    }
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    success: bool,
    message: String,
    error: ErrorCode,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    errors: Vec<ErrorDetail>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            success: false,
            message: self.message,
            error: self.code,
            errors: self.details,
        };
        (self.status, Json(body)).into_response()
    }
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        Self::from_domain("SERVER", BackofficeError::Internal(err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_domain_statuses() {
        let err = AppError::from_domain("MASTER", BackofficeError::NotFound("plan 'X'".into()));
        assert_eq!(err.status, StatusCode::NOT_FOUND);
        assert_eq!(err.code.as_str(), "EST_MASTER_NOT_FOUND");

        let err = AppError::from_domain(
            "MASTER",
            BackofficeError::conflict("plan_name", "already exists"),
        );
        assert_eq!(err.status, StatusCode::CONFLICT);
        assert_eq!(err.details.len(), 1);

        let err = AppError::from_domain("AUTH", BackofficeError::Unauthorized);
        assert_eq!(err.status, StatusCode::UNAUTHORIZED);

        let err = AppError::from_domain("USER", BackofficeError::Forbidden("no".into()));
        assert_eq!(err.status, StatusCode::FORBIDDEN);
    }

    #[test]
    fn test_duplicate_fields_map_to_conflict_with_details() {
        let details = vec![ErrorDetail::new("email", "DUPLICATE_EMAIL", "taken")];
        let err = AppError::from_domain("MASTER", BackofficeError::DuplicateFields(details));
        assert_eq!(err.status, StatusCode::CONFLICT);
        assert_eq!(err.details[0].field, "email");
    }
}
