use estate_server_common::ErrorDetail;
use thiserror::Error;

/// Domain-level outcome for the back-office use cases.
///
/// Expected business failures (missing references, duplicates, bad input)
/// are explicit variants rather than opaque errors, so handlers can map
/// them to precise HTTP statuses without string matching.
#[derive(Debug, Error)]
pub enum BackofficeError {
    #[error("{0}")]
    Validation(String),

    #[error("validation failed")]
    Fields(Vec<ErrorDetail>),

    #[error("{0} not found")]
    NotFound(String),

    #[error("{message}")]
    Conflict {
        field: Option<String>,
        message: String,
    },

    /// Uniqueness conflict with per-field reporting (customer taxonomy).
    #[error("duplicate field values")]
    DuplicateFields(Vec<ErrorDetail>),

    #[error("{0}")]
    Forbidden(String),

    #[error("invalid credentials")]
    Unauthorized,

    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl BackofficeError {
    pub fn conflict(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Conflict {
            field: Some(field.into()),
            message: message.into(),
        }
    }
}

/// Returns `true` when the underlying persistence error is the store's own
/// unique-constraint violation (SQLSTATE 23505). Pre-insert existence checks
/// can lose a race; the constraint is the authoritative second line of
/// defense and must map back into the same conflict taxonomy.
pub fn is_unique_violation(err: &anyhow::Error) -> bool {
    err.downcast_ref::<sqlx::Error>()
        .and_then(|e| e.as_database_error())
        .and_then(|db| db.code())
        .map(|code| code == "23505")
        .unwrap_or(false)
}
