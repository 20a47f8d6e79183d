use serde::Serialize;

/// ErrorCode represents a structured error code for a back-office service.
///
/// Error codes follow the `EST_{SERVICE}_{ERROR}` naming convention.
/// Services define their own codes using these constructors or custom strings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorCode(String);

impl ErrorCode {
    /// Create a new error code from a string.
    ///
    /// Codes should follow the pattern `EST_{SERVICE}_{ERROR}`.
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into())
    }

    /// Create a standard "not found" error code for a service.
    pub fn not_found(service: &str) -> Self {
        Self(format!("EST_{}_NOT_FOUND", service.to_uppercase()))
    }

    /// Create a standard "validation failed" error code for a service.
    pub fn validation(service: &str) -> Self {
        Self(format!("EST_{}_VALIDATION_FAILED", service.to_uppercase()))
    }

    /// Create a standard "internal error" error code for a service.
    pub fn internal(service: &str) -> Self {
        Self(format!("EST_{}_INTERNAL_ERROR", service.to_uppercase()))
    }

    /// Create a standard "unauthorized" error code for a service.
    pub fn unauthorized(service: &str) -> Self {
        Self(format!("EST_{}_UNAUTHORIZED", service.to_uppercase()))
    }

    /// Create a standard "forbidden" error code for a service.
    pub fn forbidden(service: &str) -> Self {
        Self(format!("EST_{}_PERMISSION_DENIED", service.to_uppercase()))
    }

    /// Create a standard "conflict" error code for a service.
    pub fn conflict(service: &str) -> Self {
        Self(format!("EST_{}_CONFLICT", service.to_uppercase()))
    }

    /// Return the error code string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Serialize for ErrorCode {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

impl From<&str> for ErrorCode {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for ErrorCode {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// ErrorDetail provides additional context for an offending request field.
///
/// Shape: `{ "field": "email", "reason": "DUPLICATE_EMAIL", "message": "..." }`
#[derive(Debug, Clone, Serialize)]
pub struct ErrorDetail {
    pub field: String,
    pub reason: String,
    pub message: String,
}

impl ErrorDetail {
    pub fn new(
        field: impl Into<String>,
        reason: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            field: field.into(),
            reason: reason.into(),
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_code_constructors() {
        assert_eq!(
            ErrorCode::not_found("master").as_str(),
            "EST_MASTER_NOT_FOUND"
        );
        assert_eq!(
            ErrorCode::conflict("master").as_str(),
            "EST_MASTER_CONFLICT"
        );
        assert_eq!(
            ErrorCode::forbidden("user").as_str(),
            "EST_USER_PERMISSION_DENIED"
        );
        assert_eq!(
            ErrorCode::unauthorized("auth").as_str(),
            "EST_AUTH_UNAUTHORIZED"
        );
    }

    #[test]
    fn test_custom_code() {
        let code = ErrorCode::new("EST_MASTER_PLAN_EXISTS");
        assert_eq!(code.as_str(), "EST_MASTER_PLAN_EXISTS");
        assert_eq!(code.to_string(), "EST_MASTER_PLAN_EXISTS");
    }

    #[test]
    fn test_error_detail_serializes_flat() {
        let detail = ErrorDetail::new("email", "DUPLICATE_EMAIL", "email already registered");
        let json = serde_json::to_value(&detail).unwrap();
        assert_eq!(json["field"], "email");
        assert_eq!(json["reason"], "DUPLICATE_EMAIL");
    }
}
