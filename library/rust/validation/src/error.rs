use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum ValidationError {
    #[error("invalid email: {0}")]
    InvalidEmail(String),
    #[error("invalid mobile number: {0}")]
    InvalidMobile(String),
    #[error("invalid PAN: {0}")]
    InvalidPan(String),
    #[error("invalid Aadhar number: {0}")]
    InvalidAadhar(String),
    #[error("invalid pincode: {0}")]
    InvalidPincode(String),
    #[error("invalid IFSC code: {0}")]
    InvalidIfsc(String),
    #[error("invalid pagination: {0}")]
    InvalidPagination(String),
}

impl ValidationError {
    /// Returns the error code string for this validation error.
    pub fn code(&self) -> &'static str {
        match self {
            ValidationError::InvalidEmail(_) => "INVALID_EMAIL",
            ValidationError::InvalidMobile(_) => "INVALID_MOBILE",
            ValidationError::InvalidPan(_) => "INVALID_PAN",
            ValidationError::InvalidAadhar(_) => "INVALID_AADHAR",
            ValidationError::InvalidPincode(_) => "INVALID_PINCODE",
            ValidationError::InvalidIfsc(_) => "INVALID_IFSC",
            ValidationError::InvalidPagination(_) => "INVALID_PAGINATION",
        }
    }

    /// Returns the request field this error refers to.
    pub fn field(&self) -> &'static str {
        match self {
            ValidationError::InvalidEmail(_) => "email",
            ValidationError::InvalidMobile(_) => "mobile",
            ValidationError::InvalidPan(_) => "pan",
            ValidationError::InvalidAadhar(_) => "aadhar",
            ValidationError::InvalidPincode(_) => "pincode",
            ValidationError::InvalidIfsc(_) => "ifsc_code",
            ValidationError::InvalidPagination(_) => "page",
        }
    }
}

/// A collection of `ValidationError` instances.
#[derive(Debug, Default)]
pub struct ValidationErrors {
    errors: Vec<ValidationError>,
}

impl ValidationErrors {
    /// Creates a new empty `ValidationErrors`.
    pub fn new() -> Self {
        Self { errors: Vec::new() }
    }

    /// Returns `true` if there are any errors.
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Returns a slice of all collected errors.
    pub fn get_errors(&self) -> &[ValidationError] {
        &self.errors
    }

    /// Adds a validation error to the collection.
    pub fn add(&mut self, error: ValidationError) {
        self.errors.push(error);
    }

    /// Runs a rule and collects its error, if any.
    pub fn check(&mut self, result: Result<(), ValidationError>) {
        if let Err(e) = result {
            self.errors.push(e);
        }
    }
}
