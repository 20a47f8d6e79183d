pub mod error;
pub mod rules;

pub use error::{ValidationError, ValidationErrors};
pub use rules::{
    validate_aadhar, validate_email, validate_ifsc, validate_mobile, validate_pagination,
    validate_pan, validate_pincode,
};
