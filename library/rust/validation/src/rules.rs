use regex::Regex;

use crate::error::ValidationError;

pub fn validate_email(email: &str) -> Result<(), ValidationError> {
    let re = Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap();
    if re.is_match(email) {
        Ok(())
    } else {
        Err(ValidationError::InvalidEmail(email.to_string()))
    }
}

pub fn validate_mobile(mobile: &str) -> Result<(), ValidationError> {
    let re = Regex::new(r"^[0-9]{10}$").unwrap();
    if re.is_match(mobile) {
        Ok(())
    } else {
        Err(ValidationError::InvalidMobile(format!(
            "must be exactly 10 digits, got {:?}",
            mobile
        )))
    }
}

pub fn validate_pan(pan: &str) -> Result<(), ValidationError> {
    // 10-character permanent account number, e.g. ABCDE1234F
    let re = Regex::new(r"^[A-Z0-9]{10}$").unwrap();
    if pan.len() != 10 {
        return Err(ValidationError::InvalidPan(format!(
            "length must be 10, got {}",
            pan.len()
        )));
    }
    if !re.is_match(pan) {
        return Err(ValidationError::InvalidPan(format!(
            "must contain only uppercase letters and digits: {}",
            pan
        )));
    }
    Ok(())
}

pub fn validate_aadhar(aadhar: &str) -> Result<(), ValidationError> {
    let re = Regex::new(r"^[0-9]{12}$").unwrap();
    if re.is_match(aadhar) {
        Ok(())
    } else {
        Err(ValidationError::InvalidAadhar(format!(
            "must be exactly 12 digits, got {:?}",
            aadhar
        )))
    }
}

pub fn validate_pincode(pincode: &str) -> Result<(), ValidationError> {
    let re = Regex::new(r"^[0-9]{6}$").unwrap();
    if re.is_match(pincode) {
        Ok(())
    } else {
        Err(ValidationError::InvalidPincode(format!(
            "must be exactly 6 digits, got {:?}",
            pincode
        )))
    }
}

pub fn validate_ifsc(ifsc: &str) -> Result<(), ValidationError> {
    // Bank branch routing code: 4 letters, a literal zero, 6 alphanumerics
    let re = Regex::new(r"^[A-Z]{4}0[A-Z0-9]{6}$").unwrap();
    if re.is_match(ifsc) {
        Ok(())
    } else {
        Err(ValidationError::InvalidIfsc(ifsc.to_string()))
    }
}

pub fn validate_pagination(page: u32, page_size: u32) -> Result<(), ValidationError> {
    if page < 1 {
        return Err(ValidationError::InvalidPagination(format!(
            "page must be >= 1, got {}",
            page
        )));
    }
    if page_size < 1 || page_size > 100 {
        return Err(ValidationError::InvalidPagination(format!(
            "page_size must be 1-100, got {}",
            page_size
        )));
    }
    Ok(())
}
