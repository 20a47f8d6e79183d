use std::sync::Arc;

use estate_server_common::ErrorDetail;
use estate_validation::{
    validate_aadhar, validate_email, validate_mobile, validate_pan, validate_pincode,
    ValidationErrors,
};

use crate::domain::entity::activity_log::ActivityLog;
use crate::domain::entity::customer::{
    CreateCustomer, Customer, CustomerWriteOutcome, DuplicateField, UpdateCustomer,
};
use crate::domain::repository::activity_log_repository::ActivityLogRepository;
use crate::domain::repository::customer_repository::CustomerRepository;
use crate::error::{is_unique_violation, BackofficeError};

pub struct RegisterCustomersUseCase {
    customer_repo: Arc<dyn CustomerRepository>,
    log_repo: Arc<dyn ActivityLogRepository>,
}

impl RegisterCustomersUseCase {
    pub fn new(
        customer_repo: Arc<dyn CustomerRepository>,
        log_repo: Arc<dyn ActivityLogRepository>,
    ) -> Self {
        Self {
            customer_repo,
            log_repo,
        }
    }

    pub async fn list_customers(
        &self,
        page: i64,
        page_size: i64,
    ) -> Result<(Vec<Customer>, i64), BackofficeError> {
        Ok(self.customer_repo.find_all(page, page_size).await?)
    }

    pub async fn get_customer(&self, customer_id: &str) -> Result<Customer, BackofficeError> {
        self.customer_repo
            .find_by_customer_id(customer_id)
            .await?
            .ok_or_else(|| BackofficeError::NotFound(format!("customer '{}'", customer_id)))
    }

    pub async fn create_customer(
        &self,
        input: &CreateCustomer,
        actor: &str,
    ) -> Result<Customer, BackofficeError> {
        if input.customer_id.trim().is_empty() || input.first_name.trim().is_empty() {
            return Err(BackofficeError::Validation(
                "customer_id and first_name are required".into(),
            ));
        }
        Self::check_formats(
            Some(&input.email),
            Some(&input.mobile),
            Some(&input.pan),
            Some(&input.aadhar),
            input.pincode.as_deref(),
        )?;

        let outcome = match self.customer_repo.create_checked(input).await {
            Ok(outcome) => outcome,
            Err(e) if is_unique_violation(&e) => {
                // lost race: report the conflict without the per-field split
                return Err(BackofficeError::conflict(
                    "customer",
                    "customer with one of the supplied unique fields already exists",
                ));
            }
            Err(e) => return Err(e.into()),
        };

        match outcome {
            CustomerWriteOutcome::Written(customer) => {
                let _ = self
                    .log_repo
                    .create(&ActivityLog::record(
                        actor,
                        "CREATE",
                        "customers",
                        &customer.customer_id,
                    ))
                    .await;
                Ok(customer)
            }
            CustomerWriteOutcome::Duplicate(fields) => Err(Self::duplicates(fields)),
        }
    }

    pub async fn update_customer(
        &self,
        customer_id: &str,
        input: &UpdateCustomer,
        actor: &str,
    ) -> Result<Customer, BackofficeError> {
        Self::check_formats(
            input.email.as_deref(),
            input.mobile.as_deref(),
            input.pan.as_deref(),
            input.aadhar.as_deref(),
            input.pincode.as_deref(),
        )?;

        let outcome = match self.customer_repo.update_checked(customer_id, input).await {
            Ok(Some(outcome)) => outcome,
            Ok(None) => {
                return Err(BackofficeError::NotFound(format!(
                    "customer '{}'",
                    customer_id
                )))
            }
            Err(e) if is_unique_violation(&e) => {
                return Err(BackofficeError::conflict(
                    "customer",
                    "customer with one of the supplied unique fields already exists",
                ));
            }
            Err(e) => return Err(e.into()),
        };

        match outcome {
            CustomerWriteOutcome::Written(customer) => {
                let _ = self
                    .log_repo
                    .create(&ActivityLog::record(actor, "UPDATE", "customers", customer_id))
                    .await;
                Ok(customer)
            }
            CustomerWriteOutcome::Duplicate(fields) => Err(Self::duplicates(fields)),
        }
    }

    pub async fn delete_customer(
        &self,
        customer_id: &str,
        actor: &str,
    ) -> Result<(), BackofficeError> {
        self.get_customer(customer_id).await?;
        self.customer_repo.delete(customer_id).await?;
        let _ = self
            .log_repo
            .create(&ActivityLog::record(actor, "DELETE", "customers", customer_id))
            .await;
        Ok(())
    }

    fn check_formats(
        email: Option<&str>,
        mobile: Option<&str>,
        pan: Option<&str>,
        aadhar: Option<&str>,
        pincode: Option<&str>,
    ) -> Result<(), BackofficeError> {
        let mut errors = ValidationErrors::new();
        if let Some(email) = email {
            errors.check(validate_email(email));
        }
        if let Some(mobile) = mobile {
            errors.check(validate_mobile(mobile));
        }
        if let Some(pan) = pan {
            errors.check(validate_pan(pan));
        }
        if let Some(aadhar) = aadhar {
            errors.check(validate_aadhar(aadhar));
        }
        if let Some(pincode) = pincode {
            errors.check(validate_pincode(pincode));
        }
        if errors.has_errors() {
            let details = errors
                .get_errors()
                .iter()
                .map(|e| ErrorDetail::new(e.field(), e.code(), e.to_string()))
                .collect();
            return Err(BackofficeError::Fields(details));
        }
        Ok(())
    }

    fn duplicates(fields: Vec<DuplicateField>) -> BackofficeError {
        let details = fields
            .into_iter()
            .map(|f| {
                ErrorDetail::new(
                    f.field,
                    format!("DUPLICATE_{}", f.field.to_uppercase()),
                    format!("{} '{}' is already registered", f.field, f.value),
                )
            })
            .collect();
        BackofficeError::DuplicateFields(details)
    }
}
