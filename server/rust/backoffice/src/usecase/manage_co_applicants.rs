use std::sync::Arc;
use uuid::Uuid;

use estate_server_common::ErrorDetail;
use estate_validation::{
    validate_aadhar, validate_email, validate_mobile, validate_pan, ValidationErrors,
};

use crate::domain::entity::activity_log::ActivityLog;
use crate::domain::entity::co_applicant::{CoApplicant, CreateCoApplicant, UpdateCoApplicant};
use crate::domain::repository::activity_log_repository::ActivityLogRepository;
use crate::domain::repository::co_applicant_repository::CoApplicantRepository;
use crate::domain::repository::customer_repository::CustomerRepository;
use crate::error::BackofficeError;

pub struct ManageCoApplicantsUseCase {
    co_applicant_repo: Arc<dyn CoApplicantRepository>,
    customer_repo: Arc<dyn CustomerRepository>,
    log_repo: Arc<dyn ActivityLogRepository>,
}

impl ManageCoApplicantsUseCase {
    pub fn new(
        co_applicant_repo: Arc<dyn CoApplicantRepository>,
        customer_repo: Arc<dyn CustomerRepository>,
        log_repo: Arc<dyn ActivityLogRepository>,
    ) -> Self {
        Self {
            co_applicant_repo,
            customer_repo,
            log_repo,
        }
    }

    pub async fn list_co_applicants(
        &self,
        page: i64,
        page_size: i64,
    ) -> Result<(Vec<CoApplicant>, i64), BackofficeError> {
        Ok(self.co_applicant_repo.find_all(page, page_size).await?)
    }

    pub async fn get_co_applicant(&self, id: Uuid) -> Result<CoApplicant, BackofficeError> {
        self.co_applicant_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| BackofficeError::NotFound(format!("co-applicant {}", id)))
    }

    pub async fn create_co_applicant(
        &self,
        input: &CreateCoApplicant,
        actor: &str,
    ) -> Result<CoApplicant, BackofficeError> {
        if input.name.trim().is_empty() {
            return Err(BackofficeError::Validation("name is required".into()));
        }
        if self
            .customer_repo
            .find_by_customer_id(&input.customer_id)
            .await?
            .is_none()
        {
            return Err(BackofficeError::Validation("Invalid customer selected".into()));
        }
        Self::check_formats(
            input.email.as_deref(),
            input.mobile.as_deref(),
            input.pan.as_deref(),
            input.aadhar.as_deref(),
        )?;

        let created = self.co_applicant_repo.create(input).await?;
        let _ = self
            .log_repo
            .create(&ActivityLog::record(actor, "CREATE", "co_applicants", created.id.to_string()))
            .await;
        Ok(created)
    }

    pub async fn update_co_applicant(
        &self,
        id: Uuid,
        input: &UpdateCoApplicant,
        actor: &str,
    ) -> Result<CoApplicant, BackofficeError> {
        self.get_co_applicant(id).await?;
        Self::check_formats(
            input.email.as_deref(),
            input.mobile.as_deref(),
            input.pan.as_deref(),
            input.aadhar.as_deref(),
        )?;

        let updated = self.co_applicant_repo.update(id, input).await?;
        let _ = self
            .log_repo
            .create(&ActivityLog::record(actor, "UPDATE", "co_applicants", id.to_string()))
            .await;
        Ok(updated)
    }

    pub async fn delete_co_applicant(&self, id: Uuid, actor: &str) -> Result<(), BackofficeError> {
        self.get_co_applicant(id).await?;
        self.co_applicant_repo.delete(id).await?;
        let _ = self
            .log_repo
            .create(&ActivityLog::record(actor, "DELETE", "co_applicants", id.to_string()))
            .await;
        Ok(())
    }

    fn check_formats(
        email: Option<&str>,
        mobile: Option<&str>,
        pan: Option<&str>,
        aadhar: Option<&str>,
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
}
