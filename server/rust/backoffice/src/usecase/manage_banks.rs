use std::sync::Arc;

use estate_validation::validate_ifsc;

use crate::domain::entity::activity_log::ActivityLog;
use crate::domain::entity::bank::{Bank, CreateBank, UpdateBank};
use crate::domain::repository::activity_log_repository::ActivityLogRepository;
use crate::domain::repository::bank_repository::BankRepository;
use crate::error::{is_unique_violation, BackofficeError};

pub struct ManageBanksUseCase {
    bank_repo: Arc<dyn BankRepository>,
    log_repo: Arc<dyn ActivityLogRepository>,
}

impl ManageBanksUseCase {
    pub fn new(
        bank_repo: Arc<dyn BankRepository>,
        log_repo: Arc<dyn ActivityLogRepository>,
    ) -> Self {
        Self { bank_repo, log_repo }
    }

    pub async fn list_banks(
        &self,
        page: i64,
        page_size: i64,
    ) -> Result<(Vec<Bank>, i64), BackofficeError> {
        Ok(self.bank_repo.find_all(page, page_size).await?)
    }

    pub async fn get_bank(&self, ifsc_code: &str) -> Result<Bank, BackofficeError> {
        self.bank_repo
            .find_by_ifsc(ifsc_code)
            .await?
            .ok_or_else(|| BackofficeError::NotFound(format!("bank '{}'", ifsc_code)))
    }

    pub async fn create_bank(&self, input: &CreateBank, actor: &str) -> Result<Bank, BackofficeError> {
        if input.bank_name.trim().is_empty() {
            return Err(BackofficeError::Validation("bank_name is required".into()));
        }
        validate_ifsc(&input.ifsc_code)
            .map_err(|e| BackofficeError::Validation(e.to_string()))?;
        if self
            .bank_repo
            .find_by_ifsc(&input.ifsc_code)
            .await?
            .is_some()
        {
            return Err(Self::duplicate_ifsc(&input.ifsc_code));
        }

        let created = match self.bank_repo.create(input).await {
            Ok(bank) => bank,
            Err(e) if is_unique_violation(&e) => {
                return Err(Self::duplicate_ifsc(&input.ifsc_code))
            }
            Err(e) => return Err(e.into()),
        };
        let _ = self
            .log_repo
            .create(&ActivityLog::record(actor, "CREATE", "banks", &created.ifsc_code))
            .await;
        Ok(created)
    }

    pub async fn update_bank(
        &self,
        ifsc_code: &str,
        input: &UpdateBank,
        actor: &str,
    ) -> Result<Bank, BackofficeError> {
        self.get_bank(ifsc_code).await?;
        let updated = self.bank_repo.update(ifsc_code, input).await?;
        let _ = self
            .log_repo
            .create(&ActivityLog::record(actor, "UPDATE", "banks", ifsc_code))
            .await;
        Ok(updated)
    }

    pub async fn delete_bank(&self, ifsc_code: &str, actor: &str) -> Result<(), BackofficeError> {
        self.get_bank(ifsc_code).await?;
        self.bank_repo.delete(ifsc_code).await?;
        let _ = self
            .log_repo
            .create(&ActivityLog::record(actor, "DELETE", "banks", ifsc_code))
            .await;
        Ok(())
    }

    fn duplicate_ifsc(ifsc: &str) -> BackofficeError {
        BackofficeError::conflict("ifsc_code", format!("Bank '{}' already exists", ifsc))
    }
}
