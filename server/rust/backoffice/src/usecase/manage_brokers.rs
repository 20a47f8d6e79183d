use std::sync::Arc;

use estate_server_common::ErrorDetail;
use estate_validation::{validate_email, validate_mobile, validate_pan, ValidationErrors};

use crate::domain::entity::activity_log::ActivityLog;
use crate::domain::entity::broker::{Broker, CreateBroker, UpdateBroker};
use crate::domain::repository::activity_log_repository::ActivityLogRepository;
use crate::domain::repository::broker_repository::BrokerRepository;
use crate::error::{is_unique_violation, BackofficeError};

pub struct ManageBrokersUseCase {
    broker_repo: Arc<dyn BrokerRepository>,
    log_repo: Arc<dyn ActivityLogRepository>,
}

impl ManageBrokersUseCase {
    pub fn new(
        broker_repo: Arc<dyn BrokerRepository>,
        log_repo: Arc<dyn ActivityLogRepository>,
    ) -> Self {
        Self {
            broker_repo,
            log_repo,
        }
    }

    pub async fn list_brokers(
        &self,
        page: i64,
        page_size: i64,
    ) -> Result<(Vec<Broker>, i64), BackofficeError> {
        Ok(self.broker_repo.find_all(page, page_size).await?)
    }

    pub async fn get_broker(&self, broker_code: &str) -> Result<Broker, BackofficeError> {
        self.broker_repo
            .find_by_code(broker_code)
            .await?
            .ok_or_else(|| BackofficeError::NotFound(format!("broker '{}'", broker_code)))
    }

    pub async fn create_broker(
        &self,
        input: &CreateBroker,
        actor: &str,
    ) -> Result<Broker, BackofficeError> {
        if input.broker_code.trim().is_empty() || input.name.trim().is_empty() {
            return Err(BackofficeError::Validation(
                "broker_code and name are required".into(),
            ));
        }
        Self::check_formats(
            input.email.as_deref(),
            input.mobile.as_deref(),
            input.pan.as_deref(),
        )?;
        if self
            .broker_repo
            .find_by_code(&input.broker_code)
            .await?
            .is_some()
        {
            return Err(Self::duplicate_code(&input.broker_code));
        }

        let created = match self.broker_repo.create(input).await {
            Ok(broker) => broker,
            Err(e) if is_unique_violation(&e) => {
                return Err(Self::duplicate_code(&input.broker_code))
            }
            Err(e) => return Err(e.into()),
        };
        let _ = self
            .log_repo
            .create(&ActivityLog::record(actor, "CREATE", "brokers", &created.broker_code))
            .await;
        Ok(created)
    }

    pub async fn update_broker(
        &self,
        broker_code: &str,
        input: &UpdateBroker,
        actor: &str,
    ) -> Result<Broker, BackofficeError> {
        self.get_broker(broker_code).await?;
        Self::check_formats(
            input.email.as_deref(),
            input.mobile.as_deref(),
            input.pan.as_deref(),
        )?;

        let updated = self.broker_repo.update(broker_code, input).await?;
        let _ = self
            .log_repo
            .create(&ActivityLog::record(actor, "UPDATE", "brokers", broker_code))
            .await;
        Ok(updated)
    }

    pub async fn delete_broker(&self, broker_code: &str, actor: &str) -> Result<(), BackofficeError> {
        self.get_broker(broker_code).await?;
        self.broker_repo.delete(broker_code).await?;
        let _ = self
            .log_repo
            .create(&ActivityLog::record(actor, "DELETE", "brokers", broker_code))
            .await;
        Ok(())
    }

    fn check_formats(
        email: Option<&str>,
        mobile: Option<&str>,
        pan: Option<&str>,
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

    fn duplicate_code(code: &str) -> BackofficeError {
        BackofficeError::conflict("broker_code", format!("Broker '{}' already exists", code))
    }
}
