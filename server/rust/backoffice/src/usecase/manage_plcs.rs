use std::sync::Arc;

use crate::domain::entity::activity_log::ActivityLog;
use crate::domain::entity::plc::{CreatePlc, Plc, UpdatePlc};
use crate::domain::repository::activity_log_repository::ActivityLogRepository;
use crate::domain::repository::plc_repository::PlcRepository;
use crate::error::{is_unique_violation, BackofficeError};

pub struct ManagePlcsUseCase {
    plc_repo: Arc<dyn PlcRepository>,
    log_repo: Arc<dyn ActivityLogRepository>,
}

impl ManagePlcsUseCase {
    pub fn new(plc_repo: Arc<dyn PlcRepository>, log_repo: Arc<dyn ActivityLogRepository>) -> Self {
        Self { plc_repo, log_repo }
    }

    pub async fn list_plcs(
        &self,
        page: i64,
        page_size: i64,
    ) -> Result<(Vec<Plc>, i64), BackofficeError> {
        Ok(self.plc_repo.find_all(page, page_size).await?)
    }

    pub async fn get_plc(&self, name: &str) -> Result<Plc, BackofficeError> {
        self.plc_repo
            .find_by_name(name)
            .await?
            .ok_or_else(|| BackofficeError::NotFound(format!("PLC '{}'", name)))
    }

    pub async fn create_plc(&self, input: &CreatePlc, actor: &str) -> Result<Plc, BackofficeError> {
        if input.name.trim().is_empty() {
            return Err(BackofficeError::Validation("name is required".into()));
        }
        if self.plc_repo.find_by_name(&input.name).await?.is_some() {
            return Err(Self::duplicate_name(&input.name));
        }

        let created = match self.plc_repo.create(input).await {
            Ok(plc) => plc,
            Err(e) if is_unique_violation(&e) => return Err(Self::duplicate_name(&input.name)),
            Err(e) => return Err(e.into()),
        };
        let _ = self
            .log_repo
            .create(&ActivityLog::record(actor, "CREATE", "plcs", &created.name))
            .await;
        Ok(created)
    }

    pub async fn update_plc(
        &self,
        name: &str,
        input: &UpdatePlc,
        actor: &str,
    ) -> Result<Plc, BackofficeError> {
        self.get_plc(name).await?;
        let updated = self.plc_repo.update(name, input).await?;
        let _ = self
            .log_repo
            .create(&ActivityLog::record(actor, "UPDATE", "plcs", name))
            .await;
        Ok(updated)
    }

    pub async fn delete_plc(&self, name: &str, actor: &str) -> Result<(), BackofficeError> {
        self.get_plc(name).await?;
        self.plc_repo.delete(name).await?;
        let _ = self
            .log_repo
            .create(&ActivityLog::record(actor, "DELETE", "plcs", name))
            .await;
        Ok(())
    }

    fn duplicate_name(name: &str) -> BackofficeError {
        BackofficeError::conflict("name", format!("PLC '{}' already exists", name))
    }
}
