use std::sync::Arc;

use crate::domain::entity::activity_log::ActivityLog;
use crate::domain::entity::project::Project;
use crate::domain::entity::property::Property;
use crate::domain::entity::stock::{CreateStock, Stock, StockStatus, UpdateStock};
use crate::domain::repository::activity_log_repository::ActivityLogRepository;
use crate::domain::repository::project_repository::ProjectRepository;
use crate::domain::repository::property_repository::PropertyRepository;
use crate::domain::repository::stock_repository::StockRepository;
use crate::error::{is_unique_violation, BackofficeError};

pub struct ManageStockUseCase {
    stock_repo: Arc<dyn StockRepository>,
    project_repo: Arc<dyn ProjectRepository>,
    property_repo: Arc<dyn PropertyRepository>,
    log_repo: Arc<dyn ActivityLogRepository>,
}

impl ManageStockUseCase {
    pub fn new(
        stock_repo: Arc<dyn StockRepository>,
        project_repo: Arc<dyn ProjectRepository>,
        property_repo: Arc<dyn PropertyRepository>,
        log_repo: Arc<dyn ActivityLogRepository>,
    ) -> Self {
        Self {
            stock_repo,
            project_repo,
            property_repo,
            log_repo,
        }
    }

    pub async fn list_stock(
        &self,
        page: i64,
        page_size: i64,
    ) -> Result<(Vec<Stock>, i64), BackofficeError> {
        Ok(self.stock_repo.find_all(page, page_size).await?)
    }

    pub async fn get_stock(&self, id: i64) -> Result<Stock, BackofficeError> {
        self.stock_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| BackofficeError::NotFound(format!("stock entry {}", id)))
    }

    /// Creates a stock entry for a (project, property) pair. The pair must
    /// not already be stocked; both references must exist.
    pub async fn create_stock(
        &self,
        input: &CreateStock,
        actor: &str,
    ) -> Result<Stock, BackofficeError> {
        if self.project_repo.find_by_id(input.project_id).await?.is_none() {
            return Err(BackofficeError::Validation("Invalid project selected".into()));
        }
        if self
            .property_repo
            .find_by_id(input.property_id)
            .await?
            .is_none()
        {
            return Err(BackofficeError::Validation("Invalid property selected".into()));
        }

        let status = input.status.unwrap_or(StockStatus::Free);
        let on_hold_till = Self::resolve_hold(status, input.on_hold_till)?;
        let input = CreateStock {
            status: Some(status),
            on_hold_till,
            ..input.clone()
        };

        let created = match self.stock_repo.create_if_absent(&input).await {
            Ok(Some(stock)) => stock,
            Ok(None) => return Err(Self::duplicate_pair()),
            // lost race between the pre-check and the insert
            Err(e) if is_unique_violation(&e) => return Err(Self::duplicate_pair()),
            Err(e) => return Err(e.into()),
        };

        let _ = self
            .log_repo
            .create(&ActivityLog::record(actor, "CREATE", "stock", created.id.to_string()))
            .await;
        Ok(created)
    }

    pub async fn update_stock(
        &self,
        id: i64,
        input: &UpdateStock,
        actor: &str,
    ) -> Result<Stock, BackofficeError> {
        let current = self.get_stock(id).await?;

        let mut input = input.clone();
        if let Some(status) = input.status {
            // Hold requires a till-date; Free always clears it
            input.on_hold_till =
                Self::resolve_hold(status, input.on_hold_till.or(current.on_hold_till))?;
            if status == StockStatus::Free {
                input.on_hold_till = None;
            }
        }

        let updated = self.stock_repo.update(id, &input).await?;
        let _ = self
            .log_repo
            .create(&ActivityLog::record(actor, "UPDATE", "stock", id.to_string()))
            .await;
        Ok(updated)
    }

    pub async fn delete_stock(&self, id: i64, actor: &str) -> Result<(), BackofficeError> {
        self.get_stock(id).await?;
        self.stock_repo.delete(id).await?;
        let _ = self
            .log_repo
            .create(&ActivityLog::record(actor, "DELETE", "stock", id.to_string()))
            .await;
        Ok(())
    }

    /// Lookup helpers backing the stock entry form.
    pub async fn check_project(&self, project_id: i64) -> Result<Project, BackofficeError> {
        self.project_repo
            .find_by_id(project_id)
            .await?
            .ok_or_else(|| BackofficeError::NotFound(format!("project {}", project_id)))
    }

    pub async fn check_property(&self, property_id: i64) -> Result<Property, BackofficeError> {
        self.property_repo
            .find_by_id(property_id)
            .await?
            .ok_or_else(|| BackofficeError::NotFound(format!("property {}", property_id)))
    }

    pub async fn check_stock_property(
        &self,
        project_id: i64,
        property_id: i64,
    ) -> Result<Option<Stock>, BackofficeError> {
        Ok(self.stock_repo.find_by_pair(project_id, property_id).await?)
    }

    fn resolve_hold(
        status: StockStatus,
        on_hold_till: Option<chrono::NaiveDate>,
    ) -> Result<Option<chrono::NaiveDate>, BackofficeError> {
        match status {
            StockStatus::Hold => {
                if on_hold_till.is_none() {
                    return Err(BackofficeError::Validation(
                        "on_hold_till is required when status is Hold".into(),
                    ));
                }
                Ok(on_hold_till)
            }
            StockStatus::Free => Ok(None),
        }
    }

    fn duplicate_pair() -> BackofficeError {
        BackofficeError::conflict(
            "property_id",
            "Property already exists in stock for this project",
        )
    }
}
