use std::sync::Arc;

use crate::domain::entity::activity_log::ActivityLog;
use crate::domain::entity::property::{CreateProperty, Property, UpdateProperty};
use crate::domain::entity::property_size::{
    CreatePropertySize, PropertySize, UpdatePropertySize,
};
use crate::domain::repository::activity_log_repository::ActivityLogRepository;
use crate::domain::repository::customer_repository::CustomerRepository;
use crate::domain::repository::property_repository::PropertyRepository;
use crate::domain::repository::property_size_repository::PropertySizeRepository;
use crate::error::{is_unique_violation, BackofficeError};

pub struct ManagePropertiesUseCase {
    property_repo: Arc<dyn PropertyRepository>,
    size_repo: Arc<dyn PropertySizeRepository>,
    customer_repo: Arc<dyn CustomerRepository>,
    log_repo: Arc<dyn ActivityLogRepository>,
}

impl ManagePropertiesUseCase {
    pub fn new(
        property_repo: Arc<dyn PropertyRepository>,
        size_repo: Arc<dyn PropertySizeRepository>,
        customer_repo: Arc<dyn CustomerRepository>,
        log_repo: Arc<dyn ActivityLogRepository>,
    ) -> Self {
        Self {
            property_repo,
            size_repo,
            customer_repo,
            log_repo,
        }
    }

    pub async fn list_properties(
        &self,
        page: i64,
        page_size: i64,
    ) -> Result<(Vec<Property>, i64), BackofficeError> {
        Ok(self.property_repo.find_all(page, page_size).await?)
    }

    pub async fn get_property(&self, id: i64) -> Result<Property, BackofficeError> {
        self.property_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| BackofficeError::NotFound(format!("property {}", id)))
    }

    pub async fn create_property(
        &self,
        input: &CreateProperty,
        actor: &str,
    ) -> Result<Property, BackofficeError> {
        if input.property_type.trim().is_empty() {
            return Err(BackofficeError::Validation("property_type is required".into()));
        }
        if input.size <= 0.0 {
            return Err(BackofficeError::Validation("size must be positive".into()));
        }
        self.require_owner(input.customer_id.as_deref()).await?;

        let created = self.property_repo.create(input).await?;
        let _ = self
            .log_repo
            .create(&ActivityLog::record(actor, "CREATE", "properties", created.id.to_string()))
            .await;
        Ok(created)
    }

    pub async fn update_property(
        &self,
        id: i64,
        input: &UpdateProperty,
        actor: &str,
    ) -> Result<Property, BackofficeError> {
        self.get_property(id).await?;
        if let Some(size) = input.size {
            if size <= 0.0 {
                return Err(BackofficeError::Validation("size must be positive".into()));
            }
        }
        self.require_owner(input.customer_id.as_deref()).await?;

        let updated = self.property_repo.update(id, input).await?;
        let _ = self
            .log_repo
            .create(&ActivityLog::record(actor, "UPDATE", "properties", id.to_string()))
            .await;
        Ok(updated)
    }

    pub async fn delete_property(&self, id: i64, actor: &str) -> Result<(), BackofficeError> {
        self.get_property(id).await?;
        self.property_repo.delete(id).await?;
        let _ = self
            .log_repo
            .create(&ActivityLog::record(actor, "DELETE", "properties", id.to_string()))
            .await;
        Ok(())
    }

    pub async fn list_sizes(
        &self,
        page: i64,
        page_size: i64,
    ) -> Result<(Vec<PropertySize>, i64), BackofficeError> {
        Ok(self.size_repo.find_all(page, page_size).await?)
    }

    pub async fn get_size(&self, id: i64) -> Result<PropertySize, BackofficeError> {
        self.size_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| BackofficeError::NotFound(format!("property size {}", id)))
    }

    pub async fn create_size(
        &self,
        input: &CreatePropertySize,
        actor: &str,
    ) -> Result<PropertySize, BackofficeError> {
        if input.size <= 0.0 {
            return Err(BackofficeError::Validation("size must be positive".into()));
        }
        if input.measuring_unit.trim().is_empty() {
            return Err(BackofficeError::Validation("measuring_unit is required".into()));
        }
        if self
            .size_repo
            .find_by_pair(input.size, &input.measuring_unit)
            .await?
            .is_some()
        {
            return Err(Self::duplicate_size(input.size, &input.measuring_unit));
        }

        let created = match self.size_repo.create(input).await {
            Ok(size) => size,
            Err(e) if is_unique_violation(&e) => {
                return Err(Self::duplicate_size(input.size, &input.measuring_unit))
            }
            Err(e) => return Err(e.into()),
        };
        let _ = self
            .log_repo
            .create(&ActivityLog::record(actor, "CREATE", "property_sizes", created.id.to_string()))
            .await;
        Ok(created)
    }

    pub async fn update_size(
        &self,
        id: i64,
        input: &UpdatePropertySize,
        actor: &str,
    ) -> Result<PropertySize, BackofficeError> {
        self.get_size(id).await?;
        let updated = self.size_repo.update(id, input).await?;
        let _ = self
            .log_repo
            .create(&ActivityLog::record(actor, "UPDATE", "property_sizes", id.to_string()))
            .await;
        Ok(updated)
    }

    pub async fn delete_size(&self, id: i64, actor: &str) -> Result<(), BackofficeError> {
        self.get_size(id).await?;
        self.size_repo.delete(id).await?;
        let _ = self
            .log_repo
            .create(&ActivityLog::record(actor, "DELETE", "property_sizes", id.to_string()))
            .await;
        Ok(())
    }

    async fn require_owner(&self, customer_id: Option<&str>) -> Result<(), BackofficeError> {
        if let Some(customer_id) = customer_id {
            if self
                .customer_repo
                .find_by_customer_id(customer_id)
                .await?
                .is_none()
            {
                return Err(BackofficeError::Validation("Invalid customer selected".into()));
            }
        }
        Ok(())
    }

    fn duplicate_size(size: f64, unit: &str) -> BackofficeError {
        BackofficeError::conflict(
            "size",
            format!("Property size {} {} already exists", size, unit),
        )
    }
}
