use async_trait::async_trait;

use crate::domain::entity::property_size::{CreatePropertySize, PropertySize, UpdatePropertySize};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PropertySizeRepository: Send + Sync {
    async fn find_all(&self, page: i64, page_size: i64)
        -> anyhow::Result<(Vec<PropertySize>, i64)>;
    async fn find_by_id(&self, id: i64) -> anyhow::Result<Option<PropertySize>>;
    async fn find_by_pair(&self, size: f64, measuring_unit: &str)
        -> anyhow::Result<Option<PropertySize>>;
    async fn create(&self, input: &CreatePropertySize) -> anyhow::Result<PropertySize>;
    async fn update(&self, id: i64, input: &UpdatePropertySize) -> anyhow::Result<PropertySize>;
    async fn delete(&self, id: i64) -> anyhow::Result<()>;
}
