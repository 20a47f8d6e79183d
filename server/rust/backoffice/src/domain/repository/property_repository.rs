use async_trait::async_trait;

use crate::domain::entity::property::{CreateProperty, Property, UpdateProperty};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PropertyRepository: Send + Sync {
    async fn find_all(&self, page: i64, page_size: i64) -> anyhow::Result<(Vec<Property>, i64)>;
    async fn find_by_id(&self, id: i64) -> anyhow::Result<Option<Property>>;
    async fn create(&self, input: &CreateProperty) -> anyhow::Result<Property>;
    async fn update(&self, id: i64, input: &UpdateProperty) -> anyhow::Result<Property>;
    async fn delete(&self, id: i64) -> anyhow::Result<()>;
}
