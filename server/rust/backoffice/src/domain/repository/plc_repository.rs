use async_trait::async_trait;

use crate::domain::entity::plc::{CreatePlc, Plc, UpdatePlc};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PlcRepository: Send + Sync {
    async fn find_all(&self, page: i64, page_size: i64) -> anyhow::Result<(Vec<Plc>, i64)>;
    async fn find_by_name(&self, name: &str) -> anyhow::Result<Option<Plc>>;
    async fn create(&self, input: &CreatePlc) -> anyhow::Result<Plc>;
    async fn update(&self, name: &str, input: &UpdatePlc) -> anyhow::Result<Plc>;
    async fn delete(&self, name: &str) -> anyhow::Result<()>;
}
