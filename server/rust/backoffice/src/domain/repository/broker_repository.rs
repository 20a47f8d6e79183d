use async_trait::async_trait;

use crate::domain::entity::broker::{Broker, CreateBroker, UpdateBroker};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BrokerRepository: Send + Sync {
    async fn find_all(&self, page: i64, page_size: i64) -> anyhow::Result<(Vec<Broker>, i64)>;
    async fn find_by_code(&self, broker_code: &str) -> anyhow::Result<Option<Broker>>;
    async fn create(&self, input: &CreateBroker) -> anyhow::Result<Broker>;
    async fn update(&self, broker_code: &str, input: &UpdateBroker) -> anyhow::Result<Broker>;
    async fn delete(&self, broker_code: &str) -> anyhow::Result<()>;
}
