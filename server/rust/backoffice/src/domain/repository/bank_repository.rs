use async_trait::async_trait;

use crate::domain::entity::bank::{Bank, CreateBank, UpdateBank};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BankRepository: Send + Sync {
    async fn find_all(&self, page: i64, page_size: i64) -> anyhow::Result<(Vec<Bank>, i64)>;
    async fn find_by_ifsc(&self, ifsc_code: &str) -> anyhow::Result<Option<Bank>>;
    async fn create(&self, input: &CreateBank) -> anyhow::Result<Bank>;
    async fn update(&self, ifsc_code: &str, input: &UpdateBank) -> anyhow::Result<Bank>;
    async fn delete(&self, ifsc_code: &str) -> anyhow::Result<()>;
}
