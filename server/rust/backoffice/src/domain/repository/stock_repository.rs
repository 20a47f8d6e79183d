use async_trait::async_trait;

use crate::domain::entity::stock::{CreateStock, Stock, UpdateStock};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait StockRepository: Send + Sync {
    async fn find_all(&self, page: i64, page_size: i64) -> anyhow::Result<(Vec<Stock>, i64)>;
    async fn find_by_id(&self, id: i64) -> anyhow::Result<Option<Stock>>;
    async fn find_by_pair(&self, project_id: i64, property_id: i64)
        -> anyhow::Result<Option<Stock>>;
    /// Inserts only when no row exists for the (project, property) pair;
    /// the existence check and insert share one transaction. Returns
    /// `None` when the pair is already stocked. The unique constraint on
    /// the pair remains the authoritative backstop for lost races.
    async fn create_if_absent(&self, input: &CreateStock) -> anyhow::Result<Option<Stock>>;
    async fn update(&self, id: i64, input: &UpdateStock) -> anyhow::Result<Stock>;
    async fn delete(&self, id: i64) -> anyhow::Result<()>;
}
