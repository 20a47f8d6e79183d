use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entity::co_applicant::{CoApplicant, CreateCoApplicant, UpdateCoApplicant};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CoApplicantRepository: Send + Sync {
    async fn find_all(&self, page: i64, page_size: i64)
        -> anyhow::Result<(Vec<CoApplicant>, i64)>;
    async fn find_by_id(&self, id: Uuid) -> anyhow::Result<Option<CoApplicant>>;
    async fn find_by_customer(&self, customer_id: &str) -> anyhow::Result<Vec<CoApplicant>>;
    async fn create(&self, input: &CreateCoApplicant) -> anyhow::Result<CoApplicant>;
    async fn update(&self, id: Uuid, input: &UpdateCoApplicant) -> anyhow::Result<CoApplicant>;
    async fn delete(&self, id: Uuid) -> anyhow::Result<()>;
}
