use async_trait::async_trait;

use crate::domain::entity::activity_log::ActivityLog;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ActivityLogRepository: Send + Sync {
    async fn create(&self, log: &ActivityLog) -> anyhow::Result<()>;
    async fn find_all(&self, page: i64, page_size: i64)
        -> anyhow::Result<(Vec<ActivityLog>, i64)>;
    async fn find_by_user(
        &self,
        user_id: &str,
        page: i64,
        page_size: i64,
    ) -> anyhow::Result<(Vec<ActivityLog>, i64)>;
}
