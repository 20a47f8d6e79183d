use std::sync::Arc;

use estate_auth::{Claims, Role};

use crate::domain::entity::activity_log::ActivityLog;
use crate::domain::repository::activity_log_repository::ActivityLogRepository;
use crate::error::BackofficeError;

pub struct GetActivityLogsUseCase {
    log_repo: Arc<dyn ActivityLogRepository>,
}

impl GetActivityLogsUseCase {
    pub fn new(log_repo: Arc<dyn ActivityLogRepository>) -> Self {
        Self { log_repo }
    }

    /// Full log listing, SUPERADMIN/ADMIN only.
    pub async fn list_all(
        &self,
        viewer: &Claims,
        page: i64,
        page_size: i64,
    ) -> Result<(Vec<ActivityLog>, i64), BackofficeError> {
        if !matches!(viewer.role, Role::SuperAdmin | Role::Admin) {
            return Err(BackofficeError::Forbidden(
                "only administrators may view the full activity log".into(),
            ));
        }
        Ok(self.log_repo.find_all(page, page_size).await?)
    }

    /// Per-user listing: administrators, or the user themselves.
    pub async fn list_for_user(
        &self,
        viewer: &Claims,
        user_id: &str,
        page: i64,
        page_size: i64,
    ) -> Result<(Vec<ActivityLog>, i64), BackofficeError> {
        let is_admin = matches!(viewer.role, Role::SuperAdmin | Role::Admin);
        if !is_admin && viewer.user_id != user_id {
            return Err(BackofficeError::Forbidden(
                "users may only view their own activity log".into(),
            ));
        }
        Ok(self.log_repo.find_by_user(user_id, page, page_size).await?)
    }
}
