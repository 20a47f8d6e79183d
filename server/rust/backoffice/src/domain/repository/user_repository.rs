use async_trait::async_trait;

use crate::domain::entity::user::{User, UserPatch};
use estate_auth::Role;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn find_all(&self, page: i64, page_size: i64) -> anyhow::Result<(Vec<User>, i64)>;
    async fn find_by_user_id(&self, user_id: &str) -> anyhow::Result<Option<User>>;
    async fn create(
        &self,
        user_id: &str,
        name: &str,
        password_hash: &str,
        role: Role,
    ) -> anyhow::Result<User>;
    async fn update(&self, user_id: &str, patch: &UserPatch) -> anyhow::Result<User>;
    async fn delete(&self, user_id: &str) -> anyhow::Result<()>;
}
