use std::sync::Arc;

use estate_auth::{can_create_role, Claims};

use crate::domain::entity::activity_log::ActivityLog;
use crate::domain::entity::user::{CreateUser, UpdateUser, User, UserPatch};
use crate::domain::repository::activity_log_repository::ActivityLogRepository;
use crate::domain::repository::user_repository::UserRepository;
use crate::error::{is_unique_violation, BackofficeError};

pub struct ManageUsersUseCase {
    user_repo: Arc<dyn UserRepository>,
    log_repo: Arc<dyn ActivityLogRepository>,
}

impl ManageUsersUseCase {
    pub fn new(
        user_repo: Arc<dyn UserRepository>,
        log_repo: Arc<dyn ActivityLogRepository>,
    ) -> Self {
        Self { user_repo, log_repo }
    }

    pub async fn list_users(
        &self,
        page: i64,
        page_size: i64,
    ) -> Result<(Vec<User>, i64), BackofficeError> {
        Ok(self.user_repo.find_all(page, page_size).await?)
    }

    /// Creates a user one level below the creator: SUPERADMIN may create
    /// only ADMIN users, ADMIN may create only EMPLOYEE users.
    pub async fn create_user(
        &self,
        creator: &Claims,
        input: &CreateUser,
    ) -> Result<User, BackofficeError> {
        if !can_create_role(creator.role, input.role) {
            return Err(BackofficeError::Forbidden(format!(
                "{} may not create {} users",
                creator.role, input.role
            )));
        }
        if self
            .user_repo
            .find_by_user_id(&input.user_id)
            .await?
            .is_some()
        {
            return Err(Self::duplicate_user(&input.user_id));
        }

        let password_hash = estate_encryption::hash_password(&input.password)
            .map_err(|e| BackofficeError::Internal(anyhow::anyhow!(e)))?;
        let created = match self
            .user_repo
            .create(&input.user_id, &input.name, &password_hash, input.role)
            .await
        {
            Ok(user) => user,
            Err(e) if is_unique_violation(&e) => return Err(Self::duplicate_user(&input.user_id)),
            Err(e) => return Err(e.into()),
        };

        let _ = self
            .log_repo
            .create(&ActivityLog::record(
                &creator.user_id,
                "CREATE",
                "users",
                &created.user_id,
            ))
            .await;
        Ok(created)
    }

    pub async fn update_user(
        &self,
        actor: &Claims,
        user_id: &str,
        input: &UpdateUser,
    ) -> Result<User, BackofficeError> {
        self.require_user(user_id).await?;

        let password_hash = match &input.password {
            Some(password) => Some(
                estate_encryption::hash_password(password)
                    .map_err(|e| BackofficeError::Internal(anyhow::anyhow!(e)))?,
            ),
            None => None,
        };
        let patch = UserPatch {
            name: input.name.clone(),
            password_hash,
            is_active: input.is_active,
        };
        let updated = self.user_repo.update(user_id, &patch).await?;

        let _ = self
            .log_repo
            .create(&ActivityLog::record(&actor.user_id, "UPDATE", "users", user_id))
            .await;
        Ok(updated)
    }

    pub async fn delete_user(&self, actor: &Claims, user_id: &str) -> Result<(), BackofficeError> {
        if actor.user_id == user_id {
            return Err(BackofficeError::Validation(
                "users cannot delete their own account".into(),
            ));
        }
        self.require_user(user_id).await?;
        self.user_repo.delete(user_id).await?;
        let _ = self
            .log_repo
            .create(&ActivityLog::record(&actor.user_id, "DELETE", "users", user_id))
            .await;
        Ok(())
    }

    async fn require_user(&self, user_id: &str) -> Result<User, BackofficeError> {
        self.user_repo
            .find_by_user_id(user_id)
            .await?
            .ok_or_else(|| BackofficeError::NotFound(format!("user '{}'", user_id)))
    }

    fn duplicate_user(user_id: &str) -> BackofficeError {
        BackofficeError::conflict("user_id", format!("User '{}' already exists", user_id))
    }
}
