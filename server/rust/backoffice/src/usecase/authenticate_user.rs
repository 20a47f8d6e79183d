use std::sync::Arc;

use estate_auth::TokenService;

use crate::domain::entity::user::User;
use crate::domain::repository::user_repository::UserRepository;
use crate::error::BackofficeError;

pub struct AuthenticateUserUseCase {
    user_repo: Arc<dyn UserRepository>,
    tokens: Arc<TokenService>,
}

impl AuthenticateUserUseCase {
    pub fn new(user_repo: Arc<dyn UserRepository>, tokens: Arc<TokenService>) -> Self {
        Self { user_repo, tokens }
    }

    /// Verifies the credentials and issues a bearer token. Wrong user id,
    /// wrong password and inactive account are indistinguishable to the
    /// caller.
    pub async fn login(
        &self,
        user_id: &str,
        password: &str,
    ) -> Result<(String, User), BackofficeError> {
        let user = self
            .user_repo
            .find_by_user_id(user_id)
            .await?
            .ok_or(BackofficeError::Unauthorized)?;
        if !user.is_active {
            return Err(BackofficeError::Unauthorized);
        }
        let verified = estate_encryption::verify_password(password, &user.password_hash)
            .map_err(|e| BackofficeError::Internal(anyhow::anyhow!(e)))?;
        if !verified {
            return Err(BackofficeError::Unauthorized);
        }

        let token = self
            .tokens
            .issue(&user.id.to_string(), &user.user_id, &user.name, user.role)
            .map_err(|e| BackofficeError::Internal(anyhow::anyhow!(e)))?;
        Ok((token, user))
    }
}
