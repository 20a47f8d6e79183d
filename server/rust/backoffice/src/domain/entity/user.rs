use chrono::{DateTime, Utc};
use estate_auth::Role;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub user_id: String,
    pub name: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub role: Role,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize, validator::Validate)]
pub struct CreateUser {
    #[validate(length(min = 3, max = 50))]
    pub user_id: String,
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    #[validate(length(min = 8))]
    pub password: String,
    pub role: Role,
}

#[derive(Debug, Clone, Default, Deserialize, validator::Validate)]
pub struct UpdateUser {
    #[validate(length(min = 1, max = 100))]
    pub name: Option<String>,
    #[validate(length(min = 8))]
    pub password: Option<String>,
    pub is_active: Option<bool>,
}

/// Fields-present patch handed to the repository: only supplied fields
/// are applied, and the plaintext password never leaves the use case.
#[derive(Debug, Clone, Default)]
pub struct UserPatch {
    pub name: Option<String>,
    pub password_hash: Option<String>,
    pub is_active: Option<bool>,
}
