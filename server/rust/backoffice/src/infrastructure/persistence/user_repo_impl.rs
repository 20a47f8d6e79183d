use async_trait::async_trait;
use sqlx::PgPool;
use std::str::FromStr;
use uuid::Uuid;

use crate::domain::entity::user::{User, UserPatch};
use crate::domain::repository::user_repository::UserRepository;
use estate_auth::Role;

pub struct UserPostgresRepository {
    pool: PgPool,
}

impl UserPostgresRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for UserPostgresRepository {
    async fn find_all(&self, page: i64, page_size: i64) -> anyhow::Result<(Vec<User>, i64)> {
        let rows = sqlx::query_as::<_, UserRow>(
            "SELECT * FROM backoffice.users ORDER BY user_id LIMIT $1 OFFSET $2",
        )
        .bind(page_size)
        .bind((page - 1) * page_size)
        .fetch_all(&self.pool)
        .await?;
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM backoffice.users")
            .fetch_one(&self.pool)
            .await?;
        Ok((rows.into_iter().map(|r| r.into()).collect(), total))
    }

    async fn find_by_user_id(&self, user_id: &str) -> anyhow::Result<Option<User>> {
        let row =
            sqlx::query_as::<_, UserRow>("SELECT * FROM backoffice.users WHERE user_id = $1")
                .bind(user_id)
                .fetch_optional(&self.pool)
                .await?;
        Ok(row.map(|r| r.into()))
    }

    async fn create(
        &self,
        user_id: &str,
        name: &str,
        password_hash: &str,
        role: Role,
    ) -> anyhow::Result<User> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"INSERT INTO backoffice.users (user_id, name, password_hash, role)
               VALUES ($1, $2, $3, $4)
               RETURNING *"#,
        )
        .bind(user_id)
        .bind(name)
        .bind(password_hash)
        .bind(role.as_str())
        .fetch_one(&self.pool)
        .await?;
        Ok(row.into())
    }

    async fn update(&self, user_id: &str, patch: &UserPatch) -> anyhow::Result<User> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"UPDATE backoffice.users SET
               name = COALESCE($2, name),
               password_hash = COALESCE($3, password_hash),
               is_active = COALESCE($4, is_active),
               updated_at = now()
               WHERE user_id = $1 RETURNING *"#,
        )
        .bind(user_id)
        .bind(&patch.name)
        .bind(&patch.password_hash)
        .bind(patch.is_active)
        .fetch_one(&self.pool)
        .await?;
        Ok(row.into())
    }

    async fn delete(&self, user_id: &str) -> anyhow::Result<()> {
        sqlx::query("DELETE FROM backoffice.users WHERE user_id = $1")
            .bind(user_id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}

#[derive(sqlx::FromRow)]
struct UserRow {
    id: Uuid,
    user_id: String,
    name: String,
    password_hash: String,
    role: String,
    is_active: bool,
    created_at: chrono::DateTime<chrono::Utc>,
    updated_at: chrono::DateTime<chrono::Utc>,
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        Self {
            id: row.id,
            user_id: row.user_id,
            name: row.name,
            password_hash: row.password_hash,
            role: Role::from_str(&row.role).unwrap_or(Role::Employee),
            is_active: row.is_active,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}
