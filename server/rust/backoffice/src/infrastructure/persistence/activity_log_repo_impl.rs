use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::entity::activity_log::ActivityLog;
use crate::domain::repository::activity_log_repository::ActivityLogRepository;

pub struct ActivityLogPostgresRepository {
    pool: PgPool,
}

impl ActivityLogPostgresRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ActivityLogRepository for ActivityLogPostgresRepository {
    async fn create(&self, log: &ActivityLog) -> anyhow::Result<()> {
        sqlx::query(
            r#"INSERT INTO backoffice.activity_logs
               (id, user_id, action, target_table, target_id, detail, created_at)
               VALUES ($1, $2, $3, $4, $5, $6, $7)"#,
        )
        .bind(log.id)
        .bind(&log.user_id)
        .bind(&log.action)
        .bind(&log.target_table)
        .bind(&log.target_id)
        .bind(&log.detail)
        .bind(log.created_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn find_all(
        &self,
        page: i64,
        page_size: i64,
    ) -> anyhow::Result<(Vec<ActivityLog>, i64)> {
        let rows = sqlx::query_as::<_, ActivityLogRow>(
            "SELECT * FROM backoffice.activity_logs ORDER BY created_at DESC LIMIT $1 OFFSET $2",
        )
        .bind(page_size)
        .bind((page - 1) * page_size)
        .fetch_all(&self.pool)
        .await?;
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM backoffice.activity_logs")
            .fetch_one(&self.pool)
            .await?;
        Ok((rows.into_iter().map(|r| r.into()).collect(), total))
    }

    async fn find_by_user(
        &self,
        user_id: &str,
        page: i64,
        page_size: i64,
    ) -> anyhow::Result<(Vec<ActivityLog>, i64)> {
        let rows = sqlx::query_as::<_, ActivityLogRow>(
            r#"SELECT * FROM backoffice.activity_logs
               WHERE user_id = $1 ORDER BY created_at DESC LIMIT $2 OFFSET $3"#,
        )
        .bind(user_id)
        .bind(page_size)
        .bind((page - 1) * page_size)
        .fetch_all(&self.pool)
        .await?;
        let total: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM backoffice.activity_logs WHERE user_id = $1",
        )
        .bind(user_id)
        .fetch_one(&self.pool)
        .await?;
        Ok((rows.into_iter().map(|r| r.into()).collect(), total))
    }
}

#[derive(sqlx::FromRow)]
struct ActivityLogRow {
    id: Uuid,
    user_id: String,
    action: String,
    target_table: String,
    target_id: Option<String>,
    detail: Option<serde_json::Value>,
    created_at: chrono::DateTime<chrono::Utc>,
}

impl From<ActivityLogRow> for ActivityLog {
    fn from(row: ActivityLogRow) -> Self {
        Self {
            id: row.id,
            user_id: row.user_id,
            action: row.action,
            target_table: row.target_table,
            target_id: row.target_id,
            detail: row.detail,
            created_at: row.created_at,
        }
    }
}
