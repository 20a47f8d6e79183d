use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::entity::plc::{CreatePlc, Plc, UpdatePlc};
use crate::domain::repository::plc_repository::PlcRepository;

pub struct PlcPostgresRepository {
    pool: PgPool,
}

impl PlcPostgresRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PlcRepository for PlcPostgresRepository {
    async fn find_all(&self, page: i64, page_size: i64) -> anyhow::Result<(Vec<Plc>, i64)> {
        let rows = sqlx::query_as::<_, PlcRow>(
            "SELECT * FROM backoffice.plcs ORDER BY name LIMIT $1 OFFSET $2",
        )
        .bind(page_size)
        .bind((page - 1) * page_size)
        .fetch_all(&self.pool)
        .await?;
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM backoffice.plcs")
            .fetch_one(&self.pool)
            .await?;
        Ok((rows.into_iter().map(|r| r.into()).collect(), total))
    }

    async fn find_by_name(&self, name: &str) -> anyhow::Result<Option<Plc>> {
        let row = sqlx::query_as::<_, PlcRow>("SELECT * FROM backoffice.plcs WHERE name = $1")
            .bind(name)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(|r| r.into()))
    }

    async fn create(&self, input: &CreatePlc) -> anyhow::Result<Plc> {
        let row = sqlx::query_as::<_, PlcRow>(
            r#"INSERT INTO backoffice.plcs (name, value, is_percentage, remarks)
               VALUES ($1, $2, $3, $4)
               RETURNING *"#,
        )
        .bind(&input.name)
        .bind(input.value)
        .bind(input.is_percentage)
        .bind(&input.remarks)
        .fetch_one(&self.pool)
        .await?;
        Ok(row.into())
    }

    async fn update(&self, name: &str, input: &UpdatePlc) -> anyhow::Result<Plc> {
        let row = sqlx::query_as::<_, PlcRow>(
            r#"UPDATE backoffice.plcs SET
               value = COALESCE($2, value),
               is_percentage = COALESCE($3, is_percentage),
               remarks = COALESCE($4, remarks)
               WHERE name = $1 RETURNING *"#,
        )
        .bind(name)
        .bind(input.value)
        .bind(input.is_percentage)
        .bind(&input.remarks)
        .fetch_one(&self.pool)
        .await?;
        Ok(row.into())
    }

    async fn delete(&self, name: &str) -> anyhow::Result<()> {
        sqlx::query("DELETE FROM backoffice.plcs WHERE name = $1")
            .bind(name)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}

#[derive(sqlx::FromRow)]
struct PlcRow {
    id: Uuid,
    name: String,
    value: f64,
    is_percentage: bool,
    remarks: Option<String>,
    created_at: chrono::DateTime<chrono::Utc>,
}

impl From<PlcRow> for Plc {
    fn from(row: PlcRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            value: row.value,
            is_percentage: row.is_percentage,
            remarks: row.remarks,
            created_at: row.created_at,
        }
    }
}
