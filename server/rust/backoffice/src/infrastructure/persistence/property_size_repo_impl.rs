use async_trait::async_trait;
use sqlx::PgPool;

use crate::domain::entity::property_size::{
    CreatePropertySize, PropertySize, UpdatePropertySize,
};
use crate::domain::repository::property_size_repository::PropertySizeRepository;

pub struct PropertySizePostgresRepository {
    pool: PgPool,
}

impl PropertySizePostgresRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PropertySizeRepository for PropertySizePostgresRepository {
    async fn find_all(
        &self,
        page: i64,
        page_size: i64,
    ) -> anyhow::Result<(Vec<PropertySize>, i64)> {
        let rows = sqlx::query_as::<_, PropertySizeRow>(
            "SELECT * FROM backoffice.property_sizes ORDER BY size LIMIT $1 OFFSET $2",
        )
        .bind(page_size)
        .bind((page - 1) * page_size)
        .fetch_all(&self.pool)
        .await?;
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM backoffice.property_sizes")
            .fetch_one(&self.pool)
            .await?;
        Ok((rows.into_iter().map(|r| r.into()).collect(), total))
    }

    async fn find_by_id(&self, id: i64) -> anyhow::Result<Option<PropertySize>> {
        let row = sqlx::query_as::<_, PropertySizeRow>(
            "SELECT * FROM backoffice.property_sizes WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.map(|r| r.into()))
    }

    async fn find_by_pair(
        &self,
        size: f64,
        measuring_unit: &str,
    ) -> anyhow::Result<Option<PropertySize>> {
        let row = sqlx::query_as::<_, PropertySizeRow>(
            "SELECT * FROM backoffice.property_sizes WHERE size = $1 AND measuring_unit = $2",
        )
        .bind(size)
        .bind(measuring_unit)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.map(|r| r.into()))
    }

    async fn create(&self, input: &CreatePropertySize) -> anyhow::Result<PropertySize> {
        let row = sqlx::query_as::<_, PropertySizeRow>(
            r#"INSERT INTO backoffice.property_sizes (size, measuring_unit)
               VALUES ($1, $2)
               RETURNING *"#,
        )
        .bind(input.size)
        .bind(&input.measuring_unit)
        .fetch_one(&self.pool)
        .await?;
        Ok(row.into())
    }

    async fn update(&self, id: i64, input: &UpdatePropertySize) -> anyhow::Result<PropertySize> {
        let row = sqlx::query_as::<_, PropertySizeRow>(
            r#"UPDATE backoffice.property_sizes SET
               size = COALESCE($2, size),
               measuring_unit = COALESCE($3, measuring_unit)
               WHERE id = $1 RETURNING *"#,
        )
        .bind(id)
        .bind(input.size)
        .bind(&input.measuring_unit)
        .fetch_one(&self.pool)
        .await?;
        Ok(row.into())
    }

    async fn delete(&self, id: i64) -> anyhow::Result<()> {
        sqlx::query("DELETE FROM backoffice.property_sizes WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}

#[derive(sqlx::FromRow)]
struct PropertySizeRow {
    id: i64,
    size: f64,
    measuring_unit: String,
    created_at: chrono::DateTime<chrono::Utc>,
}

impl From<PropertySizeRow> for PropertySize {
    fn from(row: PropertySizeRow) -> Self {
        Self {
            id: row.id,
            size: row.size,
            measuring_unit: row.measuring_unit,
            created_at: row.created_at,
        }
    }
}
