use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::PgPool;

use crate::domain::entity::property::{CreateProperty, Property, UpdateProperty};
use crate::domain::repository::property_repository::PropertyRepository;

pub struct PropertyPostgresRepository {
    pool: PgPool,
}

impl PropertyPostgresRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PropertyRepository for PropertyPostgresRepository {
    async fn find_all(&self, page: i64, page_size: i64) -> anyhow::Result<(Vec<Property>, i64)> {
        let rows = sqlx::query_as::<_, PropertyRow>(
            "SELECT * FROM backoffice.properties ORDER BY id LIMIT $1 OFFSET $2",
        )
        .bind(page_size)
        .bind((page - 1) * page_size)
        .fetch_all(&self.pool)
        .await?;
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM backoffice.properties")
            .fetch_one(&self.pool)
            .await?;
        Ok((rows.into_iter().map(|r| r.into()).collect(), total))
    }

    async fn find_by_id(&self, id: i64) -> anyhow::Result<Option<Property>> {
        let row = sqlx::query_as::<_, PropertyRow>(
            "SELECT * FROM backoffice.properties WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.map(|r| r.into()))
    }

    async fn create(&self, input: &CreateProperty) -> anyhow::Result<Property> {
        let row = sqlx::query_as::<_, PropertyRow>(
            r#"INSERT INTO backoffice.properties
               (property_type, size, customer_id, allotment_date)
               VALUES ($1, $2, $3, $4)
               RETURNING *"#,
        )
        .bind(&input.property_type)
        .bind(input.size)
        .bind(&input.customer_id)
        .bind(input.allotment_date)
        .fetch_one(&self.pool)
        .await?;
        Ok(row.into())
    }

    async fn update(&self, id: i64, input: &UpdateProperty) -> anyhow::Result<Property> {
        let row = sqlx::query_as::<_, PropertyRow>(
            r#"UPDATE backoffice.properties SET
               property_type = COALESCE($2, property_type),
               size = COALESCE($3, size),
               customer_id = COALESCE($4, customer_id),
               allotment_date = COALESCE($5, allotment_date),
               updated_at = now()
               WHERE id = $1 RETURNING *"#,
        )
        .bind(id)
        .bind(&input.property_type)
        .bind(input.size)
        .bind(&input.customer_id)
        .bind(input.allotment_date)
        .fetch_one(&self.pool)
        .await?;
        Ok(row.into())
    }

    async fn delete(&self, id: i64) -> anyhow::Result<()> {
        sqlx::query("DELETE FROM backoffice.properties WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}

#[derive(sqlx::FromRow)]
struct PropertyRow {
    id: i64,
    property_type: String,
    size: f64,
    customer_id: Option<String>,
    allotment_date: Option<NaiveDate>,
    created_at: chrono::DateTime<chrono::Utc>,
    updated_at: chrono::DateTime<chrono::Utc>,
}

impl From<PropertyRow> for Property {
    fn from(row: PropertyRow) -> Self {
        Self {
            id: row.id,
            property_type: row.property_type,
            size: row.size,
            customer_id: row.customer_id,
            allotment_date: row.allotment_date,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}
