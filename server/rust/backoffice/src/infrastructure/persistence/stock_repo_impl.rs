use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::PgPool;
use std::str::FromStr;

use crate::domain::entity::stock::{CreateStock, Stock, StockStatus, UpdateStock};
use crate::domain::repository::stock_repository::StockRepository;

pub struct StockPostgresRepository {
    pool: PgPool,
}

impl StockPostgresRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl StockRepository for StockPostgresRepository {
    async fn find_all(&self, page: i64, page_size: i64) -> anyhow::Result<(Vec<Stock>, i64)> {
        let rows = sqlx::query_as::<_, StockRow>(
            "SELECT * FROM backoffice.stock ORDER BY id LIMIT $1 OFFSET $2",
        )
        .bind(page_size)
        .bind((page - 1) * page_size)
        .fetch_all(&self.pool)
        .await?;
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM backoffice.stock")
            .fetch_one(&self.pool)
            .await?;
        Ok((rows.into_iter().map(|r| r.into()).collect(), total))
    }

    async fn find_by_id(&self, id: i64) -> anyhow::Result<Option<Stock>> {
        let row =
            sqlx::query_as::<_, StockRow>("SELECT * FROM backoffice.stock WHERE id = $1")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;
        Ok(row.map(|r| r.into()))
    }

    async fn find_by_pair(
        &self,
        project_id: i64,
        property_id: i64,
    ) -> anyhow::Result<Option<Stock>> {
        let row = sqlx::query_as::<_, StockRow>(
            "SELECT * FROM backoffice.stock WHERE project_id = $1 AND property_id = $2",
        )
        .bind(project_id)
        .bind(property_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.map(|r| r.into()))
    }

    async fn create_if_absent(&self, input: &CreateStock) -> anyhow::Result<Option<Stock>> {
        let mut tx = self.pool.begin().await?;
        let existing: Option<i64> = sqlx::query_scalar(
            "SELECT id FROM backoffice.stock WHERE project_id = $1 AND property_id = $2",
        )
        .bind(input.project_id)
        .bind(input.property_id)
        .fetch_optional(&mut *tx)
        .await?;
        if existing.is_some() {
            return Ok(None);
        }

        let status = input.status.unwrap_or(StockStatus::Free);
        let row = sqlx::query_as::<_, StockRow>(
            r#"INSERT INTO backoffice.stock
               (project_id, property_id, bsp, broker_code, status, on_hold_till)
               VALUES ($1, $2, $3, $4, $5, $6)
               RETURNING *"#,
        )
        .bind(input.project_id)
        .bind(input.property_id)
        .bind(input.bsp)
        .bind(&input.broker_code)
        .bind(status.as_str())
        .bind(input.on_hold_till)
        .fetch_one(&mut *tx)
        .await?;
        tx.commit().await?;
        Ok(Some(row.into()))
    }

    async fn update(&self, id: i64, input: &UpdateStock) -> anyhow::Result<Stock> {
        // on_hold_till is set unconditionally: switching back to Free must
        // clear it rather than keep the stale date
        let row = sqlx::query_as::<_, StockRow>(
            r#"UPDATE backoffice.stock SET
               bsp = COALESCE($2, bsp),
               broker_code = COALESCE($3, broker_code),
               status = COALESCE($4, status),
               on_hold_till = CASE WHEN $4 IS NULL THEN on_hold_till ELSE $5 END,
               updated_at = now()
               WHERE id = $1 RETURNING *"#,
        )
        .bind(id)
        .bind(input.bsp)
        .bind(&input.broker_code)
        .bind(input.status.map(|s| s.as_str()))
        .bind(input.on_hold_till)
        .fetch_one(&self.pool)
        .await?;
        Ok(row.into())
    }

    async fn delete(&self, id: i64) -> anyhow::Result<()> {
        sqlx::query("DELETE FROM backoffice.stock WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}

#[derive(sqlx::FromRow)]
struct StockRow {
    id: i64,
    project_id: i64,
    property_id: i64,
    bsp: f64,
    broker_code: Option<String>,
    status: String,
    on_hold_till: Option<NaiveDate>,
    created_at: chrono::DateTime<chrono::Utc>,
    updated_at: chrono::DateTime<chrono::Utc>,
}

impl From<StockRow> for Stock {
    fn from(row: StockRow) -> Self {
        Self {
            id: row.id,
            project_id: row.project_id,
            property_id: row.property_id,
            bsp: row.bsp,
            broker_code: row.broker_code,
            status: StockStatus::from_str(&row.status).unwrap_or(StockStatus::Free),
            on_hold_till: row.on_hold_till,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}
