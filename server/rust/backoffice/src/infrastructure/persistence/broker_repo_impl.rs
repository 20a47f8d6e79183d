use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::entity::broker::{Broker, CreateBroker, UpdateBroker};
use crate::domain::repository::broker_repository::BrokerRepository;

pub struct BrokerPostgresRepository {
    pool: PgPool,
}

impl BrokerPostgresRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BrokerRepository for BrokerPostgresRepository {
    async fn find_all(&self, page: i64, page_size: i64) -> anyhow::Result<(Vec<Broker>, i64)> {
        let rows = sqlx::query_as::<_, BrokerRow>(
            "SELECT * FROM backoffice.brokers ORDER BY broker_code LIMIT $1 OFFSET $2",
        )
        .bind(page_size)
        .bind((page - 1) * page_size)
        .fetch_all(&self.pool)
        .await?;
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM backoffice.brokers")
            .fetch_one(&self.pool)
            .await?;
        Ok((rows.into_iter().map(|r| r.into()).collect(), total))
    }

    async fn find_by_code(&self, broker_code: &str) -> anyhow::Result<Option<Broker>> {
        let row = sqlx::query_as::<_, BrokerRow>(
            "SELECT * FROM backoffice.brokers WHERE broker_code = $1",
        )
        .bind(broker_code)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.map(|r| r.into()))
    }

    async fn create(&self, input: &CreateBroker) -> anyhow::Result<Broker> {
        let row = sqlx::query_as::<_, BrokerRow>(
            r#"INSERT INTO backoffice.brokers
               (broker_code, name, mobile, email, pan, address)
               VALUES ($1, $2, $3, $4, $5, $6)
               RETURNING *"#,
        )
        .bind(&input.broker_code)
        .bind(&input.name)
        .bind(&input.mobile)
        .bind(&input.email)
        .bind(&input.pan)
        .bind(&input.address)
        .fetch_one(&self.pool)
        .await?;
        Ok(row.into())
    }

    async fn update(&self, broker_code: &str, input: &UpdateBroker) -> anyhow::Result<Broker> {
        let row = sqlx::query_as::<_, BrokerRow>(
            r#"UPDATE backoffice.brokers SET
               name = COALESCE($2, name),
               mobile = COALESCE($3, mobile),
               email = COALESCE($4, email),
               pan = COALESCE($5, pan),
               address = COALESCE($6, address),
               updated_at = now()
               WHERE broker_code = $1 RETURNING *"#,
        )
        .bind(broker_code)
        .bind(&input.name)
        .bind(&input.mobile)
        .bind(&input.email)
        .bind(&input.pan)
        .bind(&input.address)
        .fetch_one(&self.pool)
        .await?;
        Ok(row.into())
    }

    async fn delete(&self, broker_code: &str) -> anyhow::Result<()> {
        sqlx::query("DELETE FROM backoffice.brokers WHERE broker_code = $1")
            .bind(broker_code)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}

#[derive(sqlx::FromRow)]
struct BrokerRow {
    id: Uuid,
    broker_code: String,
    name: String,
    mobile: Option<String>,
    email: Option<String>,
    pan: Option<String>,
    address: Option<String>,
    created_at: chrono::DateTime<chrono::Utc>,
    updated_at: chrono::DateTime<chrono::Utc>,
}

impl From<BrokerRow> for Broker {
    fn from(row: BrokerRow) -> Self {
        Self {
            id: row.id,
            broker_code: row.broker_code,
            name: row.name,
            mobile: row.mobile,
            email: row.email,
            pan: row.pan,
            address: row.address,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}
