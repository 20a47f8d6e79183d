use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::entity::bank::{Bank, CreateBank, UpdateBank};
use crate::domain::repository::bank_repository::BankRepository;

pub struct BankPostgresRepository {
    pool: PgPool,
}

impl BankPostgresRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BankRepository for BankPostgresRepository {
    async fn find_all(&self, page: i64, page_size: i64) -> anyhow::Result<(Vec<Bank>, i64)> {
        let rows = sqlx::query_as::<_, BankRow>(
            "SELECT * FROM backoffice.banks ORDER BY bank_name LIMIT $1 OFFSET $2",
        )
        .bind(page_size)
        .bind((page - 1) * page_size)
        .fetch_all(&self.pool)
        .await?;
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM backoffice.banks")
            .fetch_one(&self.pool)
            .await?;
        Ok((rows.into_iter().map(|r| r.into()).collect(), total))
    }

    async fn find_by_ifsc(&self, ifsc_code: &str) -> anyhow::Result<Option<Bank>> {
        let row =
            sqlx::query_as::<_, BankRow>("SELECT * FROM backoffice.banks WHERE ifsc_code = $1")
                .bind(ifsc_code)
                .fetch_optional(&self.pool)
                .await?;
        Ok(row.map(|r| r.into()))
    }

    async fn create(&self, input: &CreateBank) -> anyhow::Result<Bank> {
        let row = sqlx::query_as::<_, BankRow>(
            r#"INSERT INTO backoffice.banks
               (ifsc_code, bank_name, branch_name, address, city, state)
               VALUES ($1, $2, $3, $4, $5, $6)
               RETURNING *"#,
        )
        .bind(&input.ifsc_code)
        .bind(&input.bank_name)
        .bind(&input.branch_name)
        .bind(&input.address)
        .bind(&input.city)
        .bind(&input.state)
        .fetch_one(&self.pool)
        .await?;
        Ok(row.into())
    }

    async fn update(&self, ifsc_code: &str, input: &UpdateBank) -> anyhow::Result<Bank> {
        let row = sqlx::query_as::<_, BankRow>(
            r#"UPDATE backoffice.banks SET
               bank_name = COALESCE($2, bank_name),
               branch_name = COALESCE($3, branch_name),
               address = COALESCE($4, address),
               city = COALESCE($5, city),
               state = COALESCE($6, state)
               WHERE ifsc_code = $1 RETURNING *"#,
        )
        .bind(ifsc_code)
        .bind(&input.bank_name)
        .bind(&input.branch_name)
        .bind(&input.address)
        .bind(&input.city)
        .bind(&input.state)
        .fetch_one(&self.pool)
        .await?;
        Ok(row.into())
    }

    async fn delete(&self, ifsc_code: &str) -> anyhow::Result<()> {
        sqlx::query("DELETE FROM backoffice.banks WHERE ifsc_code = $1")
            .bind(ifsc_code)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}

#[derive(sqlx::FromRow)]
struct BankRow {
    id: Uuid,
    ifsc_code: String,
    bank_name: String,
    branch_name: Option<String>,
    address: Option<String>,
    city: Option<String>,
    state: Option<String>,
    created_at: chrono::DateTime<chrono::Utc>,
}

impl From<BankRow> for Bank {
    fn from(row: BankRow) -> Self {
        Self {
            id: row.id,
            ifsc_code: row.ifsc_code,
            bank_name: row.bank_name,
            branch_name: row.branch_name,
            address: row.address,
            city: row.city,
            state: row.state,
            created_at: row.created_at,
        }
    }
}
