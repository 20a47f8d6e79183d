use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::entity::co_applicant::{CoApplicant, CreateCoApplicant, UpdateCoApplicant};
use crate::domain::repository::co_applicant_repository::CoApplicantRepository;

pub struct CoApplicantPostgresRepository {
    pool: PgPool,
}

impl CoApplicantPostgresRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CoApplicantRepository for CoApplicantPostgresRepository {
    async fn find_all(
        &self,
        page: i64,
        page_size: i64,
    ) -> anyhow::Result<(Vec<CoApplicant>, i64)> {
        let rows = sqlx::query_as::<_, CoApplicantRow>(
            "SELECT * FROM backoffice.co_applicants ORDER BY name LIMIT $1 OFFSET $2",
        )
        .bind(page_size)
        .bind((page - 1) * page_size)
        .fetch_all(&self.pool)
        .await?;
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM backoffice.co_applicants")
            .fetch_one(&self.pool)
            .await?;
        Ok((rows.into_iter().map(|r| r.into()).collect(), total))
    }

    async fn find_by_id(&self, id: Uuid) -> anyhow::Result<Option<CoApplicant>> {
        let row = sqlx::query_as::<_, CoApplicantRow>(
            "SELECT * FROM backoffice.co_applicants WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.map(|r| r.into()))
    }

    async fn find_by_customer(&self, customer_id: &str) -> anyhow::Result<Vec<CoApplicant>> {
        let rows = sqlx::query_as::<_, CoApplicantRow>(
            "SELECT * FROM backoffice.co_applicants WHERE customer_id = $1 ORDER BY name",
        )
        .bind(customer_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.into_iter().map(|r| r.into()).collect())
    }

    async fn create(&self, input: &CreateCoApplicant) -> anyhow::Result<CoApplicant> {
        let row = sqlx::query_as::<_, CoApplicantRow>(
            r#"INSERT INTO backoffice.co_applicants
               (customer_id, name, relation, email, mobile, pan, aadhar)
               VALUES ($1, $2, $3, $4, $5, $6, $7)
               RETURNING *"#,
        )
        .bind(&input.customer_id)
        .bind(&input.name)
        .bind(&input.relation)
        .bind(&input.email)
        .bind(&input.mobile)
        .bind(&input.pan)
        .bind(&input.aadhar)
        .fetch_one(&self.pool)
        .await?;
        Ok(row.into())
    }

    async fn update(&self, id: Uuid, input: &UpdateCoApplicant) -> anyhow::Result<CoApplicant> {
        let row = sqlx::query_as::<_, CoApplicantRow>(
            r#"UPDATE backoffice.co_applicants SET
               name = COALESCE($2, name),
               relation = COALESCE($3, relation),
               email = COALESCE($4, email),
               mobile = COALESCE($5, mobile),
               pan = COALESCE($6, pan),
               aadhar = COALESCE($7, aadhar)
               WHERE id = $1 RETURNING *"#,
        )
        .bind(id)
        .bind(&input.name)
        .bind(&input.relation)
        .bind(&input.email)
        .bind(&input.mobile)
        .bind(&input.pan)
        .bind(&input.aadhar)
        .fetch_one(&self.pool)
        .await?;
        Ok(row.into())
    }

    async fn delete(&self, id: Uuid) -> anyhow::Result<()> {
        sqlx::query("DELETE FROM backoffice.co_applicants WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}

#[derive(sqlx::FromRow)]
struct CoApplicantRow {
    id: Uuid,
    customer_id: String,
    name: String,
    relation: Option<String>,
    email: Option<String>,
    mobile: Option<String>,
    pan: Option<String>,
    aadhar: Option<String>,
    created_at: chrono::DateTime<chrono::Utc>,
}

impl From<CoApplicantRow> for CoApplicant {
    fn from(row: CoApplicantRow) -> Self {
        Self {
            id: row.id,
            customer_id: row.customer_id,
            name: row.name,
            relation: row.relation,
            email: row.email,
            mobile: row.mobile,
            pan: row.pan,
            aadhar: row.aadhar,
            created_at: row.created_at,
        }
    }
}
