use async_trait::async_trait;
use sqlx::PgPool;

use crate::domain::entity::project::{CreateProject, Project, UpdateProject};
use crate::domain::repository::project_repository::ProjectRepository;

pub struct ProjectPostgresRepository {
    pool: PgPool,
}

impl ProjectPostgresRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ProjectRepository for ProjectPostgresRepository {
    async fn find_all(&self, page: i64, page_size: i64) -> anyhow::Result<(Vec<Project>, i64)> {
        let rows = sqlx::query_as::<_, ProjectRow>(
            "SELECT * FROM backoffice.projects ORDER BY name LIMIT $1 OFFSET $2",
        )
        .bind(page_size)
        .bind((page - 1) * page_size)
        .fetch_all(&self.pool)
        .await?;
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM backoffice.projects")
            .fetch_one(&self.pool)
            .await?;
        Ok((rows.into_iter().map(|r| r.into()).collect(), total))
    }

    async fn find_by_id(&self, id: i64) -> anyhow::Result<Option<Project>> {
        let row = sqlx::query_as::<_, ProjectRow>(
            "SELECT * FROM backoffice.projects WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.map(|r| r.into()))
    }

    async fn find_by_name(&self, name: &str) -> anyhow::Result<Option<Project>> {
        let row = sqlx::query_as::<_, ProjectRow>(
            "SELECT * FROM backoffice.projects WHERE name = $1",
        )
        .bind(name)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.map(|r| r.into()))
    }

    async fn find_by_name_excluding(
        &self,
        name: &str,
        id: i64,
    ) -> anyhow::Result<Option<Project>> {
        let row = sqlx::query_as::<_, ProjectRow>(
            "SELECT * FROM backoffice.projects WHERE name = $1 AND id <> $2",
        )
        .bind(name)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.map(|r| r.into()))
    }

    async fn create(&self, input: &CreateProject) -> anyhow::Result<Project> {
        let row = sqlx::query_as::<_, ProjectRow>(
            r#"INSERT INTO backoffice.projects
               (name, plan_name, address, city, state, pincode, company_name,
                sign_image, size, measuring_unit)
               VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
               RETURNING *"#,
        )
        .bind(&input.name)
        .bind(&input.plan_name)
        .bind(&input.address)
        .bind(&input.city)
        .bind(&input.state)
        .bind(&input.pincode)
        .bind(&input.company_name)
        .bind(&input.sign_image)
        .bind(input.size)
        .bind(&input.measuring_unit)
        .fetch_one(&self.pool)
        .await?;
        Ok(row.into())
    }

    async fn update(&self, id: i64, input: &UpdateProject) -> anyhow::Result<Project> {
        // Dynamic update - only set fields that are Some
        let row = sqlx::query_as::<_, ProjectRow>(
            r#"UPDATE backoffice.projects SET
               name = COALESCE($2, name),
               plan_name = COALESCE($3, plan_name),
               address = COALESCE($4, address),
               city = COALESCE($5, city),
               state = COALESCE($6, state),
               pincode = COALESCE($7, pincode),
               company_name = COALESCE($8, company_name),
               sign_image = COALESCE($9, sign_image),
               size = COALESCE($10, size),
               measuring_unit = COALESCE($11, measuring_unit),
               updated_at = now()
               WHERE id = $1 RETURNING *"#,
        )
        .bind(id)
        .bind(&input.name)
        .bind(&input.plan_name)
        .bind(&input.address)
        .bind(&input.city)
        .bind(&input.state)
        .bind(&input.pincode)
        .bind(&input.company_name)
        .bind(&input.sign_image)
        .bind(input.size)
        .bind(&input.measuring_unit)
        .fetch_one(&self.pool)
        .await?;
        Ok(row.into())
    }

    async fn delete(&self, id: i64) -> anyhow::Result<()> {
        sqlx::query("DELETE FROM backoffice.projects WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}

#[derive(sqlx::FromRow)]
struct ProjectRow {
    id: i64,
    name: String,
    plan_name: String,
    address: Option<String>,
    city: Option<String>,
    state: Option<String>,
    pincode: Option<String>,
    company_name: Option<String>,
    sign_image: Option<String>,
    size: Option<f64>,
    measuring_unit: Option<String>,
    created_at: chrono::DateTime<chrono::Utc>,
    updated_at: chrono::DateTime<chrono::Utc>,
}

impl From<ProjectRow> for Project {
    fn from(row: ProjectRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            plan_name: row.plan_name,
            address: row.address,
            city: row.city,
            state: row.state,
            pincode: row.pincode,
            company_name: row.company_name,
            sign_image: row.sign_image,
            size: row.size,
            measuring_unit: row.measuring_unit,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}
