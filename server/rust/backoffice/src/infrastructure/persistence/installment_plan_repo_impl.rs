use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::entity::installment_plan::{
    CreateInstallmentPlan, InstallmentDetail, InstallmentPlan, NewInstallmentDetail,
};
use crate::domain::repository::installment_plan_repository::InstallmentPlanRepository;

pub struct InstallmentPlanPostgresRepository {
    pool: PgPool,
}

impl InstallmentPlanPostgresRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl InstallmentPlanRepository for InstallmentPlanPostgresRepository {
    async fn find_all(
        &self,
        page: i64,
        page_size: i64,
    ) -> anyhow::Result<(Vec<InstallmentPlan>, i64)> {
        let rows = sqlx::query_as::<_, InstallmentPlanRow>(
            "SELECT * FROM backoffice.installment_plans ORDER BY plan_name LIMIT $1 OFFSET $2",
        )
        .bind(page_size)
        .bind((page - 1) * page_size)
        .fetch_all(&self.pool)
        .await?;
        let total: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM backoffice.installment_plans")
                .fetch_one(&self.pool)
                .await?;
        Ok((rows.into_iter().map(|r| r.into()).collect(), total))
    }

    async fn find_by_name(&self, plan_name: &str) -> anyhow::Result<Option<InstallmentPlan>> {
        let row = sqlx::query_as::<_, InstallmentPlanRow>(
            "SELECT * FROM backoffice.installment_plans WHERE plan_name = $1",
        )
        .bind(plan_name)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.map(|r| r.into()))
    }

    async fn create(&self, input: &CreateInstallmentPlan) -> anyhow::Result<InstallmentPlan> {
        let row = sqlx::query_as::<_, InstallmentPlanRow>(
            r#"INSERT INTO backoffice.installment_plans (plan_name, no_of_installments)
               VALUES ($1, $2)
               RETURNING *"#,
        )
        .bind(&input.plan_name)
        .bind(input.no_of_installments)
        .fetch_one(&self.pool)
        .await?;
        Ok(row.into())
    }

    async fn update_count(
        &self,
        plan_name: &str,
        no_of_installments: i32,
    ) -> anyhow::Result<InstallmentPlan> {
        let row = sqlx::query_as::<_, InstallmentPlanRow>(
            r#"UPDATE backoffice.installment_plans SET
               no_of_installments = $2,
               updated_at = now()
               WHERE plan_name = $1 RETURNING *"#,
        )
        .bind(plan_name)
        .bind(no_of_installments)
        .fetch_one(&self.pool)
        .await?;
        Ok(row.into())
    }

    async fn delete_with_details(&self, plan_name: &str) -> anyhow::Result<()> {
        // children before parent
        let mut tx = self.pool.begin().await?;
        sqlx::query("DELETE FROM backoffice.installment_details WHERE plan_name = $1")
            .bind(plan_name)
            .execute(&mut *tx)
            .await?;
        sqlx::query("DELETE FROM backoffice.installment_plans WHERE plan_name = $1")
            .bind(plan_name)
            .execute(&mut *tx)
            .await?;
        tx.commit().await?;
        Ok(())
    }

    async fn find_details(&self, plan_name: &str) -> anyhow::Result<Vec<InstallmentDetail>> {
        let rows = sqlx::query_as::<_, InstallmentDetailRow>(
            r#"SELECT * FROM backoffice.installment_details
               WHERE plan_name = $1 ORDER BY installment_number"#,
        )
        .bind(plan_name)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.into_iter().map(|r| r.into()).collect())
    }

    async fn insert_details(
        &self,
        plan_name: &str,
        rows: &[NewInstallmentDetail],
    ) -> anyhow::Result<Vec<InstallmentDetail>> {
        let mut tx = self.pool.begin().await?;
        let mut results = Vec::with_capacity(rows.len());
        for row in rows {
            let inserted = sqlx::query_as::<_, InstallmentDetailRow>(
                r#"INSERT INTO backoffice.installment_details
                   (plan_name, installment_number, amount, percentage, due_date, remarks)
                   VALUES ($1, $2, $3, $4, $5, $6)
                   RETURNING *"#,
            )
            .bind(plan_name)
            .bind(row.installment_number)
            .bind(row.amount)
            .bind(row.percentage)
            .bind(row.due_date)
            .bind(&row.remarks)
            .fetch_one(&mut *tx)
            .await?;
            results.push(inserted.into());
        }
        tx.commit().await?;
        Ok(results)
    }

    async fn replace_details(
        &self,
        plan_name: &str,
        rows: &[NewInstallmentDetail],
    ) -> anyhow::Result<Vec<InstallmentDetail>> {
        let mut tx = self.pool.begin().await?;
        sqlx::query("DELETE FROM backoffice.installment_details WHERE plan_name = $1")
            .bind(plan_name)
            .execute(&mut *tx)
            .await?;
        let mut results = Vec::with_capacity(rows.len());
        for row in rows {
            let inserted = sqlx::query_as::<_, InstallmentDetailRow>(
                r#"INSERT INTO backoffice.installment_details
                   (plan_name, installment_number, amount, percentage, due_date, remarks)
                   VALUES ($1, $2, $3, $4, $5, $6)
                   RETURNING *"#,
            )
            .bind(plan_name)
            .bind(row.installment_number)
            .bind(row.amount)
            .bind(row.percentage)
            .bind(row.due_date)
            .bind(&row.remarks)
            .fetch_one(&mut *tx)
            .await?;
            results.push(inserted.into());
        }
        tx.commit().await?;
        Ok(results)
    }
}

#[derive(sqlx::FromRow)]
struct InstallmentPlanRow {
    id: Uuid,
    plan_name: String,
    no_of_installments: i32,
    created_at: chrono::DateTime<chrono::Utc>,
    updated_at: chrono::DateTime<chrono::Utc>,
}

impl From<InstallmentPlanRow> for InstallmentPlan {
    fn from(row: InstallmentPlanRow) -> Self {
        Self {
            id: row.id,
            plan_name: row.plan_name,
            no_of_installments: row.no_of_installments,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[derive(sqlx::FromRow)]
struct InstallmentDetailRow {
    id: Uuid,
    plan_name: String,
    installment_number: i32,
    amount: f64,
    percentage: f64,
    due_date: NaiveDate,
    remarks: Option<String>,
    created_at: chrono::DateTime<chrono::Utc>,
}

impl From<InstallmentDetailRow> for InstallmentDetail {
    fn from(row: InstallmentDetailRow) -> Self {
        Self {
            id: row.id,
            plan_name: row.plan_name,
            installment_number: row.installment_number,
            amount: row.amount,
            percentage: row.percentage,
            due_date: row.due_date,
            remarks: row.remarks,
            created_at: row.created_at,
        }
    }
}
