use async_trait::async_trait;
use sqlx::{PgPool, Postgres, Transaction};
use uuid::Uuid;

use crate::domain::entity::customer::{
    CreateCustomer, Customer, CustomerWriteOutcome, DuplicateField, UpdateCustomer,
};
use crate::domain::repository::customer_repository::CustomerRepository;

pub struct CustomerPostgresRepository {
    pool: PgPool,
}

impl CustomerPostgresRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Returns the duplicate marker when `value` is already taken by a
    /// customer other than `exclude`.
    async fn check_taken(
        tx: &mut Transaction<'_, Postgres>,
        column: &'static str,
        value: &str,
        exclude: Option<&str>,
    ) -> anyhow::Result<Option<DuplicateField>> {
        let query = format!(
            "SELECT customer_id FROM backoffice.customers WHERE {} = $1 AND ($2::text IS NULL OR customer_id <> $2)",
            column
        );
        let taken: Option<String> = sqlx::query_scalar(&query)
            .bind(value)
            .bind(exclude)
            .fetch_optional(&mut **tx)
            .await?;
        Ok(taken.map(|_| DuplicateField {
            field: column,
            value: value.to_string(),
        }))
    }
}

#[async_trait]
impl CustomerRepository for CustomerPostgresRepository {
    async fn find_all(&self, page: i64, page_size: i64) -> anyhow::Result<(Vec<Customer>, i64)> {
        let rows = sqlx::query_as::<_, CustomerRow>(
            "SELECT * FROM backoffice.customers ORDER BY customer_id LIMIT $1 OFFSET $2",
        )
        .bind(page_size)
        .bind((page - 1) * page_size)
        .fetch_all(&self.pool)
        .await?;
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM backoffice.customers")
            .fetch_one(&self.pool)
            .await?;
        Ok((rows.into_iter().map(|r| r.into()).collect(), total))
    }

    async fn find_by_customer_id(&self, customer_id: &str) -> anyhow::Result<Option<Customer>> {
        let row = sqlx::query_as::<_, CustomerRow>(
            "SELECT * FROM backoffice.customers WHERE customer_id = $1",
        )
        .bind(customer_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.map(|r| r.into()))
    }

    async fn create_checked(
        &self,
        input: &CreateCustomer,
    ) -> anyhow::Result<CustomerWriteOutcome> {
        let mut tx = self.pool.begin().await?;

        let mut duplicates = Vec::new();
        for (column, value) in [
            ("customer_id", input.customer_id.as_str()),
            ("email", input.email.as_str()),
            ("mobile", input.mobile.as_str()),
            ("pan", input.pan.as_str()),
            ("aadhar", input.aadhar.as_str()),
        ] {
            if let Some(dup) = Self::check_taken(&mut tx, column, value, None).await? {
                duplicates.push(dup);
            }
        }
        if !duplicates.is_empty() {
            return Ok(CustomerWriteOutcome::Duplicate(duplicates));
        }

        let row = sqlx::query_as::<_, CustomerRow>(
            r#"INSERT INTO backoffice.customers
               (customer_id, first_name, last_name, email, mobile, pan, aadhar,
                address, city, state, pincode)
               VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
               RETURNING *"#,
        )
        .bind(&input.customer_id)
        .bind(&input.first_name)
        .bind(&input.last_name)
        .bind(&input.email)
        .bind(&input.mobile)
        .bind(&input.pan)
        .bind(&input.aadhar)
        .bind(&input.address)
        .bind(&input.city)
        .bind(&input.state)
        .bind(&input.pincode)
        .fetch_one(&mut *tx)
        .await?;
        tx.commit().await?;
        Ok(CustomerWriteOutcome::Written(row.into()))
    }

    async fn update_checked(
        &self,
        customer_id: &str,
        input: &UpdateCustomer,
    ) -> anyhow::Result<Option<CustomerWriteOutcome>> {
        let mut tx = self.pool.begin().await?;

        let current = sqlx::query_as::<_, CustomerRow>(
            "SELECT * FROM backoffice.customers WHERE customer_id = $1",
        )
        .bind(customer_id)
        .fetch_optional(&mut *tx)
        .await?;
        let current: Customer = match current {
            Some(row) => row.into(),
            None => return Ok(None),
        };

        // re-check only fields that changed from their stored value
        let mut duplicates = Vec::new();
        let changed: [(&'static str, Option<&str>, &str); 4] = [
            ("email", input.email.as_deref(), current.email.as_str()),
            ("mobile", input.mobile.as_deref(), current.mobile.as_str()),
            ("pan", input.pan.as_deref(), current.pan.as_str()),
            ("aadhar", input.aadhar.as_deref(), current.aadhar.as_str()),
        ];
        for (column, supplied, stored) in changed {
            if let Some(value) = supplied {
                if value != stored {
                    if let Some(dup) =
                        Self::check_taken(&mut tx, column, value, Some(customer_id)).await?
                    {
                        duplicates.push(dup);
                    }
                }
            }
        }
        if !duplicates.is_empty() {
            return Ok(Some(CustomerWriteOutcome::Duplicate(duplicates)));
        }

        let row = sqlx::query_as::<_, CustomerRow>(
            r#"UPDATE backoffice.customers SET
               first_name = COALESCE($2, first_name),
               last_name = COALESCE($3, last_name),
               email = COALESCE($4, email),
               mobile = COALESCE($5, mobile),
               pan = COALESCE($6, pan),
               aadhar = COALESCE($7, aadhar),
               address = COALESCE($8, address),
               city = COALESCE($9, city),
               state = COALESCE($10, state),
               pincode = COALESCE($11, pincode),
               updated_at = now()
               WHERE customer_id = $1 RETURNING *"#,
        )
        .bind(customer_id)
        .bind(&input.first_name)
        .bind(&input.last_name)
        .bind(&input.email)
        .bind(&input.mobile)
        .bind(&input.pan)
        .bind(&input.aadhar)
        .bind(&input.address)
        .bind(&input.city)
        .bind(&input.state)
        .bind(&input.pincode)
        .fetch_one(&mut *tx)
        .await?;
        tx.commit().await?;
        Ok(Some(CustomerWriteOutcome::Written(row.into())))
    }

    async fn delete(&self, customer_id: &str) -> anyhow::Result<()> {
        sqlx::query("DELETE FROM backoffice.customers WHERE customer_id = $1")
            .bind(customer_id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}

#[derive(sqlx::FromRow)]
struct CustomerRow {
    id: Uuid,
    customer_id: String,
    first_name: String,
    last_name: Option<String>,
    email: String,
    mobile: String,
    pan: String,
    aadhar: String,
    address: Option<String>,
    city: Option<String>,
    state: Option<String>,
    pincode: Option<String>,
    created_at: chrono::DateTime<chrono::Utc>,
    updated_at: chrono::DateTime<chrono::Utc>,
}

impl From<CustomerRow> for Customer {
    fn from(row: CustomerRow) -> Self {
        Self {
            id: row.id,
            customer_id: row.customer_id,
            first_name: row.first_name,
            last_name: row.last_name,
            email: row.email,
            mobile: row.mobile,
            pan: row.pan,
            aadhar: row.aadhar,
            address: row.address,
            city: row.city,
            state: row.state,
            pincode: row.pincode,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}
