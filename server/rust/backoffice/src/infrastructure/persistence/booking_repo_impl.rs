use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::PgPool;

use crate::domain::entity::booking::{Booking, CreateBooking, UpdateBooking};
use crate::domain::repository::booking_repository::BookingRepository;

pub struct BookingPostgresRepository {
    pool: PgPool,
}

impl BookingPostgresRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BookingRepository for BookingPostgresRepository {
    async fn find_all(&self, page: i64, page_size: i64) -> anyhow::Result<(Vec<Booking>, i64)> {
        let rows = sqlx::query_as::<_, BookingRow>(
            "SELECT * FROM backoffice.bookings ORDER BY booking_date DESC, id LIMIT $1 OFFSET $2",
        )
        .bind(page_size)
        .bind((page - 1) * page_size)
        .fetch_all(&self.pool)
        .await?;
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM backoffice.bookings")
            .fetch_one(&self.pool)
            .await?;
        Ok((rows.into_iter().map(|r| r.into()).collect(), total))
    }

    async fn find_by_id(&self, id: i64) -> anyhow::Result<Option<Booking>> {
        let row = sqlx::query_as::<_, BookingRow>(
            "SELECT * FROM backoffice.bookings WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.map(|r| r.into()))
    }

    async fn create(&self, input: &CreateBooking) -> anyhow::Result<Booking> {
        let row = sqlx::query_as::<_, BookingRow>(
            r#"INSERT INTO backoffice.bookings
               (customer_id, project_id, property_id, booking_date, bsp,
                plc_name, broker_code, remarks)
               VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
               RETURNING *"#,
        )
        .bind(&input.customer_id)
        .bind(input.project_id)
        .bind(input.property_id)
        .bind(input.booking_date)
        .bind(input.bsp)
        .bind(&input.plc_name)
        .bind(&input.broker_code)
        .bind(&input.remarks)
        .fetch_one(&self.pool)
        .await?;
        Ok(row.into())
    }

    async fn update(&self, id: i64, input: &UpdateBooking) -> anyhow::Result<Booking> {
        let row = sqlx::query_as::<_, BookingRow>(
            r#"UPDATE backoffice.bookings SET
               booking_date = COALESCE($2, booking_date),
               bsp = COALESCE($3, bsp),
               plc_name = COALESCE($4, plc_name),
               broker_code = COALESCE($5, broker_code),
               remarks = COALESCE($6, remarks),
               updated_at = now()
               WHERE id = $1 RETURNING *"#,
        )
        .bind(id)
        .bind(input.booking_date)
        .bind(input.bsp)
        .bind(&input.plc_name)
        .bind(&input.broker_code)
        .bind(&input.remarks)
        .fetch_one(&self.pool)
        .await?;
        Ok(row.into())
    }

    async fn delete(&self, id: i64) -> anyhow::Result<()> {
        sqlx::query("DELETE FROM backoffice.bookings WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}

#[derive(sqlx::FromRow)]
struct BookingRow {
    id: i64,
    customer_id: String,
    project_id: i64,
    property_id: i64,
    booking_date: NaiveDate,
    bsp: f64,
    plc_name: Option<String>,
    broker_code: Option<String>,
    remarks: Option<String>,
    created_at: chrono::DateTime<chrono::Utc>,
    updated_at: chrono::DateTime<chrono::Utc>,
}

impl From<BookingRow> for Booking {
    fn from(row: BookingRow) -> Self {
        Self {
            id: row.id,
            customer_id: row.customer_id,
            project_id: row.project_id,
            property_id: row.property_id,
            booking_date: row.booking_date,
            bsp: row.bsp,
            plc_name: row.plc_name,
            broker_code: row.broker_code,
            remarks: row.remarks,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}
