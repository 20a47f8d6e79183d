use std::sync::Arc;

use crate::domain::entity::activity_log::ActivityLog;
use crate::domain::entity::booking::{Booking, CreateBooking, UpdateBooking};
use crate::domain::repository::activity_log_repository::ActivityLogRepository;
use crate::domain::repository::booking_repository::BookingRepository;
use crate::domain::repository::customer_repository::CustomerRepository;
use crate::domain::repository::stock_repository::StockRepository;
use crate::error::BackofficeError;

pub struct ManageBookingsUseCase {
    booking_repo: Arc<dyn BookingRepository>,
    customer_repo: Arc<dyn CustomerRepository>,
    stock_repo: Arc<dyn StockRepository>,
    log_repo: Arc<dyn ActivityLogRepository>,
}

impl ManageBookingsUseCase {
    pub fn new(
        booking_repo: Arc<dyn BookingRepository>,
        customer_repo: Arc<dyn CustomerRepository>,
        stock_repo: Arc<dyn StockRepository>,
        log_repo: Arc<dyn ActivityLogRepository>,
    ) -> Self {
        Self {
            booking_repo,
            customer_repo,
            stock_repo,
            log_repo,
        }
    }

    pub async fn list_bookings(
        &self,
        page: i64,
        page_size: i64,
    ) -> Result<(Vec<Booking>, i64), BackofficeError> {
        Ok(self.booking_repo.find_all(page, page_size).await?)
    }

    pub async fn get_booking(&self, id: i64) -> Result<Booking, BackofficeError> {
        self.booking_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| BackofficeError::NotFound(format!("booking {}", id)))
    }

    /// Books a stocked property for a customer. The customer must exist
    /// and the (project, property) pair must be present in stock.
    pub async fn create_booking(
        &self,
        input: &CreateBooking,
        actor: &str,
    ) -> Result<Booking, BackofficeError> {
        if self
            .customer_repo
            .find_by_customer_id(&input.customer_id)
            .await?
            .is_none()
        {
            return Err(BackofficeError::Validation("Invalid customer selected".into()));
        }
        if self
            .stock_repo
            .find_by_pair(input.project_id, input.property_id)
            .await?
            .is_none()
        {
            return Err(BackofficeError::Validation(
                "Property is not in stock for this project".into(),
            ));
        }

        let created = self.booking_repo.create(input).await?;
        let _ = self
            .log_repo
            .create(&ActivityLog::record(actor, "CREATE", "bookings", created.id.to_string()))
            .await;
        Ok(created)
    }

    pub async fn update_booking(
        &self,
        id: i64,
        input: &UpdateBooking,
        actor: &str,
    ) -> Result<Booking, BackofficeError> {
        self.get_booking(id).await?;
        let updated = self.booking_repo.update(id, input).await?;
        let _ = self
            .log_repo
            .create(&ActivityLog::record(actor, "UPDATE", "bookings", id.to_string()))
            .await;
        Ok(updated)
    }

    pub async fn delete_booking(&self, id: i64, actor: &str) -> Result<(), BackofficeError> {
        self.get_booking(id).await?;
        self.booking_repo.delete(id).await?;
        let _ = self
            .log_repo
            .create(&ActivityLog::record(actor, "DELETE", "bookings", id.to_string()))
            .await;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::repository::activity_log_repository::MockActivityLogRepository;
    use crate::domain::repository::booking_repository::MockBookingRepository;
    use crate::domain::repository::customer_repository::MockCustomerRepository;
    use crate::domain::repository::stock_repository::MockStockRepository;
    use chrono::NaiveDate;

    #[tokio::test]
    async fn test_create_booking_requires_stocked_pair() {
        let mut booking_repo = MockBookingRepository::new();
        booking_repo.expect_create().never();
        let mut customer_repo = MockCustomerRepository::new();
        customer_repo.expect_find_by_customer_id().returning(|id| {
            Ok(Some(crate::domain::entity::customer::Customer {
                id: uuid::Uuid::new_v4(),
                customer_id: id.to_string(),
                first_name: "Asha".to_string(),
                last_name: None,
                email: "asha@example.com".to_string(),
                mobile: "9876543210".to_string(),
                pan: "ABCDE1234F".to_string(),
                aadhar: "123456789012".to_string(),
                address: None,
                city: None,
                state: None,
                pincode: None,
                created_at: chrono::Utc::now(),
                updated_at: chrono::Utc::now(),
            }))
        });
        let mut stock_repo = MockStockRepository::new();
        stock_repo.expect_find_by_pair().returning(|_, _| Ok(None));
        let mut logs = MockActivityLogRepository::new();
        logs.expect_create().returning(|_| Ok(()));

        let uc = ManageBookingsUseCase::new(
            Arc::new(booking_repo),
            Arc::new(customer_repo),
            Arc::new(stock_repo),
            Arc::new(logs),
        );
        let input = CreateBooking {
            customer_id: "CUST001".to_string(),
            project_id: 1,
            property_id: 5,
            booking_date: NaiveDate::from_ymd_opt(2025, 3, 10).expect("valid date"),
            bsp: 4_500_000.0,
            plc_name: None,
            broker_code: None,
            remarks: None,
        };
        assert!(matches!(
            uc.create_booking(&input, "tester").await,
            Err(BackofficeError::Validation(_))
        ));
    }
}
