use async_trait::async_trait;

use crate::domain::entity::booking::{Booking, CreateBooking, UpdateBooking};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BookingRepository: Send + Sync {
    async fn find_all(&self, page: i64, page_size: i64) -> anyhow::Result<(Vec<Booking>, i64)>;
    async fn find_by_id(&self, id: i64) -> anyhow::Result<Option<Booking>>;
    async fn create(&self, input: &CreateBooking) -> anyhow::Result<Booking>;
    async fn update(&self, id: i64, input: &UpdateBooking) -> anyhow::Result<Booking>;
    async fn delete(&self, id: i64) -> anyhow::Result<()>;
}
