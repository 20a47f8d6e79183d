use async_trait::async_trait;

use crate::domain::entity::customer::{
    CreateCustomer, Customer, CustomerWriteOutcome, UpdateCustomer,
};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CustomerRepository: Send + Sync {
    async fn find_all(&self, page: i64, page_size: i64) -> anyhow::Result<(Vec<Customer>, i64)>;
    async fn find_by_customer_id(&self, customer_id: &str) -> anyhow::Result<Option<Customer>>;
    /// Checks every uniqueness-sensitive field (email, mobile, pan,
    /// aadhar, customer_id) and inserts, all inside one transaction, so
    /// the conflict report names the precise offending fields.
    async fn create_checked(&self, input: &CreateCustomer)
        -> anyhow::Result<CustomerWriteOutcome>;
    /// Re-checks only fields that changed from their stored value,
    /// excluding the record being edited, then applies the update.
    /// Returns `None` when no such customer exists.
    async fn update_checked(
        &self,
        customer_id: &str,
        input: &UpdateCustomer,
    ) -> anyhow::Result<Option<CustomerWriteOutcome>>;
    async fn delete(&self, customer_id: &str) -> anyhow::Result<()>;
}
