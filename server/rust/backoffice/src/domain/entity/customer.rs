use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Customer {
    pub id: Uuid,
    pub customer_id: String,
    pub first_name: String,
    pub last_name: Option<String>,
    pub email: String,
    pub mobile: String,
    pub pan: String,
    pub aadhar: String,
    pub address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub pincode: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateCustomer {
    pub customer_id: String,
    pub first_name: String,
    pub last_name: Option<String>,
    pub email: String,
    pub mobile: String,
    pub pan: String,
    pub aadhar: String,
    pub address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub pincode: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateCustomer {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub mobile: Option<String>,
    pub pan: Option<String>,
    pub aadhar: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub pincode: Option<String>,
}

/// A uniqueness-sensitive field found already taken by another customer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DuplicateField {
    pub field: &'static str,
    pub value: String,
}

/// Result of a checked customer write. The duplicate variant carries every
/// offending field so the caller can report them all at once.
#[derive(Debug, Clone)]
pub enum CustomerWriteOutcome {
    Written(Customer),
    Duplicate(Vec<DuplicateField>),
}
