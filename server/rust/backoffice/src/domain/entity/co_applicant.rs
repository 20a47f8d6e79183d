use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Secondary applicant attached to a customer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CoApplicant {
    pub id: Uuid,
    pub customer_id: String,
    pub name: String,
    pub relation: Option<String>,
    pub email: Option<String>,
    pub mobile: Option<String>,
    pub pan: Option<String>,
    pub aadhar: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateCoApplicant {
    pub customer_id: String,
    pub name: String,
    pub relation: Option<String>,
    pub email: Option<String>,
    pub mobile: Option<String>,
    pub pan: Option<String>,
    pub aadhar: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateCoApplicant {
    pub name: Option<String>,
    pub relation: Option<String>,
    pub email: Option<String>,
    pub mobile: Option<String>,
    pub pan: Option<String>,
    pub aadhar: Option<String>,
}
