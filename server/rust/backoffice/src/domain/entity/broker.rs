use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Broker {
    pub id: Uuid,
    pub broker_code: String,
    pub name: String,
    pub mobile: Option<String>,
    pub email: Option<String>,
    pub pan: Option<String>,
    pub address: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateBroker {
    pub broker_code: String,
    pub name: String,
    pub mobile: Option<String>,
    pub email: Option<String>,
    pub pan: Option<String>,
    pub address: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateBroker {
    pub name: Option<String>,
    pub mobile: Option<String>,
    pub email: Option<String>,
    pub pan: Option<String>,
    pub address: Option<String>,
}
