use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Master list entry of allowed (size, measuring unit) pairs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PropertySize {
    pub id: i64,
    pub size: f64,
    pub measuring_unit: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePropertySize {
    pub size: f64,
    pub measuring_unit: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdatePropertySize {
    pub size: Option<f64>,
    pub measuring_unit: Option<String>,
}
