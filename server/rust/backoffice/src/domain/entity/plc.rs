use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Preferential location charge: a named surcharge or discount applied to
/// a booking, either as a flat value or a percentage.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Plc {
    pub id: Uuid,
    pub name: String,
    pub value: f64,
    pub is_percentage: bool,
    pub remarks: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreatePlc {
    pub name: String,
    pub value: f64,
    #[serde(default)]
    pub is_percentage: bool,
    pub remarks: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdatePlc {
    pub value: Option<f64>,
    pub is_percentage: Option<bool>,
    pub remarks: Option<String>,
}
