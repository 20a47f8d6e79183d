use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Property {
    pub id: i64,
    pub property_type: String,
    pub size: f64,
    pub customer_id: Option<String>,
    pub allotment_date: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateProperty {
    pub property_type: String,
    pub size: f64,
    pub customer_id: Option<String>,
    pub allotment_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateProperty {
    pub property_type: Option<String>,
    pub size: Option<f64>,
    pub customer_id: Option<String>,
    pub allotment_date: Option<NaiveDate>,
}
