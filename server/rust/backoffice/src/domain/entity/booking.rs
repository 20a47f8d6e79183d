use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// A sale booking binding a customer to a stocked property.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Booking {
    pub id: i64,
    pub customer_id: String,
    pub project_id: i64,
    pub property_id: i64,
    pub booking_date: NaiveDate,
    pub bsp: f64,
    pub plc_name: Option<String>,
    pub broker_code: Option<String>,
    pub remarks: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateBooking {
    pub customer_id: String,
    pub project_id: i64,
    pub property_id: i64,
    pub booking_date: NaiveDate,
    pub bsp: f64,
    pub plc_name: Option<String>,
    pub broker_code: Option<String>,
    pub remarks: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateBooking {
    pub booking_date: Option<NaiveDate>,
    pub bsp: Option<f64>,
    pub plc_name: Option<String>,
    pub broker_code: Option<String>,
    pub remarks: Option<String>,
}
