use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// On-hold / free marker for a stock entry. `Hold` always carries a
/// till-date; `Free` never does.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StockStatus {
    Hold,
    Free,
}

impl StockStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            StockStatus::Hold => "Hold",
            StockStatus::Free => "Free",
        }
    }
}

impl std::str::FromStr for StockStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Hold" => Ok(StockStatus::Hold),
            "Free" => Ok(StockStatus::Free),
            other => Err(format!("unknown stock status: {}", other)),
        }
    }
}

/// A property listed for sale within a project. At most one row exists
/// per (project_id, property_id) pair.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Stock {
    pub id: i64,
    pub project_id: i64,
    pub property_id: i64,
    pub bsp: f64,
    pub broker_code: Option<String>,
    pub status: StockStatus,
    pub on_hold_till: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateStock {
    pub project_id: i64,
    pub property_id: i64,
    pub bsp: f64,
    pub broker_code: Option<String>,
    pub status: Option<StockStatus>,
    pub on_hold_till: Option<NaiveDate>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateStock {
    pub bsp: Option<f64>,
    pub broker_code: Option<String>,
    pub status: Option<StockStatus>,
    pub on_hold_till: Option<NaiveDate>,
}
