use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InstallmentPlan {
    pub id: Uuid,
    pub plan_name: String,
    pub no_of_installments: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// One persisted installment row. `due_date` is always concrete by the
/// time a row reaches the store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InstallmentDetail {
    pub id: Uuid,
    pub plan_name: String,
    pub installment_number: i32,
    pub amount: f64,
    pub percentage: f64,
    pub due_date: NaiveDate,
    pub remarks: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateInstallmentPlan {
    pub plan_name: String,
    pub no_of_installments: i32,
}

/// Raw per-installment input as submitted by the client. The due date may
/// be given directly or derived from `due_after_days`; amount and
/// percentage are mutually fillable.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InstallmentDetailInput {
    pub installment_number: i32,
    pub amount: Option<f64>,
    pub percentage: Option<f64>,
    pub due_after_days: Option<i64>,
    pub due_date: Option<String>,
    pub remarks: Option<String>,
}

/// A detail row after due-date resolution and amount/percentage
/// null-coalescing, ready to persist.
#[derive(Debug, Clone, PartialEq)]
pub struct NewInstallmentDetail {
    pub installment_number: i32,
    pub amount: f64,
    pub percentage: f64,
    pub due_date: NaiveDate,
    pub remarks: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateInstallmentPlan {
    pub no_of_installments: Option<i32>,
    pub installment_details: Option<Vec<InstallmentDetailInput>>,
}

#[derive(Debug, Clone, Serialize)]
pub struct InstallmentPlanWithDetails {
    #[serde(flatten)]
    pub plan: InstallmentPlan,
    pub installment_details: Vec<InstallmentDetail>,
}
