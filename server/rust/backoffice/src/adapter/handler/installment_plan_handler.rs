use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Extension, Json,
};
use serde::Deserialize;

use estate_auth::Claims;

use crate::adapter::handler::error::AppError;
use crate::adapter::handler::{actor_of, AppState, PageQuery};
use crate::adapter::presenter::response::{ApiResponse, PaginatedResponse};
use crate::domain::entity::installment_plan::{
    CreateInstallmentPlan, InstallmentDetail, InstallmentDetailInput, InstallmentPlan,
    InstallmentPlanWithDetails, UpdateInstallmentPlan,
};

const AREA: &str = "MASTER";

/// Parallel-array wire format used by the plan details form: one entry
/// per installment across every array.
#[derive(Debug, Deserialize)]
pub struct AddInstallmentDetailsRequest {
    pub plan_name: String,
    pub installment_number: Vec<i32>,
    #[serde(default)]
    pub amount: Vec<Option<f64>>,
    #[serde(default)]
    pub percentage: Vec<Option<f64>>,
    #[serde(default)]
    pub due_after_days: Vec<Option<i64>>,
    #[serde(default)]
    pub due_date: Vec<Option<String>>,
    #[serde(default)]
    pub remarks: Vec<Option<String>>,
}

impl AddInstallmentDetailsRequest {
    fn into_inputs(self) -> (String, Vec<InstallmentDetailInput>) {
        let inputs = self
            .installment_number
            .iter()
            .enumerate()
            .map(|(i, number)| InstallmentDetailInput {
                installment_number: *number,
                amount: self.amount.get(i).copied().flatten(),
                percentage: self.percentage.get(i).copied().flatten(),
                due_after_days: self.due_after_days.get(i).copied().flatten(),
                due_date: self.due_date.get(i).cloned().flatten(),
                remarks: self.remarks.get(i).cloned().flatten(),
            })
            .collect();
        (self.plan_name, inputs)
    }
}

pub async fn add_plan(
    State(state): State<AppState>,
    claims: Option<Extension<Claims>>,
    Json(input): Json<CreateInstallmentPlan>,
) -> Result<(StatusCode, Json<ApiResponse<InstallmentPlan>>), AppError> {
    let plan = state
        .plans_uc
        .create_plan(&input, &actor_of(&claims))
        .await
        .map_err(|e| AppError::from_domain(AREA, e))?;
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(plan))))
}

pub async fn add_details(
    State(state): State<AppState>,
    claims: Option<Extension<Claims>>,
    Json(req): Json<AddInstallmentDetailsRequest>,
) -> Result<(StatusCode, Json<ApiResponse<Vec<InstallmentDetail>>>), AppError> {
    let actor = actor_of(&claims);
    let (plan_name, inputs) = req.into_inputs();
    let details = state
        .plans_uc
        .attach_details(&plan_name, &inputs, &actor)
        .await
        .map_err(|e| AppError::from_domain(AREA, e))?;
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(details))))
}

pub async fn list_plans(
    State(state): State<AppState>,
    Query(query): Query<PageQuery>,
) -> Result<Json<ApiResponse<PaginatedResponse<InstallmentPlan>>>, AppError> {
    let (page, page_size) = query.resolve()?;
    let (records, total) = state
        .plans_uc
        .list_plans(page as i64, page_size as i64)
        .await
        .map_err(|e| AppError::from_domain(AREA, e))?;
    Ok(Json(ApiResponse::ok(PaginatedResponse {
        records,
        total,
        page,
        page_size,
    })))
}

pub async fn get_plan(
    State(state): State<AppState>,
    Path(plan_name): Path<String>,
) -> Result<Json<ApiResponse<InstallmentPlanWithDetails>>, AppError> {
    let plan = state
        .plans_uc
        .get_plan(&plan_name)
        .await
        .map_err(|e| AppError::from_domain(AREA, e))?;
    Ok(Json(ApiResponse::ok(plan)))
}

pub async fn update_plan(
    State(state): State<AppState>,
    Path(plan_name): Path<String>,
    claims: Option<Extension<Claims>>,
    Json(input): Json<UpdateInstallmentPlan>,
) -> Result<Json<ApiResponse<InstallmentPlanWithDetails>>, AppError> {
    let plan = state
        .plans_uc
        .update_plan(&plan_name, &input, &actor_of(&claims))
        .await
        .map_err(|e| AppError::from_domain(AREA, e))?;
    Ok(Json(ApiResponse::ok(plan)))
}

pub async fn delete_plan(
    State(state): State<AppState>,
    Path(plan_name): Path<String>,
    claims: Option<Extension<Claims>>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    state
        .plans_uc
        .delete_plan(&plan_name, &actor_of(&claims))
        .await
        .map_err(|e| AppError::from_domain(AREA, e))?;
    Ok(Json(ApiResponse::message(format!(
        "Installment plan '{}' deleted",
        plan_name
    ))))
}
