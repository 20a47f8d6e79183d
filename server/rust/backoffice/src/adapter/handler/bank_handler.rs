use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Extension, Json,
};

use estate_auth::Claims;

use crate::adapter::handler::error::AppError;
use crate::adapter::handler::{actor_of, AppState, PageQuery};
use crate::adapter::presenter::response::{ApiResponse, PaginatedResponse};
use crate::domain::entity::bank::{Bank, CreateBank, UpdateBank};

const AREA: &str = "MASTER";

pub async fn add_bank(
    State(state): State<AppState>,
    claims: Option<Extension<Claims>>,
    Json(input): Json<CreateBank>,
) -> Result<(StatusCode, Json<ApiResponse<Bank>>), AppError> {
    let bank = state
        .banks_uc
        .create_bank(&input, &actor_of(&claims))
        .await
        .map_err(|e| AppError::from_domain(AREA, e))?;
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(bank))))
}

pub async fn list_banks(
    State(state): State<AppState>,
    Query(query): Query<PageQuery>,
) -> Result<Json<ApiResponse<PaginatedResponse<Bank>>>, AppError> {
    let (page, page_size) = query.resolve()?;
    let (records, total) = state
        .banks_uc
        .list_banks(page as i64, page_size as i64)
        .await
        .map_err(|e| AppError::from_domain(AREA, e))?;
    Ok(Json(ApiResponse::ok(PaginatedResponse {
        records,
        total,
        page,
        page_size,
    })))
}

pub async fn get_bank(
    State(state): State<AppState>,
    Path(ifsc_code): Path<String>,
) -> Result<Json<ApiResponse<Bank>>, AppError> {
    let bank = state
        .banks_uc
        .get_bank(&ifsc_code)
        .await
        .map_err(|e| AppError::from_domain(AREA, e))?;
    Ok(Json(ApiResponse::ok(bank)))
}

pub async fn update_bank(
    State(state): State<AppState>,
    Path(ifsc_code): Path<String>,
    claims: Option<Extension<Claims>>,
    Json(input): Json<UpdateBank>,
) -> Result<Json<ApiResponse<Bank>>, AppError> {
    let bank = state
        .banks_uc
        .update_bank(&ifsc_code, &input, &actor_of(&claims))
        .await
        .map_err(|e| AppError::from_domain(AREA, e))?;
    Ok(Json(ApiResponse::ok(bank)))
}

pub async fn delete_bank(
    State(state): State<AppState>,
    Path(ifsc_code): Path<String>,
    claims: Option<Extension<Claims>>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    state
        .banks_uc
        .delete_bank(&ifsc_code, &actor_of(&claims))
        .await
        .map_err(|e| AppError::from_domain(AREA, e))?;
    Ok(Json(ApiResponse::message(format!(
        "Bank '{}' deleted",
        ifsc_code
    ))))
}
