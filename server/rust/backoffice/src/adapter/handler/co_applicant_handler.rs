use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Extension, Json,
};
use uuid::Uuid;

use estate_auth::Claims;

use crate::adapter::handler::error::AppError;
use crate::adapter::handler::{actor_of, AppState, PageQuery};
use crate::adapter::presenter::response::{ApiResponse, PaginatedResponse};
use crate::domain::entity::co_applicant::{CoApplicant, CreateCoApplicant, UpdateCoApplicant};

const AREA: &str = "MASTER";

pub async fn add_co_applicant(
    State(state): State<AppState>,
    claims: Option<Extension<Claims>>,
    Json(input): Json<CreateCoApplicant>,
) -> Result<(StatusCode, Json<ApiResponse<CoApplicant>>), AppError> {
    let co_applicant = state
        .co_applicants_uc
        .create_co_applicant(&input, &actor_of(&claims))
        .await
        .map_err(|e| AppError::from_domain(AREA, e))?;
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(co_applicant))))
}

pub async fn list_co_applicants(
    State(state): State<AppState>,
    Query(query): Query<PageQuery>,
) -> Result<Json<ApiResponse<PaginatedResponse<CoApplicant>>>, AppError> {
    let (page, page_size) = query.resolve()?;
    let (records, total) = state
        .co_applicants_uc
        .list_co_applicants(page as i64, page_size as i64)
        .await
        .map_err(|e| AppError::from_domain(AREA, e))?;
    Ok(Json(ApiResponse::ok(PaginatedResponse {
        records,
        total,
        page,
        page_size,
    })))
}

pub async fn get_co_applicant(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<CoApplicant>>, AppError> {
    let co_applicant = state
        .co_applicants_uc
        .get_co_applicant(id)
        .await
        .map_err(|e| AppError::from_domain(AREA, e))?;
    Ok(Json(ApiResponse::ok(co_applicant)))
}

pub async fn update_co_applicant(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    claims: Option<Extension<Claims>>,
    Json(input): Json<UpdateCoApplicant>,
) -> Result<Json<ApiResponse<CoApplicant>>, AppError> {
    let co_applicant = state
        .co_applicants_uc
        .update_co_applicant(id, &input, &actor_of(&claims))
        .await
        .map_err(|e| AppError::from_domain(AREA, e))?;
    Ok(Json(ApiResponse::ok(co_applicant)))
}

pub async fn delete_co_applicant(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    claims: Option<Extension<Claims>>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    state
        .co_applicants_uc
        .delete_co_applicant(id, &actor_of(&claims))
        .await
        .map_err(|e| AppError::from_domain(AREA, e))?;
    Ok(Json(ApiResponse::message(format!(
        "Co-applicant {} deleted",
        id
    ))))
}
