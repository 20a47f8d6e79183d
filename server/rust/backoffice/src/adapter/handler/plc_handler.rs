use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Extension, Json,
};

use estate_auth::Claims;

use crate::adapter::handler::error::AppError;
use crate::adapter::handler::{actor_of, AppState, PageQuery};
use crate::adapter::presenter::response::{ApiResponse, PaginatedResponse};
use crate::domain::entity::plc::{CreatePlc, Plc, UpdatePlc};

const AREA: &str = "MASTER";

pub async fn add_plc(
    State(state): State<AppState>,
    claims: Option<Extension<Claims>>,
    Json(input): Json<CreatePlc>,
) -> Result<(StatusCode, Json<ApiResponse<Plc>>), AppError> {
    let plc = state
        .plcs_uc
        .create_plc(&input, &actor_of(&claims))
        .await
        .map_err(|e| AppError::from_domain(AREA, e))?;
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(plc))))
}

pub async fn list_plcs(
    State(state): State<AppState>,
    Query(query): Query<PageQuery>,
) -> Result<Json<ApiResponse<PaginatedResponse<Plc>>>, AppError> {
    let (page, page_size) = query.resolve()?;
    let (records, total) = state
        .plcs_uc
        .list_plcs(page as i64, page_size as i64)
        .await
        .map_err(|e| AppError::from_domain(AREA, e))?;
    Ok(Json(ApiResponse::ok(PaginatedResponse {
        records,
        total,
        page,
        page_size,
    })))
}

pub async fn get_plc(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<ApiResponse<Plc>>, AppError> {
    let plc = state
        .plcs_uc
        .get_plc(&name)
        .await
        .map_err(|e| AppError::from_domain(AREA, e))?;
    Ok(Json(ApiResponse::ok(plc)))
}

pub async fn update_plc(
    State(state): State<AppState>,
    Path(name): Path<String>,
    claims: Option<Extension<Claims>>,
    Json(input): Json<UpdatePlc>,
) -> Result<Json<ApiResponse<Plc>>, AppError> {
    let plc = state
        .plcs_uc
        .update_plc(&name, &input, &actor_of(&claims))
        .await
        .map_err(|e| AppError::from_domain(AREA, e))?;
    Ok(Json(ApiResponse::ok(plc)))
}

pub async fn delete_plc(
    State(state): State<AppState>,
    Path(name): Path<String>,
    claims: Option<Extension<Claims>>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    state
        .plcs_uc
        .delete_plc(&name, &actor_of(&claims))
        .await
        .map_err(|e| AppError::from_domain(AREA, e))?;
    Ok(Json(ApiResponse::message(format!("PLC '{}' deleted", name))))
}
