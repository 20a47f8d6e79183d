use axum::{
    extract::{Path, Query, State},
    Extension, Json,
};

use estate_auth::Claims;

use crate::adapter::handler::error::AppError;
use crate::adapter::handler::{require_claims, AppState, PageQuery};
use crate::adapter::presenter::response::{ApiResponse, PaginatedResponse};
use crate::domain::entity::activity_log::ActivityLog;

const AREA: &str = "LOG";

pub async fn list_all_logs(
    State(state): State<AppState>,
    Query(query): Query<PageQuery>,
    claims: Option<Extension<Claims>>,
) -> Result<Json<ApiResponse<PaginatedResponse<ActivityLog>>>, AppError> {
    let viewer = require_claims(&claims)?;
    let (page, page_size) = query.resolve()?;
    let (records, total) = state
        .logs_uc
        .list_all(&viewer, page as i64, page_size as i64)
        .await
        .map_err(|e| AppError::from_domain(AREA, e))?;
    Ok(Json(ApiResponse::ok(PaginatedResponse {
        records,
        total,
        page,
        page_size,
    })))
}

pub async fn list_user_logs(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    Query(query): Query<PageQuery>,
    claims: Option<Extension<Claims>>,
) -> Result<Json<ApiResponse<PaginatedResponse<ActivityLog>>>, AppError> {
    let viewer = require_claims(&claims)?;
    let (page, page_size) = query.resolve()?;
    let (records, total) = state
        .logs_uc
        .list_for_user(&viewer, &user_id, page as i64, page_size as i64)
        .await
        .map_err(|e| AppError::from_domain(AREA, e))?;
    Ok(Json(ApiResponse::ok(PaginatedResponse {
        records,
        total,
        page,
        page_size,
    })))
}
