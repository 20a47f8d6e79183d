use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Extension, Json,
};
use validator::Validate;

use estate_auth::Claims;
use estate_server_common::ErrorCode;

use crate::adapter::handler::error::AppError;
use crate::adapter::handler::{require_claims, AppState, PageQuery};
use crate::adapter::presenter::response::{ApiResponse, PaginatedResponse};
use crate::domain::entity::user::{CreateUser, UpdateUser, User};

const AREA: &str = "USER";

fn validation_error(e: validator::ValidationErrors) -> AppError {
    AppError::bad_request(ErrorCode::validation(AREA), &e.to_string())
}

pub async fn create_user(
    State(state): State<AppState>,
    claims: Option<Extension<Claims>>,
    Json(input): Json<CreateUser>,
) -> Result<(StatusCode, Json<ApiResponse<User>>), AppError> {
    let creator = require_claims(&claims)?;
    input.validate().map_err(validation_error)?;
    let user = state
        .users_uc
        .create_user(&creator, &input)
        .await
        .map_err(|e| AppError::from_domain(AREA, e))?;
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(user))))
}

pub async fn list_users(
    State(state): State<AppState>,
    Query(query): Query<PageQuery>,
) -> Result<Json<ApiResponse<PaginatedResponse<User>>>, AppError> {
    let (page, page_size) = query.resolve()?;
    let (records, total) = state
        .users_uc
        .list_users(page as i64, page_size as i64)
        .await
        .map_err(|e| AppError::from_domain(AREA, e))?;
    Ok(Json(ApiResponse::ok(PaginatedResponse {
        records,
        total,
        page,
        page_size,
    })))
}

pub async fn update_user(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    claims: Option<Extension<Claims>>,
    Json(input): Json<UpdateUser>,
) -> Result<Json<ApiResponse<User>>, AppError> {
    let actor = require_claims(&claims)?;
    input.validate().map_err(validation_error)?;
    let user = state
        .users_uc
        .update_user(&actor, &user_id, &input)
        .await
        .map_err(|e| AppError::from_domain(AREA, e))?;
    Ok(Json(ApiResponse::ok(user)))
}

pub async fn delete_user(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    claims: Option<Extension<Claims>>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    let actor = require_claims(&claims)?;
    state
        .users_uc
        .delete_user(&actor, &user_id)
        .await
        .map_err(|e| AppError::from_domain(AREA, e))?;
    Ok(Json(ApiResponse::message(format!(
        "User '{}' deleted",
        user_id
    ))))
}
