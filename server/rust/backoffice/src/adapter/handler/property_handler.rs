use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Extension, Json,
};

use estate_auth::Claims;

use crate::adapter::handler::error::AppError;
use crate::adapter::handler::{actor_of, AppState, PageQuery};
use crate::adapter::presenter::response::{ApiResponse, PaginatedResponse};
use crate::domain::entity::property::{CreateProperty, Property, UpdateProperty};
use crate::domain::entity::property_size::{
    CreatePropertySize, PropertySize, UpdatePropertySize,
};

const AREA: &str = "MASTER";

pub async fn add_property(
    State(state): State<AppState>,
    claims: Option<Extension<Claims>>,
    Json(input): Json<CreateProperty>,
) -> Result<(StatusCode, Json<ApiResponse<Property>>), AppError> {
    let property = state
        .properties_uc
        .create_property(&input, &actor_of(&claims))
        .await
        .map_err(|e| AppError::from_domain(AREA, e))?;
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(property))))
}

pub async fn list_properties(
    State(state): State<AppState>,
    Query(query): Query<PageQuery>,
) -> Result<Json<ApiResponse<PaginatedResponse<Property>>>, AppError> {
    let (page, page_size) = query.resolve()?;
    let (records, total) = state
        .properties_uc
        .list_properties(page as i64, page_size as i64)
        .await
        .map_err(|e| AppError::from_domain(AREA, e))?;
    Ok(Json(ApiResponse::ok(PaginatedResponse {
        records,
        total,
        page,
        page_size,
    })))
}

pub async fn get_property(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<Property>>, AppError> {
    let property = state
        .properties_uc
        .get_property(id)
        .await
        .map_err(|e| AppError::from_domain(AREA, e))?;
    Ok(Json(ApiResponse::ok(property)))
}

pub async fn update_property(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    claims: Option<Extension<Claims>>,
    Json(input): Json<UpdateProperty>,
) -> Result<Json<ApiResponse<Property>>, AppError> {
    let property = state
        .properties_uc
        .update_property(id, &input, &actor_of(&claims))
        .await
        .map_err(|e| AppError::from_domain(AREA, e))?;
    Ok(Json(ApiResponse::ok(property)))
}

pub async fn delete_property(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    claims: Option<Extension<Claims>>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    state
        .properties_uc
        .delete_property(id, &actor_of(&claims))
        .await
        .map_err(|e| AppError::from_domain(AREA, e))?;
    Ok(Json(ApiResponse::message(format!("Property {} deleted", id))))
}

pub async fn add_property_size(
    State(state): State<AppState>,
    claims: Option<Extension<Claims>>,
    Json(input): Json<CreatePropertySize>,
) -> Result<(StatusCode, Json<ApiResponse<PropertySize>>), AppError> {
    let size = state
        .properties_uc
        .create_size(&input, &actor_of(&claims))
        .await
        .map_err(|e| AppError::from_domain(AREA, e))?;
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(size))))
}

pub async fn list_property_sizes(
    State(state): State<AppState>,
    Query(query): Query<PageQuery>,
) -> Result<Json<ApiResponse<PaginatedResponse<PropertySize>>>, AppError> {
    let (page, page_size) = query.resolve()?;
    let (records, total) = state
        .properties_uc
        .list_sizes(page as i64, page_size as i64)
        .await
        .map_err(|e| AppError::from_domain(AREA, e))?;
    Ok(Json(ApiResponse::ok(PaginatedResponse {
        records,
        total,
        page,
        page_size,
    })))
}

pub async fn get_property_size(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<PropertySize>>, AppError> {
    let size = state
        .properties_uc
        .get_size(id)
        .await
        .map_err(|e| AppError::from_domain(AREA, e))?;
    Ok(Json(ApiResponse::ok(size)))
}

pub async fn update_property_size(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    claims: Option<Extension<Claims>>,
    Json(input): Json<UpdatePropertySize>,
) -> Result<Json<ApiResponse<PropertySize>>, AppError> {
    let size = state
        .properties_uc
        .update_size(id, &input, &actor_of(&claims))
        .await
        .map_err(|e| AppError::from_domain(AREA, e))?;
    Ok(Json(ApiResponse::ok(size)))
}

pub async fn delete_property_size(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    claims: Option<Extension<Claims>>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    state
        .properties_uc
        .delete_size(id, &actor_of(&claims))
        .await
        .map_err(|e| AppError::from_domain(AREA, e))?;
    Ok(Json(ApiResponse::message(format!(
        "Property size {} deleted",
        id
    ))))
}
