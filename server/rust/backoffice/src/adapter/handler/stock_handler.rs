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
use crate::domain::entity::project::Project;
use crate::domain::entity::property::Property;
use crate::domain::entity::stock::{CreateStock, Stock, UpdateStock};

const AREA: &str = "MASTER";

#[derive(Debug, Deserialize)]
pub struct CheckProjectRequest {
    pub project_id: i64,
}

#[derive(Debug, Deserialize)]
pub struct CheckPropertyRequest {
    pub property_id: i64,
}

#[derive(Debug, Deserialize)]
pub struct CheckStockPropertyRequest {
    pub project_id: i64,
    pub property_id: i64,
}

pub async fn add_stock(
    State(state): State<AppState>,
    claims: Option<Extension<Claims>>,
    Json(input): Json<CreateStock>,
) -> Result<(StatusCode, Json<ApiResponse<Stock>>), AppError> {
    let stock = state
        .stock_uc
        .create_stock(&input, &actor_of(&claims))
        .await
        .map_err(|e| AppError::from_domain(AREA, e))?;
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(stock))))
}

pub async fn list_stock(
    State(state): State<AppState>,
    Query(query): Query<PageQuery>,
) -> Result<Json<ApiResponse<PaginatedResponse<Stock>>>, AppError> {
    let (page, page_size) = query.resolve()?;
    let (records, total) = state
        .stock_uc
        .list_stock(page as i64, page_size as i64)
        .await
        .map_err(|e| AppError::from_domain(AREA, e))?;
    Ok(Json(ApiResponse::ok(PaginatedResponse {
        records,
        total,
        page,
        page_size,
    })))
}

pub async fn update_stock(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    claims: Option<Extension<Claims>>,
    Json(input): Json<UpdateStock>,
) -> Result<Json<ApiResponse<Stock>>, AppError> {
    let stock = state
        .stock_uc
        .update_stock(id, &input, &actor_of(&claims))
        .await
        .map_err(|e| AppError::from_domain(AREA, e))?;
    Ok(Json(ApiResponse::ok(stock)))
}

pub async fn delete_stock(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    claims: Option<Extension<Claims>>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    state
        .stock_uc
        .delete_stock(id, &actor_of(&claims))
        .await
        .map_err(|e| AppError::from_domain(AREA, e))?;
    Ok(Json(ApiResponse::message(format!("Stock entry {} deleted", id))))
}

/// POST /api/master/stock/check-project - resolve a project for the form.
pub async fn check_project(
    State(state): State<AppState>,
    Json(req): Json<CheckProjectRequest>,
) -> Result<Json<ApiResponse<Project>>, AppError> {
    let project = state
        .stock_uc
        .check_project(req.project_id)
        .await
        .map_err(|e| AppError::from_domain(AREA, e))?;
    Ok(Json(ApiResponse::ok(project)))
}

/// POST /api/master/stock/check-property - resolve a property for the form.
pub async fn check_property(
    State(state): State<AppState>,
    Json(req): Json<CheckPropertyRequest>,
) -> Result<Json<ApiResponse<Property>>, AppError> {
    let property = state
        .stock_uc
        .check_property(req.property_id)
        .await
        .map_err(|e| AppError::from_domain(AREA, e))?;
    Ok(Json(ApiResponse::ok(property)))
}

/// POST /api/master/stock/check-stock-property - is the pair stocked?
pub async fn check_stock_property(
    State(state): State<AppState>,
    Json(req): Json<CheckStockPropertyRequest>,
) -> Result<Json<ApiResponse<Option<Stock>>>, AppError> {
    let stock = state
        .stock_uc
        .check_stock_property(req.project_id, req.property_id)
        .await
        .map_err(|e| AppError::from_domain(AREA, e))?;
    Ok(Json(ApiResponse::ok(stock)))
}
