use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Extension, Json,
};

use estate_auth::Claims;

use crate::adapter::handler::error::AppError;
use crate::adapter::handler::{actor_of, AppState, PageQuery};
use crate::adapter::presenter::response::{ApiResponse, PaginatedResponse};
use crate::domain::entity::customer::{CreateCustomer, Customer, UpdateCustomer};

const AREA: &str = "MASTER";

pub async fn add_customer(
    State(state): State<AppState>,
    claims: Option<Extension<Claims>>,
    Json(input): Json<CreateCustomer>,
) -> Result<(StatusCode, Json<ApiResponse<Customer>>), AppError> {
    let customer = state
        .customers_uc
        .create_customer(&input, &actor_of(&claims))
        .await
        .map_err(|e| AppError::from_domain(AREA, e))?;
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(customer))))
}

pub async fn list_customers(
    State(state): State<AppState>,
    Query(query): Query<PageQuery>,
) -> Result<Json<ApiResponse<PaginatedResponse<Customer>>>, AppError> {
    let (page, page_size) = query.resolve()?;
    let (records, total) = state
        .customers_uc
        .list_customers(page as i64, page_size as i64)
        .await
        .map_err(|e| AppError::from_domain(AREA, e))?;
    Ok(Json(ApiResponse::ok(PaginatedResponse {
        records,
        total,
        page,
        page_size,
    })))
}

pub async fn get_customer(
    State(state): State<AppState>,
    Path(customer_id): Path<String>,
) -> Result<Json<ApiResponse<Customer>>, AppError> {
    let customer = state
        .customers_uc
        .get_customer(&customer_id)
        .await
        .map_err(|e| AppError::from_domain(AREA, e))?;
    Ok(Json(ApiResponse::ok(customer)))
}

pub async fn update_customer(
    State(state): State<AppState>,
    Path(customer_id): Path<String>,
    claims: Option<Extension<Claims>>,
    Json(input): Json<UpdateCustomer>,
) -> Result<Json<ApiResponse<Customer>>, AppError> {
    let customer = state
        .customers_uc
        .update_customer(&customer_id, &input, &actor_of(&claims))
        .await
        .map_err(|e| AppError::from_domain(AREA, e))?;
    Ok(Json(ApiResponse::ok(customer)))
}

pub async fn delete_customer(
    State(state): State<AppState>,
    Path(customer_id): Path<String>,
    claims: Option<Extension<Claims>>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    state
        .customers_uc
        .delete_customer(&customer_id, &actor_of(&claims))
        .await
        .map_err(|e| AppError::from_domain(AREA, e))?;
    Ok(Json(ApiResponse::message(format!(
        "Customer '{}' deleted",
        customer_id
    ))))
}
