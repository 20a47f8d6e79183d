use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Extension, Json,
};

use estate_auth::Claims;

use crate::adapter::handler::error::AppError;
use crate::adapter::handler::{actor_of, AppState, PageQuery};
use crate::adapter::presenter::response::{ApiResponse, PaginatedResponse};
use crate::domain::entity::broker::{Broker, CreateBroker, UpdateBroker};

const AREA: &str = "MASTER";

pub async fn add_broker(
    State(state): State<AppState>,
    claims: Option<Extension<Claims>>,
    Json(input): Json<CreateBroker>,
) -> Result<(StatusCode, Json<ApiResponse<Broker>>), AppError> {
    let broker = state
        .brokers_uc
        .create_broker(&input, &actor_of(&claims))
        .await
        .map_err(|e| AppError::from_domain(AREA, e))?;
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(broker))))
}

pub async fn list_brokers(
    State(state): State<AppState>,
    Query(query): Query<PageQuery>,
) -> Result<Json<ApiResponse<PaginatedResponse<Broker>>>, AppError> {
    let (page, page_size) = query.resolve()?;
    let (records, total) = state
        .brokers_uc
        .list_brokers(page as i64, page_size as i64)
        .await
        .map_err(|e| AppError::from_domain(AREA, e))?;
    Ok(Json(ApiResponse::ok(PaginatedResponse {
        records,
        total,
        page,
        page_size,
    })))
}

pub async fn get_broker(
    State(state): State<AppState>,
    Path(broker_code): Path<String>,
) -> Result<Json<ApiResponse<Broker>>, AppError> {
    let broker = state
        .brokers_uc
        .get_broker(&broker_code)
        .await
        .map_err(|e| AppError::from_domain(AREA, e))?;
    Ok(Json(ApiResponse::ok(broker)))
}

pub async fn update_broker(
    State(state): State<AppState>,
    Path(broker_code): Path<String>,
    claims: Option<Extension<Claims>>,
    Json(input): Json<UpdateBroker>,
) -> Result<Json<ApiResponse<Broker>>, AppError> {
    let broker = state
        .brokers_uc
        .update_broker(&broker_code, &input, &actor_of(&claims))
        .await
        .map_err(|e| AppError::from_domain(AREA, e))?;
    Ok(Json(ApiResponse::ok(broker)))
}

pub async fn delete_broker(
    State(state): State<AppState>,
    Path(broker_code): Path<String>,
    claims: Option<Extension<Claims>>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    state
        .brokers_uc
        .delete_broker(&broker_code, &actor_of(&claims))
        .await
        .map_err(|e| AppError::from_domain(AREA, e))?;
    Ok(Json(ApiResponse::message(format!(
        "Broker '{}' deleted",
        broker_code
    ))))
}
