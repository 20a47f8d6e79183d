use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Extension, Json,
};

use estate_auth::Claims;

use crate::adapter::handler::error::AppError;
use crate::adapter::handler::{actor_of, AppState, PageQuery};
use crate::adapter::presenter::response::{ApiResponse, PaginatedResponse};
use crate::domain::entity::booking::{Booking, CreateBooking, UpdateBooking};

const AREA: &str = "TXN";

pub async fn add_booking(
    State(state): State<AppState>,
    claims: Option<Extension<Claims>>,
    Json(input): Json<CreateBooking>,
) -> Result<(StatusCode, Json<ApiResponse<Booking>>), AppError> {
    let booking = state
        .bookings_uc
        .create_booking(&input, &actor_of(&claims))
        .await
        .map_err(|e| AppError::from_domain(AREA, e))?;
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(booking))))
}

pub async fn list_bookings(
    State(state): State<AppState>,
    Query(query): Query<PageQuery>,
) -> Result<Json<ApiResponse<PaginatedResponse<Booking>>>, AppError> {
    let (page, page_size) = query.resolve()?;
    let (records, total) = state
        .bookings_uc
        .list_bookings(page as i64, page_size as i64)
        .await
        .map_err(|e| AppError::from_domain(AREA, e))?;
    Ok(Json(ApiResponse::ok(PaginatedResponse {
        records,
        total,
        page,
        page_size,
    })))
}

pub async fn get_booking(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<Booking>>, AppError> {
    let booking = state
        .bookings_uc
        .get_booking(id)
        .await
        .map_err(|e| AppError::from_domain(AREA, e))?;
    Ok(Json(ApiResponse::ok(booking)))
}

pub async fn update_booking(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    claims: Option<Extension<Claims>>,
    Json(input): Json<UpdateBooking>,
) -> Result<Json<ApiResponse<Booking>>, AppError> {
    let booking = state
        .bookings_uc
        .update_booking(id, &input, &actor_of(&claims))
        .await
        .map_err(|e| AppError::from_domain(AREA, e))?;
    Ok(Json(ApiResponse::ok(booking)))
}

pub async fn delete_booking(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    claims: Option<Extension<Claims>>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    state
        .bookings_uc
        .delete_booking(id, &actor_of(&claims))
        .await
        .map_err(|e| AppError::from_domain(AREA, e))?;
    Ok(Json(ApiResponse::message(format!("Booking {} deleted", id))))
}
