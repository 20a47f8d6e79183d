use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde::Deserialize;
use validator::Validate;

use crate::adapter::handler::AppState;
use crate::adapter::presenter::response::LoginResponse;
use crate::error::BackofficeError;

#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(length(min = 1))]
    pub user_id: String,
    #[validate(length(min = 1))]
    pub password: String,
}

/// POST /api/auth/login - issue a bearer token.
///
/// Auth endpoints return `{token, user}` / `{error}` rather than the
/// `success` envelope used on `/api` routes.
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> impl IntoResponse {
    if req.validate().is_err() {
        return (
            StatusCode::BAD_REQUEST,
            Json(serde_json::json!({"error": "user_id and password are required"})),
        )
            .into_response();
    }

    match state.auth_uc.login(&req.user_id, &req.password).await {
        Ok((token, user)) => Json(LoginResponse { token, user }).into_response(),
        Err(BackofficeError::Unauthorized) => (
            StatusCode::UNAUTHORIZED,
            Json(serde_json::json!({"error": "Invalid user id or password"})),
        )
            .into_response(),
        Err(e) => {
            tracing::error!(error = %e, "login failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(serde_json::json!({"error": "internal server error"})),
            )
                .into_response()
        }
    }
}
