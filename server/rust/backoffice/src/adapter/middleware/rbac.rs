use axum::{
    body::Body,
    http::Request,
    middleware::Next,
    response::Response,
};

use estate_auth::{check_permission, Claims};
use estate_server_common::ErrorCode;

use crate::adapter::handler::error::AppError;

pub fn require_permission(
    action: &'static str,
) -> impl Fn(Request<Body>, Next) -> std::pin::Pin<Box<dyn std::future::Future<Output = Result<Response, AppError>> + Send>>
       + Clone
{
    move |req, next| Box::pin(rbac_check(req, next, action))
}

async fn rbac_check(
    req: Request<Body>,
    next: Next,
    action: &str,
) -> Result<Response, AppError> {
    let claims = req.extensions().get::<Claims>().ok_or_else(|| {
        AppError::unauthorized(
            ErrorCode::new("EST_AUTH_MISSING_CLAIMS"),
            "Missing authentication claims",
        )
    })?;

    if !check_permission(claims.role, action) {
        return Err(AppError::forbidden(
            ErrorCode::new("EST_AUTH_PERMISSION_DENIED"),
            &format!("Insufficient permissions for action: {}", action),
        ));
    }

    Ok(next.run(req).await)
}
