use axum::{
    body::Body,
    extract::State,
    http::Request,
    middleware::Next,
    response::Response,
};
use std::sync::Arc;

use estate_auth::TokenService;
use estate_server_common::ErrorCode;

use crate::adapter::handler::error::AppError;

#[derive(Clone)]
pub struct BackofficeAuthState {
    pub tokens: Arc<TokenService>,
}

pub async fn auth_middleware(
    State(state): State<BackofficeAuthState>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    let token = extract_bearer_token(&req).ok_or_else(|| {
        AppError::unauthorized(ErrorCode::new("EST_AUTH_MISSING_TOKEN"), "Missing bearer token")
    })?;

    let claims = state.tokens.verify(&token).map_err(|_| {
        AppError::unauthorized(
            ErrorCode::new("EST_AUTH_TOKEN_INVALID"),
            "Invalid or expired token",
        )
    })?;

    req.extensions_mut().insert(claims);
    Ok(next.run(req).await)
}

fn extract_bearer_token(req: &Request<Body>) -> Option<String> {
    let header = req.headers().get("Authorization")?.to_str().ok()?;
    if header.starts_with("Bearer ") {
        let token = header[7..].trim().to_string();
        if token.is_empty() {
            None
        } else {
            Some(token)
        }
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_extract_bearer_token_valid() {
        let mut req = Request::builder().body(Body::empty()).expect("request");
        req.headers_mut()
            .insert("Authorization", HeaderValue::from_static("Bearer my-token"));
        assert_eq!(extract_bearer_token(&req), Some("my-token".to_string()));
    }

    #[test]
    fn test_extract_bearer_token_missing() {
        let req = Request::builder().body(Body::empty()).expect("request");
        assert_eq!(extract_bearer_token(&req), None);
    }

    #[test]
    fn test_extract_bearer_token_wrong_scheme() {
        let mut req = Request::builder().body(Body::empty()).expect("request");
        req.headers_mut()
            .insert("Authorization", HeaderValue::from_static("Basic abc123"));
        assert_eq!(extract_bearer_token(&req), None);
    }

    #[test]
    fn test_extract_bearer_token_empty_after_scheme() {
        let mut req = Request::builder().body(Body::empty()).expect("request");
        req.headers_mut()
            .insert("Authorization", HeaderValue::from_static("Bearer   "));
        assert_eq!(extract_bearer_token(&req), None);
    }
}
