use axum::{
    extract::{Request, State},
    http::{HeaderMap, header},
    middleware::Next,
    response::{IntoResponse, Response},
};

use super::token::BearerAuth;
use crate::errors::AppError;

/// Extract the token from an `Authorization: Bearer <token>` header
fn extract_bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|value| {
            let (scheme, token) = value.split_once(' ')?;
            scheme
                .eq_ignore_ascii_case("bearer")
                .then(|| token.trim())
                .filter(|token| !token.is_empty())
        })
}

/// Bearer token middleware
///
/// Rejects the request with 401 unless it carries the configured token.
///
/// # Example
///
/// ```ignore
/// let protected_routes = Router::new()
///     .route("/", get(list_users))
///     .route_layer(axum::middleware::from_fn_with_state(auth, bearer_auth_middleware));
/// ```
pub async fn bearer_auth_middleware(
    State(auth): State<BearerAuth>,
    request: Request,
    next: Next,
) -> Response {
    let Some(token) = extract_bearer_token(request.headers()) else {
        tracing::debug!("No bearer token in Authorization header");
        return AppError::Unauthorized("Missing bearer token".to_string()).into_response();
    };

    if !auth.verify(token) {
        tracing::info!("Rejected request with invalid bearer token");
        return AppError::Unauthorized("Invalid bearer token".to_string()).into_response();
    }

    next.run(request).await
}
