//! Bearer-token check standing in for the host's access control

use std::sync::Arc;

use axum::extract::{Request, State};
use axum::http::{header, HeaderMap};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use subtle::ConstantTimeEq;
use tracing::warn;

use crate::context::AppContext;
use crate::errors::ApiError;

/// Reject requests that do not carry the configured admin token.
///
/// With no token configured every request is rejected.
pub async fn require_admin(
    State(ctx): State<Arc<AppContext>>,
    request: Request,
    next: Next,
) -> Response {
    if token_matches(request.headers(), ctx.config.server.admin_token.as_deref()) {
        next.run(request).await
    } else {
        warn!(path = %request.uri().path(), "Rejected request without valid admin token");
        ApiError::unauthorized().into_response()
    }
}

/// Constant-time comparison of the bearer token against `expected`.
pub(crate) fn token_matches(headers: &HeaderMap, expected: Option<&str>) -> bool {
    let Some(expected) = expected.filter(|token| !token.is_empty()) else {
        return false;
    };

    let provided = headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .unwrap_or("");

    provided.len() == expected.len() && bool::from(provided.as_bytes().ct_eq(expected.as_bytes()))
}
