//! HTTP routes

pub mod auth;
pub mod batch;
pub mod settings;
pub mod users;

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::{get, patch, post};
use axum::{middleware, Router};
use tracing::error;

use crate::context::AppContext;

/// Build the application router.
///
/// Everything under `/api` requires the admin bearer token; `/health` does
/// not.
pub fn router(ctx: Arc<AppContext>) -> Router {
    let api = Router::new()
        .route("/batch", post(batch::run_page))
        .route("/settings", get(settings::get_fields).put(settings::put_fields))
        .route("/users", post(users::create_user))
        .route("/users/count", get(users::count_users))
        .route("/users/{id}", patch(users::update_user))
        .route_layer(middleware::from_fn_with_state(Arc::clone(&ctx), auth::require_admin));

    Router::new().route("/health", get(health)).nest("/api", api).with_state(ctx)
}

async fn health(State(ctx): State<Arc<AppContext>>) -> (StatusCode, &'static str) {
    let db = Arc::clone(&ctx.db);
    match tokio::task::spawn_blocking(move || db.health_check()).await {
        Ok(Ok(())) => (StatusCode::OK, "ok"),
        Ok(Err(err)) => {
            error!(error = %err, "Database health check failed");
            (StatusCode::SERVICE_UNAVAILABLE, "unavailable")
        }
        Err(err) => {
            error!(error = %err, "Health check task failed");
            (StatusCode::SERVICE_UNAVAILABLE, "unavailable")
        }
    }
}
