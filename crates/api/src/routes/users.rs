use std::sync::Arc;
use std::time::Instant;

use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use namecast_core::UserStore;
use namecast_domain::{NamecastError, NewUser, ProfileUpdate, UserCount, UserId, UserRecord};

use crate::context::AppContext;
use crate::errors::{ApiError, ApiResult};
use crate::utils::log_request_outcome;

/// `GET /api/users/count`: total users and the driver's page size.
pub async fn count_users(State(ctx): State<Arc<AppContext>>) -> ApiResult<Json<UserCount>> {
    let total = ctx.users.count_users().await?;
    Ok(Json(UserCount { total, page_size: ctx.driver.page_size() }))
}

/// `POST /api/users`: register a user; the "created" hook sets the name.
pub async fn create_user(
    State(ctx): State<Arc<AppContext>>,
    body: Result<Json<NewUser>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<UserRecord>)> {
    let Json(new_user) = body?;

    let started = Instant::now();
    let result = ctx.users.create_user(new_user).await;
    log_request_outcome("users.create", started.elapsed(), &result);

    Ok((StatusCode::CREATED, Json(result?)))
}

/// `PATCH /api/users/{id}`: edit a profile; the "profile updated" hook runs.
pub async fn update_user(
    State(ctx): State<Arc<AppContext>>,
    id: Result<Path<UserId>, PathRejection>,
    body: Result<Json<ProfileUpdate>, JsonRejection>,
) -> ApiResult<Json<UserRecord>> {
    let Path(id) =
        id.map_err(|rejection| ApiError(NamecastError::Validation(rejection.body_text())))?;
    let Json(update) = body?;
    if update.is_empty() {
        return Err(NamecastError::Validation("no profile fields to update".into()).into());
    }

    let started = Instant::now();
    let result = ctx.users.update_profile(id, update).await;
    log_request_outcome("users.update", started.elapsed(), &result);

    Ok(Json(result?))
}
