use std::sync::Arc;
use std::time::Instant;

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::context::AppContext;
use crate::errors::ApiResult;
use crate::utils::log_request_outcome;

/// Field selection as ordered tokens.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldsPayload {
    pub fields: Vec<String>,
}

/// Result of a save: what was kept and what was dropped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaveFieldsResponse {
    pub fields: Vec<String>,
    pub rejected: Vec<String>,
}

/// `GET /api/settings`
pub async fn get_fields(State(ctx): State<Arc<AppContext>>) -> ApiResult<Json<FieldsPayload>> {
    let selection = ctx.settings.load().await?;
    Ok(Json(FieldsPayload { fields: selection.to_tokens() }))
}

/// `PUT /api/settings`: unknown and duplicate tokens are dropped, not fatal.
pub async fn put_fields(
    State(ctx): State<Arc<AppContext>>,
    body: Result<Json<FieldsPayload>, JsonRejection>,
) -> ApiResult<Json<SaveFieldsResponse>> {
    let Json(payload) = body?;

    let started = Instant::now();
    let result = ctx.settings.save_tokens(&payload.fields).await;
    log_request_outcome("settings.save", started.elapsed(), &result);

    let report = result?;
    Ok(Json(SaveFieldsResponse { fields: report.selection.to_tokens(), rejected: report.rejected }))
}
