use std::sync::Arc;
use std::time::Instant;

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use namecast_domain::{BatchRequest, BatchResult};

use crate::context::AppContext;
use crate::errors::ApiResult;
use crate::utils::log_request_outcome;

/// `POST /api/batch`: process one page starting at `offset`.
pub async fn run_page(
    State(ctx): State<Arc<AppContext>>,
    body: Result<Json<BatchRequest>, JsonRejection>,
) -> ApiResult<Json<BatchResult>> {
    let Json(request) = body?;

    let started = Instant::now();
    let result = ctx.driver.run_page(request.offset).await;
    log_request_outcome("batch", started.elapsed(), &result);

    Ok(Json(result?))
}
