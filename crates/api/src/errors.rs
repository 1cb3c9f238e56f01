//! HTTP error responses

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use namecast_domain::{BatchResponse, NamecastError};

pub type ApiResult<T> = Result<T, ApiError>;

/// Domain error rendered as `{ "errorMessage": ... }` with a matching status.
#[derive(Debug)]
pub struct ApiError(pub NamecastError);

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match &self.0 {
            NamecastError::Configuration(_) => StatusCode::BAD_REQUEST,
            NamecastError::Authorization(_) => StatusCode::UNAUTHORIZED,
            NamecastError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            NamecastError::NotFound(_) => StatusCode::NOT_FOUND,
            NamecastError::Network(_) => StatusCode::BAD_GATEWAY,
            NamecastError::Store(_) | NamecastError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    pub fn unauthorized() -> Self {
        Self(NamecastError::Authorization("unauthorized".into()))
    }
}

impl From<NamecastError> for ApiError {
    fn from(err: NamecastError) -> Self {
        Self(err)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self(NamecastError::Validation(rejection.body_text()))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        (status, Json(BatchResponse::failure(self.0.detail()))).into_response()
    }
}
