use std::num::ParseIntError;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use tracing::warn;

use crate::db::DbError;
use crate::movies::Envelope;

/// Errors a request handler can end with. All of them are reported as
/// 400 Bad Request.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("{0}")]
    BadNumber(#[from] ParseIntError),
    #[error("{0} + 1 overflows a 64-bit integer")]
    Overflow(i64),
    #[error(transparent)]
    Query(#[from] DbError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Query(e) => {
                warn!("query failed: {}", e);
                let body = Envelope::<serde_json::Value>::failure(e.message());
                (StatusCode::BAD_REQUEST, Json(body)).into_response()
            }
            e => (StatusCode::BAD_REQUEST, e.to_string()).into_response(),
        }
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
