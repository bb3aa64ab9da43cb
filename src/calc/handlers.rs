use axum::{
    extract::{Path, State},
    response::Html,
};
use tracing::info;

use crate::error::{ApiError, ApiResult};
use crate::server::AppState;

pub async fn home(State(state): State<AppState>) -> Html<String> {
    info!("call to /");

    Html(format!(
        "<HTML><body><H3>Home page is empty, we are a {} service!</H3></body></HTML>",
        state.config.service_name
    ))
}

pub async fn incr(Path(x): Path<String>) -> ApiResult<String> {
    info!(x = %x, "call to /incr");

    let x: i64 = x.parse()?;
    let y = x.checked_add(1).ok_or(ApiError::Overflow(x))?;
    Ok(y.to_string())
}

// /add and /pow are part of the published API but have never been
// implemented. They answer the same way whatever the arguments.

pub async fn add() -> &'static str {
    info!("call to /add");
    "/add not implemented!"
}

pub async fn pow() -> &'static str {
    info!("call to /pow");
    "/pow not implemented!"
}
