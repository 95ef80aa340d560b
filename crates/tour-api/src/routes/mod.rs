pub mod auth_proxy;
pub mod catalog;

use axum::{http::StatusCode, Json};
use serde::Serialize;
use tour_client::ClientError;
use tracing::warn;

use crate::state::AppState;

pub fn api_routes(state: AppState) -> axum::Router<AppState> {
    axum::Router::new().merge(catalog::routes(state))
}

#[derive(Serialize)]
pub(crate) struct ErrorResponse {
    pub error: String,
}

pub(crate) type ApiError = (StatusCode, Json<ErrorResponse>);

pub(crate) fn error_response(status: StatusCode, message: impl Into<String>) -> ApiError {
    (
        status,
        Json(ErrorResponse {
            error: message.into(),
        }),
    )
}

/// Not-found passes through as 404; anything else the backend did is a 502.
pub(crate) fn upstream_error(e: ClientError) -> ApiError {
    if e.is_not_found() {
        return error_response(StatusCode::NOT_FOUND, e.to_string());
    }
    warn!("backend request failed: {e}");
    error_response(StatusCode::BAD_GATEWAY, "backend unavailable")
}
