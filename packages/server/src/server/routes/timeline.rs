use axum::{
    extract::Extension,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;
use tracing::warn;

use crate::server::app::AppState;
use crate::server::error::ApiError;
use crate::server::middleware::AuthUser;

#[derive(Debug, Deserialize)]
pub struct TimelineRequest {
    pub text: String,
}

/// Chronological events extracted from a document
///
/// An unusable model response is returned as a 500 carrying the error object
/// and the raw model text.
pub async fn timeline_handler(
    Extension(state): Extension<AppState>,
    user: AuthUser,
    Json(request): Json<TimelineRequest>,
) -> Result<Response, ApiError> {
    let result = state
        .pipeline
        .timeline(&request.text, user.caller_id.as_str())
        .await?;

    let status = if result.is_error() {
        warn!(caller_id = %user.caller_id, "Timeline extraction failed");
        StatusCode::INTERNAL_SERVER_ERROR
    } else {
        StatusCode::OK
    };

    Ok((status, Json(result)).into_response())
}
