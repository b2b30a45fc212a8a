use analysis::ChatReply;
use axum::{extract::Extension, Json};
use serde::Deserialize;

use crate::server::app::AppState;
use crate::server::error::ApiError;
use crate::server::middleware::AuthUser;

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub prompt: String,
}

/// General legal question answering
pub async fn chat_handler(
    Extension(state): Extension<AppState>,
    user: AuthUser,
    Json(request): Json<ChatRequest>,
) -> Result<Json<ChatReply>, ApiError> {
    let reply = state
        .pipeline
        .chat(&request.prompt, user.caller_id.as_str())
        .await?;

    Ok(Json(reply))
}
