use analysis::DocumentAnalysis;
use axum::{extract::Extension, Json};
use serde::Deserialize;

use crate::server::app::AppState;
use crate::server::error::ApiError;
use crate::server::middleware::AuthUser;

#[derive(Debug, Deserialize)]
pub struct AnalyzeRequest {
    pub text: String,
    #[serde(default)]
    pub question: Option<String>,
}

/// Summary, clauses, entities and an optional answer for one document
pub async fn analyze_handler(
    Extension(state): Extension<AppState>,
    user: AuthUser,
    Json(request): Json<AnalyzeRequest>,
) -> Result<Json<DocumentAnalysis>, ApiError> {
    let analysis = state
        .pipeline
        .analyze_document(
            &request.text,
            request.question.as_deref(),
            user.caller_id.as_str(),
        )
        .await?;

    Ok(Json(analysis))
}
