//! Application setup and server configuration.

use std::sync::Arc;
use std::time::Duration;

use analysis::AnalysisPipeline;
use anyhow::{Context, Result};
use axum::{
    extract::Extension,
    http::HeaderValue,
    middleware,
    routing::{get, post},
    Router,
};
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::server::auth::IdentityVerifier;
use crate::server::middleware::jwt_auth_middleware;
use crate::server::routes::{
    analyze_handler, chat_handler, health_handler, root_handler, timeline_handler,
};

/// Upper bound for one request, including every model call it fans out to.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(180);

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub pipeline: AnalysisPipeline,
    pub verifier: Arc<dyn IdentityVerifier>,
}

impl AppState {
    pub fn new(pipeline: AnalysisPipeline, verifier: Arc<dyn IdentityVerifier>) -> Self {
        Self { pipeline, verifier }
    }
}

/// Build the Axum application router
///
/// Fails if an allowed origin is not a valid header value.
pub fn build_app(state: AppState, allowed_origins: &[String]) -> Result<Router> {
    let origins = allowed_origins
        .iter()
        .map(|origin| {
            HeaderValue::from_str(origin).with_context(|| format!("Invalid CORS origin: {}", origin))
        })
        .collect::<Result<Vec<_>>>()?;

    // Credentials are allowed, so methods and headers mirror the request instead of `*`
    let cors = CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_credentials(true)
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request());

    // Clone verifier for middleware closure
    let verifier = state.verifier.clone();

    let app = Router::new()
        .route("/", get(root_handler))
        .route("/health", get(health_handler))
        .route("/api/analyze", post(analyze_handler))
        .route("/api/chat", post(chat_handler))
        .route("/api/timeline", post(timeline_handler))
        // Middleware layers (applied in reverse order - last added runs first)
        .layer(middleware::from_fn(move |req: axum::extract::Request, next: middleware::Next| {
            jwt_auth_middleware(verifier.clone(), req, next)
        }))
        .layer(Extension(state))
        .layer(TimeoutLayer::new(REQUEST_TIMEOUT))
        .layer(cors)
        .layer(TraceLayer::new_for_http());

    Ok(app)
}
