// Main entry point for API server

use std::sync::Arc;

use analysis::{
    AnalysisPipeline, EntityRecognizer, GeminiClient, HttpEntityRecognizer, ModelRouter,
    NoopRecognizer, TracingExperimentLog,
};
use anyhow::{Context, Result};
use server_core::{
    server::{auth::JwtVerifier, build_app, AppState},
    Config,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,server_core=debug,analysis=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting LAWYER AI API");

    // Load configuration
    let config = Config::from_env().context("Failed to load configuration")?;
    tracing::info!(
        ab_test_enabled = config.experiment.enabled,
        model_a = %config.experiment.model_a,
        model_b = %config.experiment.model_b,
        model_b_traffic_percentage = config.experiment.model_b_traffic_percentage,
        "Configuration loaded"
    );

    // Collaborators
    let generator = Arc::new(GeminiClient::new(config.google_api_key.clone()));
    let recognizer: Arc<dyn EntityRecognizer> = match &config.ner_service_url {
        Some(url) => {
            tracing::info!("Using entity recognizer at {}", url);
            Arc::new(HttpEntityRecognizer::new(url).context("Failed to create entity recognizer")?)
        }
        None => {
            tracing::warn!("NER_SERVICE_URL not set, entities limited to statute references");
            Arc::new(NoopRecognizer)
        }
    };

    let router = ModelRouter::new(
        generator,
        Arc::new(TracingExperimentLog::new()),
        config.experiment.clone(),
    )
    .context("Invalid model routing configuration")?;
    let pipeline = AnalysisPipeline::new(router, recognizer);
    let verifier = Arc::new(JwtVerifier::new(&config.jwt_secret, config.jwt_issuer.clone()));

    // Build application
    let app = build_app(AppState::new(pipeline.clone(), verifier), &config.allowed_origins)
        .context("Failed to build application")?;

    // Start server
    let addr = format!("0.0.0.0:{}", config.port);
    tracing::info!("Starting server on {}", addr);
    tracing::info!("Health check: http://localhost:{}/health", config.port);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .context("Failed to bind to address")?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    // Flush experiment entries still in flight
    pipeline.router().drain_logs().await;
    tracing::info!("Server stopped");

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
