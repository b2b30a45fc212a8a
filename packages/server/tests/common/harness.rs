//! In-process test harness for the HTTP API.
//!
//! Builds the real router over mock collaborators and drives it with
//! `tower::ServiceExt::oneshot`; no network or model calls.

use std::sync::Arc;

use analysis::{
    testing::{MockGenerator, MockRecognizer},
    AnalysisPipeline, ExperimentConfig, MemoryExperimentLog, ModelRouter,
};
use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use serde_json::Value;
use server_core::server::{auth::JwtVerifier, build_app, AppState};
use tower::ServiceExt;

pub const TEST_SECRET: &str = "test_secret_key";
pub const TEST_ISSUER: &str = "lawyer-ai";
pub const TEST_ORIGIN: &str = "http://localhost:3000";

pub struct TestHarness {
    pub app: Router,
    pub verifier: JwtVerifier,
    pub log: Arc<MemoryExperimentLog>,
    pub pipeline: AnalysisPipeline,
}

impl TestHarness {
    pub fn new(generator: MockGenerator) -> Self {
        Self::with_config(generator, MockRecognizer::new(), ExperimentConfig::default())
    }

    pub fn with_config(
        generator: MockGenerator,
        recognizer: MockRecognizer,
        config: ExperimentConfig,
    ) -> Self {
        let log = Arc::new(MemoryExperimentLog::new());
        let router = ModelRouter::new(Arc::new(generator), log.clone(), config).unwrap();
        let pipeline = AnalysisPipeline::new(router, Arc::new(recognizer));
        let verifier = JwtVerifier::new(TEST_SECRET, TEST_ISSUER);

        let app = build_app(
            AppState::new(pipeline.clone(), Arc::new(verifier.clone())),
            &[TEST_ORIGIN.to_string()],
        )
        .expect("valid test origins");

        Self {
            app,
            verifier,
            log,
            pipeline,
        }
    }

    pub fn token(&self, caller_id: &str) -> String {
        self.verifier.create_token(caller_id).unwrap()
    }

    /// GET without credentials.
    pub async fn get(&self, uri: &str) -> (StatusCode, Value) {
        let request = Request::builder()
            .method(Method::GET)
            .uri(uri)
            .body(Body::empty())
            .unwrap();
        self.send(request).await
    }

    /// POST a JSON body, optionally with a bearer token.
    pub async fn post(&self, uri: &str, token: Option<&str>, body: Value) -> (StatusCode, Value) {
        let mut builder = Request::builder()
            .method(Method::POST)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json");
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }
        let request = builder.body(Body::from(body.to_string())).unwrap();
        self.send(request).await
    }

    pub async fn send(&self, request: Request<Body>) -> (StatusCode, Value) {
        let response = self.app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };
        (status, value)
    }
}
