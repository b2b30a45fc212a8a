use analysis::{
    types::config::{DEFAULT_MODEL_A, DEFAULT_MODEL_B},
    ExperimentConfig,
};
use anyhow::{bail, Context, Result};
use dotenvy::dotenv;
use std::env;

const DEFAULT_ALLOWED_ORIGINS: &str = "http://localhost:3000,http://localhost:4141";

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub google_api_key: String,
    pub jwt_secret: String,
    pub jwt_issuer: String,
    pub allowed_origins: Vec<String>,
    pub ner_service_url: Option<String>,
    pub experiment: ExperimentConfig,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present (development)
        let _ = dotenv();

        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable source.
    pub fn from_lookup(var: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let allowed_origins: Vec<String> = var("ALLOWED_ORIGINS")
            .unwrap_or_else(|| DEFAULT_ALLOWED_ORIGINS.to_string())
            .split(',')
            .map(|origin| origin.trim().to_string())
            .filter(|origin| !origin.is_empty())
            .collect();
        if allowed_origins.iter().any(|origin| origin == "*") {
            bail!("ALLOWED_ORIGINS cannot contain '*' when credentials are allowed");
        }

        Ok(Self {
            port: var("PORT")
                .unwrap_or_else(|| "8000".to_string())
                .parse()
                .context("PORT must be a valid number")?,
            google_api_key: var("GOOGLE_API_KEY").context("GOOGLE_API_KEY must be set")?,
            jwt_secret: var("JWT_SECRET").context("JWT_SECRET must be set")?,
            jwt_issuer: var("JWT_ISSUER").unwrap_or_else(|| "lawyer-ai".to_string()),
            allowed_origins,
            ner_service_url: var("NER_SERVICE_URL").filter(|url| !url.trim().is_empty()),
            experiment: experiment_from_lookup(&var)?,
        })
    }
}

fn experiment_from_lookup(var: &impl Fn(&str) -> Option<String>) -> Result<ExperimentConfig> {
    let enabled = var("AB_TEST_ENABLED")
        .map(|value| value.trim().eq_ignore_ascii_case("true"))
        .unwrap_or(false);
    let model_a = var("MODEL_A_NAME").unwrap_or_else(|| DEFAULT_MODEL_A.to_string());
    let model_b = var("MODEL_B_NAME").unwrap_or_else(|| DEFAULT_MODEL_B.to_string());
    let percentage: u8 = var("MODEL_B_TRAFFIC_PERCENTAGE")
        .unwrap_or_else(|| "0".to_string())
        .trim()
        .parse()
        .context("MODEL_B_TRAFFIC_PERCENTAGE must be a number between 0 and 100")?;

    let config = ExperimentConfig {
        enabled,
        model_a,
        model_b,
        model_b_traffic_percentage: percentage,
    };
    config
        .validate()
        .context("Invalid A/B experiment configuration")?;
    Ok(config)
}
