//! Model routing with traffic-split experimentation.
//!
//! Every generation call goes through [`ModelRouter::route`], which:
//! - picks variant A or B (per call, no stickiness)
//! - calls the engine and converts failures into soft-fail outcomes
//! - appends an experiment log entry in the background when enabled

use std::sync::{Arc, Mutex};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tokio::sync::Mutex as AsyncMutex;
use tokio_util::task::TaskTracker;
use tracing::{debug, warn};

use crate::error::Result;
use crate::pipeline::prompts::prompt_fingerprint;
use crate::traits::{experiment_log::ExperimentLog, generator::TextGenerator};
use crate::types::{
    config::ExperimentConfig,
    generation::{ExperimentLogEntry, GenerationOutcome, GenerationRequest, ModelVariant},
};

/// Source of the uniform draw in `1..=100` used for variant selection.
pub trait TrafficDraw: Send + Sync {
    fn draw(&self) -> u8;
}

/// Production draw backed by the thread-local RNG.
#[derive(Debug, Default, Clone, Copy)]
pub struct ThreadRngDraw;

impl TrafficDraw for ThreadRngDraw {
    fn draw(&self) -> u8 {
        rand::thread_rng().gen_range(1..=100)
    }
}

/// Reproducible draw from a seeded RNG, for simulations and tests.
pub struct SeededDraw {
    rng: Mutex<StdRng>,
}

impl SeededDraw {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }
}

impl TrafficDraw for SeededDraw {
    fn draw(&self) -> u8 {
        self.rng
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .gen_range(1..=100)
    }
}

/// Routes prompts to one of two model variants and records the outcome.
#[derive(Clone)]
pub struct ModelRouter {
    generator: Arc<dyn TextGenerator>,
    log: Arc<dyn ExperimentLog>,
    draw: Arc<dyn TrafficDraw>,
    config: ExperimentConfig,
    pending_logs: TaskTracker,
    drain_lock: Arc<AsyncMutex<()>>,
}

impl ModelRouter {
    /// Create a router using the thread RNG for variant selection.
    ///
    /// Fails if `config` does not validate.
    pub fn new(
        generator: Arc<dyn TextGenerator>,
        log: Arc<dyn ExperimentLog>,
        config: ExperimentConfig,
    ) -> Result<Self> {
        config.validate()?;

        Ok(Self {
            generator,
            log,
            draw: Arc::new(ThreadRngDraw),
            config,
            pending_logs: TaskTracker::new(),
            drain_lock: Arc::new(AsyncMutex::new(())),
        })
    }

    /// Replace the draw source.
    pub fn with_draw(mut self, draw: impl TrafficDraw + 'static) -> Self {
        self.draw = Arc::new(draw);
        self
    }

    /// Get a reference to the configuration.
    pub fn config(&self) -> &ExperimentConfig {
        &self.config
    }

    /// Choose the variant for one call.
    ///
    /// Disabled experiments always use A and never consult the draw.
    pub fn select_variant(&self) -> ModelVariant {
        if !self.config.enabled {
            return ModelVariant::A;
        }

        let draw = self.draw.draw();
        if draw <= self.config.model_b_traffic_percentage {
            ModelVariant::B
        } else {
            ModelVariant::A
        }
    }

    /// Generate a response for `prompt` on behalf of `caller_id`.
    ///
    /// Never fails: engine errors come back as an outcome with
    /// `succeeded == false` and a diagnostic in `text`.
    pub async fn route(&self, prompt: &str, caller_id: &str) -> GenerationOutcome {
        let variant = self.select_variant();
        let model = self.config.model_name(variant);

        debug!(variant = %variant, model = %model, "Routing generation request");

        let outcome = match self.generator.generate(prompt, model).await {
            Ok(text) => GenerationOutcome::success(text, variant, model),
            Err(e) => {
                warn!(variant = %variant, model = %model, error = %e, "Generation failed");
                GenerationOutcome::failure(variant, model, e)
            }
        };

        if self.config.enabled {
            self.spawn_log(caller_id, prompt, &outcome);
        }

        outcome
    }

    /// Route a prepared request.
    pub async fn route_request(&self, request: &GenerationRequest) -> GenerationOutcome {
        self.route(&request.prompt_text, &request.caller_id).await
    }

    /// Wait for all in-flight experiment log appends to finish.
    ///
    /// Drains on clones of one router run one at a time.
    pub async fn drain_logs(&self) {
        let _guard = self.drain_lock.lock().await;
        self.pending_logs.close();
        self.pending_logs.wait().await;
        self.pending_logs.reopen();
    }

    fn spawn_log(&self, caller_id: &str, prompt: &str, outcome: &GenerationOutcome) {
        let entry = ExperimentLogEntry::for_outcome(caller_id, prompt_fingerprint(prompt), outcome);
        let log = Arc::clone(&self.log);

        self.pending_logs.spawn(async move {
            match log.append(&entry).await {
                Ok(()) => debug!(
                    caller_id = %entry.caller_id,
                    model = %entry.model_name,
                    "Experiment event logged"
                ),
                Err(e) => warn!(
                    caller_id = %entry.caller_id,
                    error = %e,
                    "Failed to log experiment event"
                ),
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AnalysisError;
    use crate::stores::MemoryExperimentLog;
    use crate::testing::{FixedDraw, MockGenerator};
    use crate::traits::experiment_log::MockExperimentLog;

    fn router_with(
        config: ExperimentConfig,
        draw: impl TrafficDraw + 'static,
        log: Arc<dyn ExperimentLog>,
    ) -> ModelRouter {
        ModelRouter::new(Arc::new(MockGenerator::new()), log, config)
            .unwrap()
            .with_draw(draw)
    }

    fn experiment(percentage: u8) -> ExperimentConfig {
        ExperimentConfig::new("flash", "pro")
            .with_experiment(percentage)
            .unwrap()
    }

    #[test]
    fn test_disabled_always_selects_a() {
        let router = router_with(
            ExperimentConfig::new("flash", "pro"),
            FixedDraw::always(1),
            Arc::new(MemoryExperimentLog::new()),
        );
        for _ in 0..50 {
            assert_eq!(router.select_variant(), ModelVariant::A);
        }
    }

    #[test]
    fn test_zero_percent_never_selects_b() {
        let router = router_with(
            experiment(0),
            FixedDraw::new((1..=100).collect()),
            Arc::new(MemoryExperimentLog::new()),
        );
        for _ in 0..100 {
            assert_eq!(router.select_variant(), ModelVariant::A);
        }
    }

    #[test]
    fn test_hundred_percent_always_selects_b() {
        let router = router_with(
            experiment(100),
            FixedDraw::new((1..=100).collect()),
            Arc::new(MemoryExperimentLog::new()),
        );
        for _ in 0..100 {
            assert_eq!(router.select_variant(), ModelVariant::B);
        }
    }

    #[test]
    fn test_threshold_is_inclusive() {
        let router = router_with(
            experiment(30),
            FixedDraw::new(vec![30, 31]),
            Arc::new(MemoryExperimentLog::new()),
        );
        assert_eq!(router.select_variant(), ModelVariant::B);
        assert_eq!(router.select_variant(), ModelVariant::A);
    }

    #[test]
    fn test_selection_frequency_converges() {
        const TRIALS: usize = 20_000;

        for percentage in [0u8, 5, 25, 50, 75, 95, 100] {
            let router = router_with(
                experiment(percentage),
                SeededDraw::new(42 + percentage as u64),
                Arc::new(MemoryExperimentLog::new()),
            );
            let b_count = (0..TRIALS)
                .filter(|_| router.select_variant() == ModelVariant::B)
                .count();
            let observed = b_count as f64 * 100.0 / TRIALS as f64;

            assert!(
                (observed - percentage as f64).abs() < 2.0,
                "p={} observed={}",
                percentage,
                observed
            );
        }
    }

    #[test]
    fn test_thread_rng_draw_in_range() {
        let draw = ThreadRngDraw;
        for _ in 0..1_000 {
            let value = draw.draw();
            assert!((1..=100).contains(&value));
        }
    }

    #[tokio::test]
    async fn test_route_uses_selected_model() {
        let generator = Arc::new(MockGenerator::new().with_response("lease", "Lease summary"));
        let router = ModelRouter::new(
            generator.clone(),
            Arc::new(MemoryExperimentLog::new()),
            experiment(100),
        )
        .unwrap()
        .with_draw(FixedDraw::always(1));

        let outcome = router.route("Summarize this lease", "user-1").await;

        assert!(outcome.succeeded);
        assert_eq!(outcome.text, "Lease summary");
        assert_eq!(outcome.model_variant, ModelVariant::B);
        assert_eq!(outcome.model_name, "pro");
        assert_eq!(generator.calls()[0].model, "pro");
        router.drain_logs().await;
    }

    #[tokio::test]
    async fn test_engine_failure_is_soft() {
        let router = ModelRouter::new(
            Arc::new(MockGenerator::new().with_failure("lease", "upstream timeout")),
            Arc::new(MemoryExperimentLog::new()),
            ExperimentConfig::new("flash", "pro"),
        )
        .unwrap();

        let outcome = router.route("Summarize this lease", "user-1").await;

        assert!(!outcome.succeeded);
        assert!(outcome.text.starts_with("Error:"));
        assert!(outcome.text.contains("flash"));
        assert!(outcome.text.contains("upstream timeout"));
        assert_eq!(outcome.model_variant, ModelVariant::A);
    }

    #[tokio::test]
    async fn test_enabled_logs_fingerprint_not_prompt() {
        let log = Arc::new(MemoryExperimentLog::new());
        let router = router_with(experiment(50), FixedDraw::always(80), log.clone());

        let prompt = "Confidential settlement terms for Jane Doe";
        let outcome = router.route(prompt, "user-7").await;
        router.drain_logs().await;

        let entries = log.entries();
        assert_eq!(entries.len(), 1);
        let entry = &entries[0];
        assert_eq!(entry.caller_id, "user-7");
        assert_eq!(entry.prompt_fingerprint, prompt_fingerprint(prompt));
        assert!(!entry.prompt_fingerprint.contains("Jane"));
        assert_eq!(entry.model_variant, ModelVariant::A);
        assert_eq!(entry.response_length, outcome.text.chars().count());
        assert!(entry.succeeded);
    }

    #[tokio::test]
    async fn test_failed_generation_logged_as_unsuccessful() {
        let log = Arc::new(MemoryExperimentLog::new());
        let router = ModelRouter::new(
            Arc::new(MockGenerator::failing("engine down")),
            log.clone(),
            experiment(0),
        )
        .unwrap();

        router.route("prompt", "user-1").await;
        router.drain_logs().await;

        assert!(!log.entries()[0].succeeded);
    }

    #[tokio::test]
    async fn test_disabled_never_logs() {
        let mut log = MockExperimentLog::new();
        log.expect_append().times(0);

        let router = router_with(
            ExperimentConfig::new("flash", "pro"),
            FixedDraw::always(1),
            Arc::new(log),
        );
        router.route("prompt", "user-1").await;
        router.drain_logs().await;
    }

    #[tokio::test]
    async fn test_log_failure_does_not_affect_outcome() {
        let mut log = MockExperimentLog::new();
        log.expect_append()
            .times(1)
            .returning(|_| Err(AnalysisError::Log("store unavailable".into())));

        let router = ModelRouter::new(
            Arc::new(MockGenerator::new().with_response("prompt", "fine")),
            Arc::new(log),
            experiment(0),
        )
        .unwrap();

        let outcome = router.route("prompt", "user-1").await;
        router.drain_logs().await;

        assert!(outcome.succeeded);
        assert_eq!(outcome.text, "fine");
    }

    #[tokio::test]
    async fn test_route_request() {
        let router = ModelRouter::new(
            Arc::new(MockGenerator::new().with_response("deadline", "June 1")),
            Arc::new(MemoryExperimentLog::new()),
            ExperimentConfig::default(),
        )
        .unwrap();
        let request = GenerationRequest::new("When is the deadline?", "user-2");

        let outcome = router.route_request(&request).await;
        assert_eq!(outcome.text, "June 1");
    }

    #[test]
    fn test_new_rejects_invalid_config() {
        let config = ExperimentConfig {
            enabled: true,
            model_b_traffic_percentage: 150,
            ..ExperimentConfig::new("flash", "pro")
        };
        let result = ModelRouter::new(
            Arc::new(MockGenerator::new()),
            Arc::new(MemoryExperimentLog::new()),
            config,
        );
        assert!(matches!(result, Err(AnalysisError::Config(_))));
    }

    #[tokio::test]
    async fn test_overlapping_drains_complete() {
        let log = Arc::new(MemoryExperimentLog::new());
        let router = router_with(experiment(50), FixedDraw::always(1), log.clone());
        let clone = router.clone();

        for i in 0..10 {
            router.route(&format!("prompt {}", i), "user-1").await;
        }

        let both = async { tokio::join!(router.drain_logs(), clone.drain_logs()) };
        tokio::time::timeout(std::time::Duration::from_secs(5), both)
            .await
            .expect("drains finish");

        assert_eq!(log.len(), 10);

        // The tracker is usable again after draining
        router.route("one more", "user-1").await;
        clone.drain_logs().await;
        assert_eq!(log.len(), 11);
    }
}
