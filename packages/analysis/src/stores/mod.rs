//! Experiment log sinks.
//!
//! Durable storage is the application's concern; these cover development,
//! tests, and log-pipeline deployments.

pub mod memory;
pub mod tracing_log;

pub use memory::MemoryExperimentLog;
pub use tracing_log::TracingExperimentLog;
