//! Collaborator abstractions for the analysis core.
//!
//! These traits define the interfaces that applications implement to
//! provide text generation, entity recognition and experiment logging.

pub mod experiment_log;
pub mod generator;
pub mod recognizer;
