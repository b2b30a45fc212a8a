//! Request-scoped value types for the analysis core.

pub mod analysis;
pub mod config;
pub mod entity;
pub mod generation;
pub mod timeline;
