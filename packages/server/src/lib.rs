// LAWYER AI - API Core
//
// HTTP transport for the analysis library: configuration, identity
// verification and the axum routes for document analysis, chat and timelines.

pub mod config;
pub mod server;

pub use config::*;
