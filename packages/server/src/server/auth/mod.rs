//! Caller identity.
//!
//! The analysis core only sees an opaque caller id; turning a bearer token
//! into that id is the transport's job.

pub mod jwt;

use std::fmt;

use async_trait::async_trait;
use thiserror::Error;

pub use jwt::{Claims, JwtVerifier};

/// Opaque, stable identifier of an authenticated caller.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CallerId(String);

impl CallerId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CallerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("missing bearer token")]
    MissingToken,

    #[error("invalid token: {0}")]
    InvalidToken(#[from] jsonwebtoken::errors::Error),

    #[error("token has no subject")]
    MissingSubject,
}

/// Verifies a bearer token and yields the caller it was issued to.
#[async_trait]
pub trait IdentityVerifier: Send + Sync {
    async fn verify(&self, token: &str) -> Result<CallerId, AuthError>;
}
