//! Typed error taxonomy shared by the database layer and the HTTP surface.
//!
//! Every fallible operation below the HTTP handlers returns [`AppError`] so
//! that the central response mapping can translate failures into the uniform
//! `{success: false, payload: {...}}` body without per-handler boilerplate.

use thiserror::Error;

/// Application error taxonomy.
///
/// The variants map one-to-one onto HTTP status classes:
/// `Validation` and `BusinessRule` become 400, `NotFound` becomes 404, and
/// everything else becomes a generic 500. Unknown failures are deliberately
/// mapped to a server error rather than any authorization-flavored status.
#[derive(Debug, Error)]
pub enum AppError {
    /// Malformed or missing request fields, caught before service logic runs.
    #[error("Validation failed")]
    Validation(Vec<String>),

    /// A well-formed request that violates a domain rule.
    #[error("{0}")]
    BusinessRule(String),

    /// A referenced project or work entry does not exist.
    #[error("{0}")]
    NotFound(String),

    /// SQLite failure.
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// Anything else.
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    /// Single-message validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        AppError::Validation(vec![message.into()])
    }

    /// Wraps an arbitrary error source as an internal failure.
    pub fn internal<E: Into<anyhow::Error>>(err: E) -> Self {
        AppError::Internal(err.into())
    }
}
