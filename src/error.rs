use sqlx::Error as SqlxError;
use std::time::Duration;
use thiserror::Error as ThisError;

/// Failures raised inside the datastore layer.
///
/// None of these escape to the request layer: the resolver turns connect
/// failures into a scan over the next source, and the submission path turns
/// write failures into a "not saved" outcome.
#[derive(Debug, ThisError)]
pub enum DbError {
    #[error("connect via `{source_name}` failed: {error}")]
    Connect {
        source_name: &'static str,
        #[source]
        error: SqlxError,
    },

    #[error("connect via `{source_name}` timed out after {after:?}")]
    Timeout {
        source_name: &'static str,
        after: Duration,
    },

    #[error("liveness check failed: {0}")]
    Stale(#[source] SqlxError),

    #[error("schema bootstrap failed: {0}")]
    Schema(#[source] SqlxError),

    #[error("write failed: {0}")]
    Write(#[source] SqlxError),

    /// Read failures outside the write path.
    #[error("Database error: {0}")]
    Database(#[from] SqlxError),
}

/// The datastore could not be reached through any configured source.
///
/// This is a terminal but non-fatal state; every caller carries an explicit
/// degraded-mode path for it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ThisError)]
#[error("datastore unavailable")]
pub struct Unavailable;

/// Startup errors; the only ones `main` returns.
#[derive(Debug, ThisError)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(#[from] Box<figment::Error>),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<figment::Error> for AppError {
    fn from(e: figment::Error) -> Self {
        AppError::Config(Box::new(e))
    }
}
