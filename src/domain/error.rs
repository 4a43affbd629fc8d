use crate::sink::SinkError;
use thiserror::Error;

/// Top-level error type for the logger.
#[derive(Error, Debug)]
pub enum LoggerError {
    /// The level table has no label for this rank. This is a defect in the
    /// table, not a configuration problem.
    #[error("Could not convert level number to log level ({0})")]
    UnmappedLevel(u8),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Sink error: {0}")]
    Sink(#[from] SinkError),

    #[error("Diagnostics initialization failed: {details}")]
    Diagnostics {
        details: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

/// Error value derived from a logged `error`/`fatal` message.
///
/// Returned by [`Chain::return_error`](crate::logger::Chain::return_error) so
/// the caller decides whether to propagate it.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct LoggedError {
    message: String,
}

impl LoggedError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}
