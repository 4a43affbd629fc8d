//! Diagnostics for the logger itself.
//!
//! Dropped fields, ignored level labels and failed sink writes are reported
//! through `tracing` on stderr, so they never mix with records on stdout.

use crate::domain::LoggerError;
use std::sync::{Mutex, Once};
use thiserror::Error;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

pub const DIAGNOSTICS_ENV: &str = "RASK_LOGGER_DIAGNOSTICS";

/// Root cause of a failed installation, kept as text so every later call can
/// report it again.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{0}")]
pub struct RecordedCause(String);

#[derive(Debug, Clone)]
struct InitFailure {
    details: String,
    cause: String,
}

impl InitFailure {
    fn record(error: &LoggerError) -> Self {
        match error {
            LoggerError::Diagnostics { details, source } => Self {
                details: details.clone(),
                cause: source.to_string(),
            },
            other => Self {
                details: other.to_string(),
                cause: other.to_string(),
            },
        }
    }

    fn to_error(&self) -> LoggerError {
        LoggerError::Diagnostics {
            details: self.details.clone(),
            source: Box::new(RecordedCause(self.cause.clone())),
        }
    }
}

/// Installs the global diagnostics subscriber once per process.
///
/// `RASK_LOGGER_DIAGNOSTICS` overrides `default_directive` when set. A failed
/// installation is reported on every call with the original details and cause.
pub fn init_diagnostics(default_directive: &str) -> Result<(), LoggerError> {
    static INIT: Once = Once::new();
    static INIT_FAILURE: Mutex<Option<InitFailure>> = Mutex::new(None);

    INIT.call_once(|| {
        if let Err(e) = install(default_directive)
            && let Ok(mut slot) = INIT_FAILURE.lock()
        {
            *slot = Some(InitFailure::record(&e));
        }
    });

    let failure = INIT_FAILURE.lock().ok().and_then(|slot| slot.clone());
    match failure {
        None => Ok(()),
        Some(failure) => Err(failure.to_error()),
    }
}

fn install(default_directive: &str) -> Result<(), LoggerError> {
    let filter = EnvFilter::try_from_env(DIAGNOSTICS_ENV)
        .or_else(|_| EnvFilter::try_new(default_directive))
        .map_err(|e| LoggerError::Diagnostics {
            details: format!("Failed to create EnvFilter with '{default_directive}'"),
            source: Box::new(e),
        })?;

    let subscriber = tracing_subscriber::registry().with(filter).with(
        fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(true)
            .with_level(true)
            .with_ansi(false)
            .compact(),
    );

    tracing::subscriber::set_global_default(subscriber).map_err(|e| LoggerError::Diagnostics {
        details: "Failed to set global tracing subscriber".to_string(),
        source: Box::new(e),
    })
}
