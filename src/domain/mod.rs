//! Domain layer for rask-logger.
//!
//! Contains the canonical types shared across all modules:
//! - `Level`: Severity vocabulary and effective-level resolution
//! - `Payload` / `Fields`: What a caller attaches to a call
//! - `LogRecord`: What a sink receives
//! - `LoggerError` / `LoggedError`: Error types

pub mod error;
pub mod level;
pub mod payload;
pub mod record;

pub use error::{LoggedError, LoggerError};
pub use level::{LOG_LEVEL_ENV, Level, resolve_level};
pub use payload::{ErrorKey, ErrorValue, Fields, Payload};
pub use record::{LogRecord, STANDARD_FIELDS, SerializedError};
