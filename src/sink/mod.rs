//! Output sinks.
//!
//! A sink receives each emitted [`LogRecord`] as structured data and owns its
//! serialization. The logger writes exactly once per emitted call and never
//! retries.

mod json_lines;
mod memory;

use crate::domain::LogRecord;
use thiserror::Error;

#[cfg(test)]
use mockall::automock;

pub use json_lines::{JsonLinesSink, StdoutSink};
pub use memory::MemorySink;

#[derive(Error, Debug)]
pub enum SinkError {
    #[error("JSON serialization failed: {0}")]
    Json(#[from] serde_json::Error),
    #[error("IO error while writing record: {0}")]
    Io(#[from] std::io::Error),
}

/// Destination for emitted records.
#[cfg_attr(test, automock)]
pub trait RecordSink: Send + Sync {
    fn write(&self, record: &LogRecord) -> Result<(), SinkError>;
}
