#![deny(warnings, rust_2024_compatibility)]
// Specific pedantic lints enforced (not blanket allow):
#![deny(
    clippy::explicit_iter_loop,
    clippy::manual_let_else,
    clippy::semicolon_if_nothing_returned,
    clippy::inconsistent_struct_constructor
)]
// Noisy pedantic lints suppressed with justification:
#![allow(
    clippy::missing_errors_doc,      // Internal API
    clippy::missing_panics_doc,      // Internal API
    clippy::module_name_repetitions, // e.g. LoggerError in logger module
    clippy::must_use_candidate,      // Annotated selectively on critical APIs
    clippy::doc_markdown             // Internal API
)]

//! Structured logging facade.
//!
//! A [`Logger`] stamps every record with `name`, `level`, `logLevel`, `msg`,
//! `time`, `pid` and `hostname`, merges caller data into the top level,
//! serializes native errors, and hands the record to a pluggable sink.

pub mod app;
pub mod config;
pub mod diagnostics;
pub mod domain;
pub mod engine;
pub mod logger;
pub mod sink;

// Re-export main types for easy access
pub use domain::{ErrorKey, ErrorValue, Fields, Level, LogRecord, LoggedError, LoggerError, Payload};
pub use logger::{Chain, Logger, LoggerBuilder};
pub use sink::{JsonLinesSink, MemorySink, RecordSink, SinkError, StdoutSink};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
