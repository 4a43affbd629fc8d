//! The logging facade.
//!
//! A [`Logger`] resolves its effective level once, at construction, and then
//! normalizes every `message + payload` call into a single structured record.

use crate::domain::record::LOG_LEVEL_FIELD;
use crate::domain::{Fields, LOG_LEVEL_ENV, Level, LoggedError, LoggerError, Payload, resolve_level};
use crate::engine::Engine;
use crate::sink::{RecordSink, StdoutSink};
use serde_json::Value;
use std::sync::Arc;

#[derive(Debug)]
pub struct Logger {
    name: String,
    level: Level,
    engine: Engine,
}

/// Returned by [`Logger::error`] and [`Logger::fatal`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chain {
    message: String,
}

impl Chain {
    fn new(message: &str) -> Self {
        Self {
            message: message.to_string(),
        }
    }

    /// Builds an error carrying the logged message. Nothing is raised or
    /// logged again.
    pub fn return_error(self) -> LoggedError {
        LoggedError::new(self.message)
    }
}

impl Logger {
    /// Creates a logger writing to stdout.
    ///
    /// `level` wins over `LOG_LEVEL`, which wins over `info`. Unknown labels
    /// at either tier are ignored.
    pub fn new(name: impl Into<String>, level: Option<&str>) -> Result<Self, LoggerError> {
        let builder = Self::builder(name);
        match level {
            Some(level) => builder.level_name(level).build(),
            None => builder.build(),
        }
    }

    pub fn builder(name: impl Into<String>) -> LoggerBuilder {
        LoggerBuilder::new(name)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn level(&self) -> Level {
        self.level
    }

    pub fn is_enabled(&self, level: Level) -> bool {
        self.engine.enabled(level)
    }

    pub fn debug(&self, msg: &str) {
        self.write(Level::Debug, msg, Payload::Empty);
    }

    pub fn debug_with(&self, msg: &str, payload: impl Into<Payload>) {
        self.write(Level::Debug, msg, payload);
    }

    pub fn info(&self, msg: &str) {
        self.write(Level::Info, msg, Payload::Empty);
    }

    pub fn info_with(&self, msg: &str, payload: impl Into<Payload>) {
        self.write(Level::Info, msg, payload);
    }

    pub fn warn(&self, msg: &str) {
        self.write(Level::Warn, msg, Payload::Empty);
    }

    pub fn warn_with(&self, msg: &str, payload: impl Into<Payload>) {
        self.write(Level::Warn, msg, payload);
    }

    pub fn error(&self, msg: &str) -> Chain {
        self.error_with(msg, Payload::Empty)
    }

    pub fn error_with(&self, msg: &str, payload: impl Into<Payload>) -> Chain {
        self.write(Level::Error, msg, payload);
        Chain::new(msg)
    }

    pub fn fatal(&self, msg: &str) -> Chain {
        self.fatal_with(msg, Payload::Empty)
    }

    pub fn fatal_with(&self, msg: &str, payload: impl Into<Payload>) -> Chain {
        self.write(Level::Fatal, msg, payload);
        Chain::new(msg)
    }

    /// Derives a logger with the same name and level that adds `fields` to
    /// every record. Parent and child are independent afterwards.
    pub fn create_child_logger(&self, fields: impl Into<Fields>) -> Logger {
        Logger {
            name: self.name.clone(),
            level: self.level,
            engine: self.engine.child(fields.into().into_map()),
        }
    }

    /// Emits one record at `level` unless the logger is above it.
    ///
    /// Errors in the payload, bare or under `err`/`error`, are serialized to
    /// `{name, message, stack}`; other fields merge into the top level. A sink
    /// failure is reported as a diagnostic and not retried.
    pub fn write(&self, level: Level, msg: &str, payload: impl Into<Payload>) {
        if !self.engine.enabled(level) {
            return;
        }

        let mut fields = payload.into().into_fields();
        if fields
            .insert(LOG_LEVEL_FIELD.to_string(), Value::from(level.as_str()))
            .is_some()
        {
            tracing::debug!(logger = %self.name, "payload logLevel replaced by call level");
        }

        if let Err(e) = self.engine.emit(level, fields, msg) {
            tracing::warn!(logger = %self.name, error = %e, "failed to write log record");
        }
    }
}

/// Builder for [`Logger`] with an injectable environment level and sink.
pub struct LoggerBuilder {
    name: String,
    level: Option<String>,
    env_level: Option<Option<String>>,
    sink: Option<Arc<dyn RecordSink>>,
}

impl LoggerBuilder {
    fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            level: None,
            env_level: None,
            sink: None,
        }
    }

    pub fn level(mut self, level: Level) -> Self {
        self.level = Some(level.as_str().to_string());
        self
    }

    /// Explicit level by label. Unknown labels behave as if none was given.
    pub fn level_name(mut self, level: impl Into<String>) -> Self {
        self.level = Some(level.into());
        self
    }

    /// Supplies the environment tier directly instead of reading `LOG_LEVEL`.
    pub fn env_level(mut self, level: Option<impl Into<String>>) -> Self {
        self.env_level = Some(level.map(Into::into));
        self
    }

    pub fn sink(self, sink: impl RecordSink + 'static) -> Self {
        self.shared_sink(Arc::new(sink))
    }

    pub fn shared_sink(mut self, sink: Arc<dyn RecordSink>) -> Self {
        self.sink = Some(sink);
        self
    }

    pub fn build(self) -> Result<Logger, LoggerError> {
        let env_level = self
            .env_level
            .unwrap_or_else(|| std::env::var(LOG_LEVEL_ENV).ok());
        let level = resolve_level(self.level.as_deref(), env_level.as_deref())?;
        let sink = self
            .sink
            .unwrap_or_else(|| Arc::new(StdoutSink::stdout()) as Arc<dyn RecordSink>);

        let engine = Engine::new(self.name.clone(), level, sink);

        Ok(Logger {
            name: self.name,
            level,
            engine,
        })
    }
}
