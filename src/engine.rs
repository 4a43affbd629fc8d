//! Structured record engine.
//!
//! Owns everything stamped on a record that the caller does not supply: name,
//! hostname, pid, numeric level, message and time, plus the static fields
//! carried by child engines.

use crate::domain::record::{
    ENGINE_FIELDS, HOSTNAME_FIELD, LEVEL_FIELD, MSG_FIELD, NAME_FIELD, PID_FIELD, TIME_FIELD,
};
use crate::domain::{Level, LogRecord};
use crate::sink::{RecordSink, SinkError};
use chrono::{SecondsFormat, Utc};
use serde_json::{Map, Value};
use std::fmt;
use std::sync::Arc;

pub struct Engine {
    name: String,
    level: Level,
    hostname: String,
    pid: u32,
    base_fields: Map<String, Value>,
    sink: Arc<dyn RecordSink>,
}

impl Engine {
    pub fn new(name: impl Into<String>, level: Level, sink: Arc<dyn RecordSink>) -> Self {
        Self {
            name: name.into(),
            level,
            hostname: detect_hostname(),
            pid: std::process::id(),
            base_fields: Map::new(),
            sink,
        }
    }

    /// Derives an engine that stamps `fields` on every record on top of the
    /// fields inherited from `self`. The two engines share the sink and
    /// nothing else.
    pub fn child(&self, fields: Map<String, Value>) -> Self {
        let mut base_fields = self.base_fields.clone();
        base_fields.extend(fields);

        Self {
            name: self.name.clone(),
            level: self.level,
            hostname: self.hostname.clone(),
            pid: self.pid,
            base_fields,
            sink: Arc::clone(&self.sink),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn level(&self) -> Level {
        self.level
    }

    pub fn base_fields(&self) -> &Map<String, Value> {
        &self.base_fields
    }

    pub fn enabled(&self, level: Level) -> bool {
        level.passes(self.level)
    }

    /// Builds and writes one record. Calls below the engine level are dropped
    /// before anything is built.
    pub fn emit(
        &self,
        level: Level,
        fields: Map<String, Value>,
        msg: &str,
    ) -> Result<(), SinkError> {
        if !self.enabled(level) {
            return Ok(());
        }

        let record = self.build_record(level, fields, msg);
        self.sink.write(&record)
    }

    fn build_record(&self, level: Level, fields: Map<String, Value>, msg: &str) -> LogRecord {
        let capacity = self.base_fields.len() + fields.len() + ENGINE_FIELDS.len();
        let mut record = Map::with_capacity(capacity);
        record.insert(NAME_FIELD.to_string(), Value::from(self.name.as_str()));
        record.insert(HOSTNAME_FIELD.to_string(), Value::from(self.hostname.as_str()));
        record.insert(PID_FIELD.to_string(), Value::from(self.pid));
        record.insert(LEVEL_FIELD.to_string(), Value::from(level.rank()));

        let inherited = self.base_fields.iter().map(|(k, v)| (k.clone(), v.clone()));
        for (key, value) in inherited.chain(fields) {
            if ENGINE_FIELDS.contains(&key.as_str()) {
                tracing::debug!(key = %key, "dropping field that collides with a standard field");
                continue;
            }
            record.insert(key, value);
        }

        record.insert(MSG_FIELD.to_string(), Value::from(msg));
        record.insert(
            TIME_FIELD.to_string(),
            Value::from(Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)),
        );
        LogRecord::new(record)
    }
}

impl fmt::Debug for Engine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Engine")
            .field("name", &self.name)
            .field("level", &self.level)
            .field("hostname", &self.hostname)
            .field("pid", &self.pid)
            .field("base_fields", &self.base_fields)
            .finish_non_exhaustive()
    }
}

fn detect_hostname() -> String {
    hostname::get()
        .ok()
        .and_then(|h| h.into_string().ok())
        .unwrap_or_else(|| "unknown".to_string())
}
