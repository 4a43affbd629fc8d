use super::record::SerializedError;
use serde_json::{Map, Value};
use std::backtrace::Backtrace;
use std::error::Error as StdError;

/// Keys under which a native error is serialized in place.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKey {
    Err,
    Error,
}

impl ErrorKey {
    pub const ALL: [ErrorKey; 2] = [ErrorKey::Err, ErrorKey::Error];

    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKey::Err => "err",
            ErrorKey::Error => "error",
        }
    }

    fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.as_str() == key)
    }
}

/// A native error captured at the call site.
///
/// The error itself is not retained; its type name, message, source chain and
/// the backtrace at capture time are, which is all a record needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorValue {
    name: String,
    message: String,
    sources: Vec<String>,
    frames: Vec<String>,
}

impl ErrorValue {
    pub fn new<E>(error: &E) -> Self
    where
        E: StdError + ?Sized,
    {
        Self::named(short_type_name(std::any::type_name::<E>()), error)
    }

    /// Captures an error under an explicit name, for trait objects whose
    /// concrete type is no longer known.
    pub fn named<E>(name: impl Into<String>, error: &E) -> Self
    where
        E: StdError + ?Sized,
    {
        let mut sources = Vec::new();
        let mut source = error.source();
        while let Some(cause) = source {
            sources.push(cause.to_string());
            source = cause.source();
        }

        Self {
            name: name.into(),
            message: error.to_string(),
            sources,
            frames: capture_frames(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// `"<name>: <message>"` followed by one `"\n    at ..."` line per frame.
    ///
    /// Falls back to the source chain, then to `<unknown>`, so there is always
    /// at least one `at` line.
    pub fn stack(&self) -> String {
        let mut stack = format!("{}: {}", self.name, self.message);
        let lines = if !self.frames.is_empty() {
            &self.frames
        } else {
            &self.sources
        };

        if lines.is_empty() {
            stack.push_str("\n    at <unknown>");
        }
        for line in lines {
            stack.push_str("\n    at ");
            stack.push_str(line);
        }
        stack
    }

    pub fn serialize(&self) -> SerializedError {
        SerializedError {
            name: self.name.clone(),
            message: self.message.clone(),
            stack: self.stack(),
        }
    }
}

// Generic arguments and auto-trait bounds (`dyn Error + Send + Sync`) are not
// part of the name.
fn short_type_name(full: &str) -> &str {
    let base = full.split('<').next().unwrap_or(full);
    let base = base.split(" +").next().unwrap_or(base);
    base.rsplit("::").next().unwrap_or(base).trim_start_matches("dyn ")
}

// Frames of the backtrace machinery and of error capture itself.
fn is_capture_frame(symbol: &str) -> bool {
    symbol.starts_with("std::backtrace")
        || (symbol.starts_with("rask_logger::domain::payload::") && !symbol.contains("::tests::"))
}

// std only exposes a rendered backtrace; frame headers look like "  12: symbol".
fn capture_frames() -> Vec<String> {
    Backtrace::force_capture()
        .to_string()
        .lines()
        .filter_map(|line| {
            let (index, symbol) = line.trim_start().split_once(": ")?;
            if index.is_empty() || !index.bytes().all(|b| b.is_ascii_digit()) {
                return None;
            }
            Some(symbol.trim().to_string())
        })
        .skip_while(|symbol| is_capture_frame(symbol))
        .collect()
}

/// Structured fields supplied with a call or pre-seeded on a child logger.
///
/// Plain values are JSON. Native errors can only live under the conventional
/// [`ErrorKey`]s and are serialized in place when the record is built.
#[derive(Debug, Clone, Default)]
pub struct Fields {
    values: Map<String, Value>,
    errors: Vec<(ErrorKey, ErrorValue)>,
}

impl Fields {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn with_error<E>(mut self, key: ErrorKey, error: &E) -> Self
    where
        E: StdError + ?Sized,
    {
        self.insert_error(key, ErrorValue::new(error));
        self
    }

    /// Inserts a plain value. A later insert under the same key replaces the
    /// earlier one, including a native error stored there.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        let key = key.into();
        if let Some(error_key) = ErrorKey::from_key(&key) {
            self.errors.retain(|(k, _)| *k != error_key);
        }
        self.values.insert(key, value.into());
    }

    pub fn insert_error(&mut self, key: ErrorKey, error: ErrorValue) {
        self.values.remove(key.as_str());
        self.errors.retain(|(k, _)| *k != key);
        self.errors.push((key, error));
    }

    pub fn len(&self) -> usize {
        self.values.len() + self.errors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Flattens into JSON, serializing every native error at its own key.
    /// `err` and `error` are handled independently when both are present.
    pub fn into_map(self) -> Map<String, Value> {
        let mut map = self.values;
        for (key, error) in self.errors {
            map.insert(key.as_str().to_string(), error.serialize().into_value());
        }
        map
    }
}

impl From<Map<String, Value>> for Fields {
    fn from(values: Map<String, Value>) -> Self {
        Self {
            values,
            errors: Vec::new(),
        }
    }
}

/// Objects become fields, `null` becomes no fields, and any other JSON value
/// is kept under `data`.
impl From<Value> for Fields {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => Fields::new(),
            Value::Object(map) => map.into(),
            other => Fields::new().with("data", other),
        }
    }
}

/// The optional second argument of a leveled call: nothing, structured data,
/// or a native error.
#[derive(Debug, Clone, Default)]
pub enum Payload {
    #[default]
    Empty,
    Fields(Fields),
    Error(ErrorValue),
}

impl Payload {
    /// Captures `error` immediately, backtrace included, whether or not the
    /// call it is passed to ends up being emitted.
    pub fn error<E>(error: &E) -> Self
    where
        E: StdError + ?Sized,
    {
        Payload::Error(ErrorValue::new(error))
    }

    /// Normalizes into the fields merged at the top level of a record.
    /// A bare error lands under `err`.
    pub fn into_fields(self) -> Map<String, Value> {
        match self {
            Payload::Empty => Map::new(),
            Payload::Fields(fields) => fields.into_map(),
            Payload::Error(error) => {
                let mut map = Map::new();
                map.insert(ErrorKey::Err.as_str().to_string(), error.serialize().into_value());
                map
            }
        }
    }
}

impl From<Fields> for Payload {
    fn from(fields: Fields) -> Self {
        Payload::Fields(fields)
    }
}

impl From<ErrorValue> for Payload {
    fn from(error: ErrorValue) -> Self {
        Payload::Error(error)
    }
}

impl From<Map<String, Value>> for Payload {
    fn from(map: Map<String, Value>) -> Self {
        Payload::Fields(map.into())
    }
}

impl From<Value> for Payload {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => Payload::Empty,
            other => Payload::Fields(other.into()),
        }
    }
}
