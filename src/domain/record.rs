use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

pub const NAME_FIELD: &str = "name";
pub const HOSTNAME_FIELD: &str = "hostname";
pub const PID_FIELD: &str = "pid";
pub const LEVEL_FIELD: &str = "level";
pub const LOG_LEVEL_FIELD: &str = "logLevel";
pub const MSG_FIELD: &str = "msg";
pub const TIME_FIELD: &str = "time";

/// Fields the engine stamps itself.
pub const ENGINE_FIELDS: [&str; 6] = [
    NAME_FIELD,
    HOSTNAME_FIELD,
    PID_FIELD,
    LEVEL_FIELD,
    MSG_FIELD,
    TIME_FIELD,
];

/// Fields present on every record. Payload keys never override these.
pub const STANDARD_FIELDS: [&str; 7] = [
    NAME_FIELD,
    HOSTNAME_FIELD,
    PID_FIELD,
    LEVEL_FIELD,
    LOG_LEVEL_FIELD,
    MSG_FIELD,
    TIME_FIELD,
];

/// Wire shape of a native error inside a record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SerializedError {
    pub name: String,
    pub message: String,
    pub stack: String,
}

impl SerializedError {
    pub fn into_value(self) -> Value {
        let mut map = Map::new();
        map.insert("name".to_string(), Value::String(self.name));
        map.insert("message".to_string(), Value::String(self.message));
        map.insert("stack".to_string(), Value::String(self.stack));
        Value::Object(map)
    }
}

/// One emitted log record, handed to a sink as structured data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LogRecord(Map<String, Value>);

impl LogRecord {
    pub fn new(fields: Map<String, Value>) -> Self {
        Self(fields)
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn name(&self) -> Option<&str> {
        self.get(NAME_FIELD).and_then(Value::as_str)
    }

    pub fn msg(&self) -> Option<&str> {
        self.get(MSG_FIELD).and_then(Value::as_str)
    }

    pub fn level(&self) -> Option<u64> {
        self.get(LEVEL_FIELD).and_then(Value::as_u64)
    }

    pub fn log_level(&self) -> Option<&str> {
        self.get(LOG_LEVEL_FIELD).and_then(Value::as_str)
    }

    pub fn fields(&self) -> &Map<String, Value> {
        &self.0
    }

    pub fn into_value(self) -> Value {
        Value::Object(self.0)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(&self.0)
    }
}
