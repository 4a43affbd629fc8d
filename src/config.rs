use crate::domain::{ErrorKey, ErrorValue, Fields, Level, LoggerError, Payload};
use clap::{Parser, ValueEnum};
use serde_json::{Map, Value};
use std::io;

/// Level of the single call made by the command-line front end.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum CallLevel {
    Debug,
    Info,
    Warn,
    Error,
    Fatal,
}

impl From<CallLevel> for Level {
    fn from(level: CallLevel) -> Self {
        match level {
            CallLevel::Debug => Level::Debug,
            CallLevel::Info => Level::Info,
            CallLevel::Warn => Level::Warn,
            CallLevel::Error => Level::Error,
            CallLevel::Fatal => Level::Fatal,
        }
    }
}

#[derive(Parser, Debug, Clone)]
#[command(author, version, about = "Emit one structured log record to stdout", long_about = None)]
pub struct Config {
    /// Logger name stamped on the record
    #[arg(long, default_value = "rask-logger")]
    pub name: String,

    /// Effective logger level (debug, info, warn, error, fatal, silent)
    #[arg(long)]
    pub level: Option<String>,

    /// Level taken from the environment, read once at startup
    #[arg(long, env = "LOG_LEVEL", hide = true)]
    pub env_level: Option<String>,

    /// Static field added like a child logger field (key=value, repeatable)
    #[arg(long = "field", value_parser = parse_key_value)]
    pub fields: Vec<(String, String)>,

    /// JSON object merged into the record
    #[arg(long)]
    pub data: Option<String>,

    /// Attach an error with this message under `err`
    #[arg(long)]
    pub error: Option<String>,

    /// tracing filter for the logger's own diagnostics on stderr
    #[arg(long, env = "RASK_LOGGER_DIAGNOSTICS", default_value = "warn")]
    pub diagnostics: String,

    /// Level of the call
    #[arg(value_enum)]
    pub call_level: CallLevel,

    /// Message of the record
    pub message: String,
}

fn parse_key_value(input: &str) -> Result<(String, String), String> {
    match input.split_once('=') {
        Some((key, value)) if !key.trim().is_empty() => {
            Ok((key.trim().to_string(), value.to_string()))
        }
        _ => Err(format!("invalid field '{input}', expected key=value")),
    }
}

impl Config {
    pub fn from_args<I, T>(args: I) -> Result<Self, LoggerError>
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        Self::try_parse_from(args).map_err(|e| LoggerError::Config(e.to_string()))
    }

    pub fn validate(&self) -> Result<(), LoggerError> {
        self.data_fields().map(|_| ())
    }

    /// The `--data` document as fields. Anything but a JSON object is rejected.
    pub fn data_fields(&self) -> Result<Map<String, Value>, LoggerError> {
        let Some(data) = &self.data else {
            return Ok(Map::new());
        };

        match serde_json::from_str::<Value>(data) {
            Ok(Value::Object(map)) => Ok(map),
            Ok(_) => Err(LoggerError::Config(
                "--data must be a JSON object".to_string(),
            )),
            Err(e) => Err(LoggerError::Config(format!("Invalid --data JSON: {e}"))),
        }
    }

    pub fn static_fields(&self) -> Fields {
        self.fields
            .iter()
            .fold(Fields::new(), |fields, (key, value)| fields.with(key.clone(), value.clone()))
    }

    /// Payload for the single call: `--data` fields, with `--error` under `err`.
    pub fn payload(&self) -> Result<Payload, LoggerError> {
        let data = self.data_fields()?;
        let error = self
            .error
            .as_ref()
            .map(|message| ErrorValue::named("Error", &io::Error::other(message.clone())));

        Ok(match error {
            None if data.is_empty() => Payload::Empty,
            None => Payload::from(data),
            Some(error) if data.is_empty() => Payload::Error(error),
            Some(error) => {
                let mut fields = Fields::from(data);
                fields.insert_error(ErrorKey::Err, error);
                Payload::Fields(fields)
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_from_args() {
        let config = Config::from_args([
            "rask-logger",
            "--name",
            "svc",
            "--level",
            "debug",
            "--field",
            "subPackage=child",
            "info",
            "started",
        ])
        .unwrap();

        assert_eq!(config.name, "svc");
        assert_eq!(config.level.as_deref(), Some("debug"));
        assert_eq!(config.call_level, CallLevel::Info);
        assert_eq!(config.message, "started");
        assert_eq!(config.fields, vec![("subPackage".to_string(), "child".to_string())]);
    }

    #[test]
    fn test_invalid_field_is_rejected() {
        assert!(Config::from_args(["rask-logger", "--field", "novalue", "info", "m"]).is_err());
        assert!(parse_key_value("=value").is_err());
        assert_eq!(parse_key_value("a=b=c").unwrap(), ("a".to_string(), "b=c".to_string()));
    }

    #[test]
    fn test_data_must_be_object() {
        let config = Config::from_args(["rask-logger", "--data", "[1,2]", "info", "m"]).unwrap();
        assert!(config.validate().is_err());

        let config =
            Config::from_args(["rask-logger", "--data", "{not json", "info", "m"]).unwrap();
        assert!(config.validate().is_err());

        let config =
            Config::from_args(["rask-logger", "--data", r#"{"port":8080}"#, "info", "m"]).unwrap();
        assert_eq!(config.data_fields().unwrap()["port"], 8080);
    }

    #[test]
    fn test_payload_combines_data_and_error() {
        let config = Config::from_args([
            "rask-logger",
            "--data",
            r#"{"port":8080}"#,
            "--error",
            "bind failed",
            "error",
            "m",
        ])
        .unwrap();

        let fields = config.payload().unwrap().into_fields();
        assert_eq!(fields["port"], 8080);
        assert_eq!(fields["err"]["name"], "Error");
        assert_eq!(fields["err"]["message"], "bind failed");
    }
}
