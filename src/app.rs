//! Command-line front end: emits one record per invocation.

use crate::config::Config;
use crate::diagnostics::init_diagnostics;
use crate::domain::{Level, LoggerError};
use crate::logger::Logger;
use clap::Parser;

/// Builds the logger described by `config` and makes its single call.
///
/// `--field` values are attached through a child logger, the same way a
/// library caller would pre-seed static fields.
pub fn run(config: &Config) -> Result<(), LoggerError> {
    config.validate()?;

    let mut builder = Logger::builder(config.name.clone()).env_level(config.env_level.clone());
    if let Some(level) = &config.level {
        builder = builder.level_name(level.clone());
    }
    let logger = builder.build()?;
    let logger = if config.fields.is_empty() {
        logger
    } else {
        logger.create_child_logger(config.static_fields())
    };

    tracing::debug!(name = %logger.name(), level = %logger.level(), "logger ready");

    let payload = config.payload()?;
    match Level::from(config.call_level) {
        Level::Error => {
            logger.error_with(&config.message, payload);
        }
        Level::Fatal => {
            logger.fatal_with(&config.message, payload);
        }
        level => logger.write(level, &config.message, payload),
    }
    Ok(())
}

pub fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let config = Config::parse();
    init_diagnostics(&config.diagnostics)?;
    run(&config)?;
    Ok(())
}
