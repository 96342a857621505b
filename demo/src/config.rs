use std::env;

use logger::{ConfigError, LoggingConfig};

/// Logging settings read from the environment (and `.env`, if present).
///
/// LOG_CONSOLE   1/true/yes/on to print to stdout (default on)
/// LOG_LEVEL     console threshold, a level name such as `debug` (default `info`)
/// LOG_FORMAT    `default`, `compact` or `verbose`
/// LOG_DEFERRED  start with deferred delivery on
#[derive(Default)]
pub struct Config {
    pub logging: LoggingConfig,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut logging = LoggingConfig::default();

        if let Ok(value) = env::var("LOG_CONSOLE") {
            logging.console_enabled = parse_flag(&value);
        }
        if let Ok(value) = env::var("LOG_LEVEL") {
            logging.console_threshold = value.trim().parse()?;
        }
        if let Ok(value) = env::var("LOG_FORMAT") {
            logging.formatter = value.trim().parse()?;
        }
        if let Ok(value) = env::var("LOG_DEFERRED") {
            logging.deferred_delivery = parse_flag(&value);
        }

        Ok(Self { logging })
    }
}

fn parse_flag(value: &str) -> bool {
    matches!(value.trim().to_lowercase().as_str(), "1" | "true" | "yes" | "on")
}
