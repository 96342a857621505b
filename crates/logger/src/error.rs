use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Unknown log level: {0}")]
    UnknownLevel(String),

    #[error("Unknown formatter preset: {0}")]
    UnknownFormatter(String),
}
