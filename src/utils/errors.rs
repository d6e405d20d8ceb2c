use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    FileError(#[from] io::Error),

    #[error("Failed to parse YAML: {0}")]
    YamlError(#[from] serde_yaml::Error),

    #[error("Invalid wind configuration: {0}")]
    ValidationError(String),
}

#[derive(Error, Debug)]
pub enum WindError {
    #[error("Part metadata missing: {0}")]
    MissingPartMetadata(String),

    #[error("Non-finite {0} in wind force computation")]
    NonFinite(&'static str),
}

#[derive(Error, Debug)]
pub enum TelemetryError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Missing telemetry key: {0}")]
    MissingKey(String),

    #[error("Invalid value for {key}: {value}")]
    InvalidValue { key: String, value: String },
}
