use thiserror::Error;

#[derive(Error, Debug)]
pub enum TsplitError {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Dataset is empty")]
    EmptyDataset,

    #[error("Type mismatch: expected {expected}, got {actual}")]
    TypeMismatch { expected: String, actual: String },

    #[error("Invalid frequency: {0}")]
    InvalidFrequency(String),

    #[error(
        "Insufficient data for series {item} window {window}: needs end {required_end}, series has {available}"
    )]
    InsufficientData {
        item: usize,
        window: usize,
        required_end: usize,
        available: usize,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config source error: {0}")]
    ConfigSource(#[from] ::config::ConfigError),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::ser::Error),
}

impl TsplitError {
    pub(crate) fn mismatch(expected: impl Into<String>, actual: impl Into<String>) -> Self {
        Self::TypeMismatch {
            expected: expected.into(),
            actual: actual.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, TsplitError>;
