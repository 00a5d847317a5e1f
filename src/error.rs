use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("missing required configuration: {key} is not set")]
    MissingRequiredConfig { key: String },

    #[error("invalid value {value:?} for {key}: {reason}")]
    InvalidConfigValue {
        key: String,
        value: String,
        reason: String,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Manifest error: {0}")]
    Manifest(String),

    #[error("Synthesis error: {0}")]
    Synth(String),
}

impl Error {
    pub fn missing(key: impl Into<String>) -> Self {
        Error::MissingRequiredConfig { key: key.into() }
    }

    /// Name of the configuration key this error refers to, if any.
    pub fn config_key(&self) -> Option<&str> {
        match self {
            Error::MissingRequiredConfig { key } | Error::InvalidConfigValue { key, .. } => {
                Some(key.as_str())
            }
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
