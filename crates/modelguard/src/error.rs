use thiserror::Error;
use uuid::Uuid;

#[derive(Error, Debug)]
pub enum GuardError {
    #[error("Unknown lifecycle event: {0}")]
    UnknownEvent(String),

    #[error("Model not found: {0}")]
    ModelNotFound(Uuid),

    #[error("Config error: {0}")]
    Config(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl From<confique::Error> for GuardError {
    fn from(err: confique::Error) -> Self {
        GuardError::Config(err.to_string())
    }
}

impl From<toml::de::Error> for GuardError {
    fn from(err: toml::de::Error) -> Self {
        GuardError::Config(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, GuardError>;
