use thiserror::Error;

#[derive(Error, Debug)]
pub enum MinutesError {
    #[error("{identity}: missing required field '{field}'")]
    MissingField { identity: String, field: &'static str },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Front matter error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Walk error: {0}")]
    Walk(#[from] walkdir::Error),

    #[error("Config error: {0}")]
    Config(#[from] confique::Error),

    #[error("Store error: {0}")]
    Store(String),
}

impl MinutesError {
    pub fn missing(identity: &str, field: &'static str) -> Self {
        MinutesError::MissingField {
            identity: identity.to_string(),
            field,
        }
    }
}

pub type Result<T> = std::result::Result<T, MinutesError>;
