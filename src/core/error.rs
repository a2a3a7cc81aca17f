use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScoreError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),

    #[error("Config parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    #[error("Failed to persist {key}: {source}")]
    PersistenceWriteFailed {
        key: String,
        #[source]
        source: Box<ScoreError>,
    },

    #[error("A score engine is already installed")]
    EngineAlreadyInstalled,
}

pub type Result<T> = std::result::Result<T, ScoreError>;
