//! Error types for fizz

use thiserror::Error;

/// The main error type for fizz operations
#[derive(Debug, Error)]
pub enum FizzError {
    #[error("Physics error: {0}")]
    PhysicsError(String),

    #[error("Audio error: {0}")]
    AudioError(String),

    #[error("Preference error: {0}")]
    PrefsError(String),

    #[error("Config error: {0}")]
    ConfigError(String),

    #[error("Unknown sound pack: {0}")]
    UnknownSoundPack(String),

    #[error("Particle not found: {0}")]
    ParticleNotFound(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    TomlParseError(String),

    #[error("TOML serialization error: {0}")]
    TomlSerError(String),
}

/// Result type alias for fizz operations
pub type Result<T> = std::result::Result<T, FizzError>;

impl From<toml::de::Error> for FizzError {
    fn from(err: toml::de::Error) -> Self {
        FizzError::TomlParseError(err.to_string())
    }
}

impl From<toml::ser::Error> for FizzError {
    fn from(err: toml::ser::Error) -> Self {
        FizzError::TomlSerError(err.to_string())
    }
}
