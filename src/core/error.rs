use thiserror::Error;

use crate::core::types::LocationId;

#[derive(Error, Debug)]
pub enum DamageError {
    #[error("Hit location not found on character: {0}")]
    LocationNotFound(LocationId),

    #[error("Character has no hit location named {0:?}")]
    LocationNameNotFound(String),

    #[error("Wound {index} not found on hit location {location} ({count} wounds)")]
    WoundNotFound {
        location: LocationId,
        index: usize,
        count: usize,
    },

    #[error("Invalid dice formula {0:?}")]
    InvalidDice(String),

    #[error("Unknown {kind} {name:?}")]
    UnknownName { kind: &'static str, name: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("TOML write error: {0}")]
    TomlWriteError(#[from] toml::ser::Error),

    #[error("Serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, DamageError>;
