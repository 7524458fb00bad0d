use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::types::Faction;

#[derive(Error, Debug)]
pub enum BotError {
    #[error("Invalid bot parameters: {0}")]
    InvalidParameters(String),

    #[error("Unknown faction in game state: {0}")]
    UnknownFaction(Faction),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("Serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, BotError>;

/// Why a candidate generator abstained with a fault instead of a proposal
///
/// Faults are contained by the dispatcher: they are logged and the next
/// candidate is tried.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GeneratorFault {
    #[error("faction {0} is not seated in this game")]
    MissingPlayer(Faction),

    #[error("no battle is in progress")]
    NoBattle,

    #[error("inconsistent state: {0}")]
    Inconsistent(String),
}

/// Category of a rejection reported by the rules engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ValidationErrorKind {
    NotYourTurn,
    IllegalTarget,
    InsufficientResources,
    InsufficientForces,
    Stale,
    Other,
}

/// A rejection returned by the external rules engine
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[error("{kind:?}: {message}")]
pub struct ValidationError {
    pub kind: ValidationErrorKind,
    pub message: String,
}

impl ValidationError {
    pub fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}
