use crate::types::{Region, SubstitutionKind};
use std::path::PathBuf;
use thiserror::Error;

/// The pipeline was asked to run in a state it cannot run in.
///
/// Raised before any event is emitted for the block (or document) in question.
#[derive(Debug, Error)]
pub enum ConfigurationError {
    #[error("no handler bound; call set_handler() before parsing")]
    NoHandler,

    #[error("rule set is empty")]
    EmptyRuleSet,

    #[error("rule set must end with a catch-all rule, but ends with {0}")]
    MissingCatchAll(Region),

    #[error("no rule claimed block: {0:?}")]
    Unclassified(String),
}

#[derive(Debug, Error)]
pub enum MarkupError {
    #[error("configuration error: {0}")]
    Configuration(#[from] ConfigurationError),

    #[error("invalid {kind} filter pattern: {source}")]
    Pattern {
        kind: SubstitutionKind,
        source: regex::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to read config file at {config_path}: {source}")]
    ConfigRead {
        config_path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {config_path}: {source}")]
    ConfigParse {
        config_path: PathBuf,
        source: serde_yaml::Error,
    },
}

impl MarkupError {
    pub fn is_configuration(&self) -> bool {
        matches!(self, MarkupError::Configuration(_))
    }
}

pub type Result<T> = std::result::Result<T, MarkupError>;
