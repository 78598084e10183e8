//! Error types for syntax-decor

use thiserror::Error;

use crate::document::{BlockKey, FragmentKey};

/// Result type alias for decoration operations
pub type Result<T> = std::result::Result<T, DecorError>;

/// Decoration error types
#[derive(Error, Debug)]
pub enum DecorError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{fragment} does not belong to {block}")]
    FragmentNotInBlock {
        fragment: FragmentKey,
        block: BlockKey,
    },

    #[error("Tokens cover {actual} characters but {expected} were tokenized")]
    TokenLengthMismatch { expected: usize, actual: usize },

    #[error("Malformed token tree: {0}")]
    MalformedTokens(#[from] serde_json::Error),

    #[error("Invalid configuration: {0}")]
    Config(#[from] toml::de::Error),

    #[error("Cannot write configuration: {0}")]
    ConfigWrite(#[from] toml::ser::Error),

    #[error("Fragment text must not contain line breaks")]
    LineBreakInFragment,

    #[error("{0}")]
    Message(String),
}
