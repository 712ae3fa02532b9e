//! Error types for the engine.

use thiserror::Error;
use tw_core::LoadError;

/// Result type for engine operations.
pub type EngineResult<T> = Result<T, EngineError>;

/// Errors that can occur while running an adventure.
///
/// Player input never produces an error; unmatched or disallowed commands
/// are answered with text. These are load failures and broken invariants.
#[derive(Debug, Error)]
pub enum EngineError {
    /// A key that passed validation is missing from the world.
    #[error("internal error: {kind} \"{key}\" is missing from the world")]
    Internal {
        /// The collection that was searched.
        kind: &'static str,
        /// The missing key.
        key: String,
    },

    /// The world document or a saved state was rejected.
    #[error(transparent)]
    Load(#[from] LoadError),

    /// A save game could not be read or written.
    #[error("save game error: {0}")]
    Snapshot(#[from] serde_json::Error),
}

impl EngineError {
    pub(crate) fn missing(kind: &'static str, key: &str) -> Self {
        Self::Internal {
            kind,
            key: key.to_string(),
        }
    }
}
