//! Save games.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tw_core::GameState;

use crate::error::EngineResult;
use crate::session::SessionId;

/// A game state with enough context to resume it later.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveGame {
    /// Session the state was taken from.
    pub session_id: SessionId,
    /// When the state was saved.
    pub saved_at: DateTime<Utc>,
    /// Title of the world it belongs to.
    pub title: String,
    /// The state itself.
    pub state: GameState,
}

impl SaveGame {
    /// Wrap a state, stamped with the current time.
    pub fn new(session_id: SessionId, title: &str, state: GameState) -> Self {
        Self {
            session_id,
            saved_at: Utc::now(),
            title: title.to_string(),
            state,
        }
    }

    /// Serialize to pretty JSON.
    pub fn to_json(&self) -> EngineResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Parse from JSON. References are checked when the save is resumed.
    pub fn from_json(json: &str) -> EngineResult<Self> {
        Ok(serde_json::from_str(json)?)
    }
}
