//! Engine configuration.

use serde::Deserialize;

/// Tunables of a play session.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Game variable holding the player's life points.
    pub life_variable: String,
    /// Upper bound for healing. `None` heals without limit.
    pub max_life: Option<f64>,
    /// Whether recognized commands advance the turn counter.
    pub advance_time: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            life_variable: "leben".to_string(),
            max_life: None,
            advance_time: true,
        }
    }
}

impl EngineConfig {
    /// Set the life variable name.
    pub fn with_life_variable(mut self, name: impl Into<String>) -> Self {
        self.life_variable = name.into();
        self
    }

    /// Set the healing cap.
    pub fn with_max_life(mut self, max: f64) -> Self {
        self.max_life = Some(max);
        self
    }

    /// Enable or disable the turn counter.
    pub fn with_advance_time(mut self, advance: bool) -> Self {
        self.advance_time = advance;
        self
    }
}
