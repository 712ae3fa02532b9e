use serde::Serialize;
use tw_core::{Scalar, VerbAction};

/// A state change caused by a turn, for callers that react to more than text.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Notice {
    /// The player changed rooms.
    Moved {
        /// Previous room key.
        from: String,
        /// New room key.
        to: String,
    },
    /// An item entered the inventory.
    ItemGained {
        /// Item key.
        item: String,
    },
    /// An item left the inventory.
    ItemLost {
        /// Item key.
        item: String,
    },
    /// The player started a conversation.
    Conversation {
        /// NPC key.
        npc: String,
    },
    /// An event fired.
    EventFired {
        /// Event key.
        event: String,
    },
    /// A puzzle was solved.
    PuzzleSolved {
        /// Puzzle key.
        puzzle: String,
    },
    /// A game variable was set.
    VariableChanged {
        /// Variable name.
        name: String,
        /// New value.
        value: Scalar,
    },
    /// A room or exit was locked or unlocked.
    LockChanged {
        /// Lock target, `room` or `room:direction`.
        target: String,
        /// New lock flag.
        locked: bool,
    },
    /// The life variable changed.
    LifeChanged {
        /// Signed change actually applied.
        delta: f64,
    },
    /// The player lost.
    GameOver,
    /// The player won.
    Victory,
}

/// The result of one turn.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Outcome {
    /// Text to show the player.
    pub text: String,
    /// State changes in the order they happened.
    pub notices: Vec<Notice>,
    /// The handler that ran, or `None` if the input was not understood.
    pub action: Option<VerbAction>,
}

impl Outcome {
    /// An outcome with text only.
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }

    /// Whether the input was understood.
    pub fn is_recognized(&self) -> bool {
        self.action.is_some()
    }

    /// Whether any notice satisfies the predicate.
    pub fn has(&self, predicate: impl Fn(&Notice) -> bool) -> bool {
        self.notices.iter().any(predicate)
    }
}
