//! Play sessions.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::debug;
use tw_core::{Condition, DialogueResponse, GameState, World};
use uuid::Uuid;

use crate::actions::describe_room;
use crate::config::EngineConfig;
use crate::error::{EngineError, EngineResult};
use crate::outcome::Outcome;
use crate::parser::{parse_command, suggest_command};
use crate::save::SaveGame;
use crate::turn::Turn;

const GAME_ENDED: &str = "Das Spiel ist vorbei.";

/// Unique identifier for a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionId(pub Uuid);

impl SessionId {
    /// Generate a new random session ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", &self.0.to_string()[..8])
    }
}

/// What an NPC's start node offers, for a conversational front end.
#[derive(Debug, Clone, PartialEq)]
pub struct DialogueView<'a> {
    /// The NPC's display name.
    pub speaker: &'a str,
    /// What the NPC says.
    pub text: &'a str,
    /// Replies whose requirements currently hold, in document order.
    pub responses: Vec<&'a DialogueResponse>,
}

/// One playthrough of a world.
///
/// The world is shared; the state belongs to this session alone.
#[derive(Debug)]
pub struct Session {
    id: SessionId,
    world: Arc<World>,
    state: GameState,
    config: EngineConfig,
}

impl Session {
    /// Create a session from a world and a validated state.
    pub fn new(world: Arc<World>, state: GameState, config: EngineConfig) -> Self {
        Self::with_id(SessionId::new(), world, state, config)
    }

    pub(crate) fn with_id(
        id: SessionId,
        world: Arc<World>,
        state: GameState,
        config: EngineConfig,
    ) -> Self {
        Self {
            id,
            world,
            state,
            config,
        }
    }

    /// Process one line of player input.
    ///
    /// Unknown or impossible commands are answered with text. An error means
    /// the world broke one of its own invariants and the session cannot go on.
    pub fn execute(&mut self, input: &str) -> EngineResult<Outcome> {
        if self.state.is_over() {
            return Ok(Outcome::text(GAME_ENDED));
        }

        let command = parse_command(self.world.vocabulary(), input);
        debug!(session = %self.id, ?command, "dispatching turn");

        let mut turn = Turn::new(&self.world, &mut self.state, &self.config);
        let text = turn.execute(&command)?;
        Ok(Outcome {
            text,
            notices: turn.notices,
            action: command.action(),
        })
    }

    /// The description of the room the player is in, for the start of play.
    pub fn opening(&self) -> EngineResult<String> {
        let room = self
            .world
            .room(&self.state.current_room)
            .ok_or_else(|| EngineError::missing("room", &self.state.current_room))?;
        describe_room(&self.world, &self.state, room)
    }

    /// The start node of an NPC in the current room, with the replies the
    /// player may choose right now. `None` if the NPC is absent, dead, or
    /// has nothing to say.
    pub fn dialogue(&self, npc: &str) -> Option<DialogueView<'_>> {
        let room = self.world.room(&self.state.current_room)?;
        if !room.npcs.iter().any(|n| n == npc) {
            return None;
        }
        let character = self.world.npc(npc).filter(|c| c.is_alive)?;
        let node = character.start_node()?;
        Some(DialogueView {
            speaker: &character.name,
            text: &node.text,
            responses: node
                .responses
                .iter()
                .filter(|r| Condition::all(&r.requirements, &self.state))
                .collect(),
        })
    }

    /// A close known command for input that was not understood.
    pub fn suggest(&self, input: &str) -> Option<String> {
        suggest_command(self.world.vocabulary(), input)
    }

    /// Snapshot the state for saving.
    pub fn save(&self) -> SaveGame {
        SaveGame::new(self.id, &self.world.metadata.title, self.state.clone())
    }

    /// Get the session ID.
    pub fn id(&self) -> SessionId {
        self.id
    }

    /// Get the shared world.
    pub fn world(&self) -> &Arc<World> {
        &self.world
    }

    /// Get the game state.
    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Key of the room the player is in.
    pub fn current_room(&self) -> &str {
        &self.state.current_room
    }

    /// Held item keys in pickup order.
    pub fn inventory(&self) -> &[String] {
        &self.state.inventory
    }

    /// Whether the player has won.
    pub fn is_victory(&self) -> bool {
        self.state.is_victory
    }

    /// Whether the player has lost.
    pub fn is_game_over(&self) -> bool {
        self.state.is_game_over
    }
}
