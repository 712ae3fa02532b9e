use std::fmt;

use serde::Deserialize;

use crate::compass::Direction;
use crate::condition::Condition;
use crate::state::GameState;
use crate::value::Scalar;

/// The moment an event can fire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TriggerKind {
    /// The player entered a room. Target: room key.
    #[serde(alias = "enterRoom")]
    EnterRoom,
    /// The player picked up an item. Target: item key.
    #[serde(alias = "pickupItem")]
    PickupItem,
    /// The player used an item. Target: item key.
    #[serde(alias = "useItem")]
    UseItem,
    /// The player solved a puzzle. Target: puzzle key.
    #[serde(alias = "solvePuzzle")]
    SolvePuzzle,
    /// The player talked to an NPC. Target: NPC key.
    #[serde(alias = "talkNpc")]
    TalkNpc,
    /// The turn counter reached a value. Target: the turn count.
    #[serde(alias = "timeElapsed")]
    TimeElapsed,
    /// A game variable changed. Target: variable name.
    #[serde(alias = "variableChange")]
    VariableChange,
}

impl TriggerKind {
    /// The document spelling of this trigger kind.
    pub fn name(&self) -> &'static str {
        match self {
            Self::EnterRoom => "enter_room",
            Self::PickupItem => "pickup_item",
            Self::UseItem => "use_item",
            Self::SolvePuzzle => "solve_puzzle",
            Self::TalkNpc => "talk_npc",
            Self::TimeElapsed => "time_elapsed",
            Self::VariableChange => "variable_change",
        }
    }
}

impl fmt::Display for TriggerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// What an event reacts to.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Trigger {
    /// Trigger kind.
    #[serde(rename = "type")]
    pub kind: TriggerKind,
    /// Key the trigger is bound to.
    pub target: String,
    /// For `variable_change`: only fire when the variable now has this value.
    #[serde(default)]
    pub value: Option<Scalar>,
}

impl Trigger {
    /// Whether a fired `(kind, target)` pair matches this trigger in the given state.
    pub fn matches(&self, kind: TriggerKind, target: &str, state: &GameState) -> bool {
        if self.kind != kind || self.target != target {
            return false;
        }
        match (&self.value, kind) {
            (Some(expected), TriggerKind::VariableChange) => state
                .variable(target)
                .is_some_and(|v| v.loosely_equals(expected)),
            _ => true,
        }
    }
}

/// The kind of an event action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventActionKind {
    /// Append `message` to the output.
    Message,
    /// Move the player to room `target`.
    Teleport,
    /// Put item `target` into the inventory.
    #[serde(alias = "giveItem")]
    GiveItem,
    /// Remove item `target` from the inventory.
    #[serde(alias = "takeItem")]
    TakeItem,
    /// Clear the lock flag of lock target `target`.
    Unlock,
    /// Set the lock flag of lock target `target`.
    Lock,
    /// Set variable `target` to `value`.
    #[serde(alias = "setVariable")]
    SetVariable,
    /// Lower the life variable by `value`.
    Damage,
    /// Raise the life variable by `value`.
    Heal,
}

/// One step of an event.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct EventAction {
    /// Action kind.
    #[serde(rename = "type")]
    pub kind: EventActionKind,
    /// Key or lock target the action applies to.
    #[serde(default)]
    pub target: String,
    /// Parameter of the action.
    #[serde(default)]
    pub value: Option<Scalar>,
    /// Text appended to the output when the action runs.
    #[serde(default)]
    pub message: Option<String>,
}

/// A room-scoped event.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    /// Optional inner id; must equal the map key if present.
    #[serde(default)]
    pub id: Option<String>,
    /// Display name.
    #[serde(default)]
    pub name: String,
    /// Author's description. Never shown to the player.
    #[serde(default)]
    pub description: String,
    /// What the event reacts to.
    pub trigger: Trigger,
    /// Actions applied in order when the event fires.
    #[serde(default)]
    pub actions: Vec<EventAction>,
    /// Fire at most once per playthrough.
    #[serde(default = "default_one_time")]
    pub is_one_time: bool,
    /// Already fired in the initial snapshot.
    #[serde(default)]
    pub has_triggered: bool,
    /// Preconditions, all of which must hold.
    #[serde(default)]
    pub conditions: Vec<Condition>,
}

fn default_one_time() -> bool {
    true
}

/// Something that can be locked: a whole room or one exit of a room.
///
/// Written in documents as `room` or `room:direction`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum LockTarget {
    /// A room's own lock flag.
    Room(String),
    /// The exit of `room` in canonical `direction`.
    Exit {
        /// Room owning the exit.
        room: String,
        /// Canonical direction name.
        direction: String,
    },
}

impl LockTarget {
    /// Parse `room` or `room:direction`. Direction synonyms are canonicalized.
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        match s.split_once(':') {
            Some((room, direction)) => {
                let direction = Direction::parse(direction)?;
                let room = room.trim();
                if room.is_empty() {
                    return None;
                }
                Some(Self::Exit {
                    room: room.to_string(),
                    direction: direction.name().to_string(),
                })
            }
            None if !s.is_empty() => Some(Self::Room(s.to_string())),
            None => None,
        }
    }

    /// The room this target belongs to.
    pub fn room(&self) -> &str {
        match self {
            Self::Room(room) | Self::Exit { room, .. } => room,
        }
    }
}

impl fmt::Display for LockTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Room(room) => f.write_str(room),
            Self::Exit { room, direction } => write!(f, "{room}:{direction}"),
        }
    }
}
