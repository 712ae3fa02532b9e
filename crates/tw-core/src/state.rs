//! The mutable per-playthrough state.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::event::LockTarget;
use crate::value::Scalar;

/// Everything that changes while a world is played.
///
/// The [`World`](crate::World) is shared and read-only; one `GameState`
/// belongs to exactly one playthrough. Field names follow the document's
/// `gameState` section so a state can be written back out and read again.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameState {
    /// Key of the room the player is in.
    pub current_room: String,
    /// Held item keys in pickup order, without duplicates.
    #[serde(default)]
    pub inventory: Vec<String>,
    /// Room keys entered at least once.
    #[serde(default)]
    pub visited_rooms: Vec<String>,
    /// Solved puzzle keys.
    #[serde(default)]
    pub completed_puzzles: Vec<String>,
    /// Free-form variables set by events, items, and rewards.
    #[serde(default)]
    pub game_variables: BTreeMap<String, Scalar>,
    /// Number of time-consuming actions performed so far.
    #[serde(default)]
    pub time_elapsed: u64,
    /// The player lost.
    #[serde(default)]
    pub is_game_over: bool,
    /// The player won.
    #[serde(default)]
    pub is_victory: bool,
    /// Items that have been picked up or handed over; they no longer lie in their room.
    #[serde(default)]
    pub collected_items: BTreeSet<String>,
    /// Events that have fired at least once.
    #[serde(default)]
    pub triggered_events: BTreeSet<String>,
    /// How many hints of each puzzle have been shown.
    #[serde(default)]
    pub revealed_hints: BTreeMap<String, usize>,
    /// Runtime lock changes, keyed by lock target (`room` or `room:direction`).
    #[serde(default)]
    pub lock_overrides: BTreeMap<String, bool>,
}

impl GameState {
    /// Create a fresh state in the given room.
    pub fn new(start_room: impl Into<String>) -> Self {
        let start_room = start_room.into();
        Self {
            visited_rooms: vec![start_room.clone()],
            current_room: start_room,
            inventory: Vec::new(),
            completed_puzzles: Vec::new(),
            game_variables: BTreeMap::new(),
            time_elapsed: 0,
            collected_items: BTreeSet::new(),
            is_game_over: false,
            is_victory: false,
            triggered_events: BTreeSet::new(),
            revealed_hints: BTreeMap::new(),
            lock_overrides: BTreeMap::new(),
        }
    }

    /// Whether the game has ended, either way.
    pub fn is_over(&self) -> bool {
        self.is_game_over || self.is_victory
    }

    /// Check if the player holds an item.
    pub fn has_item(&self, item: &str) -> bool {
        self.inventory.iter().any(|i| i == item)
    }

    /// Add an item to the inventory. Returns `false` if it was already held.
    pub fn add_item(&mut self, item: impl Into<String>) -> bool {
        let item = item.into();
        if self.has_item(&item) {
            return false;
        }
        self.collected_items.insert(item.clone());
        self.inventory.push(item);
        true
    }

    /// Whether an item has left its room.
    pub fn is_collected(&self, item: &str) -> bool {
        self.collected_items.contains(item)
    }

    /// Remove an item from the inventory. Returns `false` if it was not held.
    pub fn remove_item(&mut self, item: &str) -> bool {
        if let Some(pos) = self.inventory.iter().position(|i| i == item) {
            self.inventory.remove(pos);
            true
        } else {
            false
        }
    }

    /// Check if a puzzle has been solved.
    pub fn has_completed(&self, puzzle: &str) -> bool {
        self.completed_puzzles.iter().any(|p| p == puzzle)
    }

    /// Mark a puzzle as solved. Returns `false` if it already was.
    pub fn complete_puzzle(&mut self, puzzle: impl Into<String>) -> bool {
        let puzzle = puzzle.into();
        if self.has_completed(&puzzle) {
            return false;
        }
        self.completed_puzzles.push(puzzle);
        true
    }

    /// Check if a room has been entered.
    pub fn has_visited(&self, room: &str) -> bool {
        self.visited_rooms.iter().any(|r| r == room)
    }

    /// Record a room as visited.
    pub fn visit(&mut self, room: &str) {
        if !self.has_visited(room) {
            self.visited_rooms.push(room.to_string());
        }
    }

    /// Move the player and record the room as visited.
    pub fn enter(&mut self, room: &str) {
        self.current_room = room.to_string();
        self.visit(room);
    }

    /// Get a variable.
    pub fn variable(&self, name: &str) -> Option<&Scalar> {
        self.game_variables.get(name)
    }

    /// Set a variable.
    pub fn set_variable(&mut self, name: impl Into<String>, value: Scalar) {
        self.game_variables.insert(name.into(), value);
    }

    /// Whether an event has fired before.
    pub fn is_triggered(&self, event: &str) -> bool {
        self.triggered_events.contains(event)
    }

    /// Record that an event fired.
    pub fn mark_triggered(&mut self, event: impl Into<String>) {
        self.triggered_events.insert(event.into());
    }

    /// Effective lock flag: the runtime override if any, else the declared flag.
    pub fn is_locked(&self, target: &LockTarget, declared: bool) -> bool {
        self.lock_overrides
            .get(&target.to_string())
            .copied()
            .unwrap_or(declared)
    }

    /// Override a lock flag.
    pub fn set_locked(&mut self, target: &LockTarget, locked: bool) {
        self.lock_overrides.insert(target.to_string(), locked);
    }

    /// Number of hints of a puzzle shown so far.
    pub fn hints_shown(&self, puzzle: &str) -> usize {
        self.revealed_hints.get(puzzle).copied().unwrap_or(0)
    }
}
