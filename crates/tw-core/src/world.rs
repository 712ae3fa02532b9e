use std::collections::HashMap;

use serde::Deserialize;

use crate::entity::{Exit, Item, Npc, Room};
use crate::event::Event;
use crate::puzzle::Puzzle;
use crate::vocabulary::Vocabulary;

/// Generation settings recorded in the document.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    /// Scenario prompt.
    pub scenario: String,
    /// Requested world size.
    pub rooms: String,
    /// Whether time matters in this world.
    pub time_system: bool,
    /// Whether a life value of zero or less ends the game.
    pub player_can_die: bool,
    /// Whether inventory puzzles were requested.
    pub inventory_puzzles: bool,
    /// Whether NPCs were requested.
    pub npcs: bool,
    /// Narrative style.
    pub style: String,
}

/// Metadata about the world itself.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Metadata {
    /// Title of the adventure.
    pub title: String,
    /// Blurb.
    pub description: String,
    /// Author.
    pub author: String,
    /// Document version.
    pub version: String,
    /// Generation seed.
    pub seed: String,
    /// Difficulty label.
    pub difficulty: String,
    /// Creation timestamp as written by the generator.
    pub created_at: String,
    /// Generation settings.
    pub settings: Settings,
}

/// The immutable world model.
///
/// Built once by [`load`](crate::load) and never mutated afterwards, so one
/// `World` can be shared by any number of playthroughs.
#[derive(Debug, Clone)]
pub struct World {
    /// Document metadata.
    pub metadata: Metadata,
    pub(crate) start_room: String,
    pub(crate) rooms: HashMap<String, Room>,
    pub(crate) items: HashMap<String, Item>,
    pub(crate) npcs: HashMap<String, Npc>,
    pub(crate) puzzles: HashMap<String, Puzzle>,
    pub(crate) events: HashMap<String, Event>,
    pub(crate) vocabulary: Vocabulary,
}

impl World {
    // -----------------------------------------------------------------------
    // Lookups
    // -----------------------------------------------------------------------

    /// Key of the room the initial snapshot starts in.
    pub fn start_room(&self) -> &str {
        &self.start_room
    }

    /// Get a room by key.
    pub fn room(&self, key: &str) -> Option<&Room> {
        self.rooms.get(key)
    }

    /// Get an item by key.
    pub fn item(&self, key: &str) -> Option<&Item> {
        self.items.get(key)
    }

    /// Get an NPC by key.
    pub fn npc(&self, key: &str) -> Option<&Npc> {
        self.npcs.get(key)
    }

    /// Get a puzzle by key.
    pub fn puzzle(&self, key: &str) -> Option<&Puzzle> {
        self.puzzles.get(key)
    }

    /// Get an event by key.
    pub fn event(&self, key: &str) -> Option<&Event> {
        self.events.get(key)
    }

    /// Get the exit of a room in a canonical direction.
    pub fn exit(&self, room: &str, direction: &str) -> Option<&Exit> {
        self.rooms.get(room)?.exits.get(direction)
    }

    /// The command vocabulary.
    pub fn vocabulary(&self) -> &Vocabulary {
        &self.vocabulary
    }

    // -----------------------------------------------------------------------
    // Iteration
    // -----------------------------------------------------------------------

    /// All rooms, in no particular order.
    pub fn rooms(&self) -> impl Iterator<Item = (&str, &Room)> {
        self.rooms.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// All items, in no particular order.
    pub fn items(&self) -> impl Iterator<Item = (&str, &Item)> {
        self.items.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// All NPCs, in no particular order.
    pub fn npcs(&self) -> impl Iterator<Item = (&str, &Npc)> {
        self.npcs.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// All puzzles, in no particular order.
    pub fn puzzles(&self) -> impl Iterator<Item = (&str, &Puzzle)> {
        self.puzzles.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// All events, in no particular order.
    pub fn events(&self) -> impl Iterator<Item = (&str, &Event)> {
        self.events.iter().map(|(k, v)| (k.as_str(), v))
    }

    // -----------------------------------------------------------------------
    // Stats
    // -----------------------------------------------------------------------

    /// Number of rooms.
    pub fn room_count(&self) -> usize {
        self.rooms.len()
    }

    /// Number of items.
    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    /// Number of NPCs.
    pub fn npc_count(&self) -> usize {
        self.npcs.len()
    }

    /// Number of puzzles.
    pub fn puzzle_count(&self) -> usize {
        self.puzzles.len()
    }

    /// Number of events.
    pub fn event_count(&self) -> usize {
        self.events.len()
    }

    /// Number of exits across all rooms.
    pub fn exit_count(&self) -> usize {
        self.rooms.values().map(|r| r.exits.len()).sum()
    }
}
