//! Document parsing and world construction.
//!
//! Loading is all-or-nothing: the document is parsed, its keys checked,
//! configuration checked, and every cross-reference resolved before a
//! [`World`] is handed out.

use std::collections::HashMap;

use serde::Deserialize;

use crate::compass::Direction;
use crate::entity::{Exit, INVENTORY_LOCATION, Item, Npc, Room};
use crate::error::{ConfigError, LoadResult, SchemaError};
use crate::event::Event;
use crate::keyed::{Keyed, is_valid_key};
use crate::puzzle::Puzzle;
use crate::state::GameState;
use crate::validate;
use crate::vocabulary::Vocabulary;
use crate::world::{Metadata, World};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Document {
    metadata: Option<Metadata>,
    game_state: Option<GameState>,
    rooms: Option<Keyed<Room>>,
    items: Option<Keyed<Item>>,
    npcs: Option<Keyed<Npc>>,
    puzzles: Option<Keyed<Puzzle>>,
    events: Option<Keyed<Event>>,
    commands: Option<Vocabulary>,
}

/// Entities that may repeat their map key in an `id` field.
trait Declared {
    fn declared_id(&self) -> Option<&str>;
}

macro_rules! declared {
    ($($ty:ty),*) => {
        $(impl Declared for $ty {
            fn declared_id(&self) -> Option<&str> {
                self.id.as_deref()
            }
        })*
    };
}

declared!(Room, Item, Npc, Puzzle, Event);

/// Parse and validate a world document.
///
/// Returns the immutable world and the initial game state built from the
/// document's `gameState` snapshot.
pub fn load(json: &str) -> LoadResult<(World, GameState)> {
    let doc: Document = serde_json::from_str(json)?;

    let metadata = doc
        .metadata
        .ok_or(SchemaError::MissingSection("metadata"))?;
    let snapshot = doc
        .game_state
        .ok_or(SchemaError::MissingSection("gameState"))?;
    let rooms = doc.rooms.ok_or(SchemaError::MissingSection("rooms"))?;
    let items = doc.items.ok_or(SchemaError::MissingSection("items"))?;
    let npcs = doc.npcs.ok_or(SchemaError::MissingSection("npcs"))?;
    let puzzles = doc.puzzles.ok_or(SchemaError::MissingSection("puzzles"))?;
    let events = doc.events.ok_or(SchemaError::MissingSection("events"))?;
    let mut vocabulary = doc
        .commands
        .ok_or(SchemaError::MissingSection("commands"))?;

    let mut rooms = index("rooms", rooms)?;
    for (key, room) in rooms.iter_mut() {
        room.exits = canonical_exits(key, std::mem::take(&mut room.exits))?;
    }
    let items = index("items", items)?;
    let npcs = index("npcs", npcs)?;
    for (key, npc) in &npcs {
        check_dialogue(key, npc)?;
    }
    let puzzles = index("puzzles", puzzles)?;
    let events = index("events", events)?;
    vocabulary.prepare()?;

    let missing = vocabulary.missing_responses();
    if !missing.is_empty() {
        return Err(ConfigError::MissingDefaultResponses(missing).into());
    }
    if let Some(cycle) = vocabulary.alias_cycle() {
        return Err(ConfigError::AliasCycle(cycle).into());
    }
    if let Some(cycle) = validate::puzzle_cycle(&puzzles) {
        return Err(ConfigError::PuzzleCycle(cycle).into());
    }

    let world = World {
        metadata,
        start_room: snapshot.current_room.clone(),
        rooms,
        items,
        npcs,
        puzzles,
        events,
        vocabulary,
    };
    validate::references(&world)?;
    world.validate_state(&snapshot)?;
    let state = initial_state(&world, snapshot);

    tracing::debug!(
        title = %world.metadata.title,
        rooms = world.room_count(),
        items = world.item_count(),
        npcs = world.npc_count(),
        puzzles = world.puzzle_count(),
        events = world.event_count(),
        start = %world.start_room,
        "world loaded"
    );

    Ok((world, state))
}

/// Check key syntax, duplicates and inner ids, then index by key.
fn index<T: Declared>(
    collection: &'static str,
    entries: Keyed<T>,
) -> Result<HashMap<String, T>, SchemaError> {
    if let Some(dup) = entries.first_duplicate() {
        return Err(SchemaError::DuplicateKey {
            collection,
            key: dup.to_string(),
        });
    }
    let mut map = HashMap::with_capacity(entries.len());
    for (key, entity) in entries {
        if !is_valid_key(&key) {
            return Err(SchemaError::InvalidKey { collection, key });
        }
        if let Some(id) = entity.declared_id().filter(|id| *id != key) {
            return Err(SchemaError::IdMismatch {
                collection,
                id: id.to_string(),
                key,
            });
        }
        map.insert(key, entity);
    }
    Ok(map)
}

/// Re-key exits by canonical compass direction.
fn canonical_exits(room: &str, exits: Keyed<Exit>) -> Result<Keyed<Exit>, SchemaError> {
    let mut canonical = Keyed::new();
    for (direction, exit) in exits {
        let dir = Direction::parse(&direction).ok_or_else(|| SchemaError::UnknownDirection {
            room: room.to_string(),
            direction: direction.clone(),
        })?;
        if canonical.contains_key(dir.name()) {
            return Err(SchemaError::DuplicateKey {
                collection: "exits",
                key: format!("{room}:{dir}"),
            });
        }
        canonical.0.push((dir.name().to_string(), exit));
    }
    Ok(canonical)
}

fn check_dialogue(key: &str, npc: &Npc) -> Result<(), SchemaError> {
    if let Some(dup) = npc.dialogue.first_duplicate() {
        return Err(SchemaError::DuplicateKey {
            collection: "dialogue",
            key: format!("{key}.{dup}"),
        });
    }
    for (node_key, node) in npc.dialogue.iter() {
        if let Some(id) = node.id.as_deref().filter(|id| *id != node_key) {
            return Err(SchemaError::IdMismatch {
                collection: "dialogue",
                key: format!("{key}.{node_key}"),
                id: id.to_string(),
            });
        }
    }
    Ok(())
}

/// Fold the world's declared flags into the snapshot.
fn initial_state(world: &World, mut state: GameState) -> GameState {
    let held = std::mem::take(&mut state.inventory);
    for item in held {
        state.add_item(item);
    }

    let mut starting: Vec<&str> = world
        .items()
        .filter(|(_, item)| item.location == INVENTORY_LOCATION)
        .map(|(key, _)| key)
        .collect();
    starting.sort_unstable();
    for item in starting {
        state.add_item(item);
    }

    let mut solved: Vec<&str> = world
        .puzzles()
        .filter(|(_, p)| p.is_solved)
        .map(|(key, _)| key)
        .collect();
    solved.sort_unstable();
    for puzzle in solved {
        state.complete_puzzle(puzzle);
    }

    for (key, event) in world.events() {
        if event.has_triggered {
            state.mark_triggered(key);
        }
    }

    let current = state.current_room.clone();
    state.visit(&current);
    state
}
