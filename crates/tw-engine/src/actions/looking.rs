use tw_core::{DefaultResponse, GameState, Room, World};

use crate::error::{EngineError, EngineResult};
use crate::parser::{find_by_name, name_matches};
use crate::turn::{Turn, paragraphs};

/// The long description of a room followed by what lies in it.
pub(crate) fn describe_room(world: &World, state: &GameState, room: &Room) -> EngineResult<String> {
    let mut items = Vec::new();
    for key in &room.items {
        let item = world
            .item(key)
            .ok_or_else(|| EngineError::missing("item", key))?;
        if item.is_visible && !state.is_collected(key) && !state.has_item(key) {
            items.push(item.name.as_str());
        }
    }

    let mut npcs = Vec::new();
    for key in &room.npcs {
        let npc = world
            .npc(key)
            .ok_or_else(|| EngineError::missing("npc", key))?;
        if npc.is_alive {
            npcs.push(npc.name.as_str());
        }
    }

    let mut puzzles = Vec::new();
    for key in &room.puzzles {
        let puzzle = world
            .puzzle(key)
            .ok_or_else(|| EngineError::missing("puzzle", key))?;
        if puzzle.is_visible {
            puzzles.push(puzzle.name.as_str());
        }
    }

    let line = |label: &str, names: &[&str]| {
        if names.is_empty() {
            String::new()
        } else {
            format!("{label}: {}", names.join(", "))
        }
    };
    let seen = line("Du siehst", &items);
    let present = line("Hier ist", &npcs);
    let noticed = line("Du bemerkst", &puzzles);
    Ok(paragraphs([
        room.long_text(),
        seen.as_str(),
        present.as_str(),
        noticed.as_str(),
    ]))
}

impl Turn<'_> {
    pub(crate) fn do_look(&mut self, target: Option<&str>) -> EngineResult<String> {
        let room = self.current_room()?;
        let Some(target) = target else {
            return describe_room(self.world, self.state, room);
        };

        let here = self.items_here(room)?;
        let held = self.items_held()?;
        if let Some(item) = here
            .iter()
            .chain(held.iter())
            .map(|(_, item)| *item)
            .find(|item| name_matches(&item.name, target))
        {
            return Ok(item.long_text().to_string());
        }

        let npcs = room
            .npcs
            .iter()
            .filter_map(|key| self.world.npc(key))
            .map(|npc| (npc, npc.name.as_str()));
        if let Some(npc) = find_by_name(npcs, target) {
            return Ok(npc.description.clone());
        }

        let puzzles = self.puzzles_here(room)?;
        if let Some(puzzle) = find_by_name(
            puzzles.iter().map(|(_, p)| (*p, p.name.as_str())),
            target,
        ) {
            return Ok(puzzle.description.clone());
        }

        Ok(self.response(DefaultResponse::ItemNotFound))
    }
}
