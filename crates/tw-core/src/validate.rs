//! Cross-reference and cycle validation.
//!
//! Runs after every collection is keyed, so lookups here see the final
//! world. The first unresolved reference rejects the document.

use std::collections::{HashMap, HashSet};

use crate::condition::Condition;
use crate::entity::{EffectKind, INVENTORY_LOCATION, NpcAction, NpcActionKind};
use crate::error::SchemaError;
use crate::event::{EventActionKind, LockTarget, TriggerKind};
use crate::puzzle::{Puzzle, RewardKind};
use crate::state::GameState;
use crate::world::World;

type Check = Result<(), SchemaError>;

/// Find a cycle among puzzle prerequisites.
///
/// Unknown prerequisite keys are skipped; they are reported as dangling
/// references later.
pub fn puzzle_cycle(puzzles: &HashMap<String, Puzzle>) -> Option<Vec<String>> {
    #[derive(Clone, Copy, PartialEq)]
    enum Mark {
        Active,
        Done,
    }

    fn visit(
        key: &str,
        puzzles: &HashMap<String, Puzzle>,
        marks: &mut HashMap<String, Mark>,
        path: &mut Vec<String>,
    ) -> Option<Vec<String>> {
        match marks.get(key) {
            Some(Mark::Done) => return None,
            Some(Mark::Active) => {
                let start = path.iter().position(|k| k == key).unwrap_or(0);
                let mut cycle = path[start..].to_vec();
                cycle.push(key.to_string());
                return Some(cycle);
            }
            None => {}
        }
        let puzzle = puzzles.get(key)?;
        marks.insert(key.to_string(), Mark::Active);
        path.push(key.to_string());
        for required in &puzzle.required_puzzles {
            if let Some(cycle) = visit(required, puzzles, marks, path) {
                return Some(cycle);
            }
        }
        path.pop();
        marks.insert(key.to_string(), Mark::Done);
        None
    }

    let mut keys: Vec<&String> = puzzles.keys().collect();
    keys.sort();
    let mut marks = HashMap::new();
    for key in keys {
        let mut path = Vec::new();
        if let Some(cycle) = visit(key, puzzles, &mut marks, &mut path) {
            return Some(cycle);
        }
    }
    None
}

/// Check every cross-reference of a world.
pub fn references(world: &World) -> Check {
    rooms(world)?;
    items(world)?;
    npcs(world)?;
    puzzles(world)?;
    events(world)?;
    aliases(world)?;
    Ok(())
}

impl World {
    /// Check that a game state only refers to things this world contains.
    ///
    /// Used for the initial snapshot and when resuming a saved game.
    pub fn validate_state(&self, state: &GameState) -> Check {
        let owner = "gameState";
        self.require_room(owner, "currentRoom", &state.current_room)?;
        for item in &state.inventory {
            self.require_item(owner, "inventory", item)?;
        }
        for item in &state.collected_items {
            self.require_item(owner, "collectedItems", item)?;
        }
        for room in &state.visited_rooms {
            self.require_room(owner, "visitedRooms", room)?;
        }
        for puzzle in &state.completed_puzzles {
            self.require_puzzle(owner, "completedPuzzles", puzzle)?;
        }
        for puzzle in state.revealed_hints.keys() {
            self.require_puzzle(owner, "revealedHints", puzzle)?;
        }
        for event in &state.triggered_events {
            if !self.events.contains_key(event) {
                return Err(dangling(owner, "triggeredEvents", event));
            }
        }
        for target in state.lock_overrides.keys() {
            self.require_lock_target(owner, target)?;
        }
        Ok(())
    }

    fn require_room(&self, owner: &str, field: &'static str, key: &str) -> Check {
        if self.rooms.contains_key(key) {
            Ok(())
        } else {
            Err(dangling(owner, field, key))
        }
    }

    fn require_item(&self, owner: &str, field: &'static str, key: &str) -> Check {
        if self.items.contains_key(key) {
            Ok(())
        } else {
            Err(dangling(owner, field, key))
        }
    }

    fn require_npc(&self, owner: &str, field: &'static str, key: &str) -> Check {
        if self.npcs.contains_key(key) {
            Ok(())
        } else {
            Err(dangling(owner, field, key))
        }
    }

    fn require_puzzle(&self, owner: &str, field: &'static str, key: &str) -> Check {
        if self.puzzles.contains_key(key) {
            Ok(())
        } else {
            Err(dangling(owner, field, key))
        }
    }

    /// `room` must exist; `room:direction` must name an existing exit.
    fn require_lock_target(&self, owner: &str, raw: &str) -> Check {
        let invalid = || SchemaError::InvalidLockTarget {
            owner: owner.to_string(),
            target: raw.to_string(),
        };
        let target = LockTarget::parse(raw).ok_or_else(invalid)?;
        let room = self
            .rooms
            .get(target.room())
            .ok_or_else(|| dangling(owner, "lock target", target.room()))?;
        match &target {
            LockTarget::Exit { direction, .. } if !room.exits.contains_key(direction) => {
                Err(invalid())
            }
            _ => Ok(()),
        }
    }

    fn require_conditions(&self, owner: &str, conditions: &[Condition]) -> Check {
        for condition in conditions {
            match condition.reference() {
                Some(("items", key)) => self.require_item(owner, "condition", key)?,
                Some(("puzzles", key)) => self.require_puzzle(owner, "condition", key)?,
                Some(("rooms", key)) => self.require_room(owner, "condition", key)?,
                _ => {}
            }
        }
        Ok(())
    }

    fn require_npc_action(&self, owner: &str, action: &NpcAction) -> Check {
        match action.kind {
            NpcActionKind::GiveItem | NpcActionKind::TakeItem => {
                self.require_item(owner, "target", &action.target)
            }
            NpcActionKind::UnlockRoom => self.require_lock_target(owner, &action.target),
            NpcActionKind::UnlockPuzzle => self.require_puzzle(owner, "target", &action.target),
            NpcActionKind::Teleport => self.require_room(owner, "target", &action.target),
            NpcActionKind::SetVariable => require_text(owner, "target", &action.target),
            NpcActionKind::Attack => Ok(()),
        }
    }
}

fn dangling(owner: &str, field: &'static str, target: &str) -> SchemaError {
    SchemaError::DanglingReference {
        owner: owner.to_string(),
        field,
        target: target.to_string(),
    }
}

fn require_text(owner: &str, field: &'static str, value: &str) -> Check {
    if value.trim().is_empty() {
        Err(SchemaError::MissingField {
            owner: owner.to_string(),
            field,
        })
    } else {
        Ok(())
    }
}

/// Sorted keys, so the first reported error does not depend on hash order.
fn sorted<V>(map: &HashMap<String, V>) -> Vec<(&String, &V)> {
    let mut entries: Vec<_> = map.iter().collect();
    entries.sort_by(|a, b| a.0.cmp(b.0));
    entries
}

fn rooms(world: &World) -> Check {
    for (key, room) in sorted(&world.rooms) {
        let owner = format!("room \"{key}\"");
        for (direction, exit) in room.exits.iter() {
            let exit_owner = format!("exit \"{key}:{direction}\"");
            world.require_room(&exit_owner, "targetRoom", &exit.target_room)?;
            for item in &exit.required_items {
                world.require_item(&exit_owner, "requiredItems", item)?;
            }
            for puzzle in &exit.required_puzzles {
                world.require_puzzle(&exit_owner, "requiredPuzzles", puzzle)?;
            }
        }
        for item in &room.items {
            world.require_item(&owner, "items", item)?;
        }
        for npc in &room.npcs {
            world.require_npc(&owner, "npcs", npc)?;
        }
        for puzzle in &room.puzzles {
            world.require_puzzle(&owner, "puzzles", puzzle)?;
        }
        for event in &room.events {
            if !world.events.contains_key(event) {
                return Err(dangling(&owner, "events", event));
            }
        }
        for item in &room.required_items {
            world.require_item(&owner, "requiredItems", item)?;
        }
        for puzzle in &room.required_puzzles {
            world.require_puzzle(&owner, "requiredPuzzles", puzzle)?;
        }
    }
    Ok(())
}

fn items(world: &World) -> Check {
    for (key, item) in sorted(&world.items) {
        let owner = format!("item \"{key}\"");
        if !item.location.is_empty() && item.location != INVENTORY_LOCATION {
            world.require_room(&owner, "location", &item.location)?;
        }
        for effect in &item.effects {
            let target = effect.target.as_deref().unwrap_or("");
            match effect.kind {
                EffectKind::Teleport => {
                    require_text(&owner, "effect target", target)?;
                    world.require_room(&owner, "effect target", target)?;
                }
                EffectKind::Unlock => {
                    require_text(&owner, "effect target", target)?;
                    world.require_lock_target(&owner, target)?;
                }
                EffectKind::Buff | EffectKind::Debuff => {
                    require_text(&owner, "effect target", target)?;
                }
                EffectKind::Heal | EffectKind::Damage => {}
            }
        }
        for combination in &item.combinations {
            world.require_item(&owner, "withItem", &combination.with_item)?;
            world.require_item(&owner, "result", &combination.result)?;
        }
    }
    Ok(())
}

fn npcs(world: &World) -> Check {
    for (key, npc) in sorted(&world.npcs) {
        let owner = format!("npc \"{key}\"");
        if !npc.location.is_empty() {
            world.require_room(&owner, "location", &npc.location)?;
        }
        if !npc.dialogue.is_empty() && npc.start_node().is_none() {
            return Err(SchemaError::MissingStartNode(key.clone()));
        }
        for (node_key, node) in npc.dialogue.iter() {
            let node_owner = format!("npc \"{key}\" dialogue \"{node_key}\"");
            world.require_conditions(&node_owner, &node.conditions)?;
            for response in &node.responses {
                if !response.next_node.is_empty() && !npc.dialogue.contains_key(&response.next_node)
                {
                    return Err(dangling(&node_owner, "nextNode", &response.next_node));
                }
                world.require_conditions(&node_owner, &response.requirements)?;
                for action in &response.effects {
                    world.require_npc_action(&node_owner, action)?;
                }
            }
        }
        for action in &npc.reactions {
            world.require_npc_action(&owner, action)?;
        }
    }
    Ok(())
}

fn puzzles(world: &World) -> Check {
    for (key, puzzle) in sorted(&world.puzzles) {
        let owner = format!("puzzle \"{key}\"");
        if !puzzle.location.is_empty() {
            world.require_room(&owner, "location", &puzzle.location)?;
        }
        for item in &puzzle.required_items {
            world.require_item(&owner, "requiredItems", item)?;
        }
        for required in &puzzle.required_puzzles {
            world.require_puzzle(&owner, "requiredPuzzles", required)?;
        }
        if let Some(reward) = &puzzle.reward {
            let target = reward.key();
            match reward.kind {
                RewardKind::Item => world.require_item(&owner, "reward", &target)?,
                RewardKind::Unlock => world.require_lock_target(&owner, &target)?,
                RewardKind::Teleport => world.require_room(&owner, "reward", &target)?,
                RewardKind::Variable => {
                    if reward.variable().is_none() {
                        return Err(SchemaError::MissingField {
                            owner,
                            field: "reward variable name",
                        });
                    }
                }
            }
        }
    }
    Ok(())
}

fn events(world: &World) -> Check {
    for (key, event) in sorted(&world.events) {
        let owner = format!("event \"{key}\"");
        let target = event.trigger.target.as_str();
        match event.trigger.kind {
            TriggerKind::EnterRoom => world.require_room(&owner, "trigger", target)?,
            TriggerKind::PickupItem | TriggerKind::UseItem => {
                world.require_item(&owner, "trigger", target)?
            }
            TriggerKind::SolvePuzzle => world.require_puzzle(&owner, "trigger", target)?,
            TriggerKind::TalkNpc => world.require_npc(&owner, "trigger", target)?,
            TriggerKind::TimeElapsed => {
                if target.trim().parse::<u64>().is_err() {
                    return Err(SchemaError::Malformed(format!(
                        "{owner}: time_elapsed trigger needs a turn count, got \"{target}\""
                    )));
                }
            }
            TriggerKind::VariableChange => require_text(&owner, "trigger target", target)?,
        }

        for action in &event.actions {
            let target = action.target.as_str();
            match action.kind {
                EventActionKind::Message => {
                    if action.message.as_deref().is_none_or(|m| m.trim().is_empty()) {
                        return Err(SchemaError::MissingField {
                            owner,
                            field: "message",
                        });
                    }
                }
                EventActionKind::Teleport => world.require_room(&owner, "action target", target)?,
                EventActionKind::GiveItem | EventActionKind::TakeItem => {
                    world.require_item(&owner, "action target", target)?
                }
                EventActionKind::Lock | EventActionKind::Unlock => {
                    world.require_lock_target(&owner, target)?
                }
                EventActionKind::SetVariable => require_text(&owner, "action target", target)?,
                EventActionKind::Damage | EventActionKind::Heal => {
                    if action.value.as_ref().and_then(|v| v.as_number()).is_none() {
                        return Err(SchemaError::MissingField {
                            owner,
                            field: "numeric value",
                        });
                    }
                }
            }
        }

        world.require_conditions(&owner, &event.conditions)?;
    }
    Ok(())
}

fn aliases(world: &World) -> Check {
    let verbs: HashSet<&str> = world.vocabulary.verbs().map(|(name, _)| name).collect();
    for (alias, target) in world.vocabulary.aliases() {
        let verb = target.split(' ').next().unwrap_or(target);
        if !verbs.contains(verb) {
            return Err(dangling(&format!("alias \"{alias}\""), "target", verb));
        }
    }
    Ok(())
}
