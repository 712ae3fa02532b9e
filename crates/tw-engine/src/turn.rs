//! Shared machinery of a single turn.

use tw_core::{DefaultResponse, GameState, Item, LockTarget, Npc, Puzzle, Room, Scalar, World};

use crate::config::EngineConfig;
use crate::error::{EngineError, EngineResult};
use crate::outcome::Notice;

/// Variable names that end the game when set.
const VICTORY_VARIABLE: &str = "isVictory";
const GAME_OVER_VARIABLE: &str = "isGameOver";

/// One turn in flight: read-only world, exclusive state, and the notices
/// collected so far.
pub(crate) struct Turn<'a> {
    pub(crate) world: &'a World,
    pub(crate) state: &'a mut GameState,
    pub(crate) config: &'a EngineConfig,
    pub(crate) notices: Vec<Notice>,
}

impl<'a> Turn<'a> {
    pub(crate) fn new(world: &'a World, state: &'a mut GameState, config: &'a EngineConfig) -> Self {
        Self {
            world,
            state,
            config,
            notices: Vec::new(),
        }
    }

    // -----------------------------------------------------------------------
    // Lookups
    // -----------------------------------------------------------------------

    pub(crate) fn room(&self, key: &str) -> EngineResult<&'a Room> {
        self.world
            .room(key)
            .ok_or_else(|| EngineError::missing("room", key))
    }

    pub(crate) fn current_room(&self) -> EngineResult<&'a Room> {
        self.room(&self.state.current_room)
    }

    pub(crate) fn item(&self, key: &str) -> EngineResult<&'a Item> {
        self.world
            .item(key)
            .ok_or_else(|| EngineError::missing("item", key))
    }

    pub(crate) fn npc(&self, key: &str) -> EngineResult<&'a Npc> {
        self.world
            .npc(key)
            .ok_or_else(|| EngineError::missing("npc", key))
    }

    pub(crate) fn puzzle(&self, key: &str) -> EngineResult<&'a Puzzle> {
        self.world
            .puzzle(key)
            .ok_or_else(|| EngineError::missing("puzzle", key))
    }

    pub(crate) fn response(&self, response: DefaultResponse) -> String {
        self.world.vocabulary().response(response).to_string()
    }

    /// Items lying in a room: listed there and never picked up. Hidden items
    /// are included; visibility only governs what a room description lists.
    pub(crate) fn items_here(&self, room: &'a Room) -> EngineResult<Vec<(String, &'a Item)>> {
        let mut found = Vec::new();
        for key in &room.items {
            let item = self.item(key)?;
            if !self.state.is_collected(key) && !self.state.has_item(key) {
                found.push((key.clone(), item));
            }
        }
        Ok(found)
    }

    /// Held items in pickup order.
    pub(crate) fn items_held(&self) -> EngineResult<Vec<(String, &'a Item)>> {
        self.state
            .inventory
            .iter()
            .map(|key| Ok((key.clone(), self.item(key)?)))
            .collect()
    }

    /// Puzzles of a room, hidden ones included.
    pub(crate) fn puzzles_here(&self, room: &'a Room) -> EngineResult<Vec<(&'a str, &'a Puzzle)>> {
        room.puzzles
            .iter()
            .map(|key| Ok((key.as_str(), self.puzzle(key)?)))
            .collect()
    }

    /// Display names of required items the player lacks and required
    /// puzzles not yet solved.
    pub(crate) fn missing(
        &self,
        items: &[String],
        puzzles: &[String],
    ) -> EngineResult<(Vec<&'a str>, Vec<&'a str>)> {
        let mut missing_items = Vec::new();
        for key in items.iter().filter(|i| !self.state.has_item(i)) {
            missing_items.push(self.item(key)?.name.as_str());
        }
        let mut missing_puzzles = Vec::new();
        for key in puzzles.iter().filter(|p| !self.state.has_completed(p)) {
            missing_puzzles.push(self.puzzle(key)?.name.as_str());
        }
        Ok((missing_items, missing_puzzles))
    }

    // -----------------------------------------------------------------------
    // State changes
    // -----------------------------------------------------------------------

    pub(crate) fn enter(&mut self, room: &str) {
        let from = std::mem::replace(&mut self.state.current_room, room.to_string());
        self.state.visit(room);
        self.notices.push(Notice::Moved {
            from,
            to: room.to_string(),
        });
    }

    /// Put an item into the inventory. Returns `false` if it was already held.
    pub(crate) fn give(&mut self, item: &str) -> bool {
        let added = self.state.add_item(item);
        if added {
            self.notices.push(Notice::ItemGained {
                item: item.to_string(),
            });
        }
        added
    }

    /// Remove an item from the inventory. Returns `false` if it was not held.
    pub(crate) fn take_away(&mut self, item: &str) -> bool {
        let removed = self.state.remove_item(item);
        if removed {
            self.notices.push(Notice::ItemLost {
                item: item.to_string(),
            });
        }
        removed
    }

    pub(crate) fn set_lock(&mut self, target: &str, locked: bool) -> EngineResult<()> {
        let lock =
            LockTarget::parse(target).ok_or_else(|| EngineError::missing("lock target", target))?;
        self.state.set_locked(&lock, locked);
        self.notices.push(Notice::LockChanged {
            target: lock.to_string(),
            locked,
        });
        Ok(())
    }

    /// Set a variable. `isVictory` and `isGameOver` set the end flags instead.
    pub(crate) fn assign_variable(&mut self, name: &str, value: Scalar) {
        match name {
            VICTORY_VARIABLE => {
                self.state.is_victory = value.is_truthy();
                if self.state.is_victory {
                    self.notices.push(Notice::Victory);
                }
            }
            GAME_OVER_VARIABLE => {
                self.state.is_game_over = value.is_truthy();
                if self.state.is_game_over {
                    self.notices.push(Notice::GameOver);
                }
            }
            _ => {
                self.state.set_variable(name, value.clone());
                self.notices.push(Notice::VariableChanged {
                    name: name.to_string(),
                    value,
                });
            }
        }
    }

    /// Add to a numeric variable, treating an unset or non-numeric one as zero.
    pub(crate) fn adjust_variable(&mut self, name: &str, delta: f64) {
        let current = self
            .state
            .variable(name)
            .and_then(Scalar::as_number)
            .unwrap_or(0.0);
        self.assign_variable(name, number(current + delta));
    }

    /// Change the life variable. Does nothing if the world never set it.
    pub(crate) fn change_life(&mut self, delta: f64) {
        let name = self.config.life_variable.as_str();
        let Some(current) = self.state.variable(name).and_then(Scalar::as_number) else {
            return;
        };
        let mut updated = current + delta;
        if let Some(max) = self.config.max_life.filter(|_| delta > 0.0) {
            updated = updated.min(max.max(current));
        }
        self.state.set_variable(name, number(updated));
        self.notices.push(Notice::LifeChanged {
            delta: updated - current,
        });
    }
}

/// Store whole numbers as integers.
fn number(value: f64) -> Scalar {
    if value.fract() == 0.0 && value.abs() < i64::MAX as f64 {
        Scalar::Integer(value as i64)
    } else {
        Scalar::Float(value)
    }
}

/// Join non-empty paragraphs with a blank line.
pub(crate) fn paragraphs<'s>(parts: impl IntoIterator<Item = &'s str>) -> String {
    parts
        .into_iter()
        .filter(|p| !p.is_empty())
        .collect::<Vec<_>>()
        .join("\n\n")
}
