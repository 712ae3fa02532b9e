use tracing::info;
use tw_core::{DefaultResponse, Puzzle, Reward, RewardKind, TriggerKind};

use super::movement::requirements;
use crate::error::EngineResult;
use crate::outcome::Notice;
use crate::parser::find_by_name;
use crate::turn::{Turn, paragraphs};

const PROMPT_SOLVE: &str = "Welches Rätsel möchtest du lösen?";
const PROMPT_ANSWER: &str = "Wie lautet deine Lösung?";
const PROMPT_HINT: &str = "Zu welchem Rätsel möchtest du einen Tipp?";
const ALREADY_SOLVED: &str = "Das Rätsel ist bereits gelöst.";
const NOT_YET: &str = "Das kannst du noch nicht lösen.";
const WRONG: &str = "Das ist nicht die richtige Lösung.";
const NO_HINTS: &str = "Für dieses Rätsel gibt es keine Tipps.";

impl<'a> Turn<'a> {
    fn find_puzzle(&self, target: &str) -> EngineResult<Option<(&'a str, &'a Puzzle)>> {
        let room = self.current_room()?;
        let puzzles = self.puzzles_here(room)?;
        Ok(find_by_name(
            puzzles.iter().map(|entry| (*entry, entry.1.name.as_str())),
            target,
        ))
    }

    pub(crate) fn do_solve(
        &mut self,
        target: Option<&str>,
        answer: Option<&str>,
    ) -> EngineResult<String> {
        let Some(target) = target else {
            return Ok(PROMPT_SOLVE.to_string());
        };
        let Some((key, puzzle)) = self.find_puzzle(target)? else {
            return Ok(self.response(DefaultResponse::PuzzleNotFound));
        };
        if self.state.has_completed(key) {
            return Ok(ALREADY_SOLVED.to_string());
        }
        let (items, puzzles) = self.missing(&puzzle.required_items, &puzzle.required_puzzles)?;
        if !items.is_empty() || !puzzles.is_empty() {
            return Ok(format!("{NOT_YET}{}", requirements(&items, &puzzles)));
        }
        let Some(answer) = answer else {
            return Ok(PROMPT_ANSWER.to_string());
        };
        if !puzzle.solution.matches(answer) {
            return Ok(WRONG.to_string());
        }

        self.state.complete_puzzle(key);
        self.notices.push(Notice::PuzzleSolved {
            puzzle: key.to_string(),
        });
        info!(puzzle = %key, "puzzle solved");

        // A teleport reward must not move the solve reactions to another room.
        let origin = self.state.current_room.clone();
        let solved = format!("Du hast {} gelöst!", puzzle.name);
        let (granted, reward_events) = match &puzzle.reward {
            Some(reward) => self.grant(reward, &origin)?,
            None => (String::new(), String::new()),
        };
        let events = self.check_events_in(&origin, TriggerKind::SolvePuzzle, key)?;
        Ok(paragraphs([
            solved.as_str(),
            granted.as_str(),
            reward_events.as_str(),
            events.as_str(),
        ]))
    }

    /// Apply a reward. Returns its message and the output of events it fired
    /// in `origin`.
    fn grant(&mut self, reward: &Reward, origin: &str) -> EngineResult<(String, String)> {
        let key = reward.key();
        let mut message = reward.message.clone();
        let mut events = String::new();
        match reward.kind {
            RewardKind::Item => {
                let name = self.item(&key)?.name.clone();
                if self.give(&key) && message.is_empty() {
                    message = format!("Du erhältst {name}.");
                }
            }
            RewardKind::Unlock => self.set_lock(&key, false)?,
            RewardKind::Variable => {
                if let Some((name, value)) = reward.variable() {
                    self.assign_variable(&name, value);
                    events = self.check_events_in(origin, TriggerKind::VariableChange, &name)?;
                }
            }
            RewardKind::Teleport => {
                self.room(&key)?;
                self.enter(&key);
            }
        }
        Ok((message, events))
    }

    pub(crate) fn do_hint(&mut self, target: Option<&str>) -> EngineResult<String> {
        let Some(target) = target else {
            return Ok(PROMPT_HINT.to_string());
        };
        let Some((key, puzzle)) = self.find_puzzle(target)? else {
            return Ok(self.response(DefaultResponse::PuzzleNotFound));
        };
        let Some(last) = puzzle.hints.len().checked_sub(1) else {
            return Ok(NO_HINTS.to_string());
        };

        let shown = self.state.hints_shown(key);
        let hint = &puzzle.hints[shown.min(last)];
        self.state
            .revealed_hints
            .insert(key.to_string(), (shown + 1).min(last + 1));
        Ok(format!("Tipp: {hint}"))
    }
}
