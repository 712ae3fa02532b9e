use tw_core::{DefaultResponse, Direction, LockTarget, TriggerKind};

use crate::error::EngineResult;
use crate::parser::name_matches;
use crate::turn::{Turn, paragraphs};

const PROMPT: &str = "Wohin möchtest du gehen?";
const BLOCKED: &str = "Der Weg ist versperrt.";

impl Turn<'_> {
    pub(crate) fn do_move(&mut self, target: Option<&str>) -> EngineResult<String> {
        let Some(target) = target else {
            return Ok(PROMPT.to_string());
        };
        let room_key = self.state.current_room.clone();
        let room = self.current_room()?;

        // A compass word never falls back to matching room names.
        let exit = match Direction::parse(target) {
            Some(direction) => room
                .exits
                .iter()
                .find(|(key, _)| *key == direction.name()),
            None => room.exits.iter().find(|(_, exit)| {
                self.world
                    .room(&exit.target_room)
                    .is_some_and(|r| name_matches(&r.name, target))
            }),
        };
        let Some((direction, exit)) = exit else {
            return Ok(self.response(DefaultResponse::CantGo));
        };

        let exit_lock = LockTarget::Exit {
            room: room_key,
            direction: direction.to_string(),
        };
        if self.state.is_locked(&exit_lock, exit.is_locked) {
            if let Some(blocked) = self.blocked(
                &exit.required_items,
                &exit.required_puzzles,
                exit.message.as_deref(),
            )? {
                return Ok(blocked);
            }
        }

        let destination = self.room(&exit.target_room)?;
        let room_lock = LockTarget::Room(exit.target_room.clone());
        if self.state.is_locked(&room_lock, destination.is_locked) {
            if let Some(blocked) = self.blocked(
                &destination.required_items,
                &destination.required_puzzles,
                None,
            )? {
                return Ok(blocked);
            }
        }

        self.enter(&exit.target_room);
        let events = self.check_events(TriggerKind::EnterRoom, &exit.target_room)?;
        Ok(paragraphs([destination.long_text(), events.as_str()]))
    }

    /// The refusal for a locked passage, or `None` if the player meets its
    /// requirements. A lock without requirements never opens.
    fn blocked(
        &self,
        items: &[String],
        puzzles: &[String],
        message: Option<&str>,
    ) -> EngineResult<Option<String>> {
        if items.is_empty() && puzzles.is_empty() {
            return Ok(Some(message.unwrap_or(BLOCKED).to_string()));
        }
        let (missing_items, missing_puzzles) = self.missing(items, puzzles)?;
        if missing_items.is_empty() && missing_puzzles.is_empty() {
            return Ok(None);
        }
        if let Some(message) = message {
            return Ok(Some(message.to_string()));
        }
        Ok(Some(format!(
            "{BLOCKED}{}",
            requirements(&missing_items, &missing_puzzles)
        )))
    }
}

/// ` Du brauchst: a, b. Du musst zuerst lösen: c.` for whatever is missing.
pub(super) fn requirements(items: &[&str], puzzles: &[&str]) -> String {
    let mut text = String::new();
    if !items.is_empty() {
        text.push_str(&format!(" Du brauchst: {}.", items.join(", ")));
    }
    if !puzzles.is_empty() {
        text.push_str(&format!(" Du musst zuerst lösen: {}.", puzzles.join(", ")));
    }
    text
}

#[cfg(test)]
mod tests {
    use crate::actions::tests::{run, session};
    use crate::outcome::Notice;

    #[test]
    fn move_without_target_prompts() {
        let mut session = session();
        assert_eq!(run(&mut session, "gehe"), "Wohin möchtest du gehen?");
    }

    #[test]
    fn no_exit_is_cant_go() {
        let mut session = session();
        assert_eq!(run(&mut session, "gehe süden"), "Dort geht es nicht weiter.");
        assert_eq!(session.current_room(), "hof");
    }

    #[test]
    fn locked_exit_lists_everything_missing() {
        let mut session = session();
        let text = run(&mut session, "gehe norden");
        assert_eq!(
            text,
            "Der Weg ist versperrt. Du brauchst: Rostiger Schlüssel. \
             Du musst zuerst lösen: Verwitterte Inschrift."
        );
        assert_eq!(session.current_room(), "hof");
    }

    #[test]
    fn dead_end_uses_custom_message() {
        let mut session = session();
        assert_eq!(run(&mut session, "w"), "Das Kapellentor ist zugemauert.");
        assert_eq!(session.current_room(), "hof");
    }

    #[test]
    fn move_by_room_name() {
        let mut session = session();
        let outcome = session.execute("gehe zur schmiede").unwrap();
        assert_eq!(session.current_room(), "schmiede");
        assert!(outcome.text.starts_with("In der alten Schmiede"));
        assert!(outcome.has(|n| matches!(n, Notice::Moved { to, .. } if to == "schmiede")));
    }

    #[test]
    fn alias_equals_expansion() {
        let mut by_alias = session();
        let mut expanded = session();
        let a = by_alias.execute("o").unwrap();
        let b = expanded.execute("gehe osten").unwrap();
        assert_eq!(a, b);
        assert_eq!(by_alias.state(), expanded.state());
    }

    #[test]
    fn locked_room_checks_its_own_requirements() {
        let mut session = session();
        for input in [
            "o",
            "nimm schlüssel",
            "w",
            "löse inschrift mit die zeit",
            "n",
        ] {
            run(&mut session, input);
        }
        assert_eq!(session.current_room(), "halle");
        let text = run(&mut session, "gehe oben");
        assert_eq!(text, "Der Weg ist versperrt. Du brauchst: Enterhaken.");
        assert_eq!(session.current_room(), "halle");
    }
}
