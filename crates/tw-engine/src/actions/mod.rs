//! Command handlers. Every handler answers with text; only broken world
//! invariants surface as errors.

mod dialogue;
mod items;
mod looking;
mod movement;
mod puzzles;

pub(crate) use looking::describe_room;

use tw_core::{DefaultResponse, Scalar, TriggerKind};

use crate::error::EngineResult;
use crate::outcome::Notice;
use crate::parser::Command;
use crate::turn::{Turn, paragraphs};

const DEATH_MESSAGE: &str = "Du bist gestorben. Das Spiel ist vorbei.";

impl Turn<'_> {
    /// Run a parsed command, then advance time and check for death.
    pub(crate) fn execute(&mut self, command: &Command) -> EngineResult<String> {
        let text = match command {
            Command::Move { target } => self.do_move(target.as_deref())?,
            Command::Look { target } => self.do_look(target.as_deref())?,
            Command::Take { item } => self.do_take(item.as_deref())?,
            Command::Use { item } => self.do_use(item.as_deref())?,
            Command::Talk { npc } => self.do_talk(npc.as_deref())?,
            Command::Inventory => self.do_inventory()?,
            Command::Help => self.do_help(),
            Command::Solve { puzzle, answer } => {
                self.do_solve(puzzle.as_deref(), answer.as_deref())?
            }
            Command::Hint { puzzle } => self.do_hint(puzzle.as_deref())?,
            Command::Combine { first, second } => {
                self.do_combine(first.as_deref(), second.as_deref())?
            }
            Command::Unknown { .. } => return Ok(self.response(DefaultResponse::UnknownCommand)),
        };

        let ticks = self.config.advance_time && !matches!(command, Command::Help);
        let elapsed = if ticks { self.tick()? } else { String::new() };
        let death = self.check_death();
        Ok(paragraphs([text.as_str(), elapsed.as_str(), death.unwrap_or("")]))
    }

    fn do_help(&self) -> String {
        let verbs = self
            .world
            .vocabulary()
            .verbs()
            .map(|(verb, def)| format!("{verb}: {}", def.description))
            .collect::<Vec<_>>()
            .join("\n");
        format!("Verfügbare Befehle:\n{verbs}")
    }

    /// Advance the turn counter and fire `time_elapsed` events.
    fn tick(&mut self) -> EngineResult<String> {
        self.state.time_elapsed += 1;
        if self.state.is_over() {
            return Ok(String::new());
        }
        let elapsed = self.state.time_elapsed.to_string();
        self.check_events(TriggerKind::TimeElapsed, &elapsed)
    }

    fn check_death(&mut self) -> Option<&'static str> {
        if self.state.is_over() || !self.world.metadata.settings.player_can_die {
            return None;
        }
        let life = self
            .state
            .variable(&self.config.life_variable)
            .and_then(Scalar::as_number)?;
        if life > 0.0 {
            return None;
        }
        self.state.is_game_over = true;
        self.notices.push(Notice::GameOver);
        Some(DEATH_MESSAGE)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use std::sync::Arc;

    use crate::{Adventure, EngineConfig, Session};

    pub(crate) const BURG: &str = include_str!("../../tests/fixtures/burg.json");

    pub(crate) fn session() -> Session {
        Adventure::from_json(BURG)
            .unwrap()
            .start(EngineConfig::default())
    }

    pub(crate) fn run(session: &mut Session, input: &str) -> String {
        session.execute(input).unwrap().text
    }

    #[test]
    fn help_lists_verbs_in_table_order() {
        let mut session = session();
        let text = run(&mut session, "hilfe");
        insta::assert_snapshot!(text, @r"
        Verfügbare Befehle:
        gehe: Bewege dich in eine Richtung
        schaue: Schaue dich um oder untersuche etwas
        nimm: Nimm einen Gegenstand
        benutze: Benutze einen Gegenstand
        sprich: Sprich mit jemandem
        inventar: Zeige dein Inventar
        hilfe: Zeige diese Hilfe
        löse: Löse ein Rätsel
        tipp: Erhalte einen Tipp
        kombiniere: Kombiniere zwei Gegenstände
        ");
    }

    #[test]
    fn help_does_not_advance_time() {
        let mut session = session();
        run(&mut session, "hilfe");
        assert_eq!(session.state().time_elapsed, 0);
        run(&mut session, "inventar");
        assert_eq!(session.state().time_elapsed, 1);
    }

    #[test]
    fn unknown_verb_changes_nothing() {
        let mut session = session();
        let before = session.state().clone();
        let outcome = session.execute("tanze wild").unwrap();
        assert_eq!(outcome.text, "Das verstehe ich nicht.");
        assert!(!outcome.is_recognized());
        assert_eq!(session.state(), &before);
    }

    #[test]
    fn time_can_be_frozen() {
        let adventure = Adventure::from_json(BURG).unwrap();
        let mut session = adventure.start(EngineConfig::default().with_advance_time(false));
        run(&mut session, "schaue");
        assert_eq!(session.state().time_elapsed, 0);
        assert!(Arc::ptr_eq(adventure.world(), session.world()));
    }
}
