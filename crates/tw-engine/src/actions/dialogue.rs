use tw_core::{DefaultResponse, TriggerKind};

use crate::error::EngineResult;
use crate::outcome::Notice;
use crate::parser::find_by_name;
use crate::turn::{Turn, paragraphs};

const PROMPT: &str = "Mit wem möchtest du sprechen?";

impl Turn<'_> {
    pub(crate) fn do_talk(&mut self, target: Option<&str>) -> EngineResult<String> {
        let Some(target) = target else {
            return Ok(PROMPT.to_string());
        };
        let room = self.current_room()?;
        let mut npcs = Vec::new();
        for key in &room.npcs {
            npcs.push((key.as_str(), self.npc(key)?));
        }
        let found = find_by_name(
            npcs.iter().map(|(key, npc)| ((*key, *npc), npc.name.as_str())),
            target,
        );
        let Some((key, npc)) = found.filter(|(_, npc)| npc.is_alive) else {
            return Ok(self.response(DefaultResponse::NpcNotFound));
        };

        self.notices.push(Notice::Conversation {
            npc: key.to_string(),
        });
        let spoken = match npc.start_node() {
            Some(node) => node.text.clone(),
            None => format!("{} hat nichts zu sagen.", npc.name),
        };
        let events = self.check_events(TriggerKind::TalkNpc, key)?;
        Ok(paragraphs([spoken.as_str(), events.as_str()]))
    }
}

#[cfg(test)]
mod tests {
    use crate::actions::tests::{run, session};
    use crate::outcome::Notice;

    #[test]
    fn talk_shows_start_node() {
        let mut session = session();
        let outcome = session.execute("sprich mit gerold").unwrap();
        assert_eq!(
            outcome.text,
            "Halt! Nur wer die Inschrift entziffert, darf in die Halle.\n\nGerold nickt dir zu."
        );
        assert!(outcome.has(|n| matches!(n, Notice::Conversation { npc } if npc == "waechter")));
    }

    #[test]
    fn repeating_event_fires_every_time() {
        let mut session = session();
        run(&mut session, "sprich mit gerold");
        let again = run(&mut session, "sprich mit dem wächter");
        assert!(again.ends_with("Gerold nickt dir zu."));
    }

    #[test]
    fn dead_or_absent_npcs_do_not_answer() {
        let mut session = session();
        assert_eq!(
            run(&mut session, "sprich mit schmied"),
            "Hier ist niemand mit diesem Namen."
        );
        run(&mut session, "o");
        assert_eq!(
            run(&mut session, "sprich mit schmied"),
            "Hier ist niemand mit diesem Namen."
        );
        assert_eq!(run(&mut session, "sprich"), "Mit wem möchtest du sprechen?");
    }
}
