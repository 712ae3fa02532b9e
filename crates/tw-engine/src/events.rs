//! Room-scoped event processing.

use tracing::info;
use tw_core::{Condition, EventAction, EventActionKind, Scalar, TriggerKind};

use crate::error::{EngineError, EngineResult};
use crate::outcome::Notice;
use crate::turn::Turn;

impl Turn<'_> {
    /// Fire the current room's events that react to `(kind, target)`.
    ///
    /// The room's event list is taken when the scan starts, so a teleport
    /// inside an event does not pull in the new room's events. Returns the
    /// collected output, one message per line.
    pub(crate) fn check_events(&mut self, kind: TriggerKind, target: &str) -> EngineResult<String> {
        let room = self.state.current_room.clone();
        self.check_events_in(&room, kind, target)
    }

    /// Fire the events of `room`, which need not be the current room. Used
    /// for actions that may move the player before their trigger is checked.
    pub(crate) fn check_events_in(
        &mut self,
        room: &str,
        kind: TriggerKind,
        target: &str,
    ) -> EngineResult<String> {
        let room = self.room(room)?;
        let mut output = Vec::new();

        for key in &room.events {
            let event = self
                .world
                .event(key)
                .ok_or_else(|| EngineError::missing("event", key))?;
            if event.is_one_time && self.state.is_triggered(key) {
                continue;
            }
            if !event.trigger.matches(kind, target, self.state) {
                continue;
            }
            if !Condition::all(&event.conditions, self.state) {
                continue;
            }

            for action in &event.actions {
                self.apply_event_action(action, &mut output)?;
            }
            self.state.mark_triggered(key.as_str());
            self.notices.push(Notice::EventFired { event: key.clone() });
            info!(event = %key, trigger = %kind, subject = target, "event fired");
        }

        Ok(output.join("\n").trim().to_string())
    }

    fn apply_event_action(
        &mut self,
        action: &EventAction,
        output: &mut Vec<String>,
    ) -> EngineResult<()> {
        let message = action.message.as_deref().filter(|m| !m.is_empty());
        let mut say = |default: Option<String>| {
            if let Some(text) = message.map(str::to_string).or(default) {
                output.push(text);
            }
        };

        match action.kind {
            EventActionKind::Message => say(None),
            EventActionKind::GiveItem => {
                let name = self.item(&action.target)?.name.clone();
                if self.give(&action.target) {
                    say(Some(format!("Du erhältst {name}.")));
                }
            }
            EventActionKind::TakeItem => {
                let name = self.item(&action.target)?.name.clone();
                if self.take_away(&action.target) {
                    say(Some(format!("{name} wurde dir abgenommen.")));
                }
            }
            EventActionKind::Teleport => {
                self.room(&action.target)?;
                self.enter(&action.target);
                say(Some("Du wirst teleportiert.".to_string()));
            }
            EventActionKind::Unlock => {
                self.set_lock(&action.target, false)?;
                say(None);
            }
            EventActionKind::Lock => {
                self.set_lock(&action.target, true)?;
                say(None);
            }
            EventActionKind::SetVariable => {
                let value = action.value.clone().unwrap_or(Scalar::Boolean(true));
                self.assign_variable(&action.target, value);
                say(None);
            }
            EventActionKind::Damage => {
                let amount = amount(action);
                self.change_life(-amount);
                say(None);
            }
            EventActionKind::Heal => {
                let amount = amount(action);
                self.change_life(amount);
                say(None);
            }
        }
        Ok(())
    }
}

fn amount(action: &EventAction) -> f64 {
    action
        .value
        .as_ref()
        .and_then(Scalar::as_number)
        .unwrap_or(0.0)
}
