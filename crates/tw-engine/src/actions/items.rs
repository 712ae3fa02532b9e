use tw_core::{DefaultResponse, EffectKind, ItemEffect, TriggerKind};

use crate::error::EngineResult;
use crate::parser::find_by_name;
use crate::turn::{Turn, paragraphs};

const PROMPT_TAKE: &str = "Was möchtest du aufheben?";
const PROMPT_USE: &str = "Was möchtest du benutzen?";
const PROMPT_COMBINE: &str = "Was möchtest du kombinieren?";
const PROMPT_COMBINE_WITH: &str = "Womit möchtest du das kombinieren?";
const ALREADY_HELD: &str = "Du hast das bereits.";
const NOT_HELD: &str = "Du hast das nicht dabei.";
const NOT_COMBINABLE: &str = "Das lässt sich nicht kombinieren.";
const EMPTY_INVENTORY: &str = "Dein Inventar ist leer.";

impl Turn<'_> {
    /// Key of the first item lying here or held whose name contains the target.
    fn find_item(&self, target: &str) -> EngineResult<Option<String>> {
        let room = self.current_room()?;
        let here = self.items_here(room)?;
        let held = self.items_held()?;
        Ok(find_by_name(
            here.iter()
                .chain(held.iter())
                .map(|(key, item)| (key, item.name.as_str())),
            target,
        )
        .cloned())
    }

    pub(crate) fn do_take(&mut self, target: Option<&str>) -> EngineResult<String> {
        let Some(target) = target else {
            return Ok(PROMPT_TAKE.to_string());
        };
        let Some(key) = self.find_item(target)? else {
            return Ok(self.response(DefaultResponse::ItemNotFound));
        };
        let item = self.item(&key)?;
        if !item.is_takeable {
            return Ok(self.response(DefaultResponse::ItemNotTakeable));
        }
        if !self.give(&key) {
            return Ok(ALREADY_HELD.to_string());
        }

        let taken = format!("Du hast {} aufgehoben.", item.name);
        let events = self.check_events(TriggerKind::PickupItem, &key)?;
        Ok(paragraphs([taken.as_str(), events.as_str()]))
    }

    pub(crate) fn do_use(&mut self, target: Option<&str>) -> EngineResult<String> {
        let Some(target) = target else {
            return Ok(PROMPT_USE.to_string());
        };
        let Some(key) = self.find_item(target)? else {
            return Ok(self.response(DefaultResponse::ItemNotFound));
        };
        let item = self.item(&key)?;
        if !item.is_usable {
            return Ok(self.response(DefaultResponse::ItemNotUsable));
        }
        if !self.state.has_item(&key) {
            return Ok(NOT_HELD.to_string());
        }

        // Effects may teleport; reactions belong to the room the item was used in.
        let origin = self.state.current_room.clone();
        let mut lines = vec![format!("Du benutzt {}.", item.name)];
        let mut reactions = Vec::new();
        for effect in &item.effects {
            if !effect.message.is_empty() {
                lines.push(effect.message.clone());
            }
            reactions.push(self.apply_effect(effect, &origin)?);
        }
        reactions.push(self.check_events_in(&origin, TriggerKind::UseItem, &key)?);

        let used = lines.join("\n");
        Ok(paragraphs(
            std::iter::once(used.as_str()).chain(reactions.iter().map(String::as_str)),
        ))
    }

    /// Apply one item effect; returns the output of events it fired in `origin`.
    fn apply_effect(&mut self, effect: &ItemEffect, origin: &str) -> EngineResult<String> {
        let target = effect.target.as_deref().unwrap_or_default();
        match effect.kind {
            EffectKind::Heal => self.change_life(effect.value),
            EffectKind::Damage => self.change_life(-effect.value),
            EffectKind::Buff | EffectKind::Debuff => {
                let delta = if effect.kind == EffectKind::Buff {
                    effect.value
                } else {
                    -effect.value
                };
                self.adjust_variable(target, delta);
                return self.check_events_in(origin, TriggerKind::VariableChange, target);
            }
            EffectKind::Teleport => {
                self.room(target)?;
                self.enter(target);
            }
            EffectKind::Unlock => self.set_lock(target, false)?,
        }
        Ok(String::new())
    }

    pub(crate) fn do_combine(
        &mut self,
        first: Option<&str>,
        second: Option<&str>,
    ) -> EngineResult<String> {
        let Some(first) = first else {
            return Ok(PROMPT_COMBINE.to_string());
        };
        let Some(second) = second else {
            return Ok(PROMPT_COMBINE_WITH.to_string());
        };

        let held = self.items_held()?;
        let find = |target: &str| {
            find_by_name(
                held.iter().map(|(key, item)| ((key, *item), item.name.as_str())),
                target,
            )
        };
        let (Some((a_key, a)), Some((b_key, b))) = (find(first), find(second)) else {
            return Ok(NOT_HELD.to_string());
        };
        if a_key == b_key || !a.is_combinable || !b.is_combinable {
            return Ok(NOT_COMBINABLE.to_string());
        }
        let Some(rule) = a.combination_with(b_key).or_else(|| b.combination_with(a_key)) else {
            return Ok(NOT_COMBINABLE.to_string());
        };

        if rule.consumes_items {
            self.take_away(a_key);
            self.take_away(b_key);
        }
        let result = self.item(&rule.result)?;
        self.give(&rule.result);
        if rule.message.is_empty() {
            Ok(format!("Du erhältst {}.", result.name))
        } else {
            Ok(rule.message.clone())
        }
    }

    pub(crate) fn do_inventory(&self) -> EngineResult<String> {
        let held = self.items_held()?;
        if held.is_empty() {
            return Ok(EMPTY_INVENTORY.to_string());
        }
        let names: Vec<&str> = held.iter().map(|(_, item)| item.name.as_str()).collect();
        Ok(format!("Du hast dabei: {}", names.join(", ")))
    }
}
