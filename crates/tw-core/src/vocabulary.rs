//! Verbs, aliases, and default responses.

use serde::{Deserialize, Serialize};

use crate::error::SchemaError;
use crate::keyed::Keyed;

/// The handler a verb dispatches to.
///
/// Documents usually only name verbs; well-known German verbs map to their
/// handler by name, anything else needs an explicit `"action"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VerbAction {
    /// Walk through an exit.
    Move,
    /// Describe the room or examine something.
    Look,
    /// Pick up an item.
    Take,
    /// Use a held item.
    Use,
    /// Talk to an NPC.
    Talk,
    /// List held items.
    Inventory,
    /// List the verb table.
    Help,
    /// Answer a puzzle.
    Solve,
    /// Reveal the next hint of a puzzle.
    Hint,
    /// Combine two held items.
    Combine,
}

impl VerbAction {
    /// Default handler for a verb name.
    pub fn from_verb(verb: &str) -> Option<Self> {
        match verb {
            "gehe" => Some(Self::Move),
            "schaue" => Some(Self::Look),
            "nimm" => Some(Self::Take),
            "benutze" => Some(Self::Use),
            "sprich" => Some(Self::Talk),
            "inventar" => Some(Self::Inventory),
            "hilfe" => Some(Self::Help),
            "löse" | "loese" => Some(Self::Solve),
            "tipp" => Some(Self::Hint),
            "kombiniere" => Some(Self::Combine),
            _ => None,
        }
    }
}

/// A verb table entry.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerbDef {
    /// One-line description used by `help`.
    pub description: String,
    /// Usage pattern.
    #[serde(default)]
    pub usage: String,
    /// Example commands.
    #[serde(default)]
    pub examples: Vec<String>,
    /// Entity kinds the verb applies to (`room`, `item`, `npc`, `puzzle`).
    #[serde(default)]
    pub applicable_to: Vec<String>,
    /// Explicit handler, overriding the name-based default.
    #[serde(default)]
    pub action: Option<VerbAction>,
}

/// A category of canned failure text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DefaultResponse {
    /// The verb is not in the vocabulary.
    UnknownCommand,
    /// No exit in that direction.
    CantGo,
    /// No matching item.
    ItemNotFound,
    /// The item cannot be picked up.
    ItemNotTakeable,
    /// The item cannot be used.
    ItemNotUsable,
    /// No matching NPC.
    NpcNotFound,
    /// No matching puzzle.
    PuzzleNotFound,
}

impl DefaultResponse {
    /// Every response a document must define.
    pub const ALL: [DefaultResponse; 7] = [
        Self::UnknownCommand,
        Self::CantGo,
        Self::ItemNotFound,
        Self::ItemNotTakeable,
        Self::ItemNotUsable,
        Self::NpcNotFound,
        Self::PuzzleNotFound,
    ];

    /// Key in the `defaultResponses` table.
    pub fn key(&self) -> &'static str {
        match self {
            Self::UnknownCommand => "unknown_command",
            Self::CantGo => "cant_go",
            Self::ItemNotFound => "item_not_found",
            Self::ItemNotTakeable => "item_not_takeable",
            Self::ItemNotUsable => "item_not_usable",
            Self::NpcNotFound => "npc_not_found",
            Self::PuzzleNotFound => "puzzle_not_found",
        }
    }
}

/// Lowercase, trim, and collapse internal whitespace.
pub fn normalize(input: &str) -> String {
    input
        .split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join(" ")
}

/// The `commands` section: verb table, alias table, and default responses.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Vocabulary {
    verbs: Keyed<VerbDef>,
    #[serde(default)]
    aliases: Keyed<String>,
    default_responses: Keyed<String>,
}

impl Vocabulary {
    /// Look up a verb.
    pub fn verb(&self, name: &str) -> Option<&VerbDef> {
        self.verbs.get(name)
    }

    /// Verbs in table order.
    pub fn verbs(&self) -> impl Iterator<Item = (&str, &VerbDef)> {
        self.verbs.iter()
    }

    /// Aliases in table order, normalized.
    pub fn aliases(&self) -> impl Iterator<Item = (&str, &str)> {
        self.aliases.iter().map(|(k, v)| (k, v.as_str()))
    }

    /// The handler of a verb, if the verb is in the table and has one.
    pub fn action(&self, verb: &str) -> Option<VerbAction> {
        let def = self.verbs.get(verb)?;
        def.action.or_else(|| VerbAction::from_verb(verb))
    }

    /// The canned text for a failure category.
    pub fn response(&self, response: DefaultResponse) -> &str {
        // Presence is checked during loading.
        self.default_responses
            .get(response.key())
            .map(String::as_str)
            .unwrap_or(response.key())
    }

    /// Normalize raw input and apply at most one alias substitution.
    pub fn resolve(&self, input: &str) -> String {
        let normalized = normalize(input);
        match self.aliases.get(&normalized) {
            Some(target) => normalize(target),
            None => normalized,
        }
    }

    /// Names of required default responses the table lacks.
    pub fn missing_responses(&self) -> Vec<String> {
        DefaultResponse::ALL
            .iter()
            .filter(|r| !self.default_responses.contains_key(r.key()))
            .map(|r| r.key().to_string())
            .collect()
    }

    /// A cycle in the alias table, as the chain of keys that closes it.
    pub fn alias_cycle(&self) -> Option<Vec<String>> {
        for (start, _) in self.aliases.iter() {
            let mut chain = vec![start.to_string()];
            let mut current = start;
            while let Some(next) = self.aliases.get(current) {
                if let Some(pos) = chain.iter().position(|k| k == next) {
                    let mut cycle = chain.split_off(pos);
                    cycle.push(next.clone());
                    return Some(cycle);
                }
                chain.push(next.clone());
                current = next.as_str();
            }
        }
        None
    }

    /// Check verb names and normalize the alias table in place.
    pub(crate) fn prepare(&mut self) -> Result<(), SchemaError> {
        for (name, _) in self.verbs.iter() {
            if name.is_empty() || normalize(name) != name || name.contains(' ') {
                return Err(SchemaError::MalformedVerb(name.to_string()));
            }
        }
        if let Some(dup) = self.verbs.first_duplicate() {
            return Err(SchemaError::DuplicateKey {
                collection: "verbs",
                key: dup.to_string(),
            });
        }

        let mut aliases = Keyed::new();
        for (key, target) in std::mem::take(&mut self.aliases) {
            let (key_n, target_n) = (normalize(&key), normalize(&target));
            if key_n.is_empty() || target_n.is_empty() {
                return Err(SchemaError::MalformedAlias(key));
            }
            aliases.0.push((key_n, target_n));
        }
        if let Some(dup) = aliases.first_duplicate() {
            return Err(SchemaError::DuplicateKey {
                collection: "aliases",
                key: dup.to_string(),
            });
        }
        self.aliases = aliases;

        if let Some(dup) = self.default_responses.first_duplicate() {
            return Err(SchemaError::DuplicateKey {
                collection: "defaultResponses",
                key: dup.to_string(),
            });
        }

        for (name, _) in self.verbs.iter() {
            if self.action(name).is_none() {
                tracing::warn!(verb = name, "verb has no handler and will answer unknown_command");
            }
        }
        Ok(())
    }
}
