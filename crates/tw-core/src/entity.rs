use serde::Deserialize;

use crate::condition::Condition;
use crate::keyed::Keyed;
use crate::value::Scalar;

/// Location key of items the player starts with.
pub const INVENTORY_LOCATION: &str = "inventory";

fn yes() -> bool {
    true
}

/// A room of the world graph.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Room {
    /// Optional inner id; must equal the map key if present.
    #[serde(default)]
    pub id: Option<String>,
    /// Display name.
    pub name: String,
    /// Short description.
    #[serde(default)]
    pub description: String,
    /// Full description shown on entry and by `look`.
    #[serde(default)]
    pub long_description: String,
    /// Exits keyed by canonical direction (canonicalized during loading).
    #[serde(default)]
    pub exits: Keyed<Exit>,
    /// Item keys placed here.
    #[serde(default)]
    pub items: Vec<String>,
    /// NPC keys placed here.
    #[serde(default)]
    pub npcs: Vec<String>,
    /// Puzzle keys placed here.
    #[serde(default)]
    pub puzzles: Vec<String>,
    /// Event keys scanned while the player is here.
    #[serde(default)]
    pub events: Vec<String>,
    /// The room itself can only be entered once its requirements are met.
    #[serde(default)]
    pub is_locked: bool,
    /// Items needed to enter a locked room.
    #[serde(default)]
    pub required_items: Vec<String>,
    /// Puzzles needed to enter a locked room.
    #[serde(default)]
    pub required_puzzles: Vec<String>,
    /// Flavour text.
    #[serde(default)]
    pub ambient_sounds: Option<String>,
    /// Flavour: `bright`, `dim` or `dark`.
    #[serde(default)]
    pub lighting: Option<String>,
    /// Flavour: `hot`, `warm` or `cold`.
    #[serde(default)]
    pub temperature: Option<String>,
}

impl Room {
    /// The long description, or the short one if the document left it empty.
    pub fn long_text(&self) -> &str {
        if self.long_description.is_empty() {
            &self.description
        } else {
            &self.long_description
        }
    }
}

/// A directed passage out of a room.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Exit {
    /// Destination room key.
    pub target_room: String,
    /// Description of the passage.
    #[serde(default)]
    pub description: String,
    /// Whether the passage is closed.
    #[serde(default)]
    pub is_locked: bool,
    /// Items that open a locked passage.
    #[serde(default)]
    pub required_items: Vec<String>,
    /// Puzzles that open a locked passage.
    #[serde(default)]
    pub required_puzzles: Vec<String>,
    /// Free text carried from the generator; not interpreted.
    #[serde(default)]
    pub condition: Option<String>,
    /// Shown instead of the generic text when the passage is blocked.
    #[serde(default)]
    pub message: Option<String>,
}

impl Exit {
    /// A locked exit without requirements never opens by itself.
    pub fn is_dead_end(&self) -> bool {
        self.is_locked && self.required_items.is_empty() && self.required_puzzles.is_empty()
    }
}

/// What using an item does.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EffectKind {
    /// Raise the life variable.
    Heal,
    /// Lower the life variable.
    Damage,
    /// Raise variable `target`.
    Buff,
    /// Lower variable `target`.
    Debuff,
    /// Move the player to room `target`.
    Teleport,
    /// Unlock lock target `target`.
    Unlock,
}

/// One effect of using an item.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ItemEffect {
    /// Effect kind.
    #[serde(rename = "type")]
    pub kind: EffectKind,
    /// Amount for heal, damage, buff and debuff.
    #[serde(default)]
    pub value: f64,
    /// Room, variable or lock target, depending on the kind.
    #[serde(default)]
    pub target: Option<String>,
    /// Text shown when the effect applies.
    #[serde(default)]
    pub message: String,
}

/// A rule for combining two items.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemCombination {
    /// The other item.
    pub with_item: String,
    /// The resulting item.
    pub result: String,
    /// Text shown after combining.
    #[serde(default)]
    pub message: String,
    /// Remove both inputs from the inventory.
    #[serde(default)]
    pub consumes_items: bool,
}

/// An item.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    /// Optional inner id; must equal the map key if present.
    #[serde(default)]
    pub id: Option<String>,
    /// Display name, matched by player input.
    pub name: String,
    /// Short description.
    #[serde(default)]
    pub description: String,
    /// Text shown when the item is examined.
    #[serde(default)]
    pub long_description: String,
    /// Can be picked up.
    #[serde(default)]
    pub is_takeable: bool,
    /// Can be used.
    #[serde(default)]
    pub is_usable: bool,
    /// Takes part in combinations.
    #[serde(default)]
    pub is_combinable: bool,
    /// Flavour.
    #[serde(default)]
    pub weight: Option<f64>,
    /// Flavour.
    #[serde(default)]
    pub value: Option<f64>,
    /// Effects applied in order on use.
    #[serde(default)]
    pub effects: Vec<ItemEffect>,
    /// Combination rules.
    #[serde(default)]
    pub combinations: Vec<ItemCombination>,
    /// Room key, or `inventory` for starting equipment.
    #[serde(default)]
    pub location: String,
    /// Listed by `look`.
    #[serde(default = "yes")]
    pub is_visible: bool,
}

impl Item {
    /// The long description, or the short one if the document left it empty.
    pub fn long_text(&self) -> &str {
        if self.long_description.is_empty() {
            &self.description
        } else {
            &self.long_description
        }
    }

    /// The combination rule pairing this item with `other`.
    pub fn combination_with(&self, other: &str) -> Option<&ItemCombination> {
        self.combinations.iter().find(|c| c.with_item == other)
    }
}

/// A node of an NPC's dialogue graph.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct DialogueNode {
    /// Optional inner id; must equal the map key if present.
    #[serde(default)]
    pub id: Option<String>,
    /// What the NPC says.
    pub text: String,
    /// Replies the player may choose.
    #[serde(default)]
    pub responses: Vec<DialogueResponse>,
    /// Conditions for the node to be reachable.
    #[serde(default)]
    pub conditions: Vec<Condition>,
}

/// A reply option in a dialogue node.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DialogueResponse {
    /// What the player says.
    pub text: String,
    /// Node the conversation continues at. Empty ends it.
    #[serde(default)]
    pub next_node: String,
    /// Actions for the conversational layer to apply.
    #[serde(default)]
    pub effects: Vec<NpcAction>,
    /// Conditions for the reply to be offered.
    #[serde(default)]
    pub requirements: Vec<Condition>,
}

/// Kind of an NPC action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum NpcActionKind {
    /// Give item `target` to the player.
    #[serde(alias = "give_item")]
    GiveItem,
    /// Take item `target` from the player.
    #[serde(alias = "take_item")]
    TakeItem,
    /// Unlock lock target `target`.
    #[serde(alias = "unlock_room")]
    UnlockRoom,
    /// Make puzzle `target` available.
    #[serde(alias = "unlock_puzzle")]
    UnlockPuzzle,
    /// Set variable `target` to `value`.
    #[serde(alias = "set_variable")]
    SetVariable,
    /// Move the player to room `target`.
    Teleport,
    /// Hurt the player.
    Attack,
}

/// An action attached to dialogue replies or NPC reactions.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct NpcAction {
    /// Action kind.
    #[serde(rename = "type")]
    pub kind: NpcActionKind,
    /// Key the action applies to.
    #[serde(default)]
    pub target: String,
    /// Parameter of the action.
    #[serde(default)]
    pub value: Option<Scalar>,
    /// Text shown when the action applies.
    #[serde(default)]
    pub message: String,
}

/// A non-player character.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Npc {
    /// Optional inner id; must equal the map key if present.
    #[serde(default)]
    pub id: Option<String>,
    /// Display name, matched by player input.
    pub name: String,
    /// Text shown when the NPC is examined.
    #[serde(default)]
    pub description: String,
    /// Author's notes for the conversational layer.
    #[serde(default)]
    pub personality: String,
    /// Room key.
    #[serde(default)]
    pub location: String,
    /// Dead NPCs are neither listed nor speakable.
    #[serde(default = "yes")]
    pub is_alive: bool,
    /// Disposition towards the player.
    #[serde(default = "yes")]
    pub is_friendly: bool,
    /// Dialogue graph keyed by node id.
    #[serde(default)]
    pub dialogue: Keyed<DialogueNode>,
    /// Quest keys for the conversational layer.
    #[serde(default)]
    pub quests: Vec<String>,
    /// Passive reactions.
    #[serde(default)]
    pub reactions: Vec<NpcAction>,
}

impl Npc {
    /// Key of the node every conversation starts at.
    pub const START_NODE: &'static str = "start";

    /// The start node, if the NPC can be spoken to.
    pub fn start_node(&self) -> Option<&DialogueNode> {
        self.dialogue.get(Self::START_NODE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn room_defaults() {
        let room: Room = serde_json::from_str(
            r#"{"name": "Halle", "description": "Eine Halle.", "exits": {"n": {"targetRoom": "hof"}}}"#,
        )
        .unwrap();
        assert_eq!(room.long_text(), "Eine Halle.");
        assert!(!room.is_locked);
        assert_eq!(room.exits.get("n").unwrap().target_room, "hof");
    }

    #[test]
    fn item_visibility_defaults_to_true() {
        let item: Item = serde_json::from_str(r#"{"name": "Lampe"}"#).unwrap();
        assert!(item.is_visible);
        assert!(!item.is_takeable);
    }

    #[test]
    fn dead_end_exit() {
        let exit: Exit =
            serde_json::from_str(r#"{"targetRoom": "keller", "isLocked": true}"#).unwrap();
        assert!(exit.is_dead_end());

        let exit: Exit = serde_json::from_str(
            r#"{"targetRoom": "keller", "isLocked": true, "requiredItems": ["key"]}"#,
        )
        .unwrap();
        assert!(!exit.is_dead_end());
    }

    #[test]
    fn npc_dialogue_and_actions() {
        let npc: Npc = serde_json::from_str(
            r#"{
                "name": "Händler",
                "dialogue": {
                    "start": {
                        "text": "Was darf es sein?",
                        "responses": [{
                            "text": "Eine Karte.",
                            "nextNode": "karte",
                            "effects": [{"type": "giveItem", "target": "map", "message": "Bitte."}],
                            "requirements": [{"type": "hasItem", "value": "coin"}]
                        }]
                    },
                    "karte": {"text": "Hier."}
                }
            }"#,
        )
        .unwrap();
        assert!(npc.is_alive);
        let start = npc.start_node().unwrap();
        assert_eq!(start.responses[0].effects[0].kind, NpcActionKind::GiveItem);
        assert_eq!(start.responses[0].requirements.len(), 1);
    }

    #[test]
    fn item_combinations() {
        let item: Item = serde_json::from_str(
            r#"{"name": "Stock", "combinations": [{"withItem": "rope", "result": "angel", "consumesItems": true}]}"#,
        )
        .unwrap();
        assert!(item.combination_with("rope").unwrap().consumes_items);
        assert!(item.combination_with("stone").is_none());
    }
}
