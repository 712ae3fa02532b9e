//! Core types for Textwelt: the world document, its validation, and game state.
//!
//! A world arrives as a JSON document produced by an external generator. The
//! [`loader`] turns it into an immutable [`World`] plus the initial
//! [`GameState`], rejecting the whole document on any schema or configuration
//! problem. Nothing in this crate performs I/O.

/// Compass directions and their synonyms.
pub mod compass;
/// Closed condition grammar used by events and dialogue.
pub mod condition;
/// Rooms, exits, items, and NPCs.
pub mod entity;
/// Error types used throughout the crate.
pub mod error;
/// Room-scoped events: triggers and actions.
pub mod event;
/// Order-preserving keyed collections and key syntax rules.
pub mod keyed;
/// Document parsing and world construction.
pub mod loader;
/// Puzzles, solutions, and rewards.
pub mod puzzle;
/// The mutable per-playthrough state.
pub mod state;
/// Cross-reference and cycle validation.
pub mod validate;
/// Scalar values stored in game variables.
pub mod value;
/// Verbs, aliases, and default responses.
pub mod vocabulary;
/// The immutable world model.
pub mod world;

pub use compass::Direction;
pub use condition::{Condition, Operator};
pub use entity::{
    DialogueNode, DialogueResponse, EffectKind, Exit, INVENTORY_LOCATION, Item, ItemCombination,
    ItemEffect, Npc, NpcAction, NpcActionKind, Room,
};
pub use error::{ConfigError, LoadError, LoadResult, SchemaError};
pub use event::{Event, EventAction, EventActionKind, LockTarget, Trigger, TriggerKind};
pub use keyed::Keyed;
pub use loader::load;
pub use puzzle::{
    Difficulty, Puzzle, PuzzleKind, Reward, RewardKind, Solution, SolutionKind, SolutionValue,
};
pub use state::GameState;
pub use value::Scalar;
pub use vocabulary::{DefaultResponse, VerbAction, VerbDef, Vocabulary, normalize};
pub use world::{Metadata, Settings, World};
