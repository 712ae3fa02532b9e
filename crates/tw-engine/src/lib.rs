//! Command interpreter and event engine for Textwelt adventures.
//!
//! An [`Adventure`] wraps a validated world. Each [`Session`] started from it
//! owns one game state and turns lines of player input into an [`Outcome`]:
//! the text to show and the state changes that happened.
//!
//! # Example
//!
//! ```no_run
//! use tw_engine::{Adventure, EngineConfig};
//!
//! # fn main() -> Result<(), tw_engine::EngineError> {
//! let json = std::fs::read_to_string("burg.json").expect("readable file");
//! let adventure = Adventure::from_json(&json)?;
//! let mut session = adventure.start(EngineConfig::default());
//! println!("{}", session.opening()?);
//! println!("{}", session.execute("gehe norden")?.text);
//! # Ok(())
//! # }
//! ```

mod actions;
/// Loaded worlds and session creation.
pub mod adventure;
/// Engine configuration.
pub mod config;
/// Error types for the engine.
pub mod error;
mod events;
/// Turn results.
pub mod outcome;
/// Command parsing and name resolution.
pub mod parser;
/// Save games.
pub mod save;
/// Play sessions.
pub mod session;
mod turn;

pub use adventure::Adventure;
pub use config::EngineConfig;
pub use error::{EngineError, EngineResult};
pub use outcome::{Notice, Outcome};
pub use parser::{Command, parse_command};
pub use save::SaveGame;
pub use session::{DialogueView, Session, SessionId};
