//! A loaded world ready to be played.

use std::sync::Arc;

use tracing::{info, warn};
use tw_core::{GameState, LoadError, World};

use crate::config::EngineConfig;
use crate::error::EngineResult;
use crate::save::SaveGame;
use crate::session::Session;

/// A validated world and its initial state. Starts any number of sessions.
#[derive(Debug, Clone)]
pub struct Adventure {
    world: Arc<World>,
    initial: GameState,
}

impl Adventure {
    /// Load and validate a world document.
    pub fn from_json(json: &str) -> EngineResult<Self> {
        let (world, initial) = tw_core::load(json)?;
        Ok(Self {
            world: Arc::new(world),
            initial,
        })
    }

    /// Get the shared world.
    pub fn world(&self) -> &Arc<World> {
        &self.world
    }

    /// Get the state every new session starts from.
    pub fn initial_state(&self) -> &GameState {
        &self.initial
    }

    /// Start a new playthrough.
    pub fn start(&self, config: EngineConfig) -> Session {
        let session = Session::new(Arc::clone(&self.world), self.initial.clone(), config);
        info!(session = %session.id(), title = %self.world.metadata.title, "session started");
        session
    }

    /// Continue a saved playthrough after checking its references.
    pub fn resume(&self, save: SaveGame, config: EngineConfig) -> EngineResult<Session> {
        self.world
            .validate_state(&save.state)
            .map_err(LoadError::from)?;
        if save.title != self.world.metadata.title {
            warn!(
                saved = %save.title,
                world = %self.world.metadata.title,
                "save game was written for a different title"
            );
        }
        info!(session = %save.session_id, "session resumed");
        Ok(Session::with_id(
            save.session_id,
            Arc::clone(&self.world),
            save.state,
            config,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::EngineError;
    use crate::actions::tests::{BURG, run};
    use tw_core::SchemaError;

    #[test]
    fn sessions_share_the_world() {
        let adventure = Adventure::from_json(BURG).unwrap();
        let mut a = adventure.start(EngineConfig::default());
        let b = adventure.start(EngineConfig::default());
        run(&mut a, "nimm fackel");
        assert!(a.state().has_item("fackel"));
        assert!(!b.state().has_item("fackel"));
        assert_ne!(a.id(), b.id());
        assert_eq!(Arc::strong_count(adventure.world()), 3);
    }

    #[test]
    fn save_and_resume() {
        let adventure = Adventure::from_json(BURG).unwrap();
        let mut session = adventure.start(EngineConfig::default());
        run(&mut session, "nimm fackel");
        run(&mut session, "o");

        let json = session.save().to_json().unwrap();
        let save = SaveGame::from_json(&json).unwrap();
        let mut resumed = adventure.resume(save, EngineConfig::default()).unwrap();
        assert_eq!(resumed.id(), session.id());
        assert_eq!(resumed.state(), session.state());

        run(&mut resumed, "w");
        let text = run(&mut resumed, "schaue");
        assert!(!text.contains("Fackel"));
    }

    #[test]
    fn resume_rejects_foreign_state() {
        let adventure = Adventure::from_json(BURG).unwrap();
        let mut save = adventure.start(EngineConfig::default()).save();
        save.state.current_room = "keller".to_string();
        let err = adventure.resume(save, EngineConfig::default()).unwrap_err();
        assert!(matches!(
            err,
            EngineError::Load(LoadError::Schema(SchemaError::DanglingReference { .. }))
        ));
    }

    #[test]
    fn malformed_document_fails_to_load() {
        assert!(matches!(
            Adventure::from_json("{}"),
            Err(EngineError::Load(_))
        ));
    }
}
