//! JSON-file implementation of the engine's state store seam.
//!
//! The product persists canvas state through a key-value store; the CLI
//! stands in with a single JSON file so custom positions and modes survive
//! between invocations.

use std::{fs, path::PathBuf};

use log::debug;

use atelier::{
    AtelierError,
    state::{PersistedState, StateStore},
};

/// Persists the state blob as pretty-printed JSON at a fixed path.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl StateStore for JsonFileStore {
    fn load(&mut self) -> Result<Option<PersistedState>, AtelierError> {
        if !self.path.exists() {
            debug!(path = self.path.display().to_string(); "No persisted state file");
            return Ok(None);
        }

        let content = fs::read_to_string(&self.path)?;
        let state = serde_json::from_str(&content)
            .map_err(|err| AtelierError::State(format!("invalid state file: {err}")))?;
        Ok(Some(state))
    }

    fn save(&mut self, state: &PersistedState) -> Result<(), AtelierError> {
        let content = serde_json::to_string_pretty(state)
            .map_err(|err| AtelierError::State(err.to_string()))?;
        fs::write(&self.path, content)?;
        debug!(path = self.path.display().to_string(); "Persisted state written");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use atelier::{geometry::Point, identifier::ArtifactId};

    use super::*;

    #[test]
    fn test_missing_file_loads_none() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = JsonFileStore::new(dir.path().join("state.json"));
        assert!(store.load().unwrap().is_none());
    }

    #[test]
    fn test_save_load_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = JsonFileStore::new(dir.path().join("state.json"));

        let mut state = PersistedState::default();
        state.set_custom_position(ArtifactId::new("01-home"), Point::new(100.0, 225.0));
        store.save(&state).unwrap();

        let restored = store.load().unwrap().unwrap();
        assert_eq!(restored, state);
    }

    #[test]
    fn test_corrupt_file_reports_state_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state.json");
        fs::write(&path, "{ not json").unwrap();

        let mut store = JsonFileStore::new(path);
        assert!(matches!(store.load(), Err(AtelierError::State(_))));
    }
}
