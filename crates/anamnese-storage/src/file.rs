use std::path::{Path, PathBuf};

use anamnese_core::keys;
use anamnese_core::models::assessment::AssessmentState;

use crate::error::StorageError;
use crate::state::{load_state, save_state};
use crate::store::SessionStore;

/// Durable store: one JSON file per user under `<root>/sessions/`.
#[derive(Debug, Clone)]
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl SessionStore for FileStore {
    fn get(&self, user_id: &str) -> Result<Option<AssessmentState>, StorageError> {
        load_state(&self.root, &keys::session(user_id))
    }

    fn put(&mut self, state: AssessmentState) -> Result<(), StorageError> {
        let key = keys::session(&state.user_id);
        save_state(&self.root, &key, &state)?;
        tracing::debug!(key = %key, phase = %state.phase, "session saved");
        Ok(())
    }

    fn delete(&mut self, user_id: &str) -> Result<(), StorageError> {
        let path = self.root.join(keys::session(user_id));
        match std::fs::remove_file(&path) {
            Ok(()) => {
                tracing::debug!(path = %path.display(), "session deleted");
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(StorageError::io(path, e)),
        }
    }

    fn user_ids(&self) -> Result<Vec<String>, StorageError> {
        let dir = self.root.join("sessions");
        let entries = match std::fs::read_dir(&dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(StorageError::io(dir, e)),
        };

        let mut ids = Vec::new();
        for entry in entries {
            let path = entry.map_err(|e| StorageError::io(&dir, e))?.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some("json") {
                continue;
            }
            let bytes = std::fs::read(&path).map_err(|e| StorageError::io(&path, e))?;
            let state: AssessmentState = serde_json::from_slice(&bytes)?;
            ids.push(state.user_id);
        }
        ids.sort();
        Ok(ids)
    }
}
