use std::collections::HashMap;

use anamnese_core::models::assessment::AssessmentState;

use crate::error::StorageError;

/// Repository of live interview sessions, one per user.
///
/// Implementations need no internal locking: the engine holds the store
/// exclusively and callers serialise turns for the same user.
pub trait SessionStore {
    fn get(&self, user_id: &str) -> Result<Option<AssessmentState>, StorageError>;

    /// Insert or replace the session for `state.user_id`.
    fn put(&mut self, state: AssessmentState) -> Result<(), StorageError>;

    /// Remove the session for `user_id`. Removing a missing session is a no-op.
    fn delete(&mut self, user_id: &str) -> Result<(), StorageError>;

    /// Every user with a stored session, sorted.
    fn user_ids(&self) -> Result<Vec<String>, StorageError>;
}

/// Process-local store. Sessions vanish when the process exits.
#[derive(Debug, Default)]
pub struct MemoryStore {
    sessions: HashMap<String, AssessmentState>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStore for MemoryStore {
    fn get(&self, user_id: &str) -> Result<Option<AssessmentState>, StorageError> {
        Ok(self.sessions.get(user_id).cloned())
    }

    fn put(&mut self, state: AssessmentState) -> Result<(), StorageError> {
        self.sessions.insert(state.user_id.clone(), state);
        Ok(())
    }

    fn delete(&mut self, user_id: &str) -> Result<(), StorageError> {
        self.sessions.remove(user_id);
        Ok(())
    }

    fn user_ids(&self) -> Result<Vec<String>, StorageError> {
        let mut ids: Vec<String> = self.sessions.keys().cloned().collect();
        ids.sort();
        Ok(ids)
    }
}

impl<S: SessionStore + ?Sized> SessionStore for Box<S> {
    fn get(&self, user_id: &str) -> Result<Option<AssessmentState>, StorageError> {
        (**self).get(user_id)
    }

    fn put(&mut self, state: AssessmentState) -> Result<(), StorageError> {
        (**self).put(state)
    }

    fn delete(&mut self, user_id: &str) -> Result<(), StorageError> {
        (**self).delete(user_id)
    }

    fn user_ids(&self) -> Result<Vec<String>, StorageError> {
        (**self).user_ids()
    }
}
