//! In-memory survey session registry.
//!
//! Each browser session drives one [`SurveyFlow`], keyed by a server-issued
//! uuid. Sessions are independent; the registry lock is held only for the
//! duration of a synchronous flow operation, never across an await.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use sha_core::SurveyFlow;
use sha_types::Segment;
use uuid::Uuid;

#[derive(Clone, Default)]
pub struct SessionRegistry {
    sessions: Arc<Mutex<HashMap<Uuid, SurveyFlow>>>,
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a fresh flow and returns its session id.
    pub fn create(&self, segment: Segment) -> Uuid {
        let id = Uuid::new_v4();
        self.sessions
            .lock()
            .expect("session lock poisoned")
            .insert(id, SurveyFlow::new(segment));
        id
    }

    /// Runs `f` against the session's flow, if it exists.
    pub fn with<T>(&self, id: Uuid, f: impl FnOnce(&mut SurveyFlow) -> T) -> Option<T> {
        self.sessions
            .lock()
            .expect("session lock poisoned")
            .get_mut(&id)
            .map(f)
    }

    /// Drops a session after its flow reaches the terminal state.
    pub fn remove(&self, id: Uuid) {
        self.sessions
            .lock()
            .expect("session lock poisoned")
            .remove(&id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_with_remove_lifecycle() {
        let registry = SessionRegistry::new();
        let id = registry.create(Segment::Hp);

        let segment = registry.with(id, |flow| flow.segment());
        assert_eq!(segment, Some(Segment::Hp));

        registry.remove(id);
        assert!(registry.with(id, |_| ()).is_none());
        assert!(registry.with(Uuid::new_v4(), |_| ()).is_none());
    }
}
