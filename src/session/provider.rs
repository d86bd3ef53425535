use std::sync::{Arc, Mutex};

use log::info;
use uuid::Uuid;

use crate::core::InsightError;

use super::store::KeyValueStore;

pub const SESSION_KEY: &str = "sessionId";

/// Read-through accessor for the persisted session id.
///
/// One provider is built per process and shared by `Arc`; it keeps no copy of
/// the id, so a clear is visible to every holder on their next read.
pub struct SessionProvider {
    store: Arc<dyn KeyValueStore>,
    create_lock: Mutex<()>,
}

impl SessionProvider {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self {
            store,
            create_lock: Mutex::new(()),
        }
    }

    pub fn store(&self) -> &Arc<dyn KeyValueStore> {
        &self.store
    }

    /// Returns the stored id, generating and persisting a fresh one first if
    /// none exists.
    pub fn session_id(&self) -> Result<String, InsightError> {
        let _guard = self
            .create_lock
            .lock()
            .map_err(|_| InsightError::Storage("session lock poisoned".to_string()))?;

        if let Some(id) = self.store.get(SESSION_KEY)?.filter(|id| !id.is_empty()) {
            return Ok(id);
        }

        let id = Uuid::new_v4().to_string();
        self.store.set(SESSION_KEY, &id)?;
        info!("created new session {id}");
        Ok(id)
    }

    /// Current id without creating one. An empty stored id counts as absent.
    pub fn peek(&self) -> Result<Option<String>, InsightError> {
        Ok(self.store.get(SESSION_KEY)?.filter(|id| !id.is_empty()))
    }

    pub fn clear(&self) -> Result<(), InsightError> {
        self.store.remove(SESSION_KEY)?;
        info!("cleared session");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;
    use crate::session::{FileStore, MemoryStore};
    use tempfile::TempDir;

    #[test]
    fn test_first_read_creates_and_persists() {
        let store = Arc::new(MemoryStore::new());
        let provider = SessionProvider::new(store.clone());

        let id = provider.session_id().unwrap();
        assert_eq!(store.get(SESSION_KEY).unwrap(), Some(id.clone()));
        assert_eq!(provider.session_id().unwrap(), id);
    }

    #[test]
    fn test_id_is_a_uuid() {
        let provider = SessionProvider::new(Arc::new(MemoryStore::new()));
        let id = provider.session_id().unwrap();
        assert!(Uuid::parse_str(&id).is_ok());
    }

    #[test]
    fn test_clear_then_read_issues_new_id() {
        let provider = SessionProvider::new(Arc::new(MemoryStore::new()));
        let mut seen = HashSet::new();
        for _ in 0..5 {
            let id = provider.session_id().unwrap();
            assert!(seen.insert(id));
            provider.clear().unwrap();
            assert_eq!(provider.peek().unwrap(), None);
        }
    }

    #[test]
    fn test_empty_stored_id_is_absent() {
        let store = Arc::new(MemoryStore::new());
        store.set(SESSION_KEY, "").unwrap();
        let provider = SessionProvider::new(store);

        assert_eq!(provider.peek().unwrap(), None);
        let id = provider.session_id().unwrap();
        assert!(!id.is_empty());
        assert_eq!(provider.peek().unwrap(), Some(id));
    }

    #[test]
    fn test_existing_id_is_reused_across_providers() {
        let dir = TempDir::new().unwrap();
        let first = SessionProvider::new(Arc::new(FileStore::open(dir.path()).unwrap()));
        let id = first.session_id().unwrap();

        let second = SessionProvider::new(Arc::new(FileStore::open(dir.path()).unwrap()));
        assert_eq!(second.session_id().unwrap(), id);
    }

    #[test]
    fn test_concurrent_first_reads_agree() {
        let provider = Arc::new(SessionProvider::new(Arc::new(MemoryStore::new())));
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let provider = provider.clone();
                std::thread::spawn(move || provider.session_id().unwrap())
            })
            .collect();
        let ids: HashSet<String> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        assert_eq!(ids.len(), 1);
    }
}
