//! In-memory session repository for testing.
//!
//! This adapter keeps serialized snapshots in memory, enabling fast tests
//! without any file system I/O.

use std::{
    collections::HashMap,
    path::Path,
    sync::{Arc, Mutex},
};

use super::ensure_loadable;
use crate::{Error, Result, ports::SessionRepository, session::SessionSnapshot};

#[derive(Default)]
struct Storage {
    entries: HashMap<String, Vec<u8>>,
    saves: usize,
}

/// In-memory repository for testing.
///
/// Snapshots are stored as MessagePack bytes so they go through the same
/// encoding path as a real file. All clones share the same storage.
///
/// # Examples
///
/// ```
/// use tdtactoe::adapters::InMemoryRepository;
///
/// let repo = InMemoryRepository::new();
/// let handle = repo.clone();
/// assert_eq!(handle.save_count(), 0);
/// ```
#[derive(Clone, Default)]
pub struct InMemoryRepository {
    storage: Arc<Mutex<Storage>>,
}

impl InMemoryRepository {
    /// Create a new empty in-memory repository.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of `save` calls made so far
    pub fn save_count(&self) -> usize {
        self.storage.lock().unwrap().saves
    }

    /// Get the number of snapshots currently stored.
    pub fn count(&self) -> usize {
        self.storage.lock().unwrap().entries.len()
    }

    /// Check if a snapshot exists at the given path.
    pub fn contains(&self, path: &Path) -> bool {
        let key = path.to_string_lossy().to_string();
        self.storage.lock().unwrap().entries.contains_key(&key)
    }

    /// Store raw bytes at a path, bypassing encoding.
    pub fn insert_raw(&self, path: &Path, bytes: Vec<u8>) {
        let key = path.to_string_lossy().to_string();
        self.storage.lock().unwrap().entries.insert(key, bytes);
    }
}

impl SessionRepository for InMemoryRepository {
    fn save(&self, snapshot: &SessionSnapshot, path: &Path) -> Result<()> {
        ensure_loadable(snapshot, path)?;
        let key = path.to_string_lossy().to_string();

        let bytes =
            rmp_serde::to_vec_named(snapshot).map_err(|e| Error::PersistenceUnavailable {
                operation: "serialize session for in-memory storage".to_string(),
                message: e.to_string(),
            })?;

        let mut storage = self.storage.lock().unwrap();
        storage.saves += 1;
        storage.entries.insert(key, bytes);
        Ok(())
    }

    fn load(&self, path: &Path) -> Result<SessionSnapshot> {
        let key = path.to_string_lossy().to_string();
        let storage = self.storage.lock().unwrap();

        let bytes = storage
            .entries
            .get(&key)
            .ok_or_else(|| Error::PersistenceUnavailable {
                operation: format!("load session from in-memory storage at {}", path.display()),
                message: "key not found in memory".to_string(),
            })?;

        rmp_serde::from_slice(bytes).map_err(|e| Error::schema(e.to_string()))
    }
}
