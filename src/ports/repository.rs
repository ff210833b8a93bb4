//! Repository port for session persistence.

use std::path::Path;

use crate::{Result, session::SessionSnapshot};

/// Port for persisting and loading session snapshots.
///
/// This trait abstracts the storage mechanism, allowing different
/// implementations (JSON, MessagePack, memory) without coupling the match
/// engine to a serialization format.
///
/// # Examples
///
/// ```no_run
/// use std::path::Path;
///
/// use tdtactoe::{ports::SessionRepository, session::SessionSnapshot};
///
/// fn backup<R: SessionRepository>(repo: &R, snapshot: &SessionSnapshot) -> tdtactoe::Result<()> {
///     repo.save(snapshot, Path::new("backup.json"))
/// }
/// ```
pub trait SessionRepository {
    /// Save a snapshot.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::PersistenceUnavailable`] if the target cannot
    /// be written.
    fn save(&self, snapshot: &SessionSnapshot, path: &Path) -> Result<()>;

    /// Load a snapshot.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::PersistenceUnavailable`] if nothing is stored
    /// at `path`, and [`crate::Error::SerializationSchemaMismatch`] if the
    /// stored data does not decode into a snapshot.
    fn load(&self, path: &Path) -> Result<SessionSnapshot>;
}
