//! MessagePack implementation of the session repository.
//!
//! This adapter uses rmp_serde for compact binary session files.

use std::{fs::File, io::BufReader, path::Path};

use super::{ensure_loadable, unavailable, write_replacing};
use crate::{Error, Result, ports::SessionRepository, session::SessionSnapshot};

/// MessagePack-based session repository.
#[derive(Debug, Clone, Copy, Default)]
pub struct MsgPackRepository;

impl MsgPackRepository {
    /// Create a new MessagePack repository.
    pub fn new() -> Self {
        Self
    }
}

impl SessionRepository for MsgPackRepository {
    fn save(&self, snapshot: &SessionSnapshot, path: &Path) -> Result<()> {
        ensure_loadable(snapshot, path)?;
        write_replacing(path, |writer| {
            rmp_serde::encode::write_named(writer, snapshot).map_err(|e| {
                Error::PersistenceUnavailable {
                    operation: "serialize session to MessagePack".to_string(),
                    message: e.to_string(),
                }
            })
        })
    }

    fn load(&self, path: &Path) -> Result<SessionSnapshot> {
        let file = File::open(path).map_err(|e| unavailable("open", path, e))?;
        let reader = BufReader::new(file);

        rmp_serde::decode::from_read(reader)
            .map_err(|e| Error::schema(format!("{}: {e}", path.display())))
    }
}
