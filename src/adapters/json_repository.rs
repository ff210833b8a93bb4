//! JSON implementation of the session repository.

use std::{fs::File, io::BufReader, path::Path};

use super::{ensure_loadable, unavailable, write_replacing};
use crate::{Error, Result, ports::SessionRepository, session::SessionSnapshot};

/// Human-readable session files via `serde_json`.
///
/// # Examples
///
/// ```no_run
/// use std::path::Path;
///
/// use tdtactoe::{adapters::JsonRepository, ports::SessionRepository};
///
/// let repo = JsonRepository::new();
/// let snapshot = repo.load(Path::new("first_game.json"))?;
/// println!("resuming at iteration {}", snapshot.iteration);
/// # Ok::<(), tdtactoe::Error>(())
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonRepository {
    pretty: bool,
}

impl JsonRepository {
    pub fn new() -> Self {
        Self { pretty: false }
    }

    /// Indent the written JSON
    pub fn pretty() -> Self {
        Self { pretty: true }
    }
}

impl SessionRepository for JsonRepository {
    fn save(&self, snapshot: &SessionSnapshot, path: &Path) -> Result<()> {
        ensure_loadable(snapshot, path)?;
        write_replacing(path, |writer| {
            if self.pretty {
                serde_json::to_writer_pretty(writer, snapshot)?;
            } else {
                serde_json::to_writer(writer, snapshot)?;
            }
            Ok(())
        })
    }

    fn load(&self, path: &Path) -> Result<SessionSnapshot> {
        let file = File::open(path).map_err(|e| unavailable("open", path, e))?;
        let reader = BufReader::new(file);

        serde_json::from_reader(reader).map_err(|e| {
            if e.is_io() {
                unavailable("read", path, e)
            } else {
                Error::schema(format!("{}: {e}", path.display()))
            }
        })
    }
}
