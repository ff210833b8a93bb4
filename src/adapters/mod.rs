//! Adapters implementing the engine's ports.
//!
//! Repositories persist [`crate::session::SessionSnapshot`]s; the console and
//! scripted adapters stand in for a person at the keyboard and a screen.

pub mod console;
pub mod in_memory_repository;
pub mod json_repository;
pub mod msgpack_repository;
pub mod scripted;

pub use console::{ConsolePresenter, StdinInput};
pub use in_memory_repository::InMemoryRepository;
pub use json_repository::JsonRepository;
pub use msgpack_repository::MsgPackRepository;
pub use scripted::{NullPresenter, ScriptedInput};

use std::{
    ffi::OsString,
    fs::{self, File},
    io::{BufWriter, Write},
    path::{Path, PathBuf},
};

use crate::{Error, Result, session::SessionSnapshot};

fn unavailable(operation: &str, path: &Path, err: impl std::fmt::Display) -> Error {
    Error::PersistenceUnavailable {
        operation: format!("{operation} {}", path.display()),
        message: err.to_string(),
    }
}

/// Refuse snapshots that would not load back, such as diverged values that
/// serialize as `null`.
fn ensure_loadable(snapshot: &SessionSnapshot, path: &Path) -> Result<()> {
    snapshot
        .validate()
        .map(|_| ())
        .map_err(|e| unavailable("save", path, e))
}

fn sibling_tmp(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_else(|| OsString::from("session"));
    name.push(".tmp");
    path.with_file_name(name)
}

/// Write through a sibling `.tmp` file that is renamed over `path` once
/// complete. On failure the previous file at `path` is untouched.
fn write_replacing<F>(path: &Path, write: F) -> Result<()>
where
    F: FnOnce(&mut BufWriter<File>) -> Result<()>,
{
    let tmp = sibling_tmp(path);
    let result = (|| -> Result<()> {
        let file = File::create(&tmp).map_err(|e| unavailable("create", &tmp, e))?;
        let mut writer = BufWriter::new(file);
        write(&mut writer)?;
        writer.flush().map_err(|e| unavailable("write", &tmp, e))?;
        drop(writer);
        fs::rename(&tmp, path).map_err(|e| unavailable("replace", path, e))
    })();

    if result.is_err() {
        let _ = fs::remove_file(&tmp);
    }
    result
}
