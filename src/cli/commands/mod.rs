//! CLI commands

pub mod play;
pub mod train;

use std::path::Path;

use anyhow::Context;
use clap::ValueEnum;

use crate::{
    adapters::{JsonRepository, MsgPackRepository},
    ports::SessionRepository,
    session::{MatchController, RestoreSelection},
};

/// On-disk encoding of the session file
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StateFormat {
    Json,
    Msgpack,
}

impl StateFormat {
    pub fn repository(self) -> Box<dyn SessionRepository> {
        match self {
            StateFormat::Json => Box::new(JsonRepository::pretty()),
            StateFormat::Msgpack => Box::new(MsgPackRepository::new()),
        }
    }
}

/// Which agents keep their learned tables when resuming
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum RestoreArg {
    Both,
    First,
    Second,
    Neither,
}

impl From<RestoreArg> for RestoreSelection {
    fn from(arg: RestoreArg) -> Self {
        match arg {
            RestoreArg::Both => RestoreSelection::Both,
            RestoreArg::First => RestoreSelection::First,
            RestoreArg::Second => RestoreSelection::Second,
            RestoreArg::Neither => RestoreSelection::Neither,
        }
    }
}

/// Resume from `path` if requested, falling back to a fresh session when the
/// file is missing or unreadable.
pub(crate) fn resume(controller: &mut MatchController, restore: Option<RestoreArg>, path: &Path) {
    let Some(restore) = restore else {
        return;
    };
    if let Err(err) = controller.try_restore(restore.into()) {
        log::warn!(
            "could not resume from {}: {err}; starting fresh",
            path.display()
        );
    }
}

pub(crate) fn save_final(controller: &MatchController) -> anyhow::Result<()> {
    controller.checkpoint().with_context(|| {
        format!(
            "failed to save session to {}",
            controller.config().checkpoint_path.display()
        )
    })
}
