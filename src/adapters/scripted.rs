//! Non-interactive collaborators for headless sessions and tests

use std::collections::VecDeque;

use crate::{
    Error, Result,
    ports::{MoveInput, Presenter},
    tictactoe::Board,
};

/// Replays a fixed list of input lines, then reports the input as closed.
#[derive(Debug, Default)]
pub struct ScriptedInput {
    lines: VecDeque<String>,
    rejections: Vec<Error>,
}

impl ScriptedInput {
    pub fn new<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            lines: lines.into_iter().map(Into::into).collect(),
            rejections: Vec::new(),
        }
    }

    /// Lines still waiting to be read
    pub fn remaining(&self) -> usize {
        self.lines.len()
    }

    /// Every rejection reported so far, oldest first.
    ///
    /// Reasons other than the board and parse errors are kept as
    /// `MalformedInput` carrying the original message.
    pub fn rejections(&self) -> &[Error] {
        &self.rejections
    }
}

impl MoveInput for ScriptedInput {
    fn read_move(&mut self) -> Result<String> {
        self.lines.pop_front().ok_or(Error::InputClosed)
    }

    fn reject(&mut self, reason: &Error) {
        log::debug!("scripted input rejected: {reason}");
        self.rejections.push(match reason {
            Error::OutOfBounds { row, col, size } => Error::OutOfBounds {
                row: *row,
                col: *col,
                size: *size,
            },
            Error::CellOccupied { row, col } => Error::CellOccupied {
                row: *row,
                col: *col,
            },
            Error::MalformedInput { input, reason } => Error::MalformedInput {
                input: input.clone(),
                reason: reason.clone(),
            },
            other => Error::MalformedInput {
                input: String::new(),
                reason: other.to_string(),
            },
        });
    }
}

/// Presenter that shows nothing
#[derive(Debug, Default, Clone, Copy)]
pub struct NullPresenter;

impl Presenter for NullPresenter {
    fn render(&mut self, _board: &Board) {}
}
