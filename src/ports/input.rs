//! Move input port - where human-controlled agents get their moves

use crate::{Error, Result};

/// Source of raw move text for a human-controlled agent.
///
/// The engine parses the text itself; implementations only fetch lines and
/// relay rejections back to the person typing.
pub trait MoveInput {
    /// Block until the next line of move text is available.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InputClosed`] when no more input will arrive.
    fn read_move(&mut self) -> Result<String>;

    /// Called when the last line could not be used, before reading again.
    ///
    /// # Default Implementation
    ///
    /// Does nothing.
    fn reject(&mut self, _reason: &Error) {}
}
