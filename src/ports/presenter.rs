//! Presenter port - purely observational board output

use crate::tictactoe::Board;

/// Receives the board before every move and after every finished match.
pub trait Presenter {
    fn render(&mut self, board: &Board);
}
