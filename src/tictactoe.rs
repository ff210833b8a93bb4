//! N×N tic-tac-toe board and terminal-state detection

pub mod board;
pub mod game;
pub mod lines;

pub use board::{Board, Cell, Mark, Position};
pub use game::{GameOutcome, GameStatus};
pub use lines::LineAnalyzer;
