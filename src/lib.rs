//! Tabular temporal-difference agents for N×N tic-tac-toe
//!
//! This crate provides:
//! - An N×N board with row/column/diagonal win detection
//! - A value table keyed by full move histories, with a TD update rule
//! - An ε-greedy policy and human-controlled or autonomous agents
//! - A match controller that assigns rewards, restarts matches and
//!   checkpoints the whole session
//! - JSON, MessagePack and in-memory session repositories

pub mod adapters;
pub mod app;
pub mod cli;
pub mod error;
pub mod ports;
pub mod q_learning;
pub mod session;
pub mod tictactoe;
pub mod types;

#[cfg(test)]
pub(crate) mod test_support;

pub use error::{Error, Result};
pub use q_learning::{Agent, ValueTable};
pub use session::{MatchController, SessionSnapshot};
pub use types::StateKey;
