//! Game status and outcomes

use serde::{Deserialize, Serialize};

use super::board::Mark;

/// Outcome of a finished match
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameOutcome {
    Win(Mark),
    Draw,
}

/// Result of checking a board for a terminal state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameStatus {
    InProgress,
    Draw,
    Win(Mark),
}

impl GameStatus {
    pub fn is_terminal(self) -> bool {
        self != GameStatus::InProgress
    }

    /// The final outcome, if the match is over
    pub fn outcome(self) -> Option<GameOutcome> {
        match self {
            GameStatus::InProgress => None,
            GameStatus::Draw => Some(GameOutcome::Draw),
            GameStatus::Win(mark) => Some(GameOutcome::Win(mark)),
        }
    }
}
