//! Per-ply reward schedule

use crate::tictactoe::GameStatus;

/// Reward given to the agent that just moved.
///
/// Only the mover is rewarded, so a winning ply always earns `win`; there is
/// no loss reward because the waiting agent is never updated.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RewardSchedule {
    pub win: f64,
    pub draw: f64,
    /// Every non-terminal ply
    pub step: f64,
}

impl RewardSchedule {
    pub fn reward_for(&self, status: GameStatus) -> f64 {
        match status {
            GameStatus::Win(_) => self.win,
            GameStatus::Draw => self.draw,
            GameStatus::InProgress => self.step,
        }
    }
}

impl Default for RewardSchedule {
    fn default() -> Self {
        Self {
            win: 100.0,
            draw: 10.0,
            step: -1.0,
        }
    }
}
