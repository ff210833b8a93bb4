//! Persisted form of a whole session

use serde::{Deserialize, Serialize};

use crate::{
    Error, Result,
    q_learning::AgentSnapshot,
    tictactoe::{Board, Cell},
};

/// One of the two places at the table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Seat {
    #[serde(rename = "agent_1")]
    First,
    #[serde(rename = "agent_2")]
    Second,
}

impl Seat {
    pub const BOTH: [Seat; 2] = [Seat::First, Seat::Second];

    pub fn index(self) -> usize {
        match self {
            Seat::First => 0,
            Seat::Second => 1,
        }
    }

    pub fn other(self) -> Seat {
        match self {
            Seat::First => Seat::Second,
            Seat::Second => Seat::First,
        }
    }
}

/// Everything needed to resume a session: both agents, the board, the turn
/// and the counters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub version: u32,
    pub agent_1: AgentSnapshot,
    pub agent_2: AgentSnapshot,
    pub turn: Seat,
    pub board_size: usize,
    pub board_cells: Vec<Vec<Cell>>,
    /// Plies played so far
    pub iteration: usize,
    pub iteration_budget: usize,
    /// Completed matches
    #[serde(default)]
    pub matches: usize,
}

impl SessionSnapshot {
    pub const VERSION: u32 = 1;

    pub fn agent(&self, seat: Seat) -> &AgentSnapshot {
        match seat {
            Seat::First => &self.agent_1,
            Seat::Second => &self.agent_2,
        }
    }

    /// Check internal consistency and rebuild the board.
    ///
    /// # Errors
    ///
    /// Returns `SerializationSchemaMismatch` for an unknown version, a board
    /// that is not `board_size` square, invalid agents, agents sharing a
    /// mark, or running state keys that disagree with the board contents.
    pub fn validate(&self) -> Result<Board> {
        if self.version != Self::VERSION {
            return Err(Error::schema(format!(
                "unsupported snapshot version {}, expected {}",
                self.version,
                Self::VERSION
            )));
        }

        let board = Board::from_rows(&self.board_cells)?;
        if board.size() != self.board_size {
            return Err(Error::schema(format!(
                "board_size is {} but board_cells is {}x{}",
                self.board_size,
                board.size(),
                board.size()
            )));
        }

        self.agent_1.validate()?;
        self.agent_2.validate()?;
        if self.agent_1.mark == self.agent_2.mark {
            return Err(Error::schema(format!(
                "both agents play {}",
                self.agent_1.mark
            )));
        }

        let plies = board.occupied_count();
        for agent in [&self.agent_1, &self.agent_2] {
            if agent.state.len() != plies + 1 {
                return Err(Error::schema(format!(
                    "state of '{}' records {} moves but the board holds {plies}",
                    agent.name,
                    agent.state.len() - 1
                )));
            }
        }

        Ok(board)
    }
}
