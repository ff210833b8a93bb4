//! Match sessions: turn-taking, reward assignment and checkpointing
//!
//! A [`MatchController`] owns the board and both agents. Each call to
//! [`MatchController::step`] plays one ply:
//!
//! 1. the agent holding the turn picks a move, which is applied to the board
//! 2. the board is checked for a terminal state and the ply is rewarded
//! 3. an autonomous mover learns from that reward
//! 4. on a terminal state statistics are recorded and a new match begins
//! 5. the turn passes to the other agent, and every `checkpoint_interval`
//!    plies the whole session is saved

pub mod cancel;
pub mod controller;
pub mod reward;
pub mod snapshot;

pub use cancel::CancelToken;
pub use controller::{
    Checkpoint, MatchController, MatchPhase, PlyReport, RestoreSelection, SessionSummary,
};
pub use reward::RewardSchedule;
pub use snapshot::{Seat, SessionSnapshot};
