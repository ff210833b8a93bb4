//! Tabular temporal difference learning
//!
//! Agents keep a [`ValueTable`] keyed by the full move history
//! ([`crate::types::StateKey`]) and choose moves with an [`EpsilonGreedy`]
//! policy. After each of its own moves an autonomous agent updates the state
//! it moved from:
//!
//! ```text
//! V(s) ← V(s) + α·(r − V(s) + γ·max V(s'))
//! ```
//!
//! where `s'` ranges over the states reachable by the agent's next move.
//!
//! ## Usage Example
//!
//! ```
//! use tdtactoe::{
//!     app::AgentConfig,
//!     q_learning::Agent,
//!     tictactoe::{Board, Mark},
//! };
//!
//! let mut agent = Agent::from_config(
//!     &AgentConfig::autonomous("bot", Mark::X)
//!         .with_epsilon(0.0)
//!         .with_seed(7),
//! )?;
//! let mut board = Board::new(3);
//! let mut input = tdtactoe::adapters::ScriptedInput::default();
//!
//! let pos = agent.decide_move(&board, &mut input)?;
//! board.place(pos, agent.mark())?;
//! agent.commit_move(pos);
//! agent.learn(-1.0, &board);
//! # Ok::<(), tdtactoe::Error>(())
//! ```

pub mod agent;
pub mod policy;
pub mod serialization;
pub mod value_table;

// Public re-exports
pub use agent::{Agent, AgentKind, MatchResult, Role, Stats};
pub use policy::EpsilonGreedy;
pub use serialization::{AgentSnapshot, MarkSentinels};
pub use value_table::ValueTable;
