//! Application layer: configuration of agents and sessions.
//!
//! ```
//! use tdtactoe::app::{AgentConfig, SessionConfig};
//! use tdtactoe::tictactoe::Mark;
//!
//! let session = SessionConfig::new()
//!     .with_iteration_budget(1000)
//!     .with_checkpoint_path("first_game.json");
//! let bot = AgentConfig::autonomous("Bot Meshok", Mark::X)
//!     .with_alpha(1.2)
//!     .with_gamma(0.8)
//!     .with_epsilon(0.9);
//! # assert!(session.validate().is_ok() && bot.validate().is_ok());
//! ```

pub mod config;

pub use config::{AgentConfig, SessionConfig};
