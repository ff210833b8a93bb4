//! Configuration types for agent and session creation.

use std::path::PathBuf;

use crate::{Error, Result, q_learning::Role, session::RewardSchedule, tictactoe::Mark};

/// Configuration for creating an agent.
///
/// # Examples
///
/// ```
/// use tdtactoe::{app::AgentConfig, tictactoe::Mark};
///
/// let config = AgentConfig::autonomous("Bot AIBA", Mark::O)
///     .with_alpha(0.95)
///     .with_gamma(0.95)
///     .with_epsilon(0.95)
///     .with_seed(42);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone)]
pub struct AgentConfig {
    /// Display name
    pub name: String,
    /// Who chooses the moves
    pub role: Role,
    /// Mark placed on the board
    pub mark: Mark,
    /// Learning rate α
    pub alpha: f64,
    /// Discount factor γ
    pub gamma: f64,
    /// Exploration probability ε
    pub epsilon: f64,
    /// Random seed for reproducibility
    pub seed: Option<u64>,
}

impl AgentConfig {
    /// Autonomous agent with α = γ = ε = 0.95
    pub fn autonomous(name: impl Into<String>, mark: Mark) -> Self {
        Self {
            name: name.into(),
            role: Role::Autonomous,
            mark,
            alpha: 0.95,
            gamma: 0.95,
            epsilon: 0.95,
            seed: None,
        }
    }

    /// Agent whose moves come from a person
    pub fn human(name: impl Into<String>, mark: Mark) -> Self {
        Self {
            role: Role::HumanControlled,
            ..Self::autonomous(name, mark)
        }
    }

    pub fn with_alpha(mut self, alpha: f64) -> Self {
        self.alpha = alpha;
        self
    }

    pub fn with_gamma(mut self, gamma: f64) -> Self {
        self.gamma = gamma;
        self
    }

    pub fn with_epsilon(mut self, epsilon: f64) -> Self {
        self.epsilon = epsilon;
        self
    }

    /// Set the random seed for deterministic behavior.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// ε must lie in [0, 1]; α and γ only need to be finite.
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.epsilon) {
            return Err(Error::config(format!(
                "epsilon for '{}' must be in [0, 1], got {}",
                self.name, self.epsilon
            )));
        }
        if !self.alpha.is_finite() || !self.gamma.is_finite() {
            return Err(Error::config(format!(
                "alpha and gamma for '{}' must be finite",
                self.name
            )));
        }
        Ok(())
    }
}

/// Configuration of a playing session.
///
/// Uses these defaults:
/// - Board size: 3
/// - Iteration budget: 30000 plies
/// - Checkpoint every 100 plies to `session.json`
/// - Rewards: win +100, draw +10, any other ply −1
#[derive(Debug, Clone)]
pub struct SessionConfig {
    pub board_size: usize,
    /// Plies to play before the session stops
    pub iteration_budget: usize,
    /// Plies between checkpoints (0 disables checkpointing)
    pub checkpoint_interval: usize,
    pub checkpoint_path: PathBuf,
    pub rewards: RewardSchedule,
}

impl SessionConfig {
    pub fn new() -> Self {
        Self {
            board_size: 3,
            iteration_budget: 30_000,
            checkpoint_interval: 100,
            checkpoint_path: PathBuf::from("session.json"),
            rewards: RewardSchedule::default(),
        }
    }

    pub fn with_board_size(mut self, size: usize) -> Self {
        self.board_size = size;
        self
    }

    pub fn with_iteration_budget(mut self, budget: usize) -> Self {
        self.iteration_budget = budget;
        self
    }

    pub fn with_checkpoint_interval(mut self, interval: usize) -> Self {
        self.checkpoint_interval = interval;
        self
    }

    pub fn with_checkpoint_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.checkpoint_path = path.into();
        self
    }

    pub fn with_rewards(mut self, rewards: RewardSchedule) -> Self {
        self.rewards = rewards;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.board_size == 0 {
            return Err(Error::config("board size must be at least 1"));
        }
        Ok(())
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self::new()
    }
}
