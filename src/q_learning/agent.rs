//! Human-controlled and autonomous agents
//!
//! Both kinds share the same capability set: pick a move, commit it to the
//! running state key, learn from the reward, and restart between matches.
//! Only autonomous agents consult their policy or update their value table.

use serde::{Deserialize, Serialize};

use crate::{
    Error, Result,
    app::AgentConfig,
    ports::MoveInput,
    q_learning::{policy::EpsilonGreedy, serialization::AgentSnapshot, value_table::ValueTable},
    tictactoe::{Board, Mark, Position},
    types::StateKey,
};

/// Who decides an agent's moves
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    HumanControlled,
    Autonomous,
}

/// Result of a match from one agent's point of view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MatchResult {
    Win,
    Loss,
    Draw,
}

/// Lifetime match statistics
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stats {
    pub wins: usize,
    #[serde(rename = "loses")]
    pub losses: usize,
    pub draws: usize,
}

impl Stats {
    pub fn total(&self) -> usize {
        self.wins + self.losses + self.draws
    }
}

/// How moves are produced
#[derive(Debug, Clone)]
pub enum AgentKind {
    HumanControlled,
    Autonomous(EpsilonGreedy),
}

#[derive(Debug, Clone)]
pub struct Agent {
    name: String,
    mark: Mark,
    kind: AgentKind,
    value_table: ValueTable,
    alpha: f64,
    gamma: f64,
    epsilon: f64,
    stats: Stats,
    state: StateKey,
    prev_state: StateKey,
}

impl Agent {
    /// Build an agent from a validated configuration
    pub fn from_config(config: &AgentConfig) -> Result<Self> {
        config.validate()?;
        let kind = match config.role {
            Role::HumanControlled => AgentKind::HumanControlled,
            Role::Autonomous => AgentKind::Autonomous(EpsilonGreedy::new(config.seed)),
        };
        Ok(Self {
            name: config.name.clone(),
            mark: config.mark,
            kind,
            value_table: ValueTable::new(),
            alpha: config.alpha,
            gamma: config.gamma,
            epsilon: config.epsilon,
            stats: Stats::default(),
            state: StateKey::initial(config.mark),
            prev_state: StateKey::initial(config.mark),
        })
    }

    /// Rebuild an agent exactly as it was persisted
    pub fn from_snapshot(snapshot: AgentSnapshot) -> Result<Self> {
        snapshot.validate()?;
        let kind = match snapshot.role {
            Role::HumanControlled => AgentKind::HumanControlled,
            Role::Autonomous => AgentKind::Autonomous(EpsilonGreedy::new(snapshot.rng_seed)),
        };
        Ok(Self {
            name: snapshot.name,
            mark: snapshot.mark,
            kind,
            value_table: snapshot.value_table,
            alpha: snapshot.alpha,
            gamma: snapshot.gamma,
            epsilon: snapshot.epsilon,
            stats: snapshot.stats,
            state: snapshot.state,
            prev_state: snapshot.prev_state,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn mark(&self) -> Mark {
        self.mark
    }

    pub fn role(&self) -> Role {
        match self.kind {
            AgentKind::HumanControlled => Role::HumanControlled,
            AgentKind::Autonomous(_) => Role::Autonomous,
        }
    }

    pub fn is_autonomous(&self) -> bool {
        matches!(self.kind, AgentKind::Autonomous(_))
    }

    pub fn value_table(&self) -> &ValueTable {
        &self.value_table
    }

    pub fn value_table_mut(&mut self) -> &mut ValueTable {
        &mut self.value_table
    }

    pub fn stats(&self) -> Stats {
        self.stats
    }

    pub fn state(&self) -> &StateKey {
        &self.state
    }

    pub fn prev_state(&self) -> &StateKey {
        &self.prev_state
    }

    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    pub fn gamma(&self) -> f64 {
        self.gamma
    }

    pub fn epsilon(&self) -> f64 {
        self.epsilon
    }

    pub fn set_epsilon(&mut self, epsilon: f64) -> Result<()> {
        if !(0.0..=1.0).contains(&epsilon) {
            return Err(Error::config(format!(
                "epsilon for '{}' must be in [0, 1], got {epsilon}",
                self.name
            )));
        }
        self.epsilon = epsilon;
        Ok(())
    }

    /// Pick the next move.
    ///
    /// Autonomous agents ask their policy. Human-controlled agents read from
    /// `input` until a well-formed, in-bounds, empty cell is given; every
    /// refused line is passed back through [`MoveInput::reject`].
    pub fn decide_move(&mut self, board: &Board, input: &mut dyn MoveInput) -> Result<Position> {
        match &mut self.kind {
            AgentKind::Autonomous(policy) => policy.choose(
                &self.state,
                self.mark,
                &board.legal_actions(),
                &mut self.value_table,
                self.epsilon,
            ),
            AgentKind::HumanControlled => loop {
                let raw = input.read_move()?;
                let checked = raw.parse::<Position>().and_then(|pos| {
                    if board.is_occupied(pos)? {
                        Err(Error::CellOccupied {
                            row: pos.row,
                            col: pos.col,
                        })
                    } else {
                        Ok(pos)
                    }
                });
                match checked {
                    Ok(pos) => return Ok(pos),
                    Err(err) if err.is_reprompt() => input.reject(&err),
                    Err(err) => return Err(err),
                }
            },
        }
    }

    /// Record this agent's own move in its running state key
    pub fn commit_move(&mut self, pos: Position) {
        if self.is_autonomous() {
            self.prev_state = self.state.clone();
        }
        self.state.push(pos, self.mark);
    }

    /// Record the opponent's move in this agent's running state key
    pub fn observe(&mut self, pos: Position, mark: Mark) {
        self.state.push(pos, mark);
    }

    /// TD update of `prev_state` after this agent's own move.
    ///
    /// The next-state estimate is the best candidate over the board's
    /// remaining legal actions. Returns the updated value, or `None` when no
    /// update happened (human agent, or no legal actions left).
    pub fn learn(&mut self, reward: f64, board: &Board) -> Option<f64> {
        if !self.is_autonomous() {
            return None;
        }

        self.value_table.get_or_insert(&self.prev_state);
        let candidates =
            EpsilonGreedy::candidate_keys(&self.state, self.mark, &board.legal_actions());
        let (_, next_max) = self.value_table.best_action_among(&candidates)?;

        Some(self.value_table.update_td(
            &self.prev_state,
            reward,
            next_max,
            self.alpha,
            self.gamma,
        ))
    }

    /// Reset the running keys for a new match; knowledge and stats persist
    pub fn restart(&mut self) {
        self.state = StateKey::initial(self.mark);
        self.prev_state = StateKey::initial(self.mark);
    }

    pub fn record_outcome(&mut self, result: MatchResult) {
        match result {
            MatchResult::Win => self.stats.wins += 1,
            MatchResult::Loss => self.stats.losses += 1,
            MatchResult::Draw => self.stats.draws += 1,
        }
    }

    pub fn snapshot(&self) -> AgentSnapshot {
        AgentSnapshot {
            name: self.name.clone(),
            role: self.role(),
            mark: self.mark,
            value_table: self.value_table.clone(),
            alpha: self.alpha,
            gamma: self.gamma,
            epsilon: self.epsilon,
            rng_seed: match &self.kind {
                AgentKind::Autonomous(policy) => policy.seed(),
                AgentKind::HumanControlled => None,
            },
            stats: self.stats,
            state: self.state.clone(),
            prev_state: self.prev_state.clone(),
        }
    }

    /// Adopt the learned part of a snapshot: value table, coefficients and
    /// statistics. Identity and role stay as configured.
    pub(crate) fn restore_knowledge(&mut self, snapshot: &AgentSnapshot) {
        if snapshot.role != self.role() {
            log::warn!(
                "restoring knowledge of {:?} agent '{}' into {:?} agent '{}'",
                snapshot.role,
                snapshot.name,
                self.role(),
                self.name
            );
        }
        self.value_table = snapshot.value_table.clone();
        self.alpha = snapshot.alpha;
        self.gamma = snapshot.gamma;
        self.epsilon = snapshot.epsilon;
        self.stats = snapshot.stats;
    }

    pub(crate) fn restore_trajectory(&mut self, state: StateKey, prev_state: StateKey) {
        self.state = state;
        self.prev_state = prev_state;
    }
}
