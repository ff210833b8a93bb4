//! ε-greedy action selection over a value table

use rand::{Rng, SeedableRng, rngs::StdRng, seq::IndexedRandom};

use crate::{
    Error, Result,
    q_learning::value_table::ValueTable,
    tictactoe::{Mark, Position},
    types::StateKey,
};

fn build_rng(seed: Option<u64>) -> StdRng {
    if let Some(seed) = seed {
        StdRng::seed_from_u64(seed)
    } else {
        StdRng::from_rng(&mut rand::rng())
    }
}

/// ε-greedy policy: explore uniformly with probability ε, otherwise pick the
/// action whose resulting state has the highest value.
#[derive(Debug, Clone)]
pub struct EpsilonGreedy {
    rng: StdRng,
    rng_seed: Option<u64>,
}

impl EpsilonGreedy {
    pub fn new(seed: Option<u64>) -> Self {
        Self {
            rng: build_rng(seed),
            rng_seed: seed,
        }
    }

    pub fn seed(&self) -> Option<u64> {
        self.rng_seed
    }

    /// Candidate next-state keys, one per legal action, in the same order
    pub fn candidate_keys(state: &StateKey, mark: Mark, legal: &[Position]) -> Vec<StateKey> {
        legal.iter().map(|&pos| state.extended(pos, mark)).collect()
    }

    /// Choose an action for `mark` from the current `state`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NoLegalActions`] if `legal` is empty.
    pub fn choose(
        &mut self,
        state: &StateKey,
        mark: Mark,
        legal: &[Position],
        table: &mut ValueTable,
        epsilon: f64,
    ) -> Result<Position> {
        if legal.is_empty() {
            return Err(Error::NoLegalActions);
        }

        if self.rng.random::<f64>() < epsilon {
            return legal.choose(&mut self.rng).copied().ok_or(Error::NoLegalActions);
        }

        let candidates = Self::candidate_keys(state, mark, legal);
        table
            .best_action_among(&candidates)
            .map(|(idx, _)| legal[idx])
            .ok_or(Error::NoLegalActions)
    }
}

impl Default for EpsilonGreedy {
    fn default() -> Self {
        Self::new(None)
    }
}
