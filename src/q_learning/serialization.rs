//! Serialization support for value tables and agents.
//!
//! Marks are not valid map keys in every format, so state keys are written as
//! flat integer arrays. [`MarkSentinels`] is the reversible codec between a
//! mark and the negative integer that stands in for it.

use serde::{Deserialize, Serialize};

use crate::{
    Error, Result,
    q_learning::{
        agent::{Role, Stats},
        value_table::ValueTable,
    },
    tictactoe::Mark,
    types::{StateKey, Triple},
};

/// Reversible mark↔integer codec for state keys.
///
/// Session files always use [`MarkSentinels::default`] (X = −10, O = −20);
/// other pairs are only for encoding keys by hand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MarkSentinels {
    x: i64,
    o: i64,
}

impl MarkSentinels {
    /// Sentinels must be negative (so they cannot be mistaken for
    /// coordinates) and distinct.
    pub fn new(x: i64, o: i64) -> Result<Self> {
        if x >= 0 || o >= 0 || x == o {
            return Err(Error::config(format!(
                "mark sentinels must be distinct negative integers, got X={x}, O={o}"
            )));
        }
        Ok(Self { x, o })
    }

    pub fn sentinel(&self, mark: Mark) -> i64 {
        match mark {
            Mark::X => self.x,
            Mark::O => self.o,
        }
    }

    pub fn mark(&self, value: i64) -> Option<Mark> {
        if value == self.x {
            Some(Mark::X)
        } else if value == self.o {
            Some(Mark::O)
        } else {
            None
        }
    }

    /// Flatten a key into `[row, col, sentinel, row, col, sentinel, ...]`
    pub fn encode(&self, key: &StateKey) -> Vec<i64> {
        key.triples()
            .iter()
            .flat_map(|t| [t.row as i64, t.col as i64, self.sentinel(t.mark)])
            .collect()
    }

    /// Inverse of [`MarkSentinels::encode`].
    ///
    /// # Errors
    ///
    /// Returns `SerializationSchemaMismatch` if the array is empty, its length
    /// is not a multiple of three, a coordinate is negative, or a mark slot
    /// holds something other than a sentinel.
    pub fn decode(&self, raw: &[i64]) -> Result<StateKey> {
        if raw.is_empty() || !raw.len().is_multiple_of(3) {
            return Err(Error::schema(format!(
                "state key of length {} is not a non-empty sequence of triples",
                raw.len()
            )));
        }

        let coordinate = |value: i64| {
            usize::try_from(value)
                .map_err(|_| Error::schema(format!("invalid coordinate {value} in state key")))
        };

        let triples = raw
            .chunks_exact(3)
            .map(|chunk| -> Result<Triple> {
                let mark = self
                    .mark(chunk[2])
                    .ok_or_else(|| Error::schema(format!("unknown mark sentinel {}", chunk[2])))?;
                Ok(Triple {
                    row: coordinate(chunk[0])?,
                    col: coordinate(chunk[1])?,
                    mark,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(StateKey::from_triples(triples))
    }
}

impl Default for MarkSentinels {
    fn default() -> Self {
        Self { x: -10, o: -20 }
    }
}

/// Persisted form of one agent
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentSnapshot {
    pub name: String,
    pub role: Role,
    pub mark: Mark,
    pub value_table: ValueTable,
    pub alpha: f64,
    pub gamma: f64,
    pub epsilon: f64,
    #[serde(default)]
    pub rng_seed: Option<u64>,
    pub stats: Stats,
    pub state: StateKey,
    pub prev_state: StateKey,
}

impl AgentSnapshot {
    /// Check the fields a well-formed snapshot must satisfy.
    pub fn validate(&self) -> Result<()> {
        for (label, key) in [("state", &self.state), ("prev_state", &self.prev_state)] {
            if key.triples().first().map(|t| t.mark) != Some(self.mark) {
                return Err(Error::schema(format!(
                    "{label} of agent '{}' does not start from its own mark {}",
                    self.name, self.mark
                )));
            }
        }
        if !self.alpha.is_finite() || !self.gamma.is_finite() {
            return Err(Error::schema(format!(
                "agent '{}' has non-finite coefficients",
                self.name
            )));
        }
        if !(0.0..=1.0).contains(&self.epsilon) {
            return Err(Error::schema(format!(
                "agent '{}' has epsilon {} outside [0, 1]",
                self.name, self.epsilon
            )));
        }
        if let Some((key, value)) = self.value_table.iter().find(|(_, v)| !v.is_finite()) {
            return Err(Error::schema(format!(
                "agent '{}' has non-finite value {value} for {key}",
                self.name
            )));
        }
        Ok(())
    }
}
