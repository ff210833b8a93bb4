//! State-value table for temporal difference learning

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::types::StateKey;

/// Sparse mapping from state keys to value estimates.
///
/// Missing keys read as 0.0 and are inserted on first access, so every state
/// the agent has looked at becomes part of the table.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(into = "Vec<(StateKey, f64)>", from = "Vec<(StateKey, f64)>")]
pub struct ValueTable {
    values: HashMap<StateKey, f64>,
}

impl ValueTable {
    /// Create an empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Read a value without inserting
    pub fn get(&self, key: &StateKey) -> Option<f64> {
        self.values.get(key).copied()
    }

    /// Read a value, inserting the neutral 0.0 first if the key is new
    pub fn get_or_insert(&mut self, key: &StateKey) -> f64 {
        if let Some(&value) = self.values.get(key) {
            return value;
        }
        self.values.insert(key.clone(), 0.0);
        0.0
    }

    pub fn set(&mut self, key: StateKey, value: f64) {
        self.values.insert(key, value);
    }

    /// Index and value of the highest-valued candidate.
    ///
    /// Every candidate is default-inserted. Ties go to the earliest candidate.
    /// Returns `None` for an empty candidate list.
    pub fn best_action_among(&mut self, candidates: &[StateKey]) -> Option<(usize, f64)> {
        let mut best: Option<(usize, f64)> = None;
        for (idx, key) in candidates.iter().enumerate() {
            let value = self.get_or_insert(key);
            match best {
                Some((_, best_value)) if value <= best_value => {}
                _ => best = Some((idx, value)),
            }
        }
        best
    }

    /// Temporal difference update of `prev_key`, returning the new value.
    ///
    /// V(s) ← V(s) + α·(r − V(s) + γ·max V(s'))
    ///
    /// The discounted next-state term is added to `r − V(s)`; learned tables
    /// depend on this exact form.
    pub fn update_td(
        &mut self,
        prev_key: &StateKey,
        reward: f64,
        next_max_value: f64,
        alpha: f64,
        gamma: f64,
    ) -> f64 {
        let current = self.get_or_insert(prev_key);
        let updated = current + alpha * (reward - current + gamma * next_max_value);
        self.values.insert(prev_key.clone(), updated);
        updated
    }

    /// Number of stored states
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&StateKey, f64)> {
        self.values.iter().map(|(k, &v)| (k, v))
    }
}

impl From<ValueTable> for Vec<(StateKey, f64)> {
    fn from(table: ValueTable) -> Self {
        let mut entries: Vec<(StateKey, f64)> = table.values.into_iter().collect();
        entries.sort_by(|(a, _), (b, _)| a.cmp(b));
        entries
    }
}

impl From<Vec<(StateKey, f64)>> for ValueTable {
    fn from(entries: Vec<(StateKey, f64)>) -> Self {
        Self {
            values: entries.into_iter().collect(),
        }
    }
}
