//! Newtype wrappers for state keys.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{
    q_learning::serialization::MarkSentinels,
    tictactoe::{Mark, Position},
};

/// One half-move: the cell and the mark that was (or would be) placed there.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Triple {
    pub row: usize,
    pub col: usize,
    pub mark: Mark,
}

impl Triple {
    pub fn new(pos: Position, mark: Mark) -> Self {
        Self {
            row: pos.row,
            col: pos.col,
            mark,
        }
    }

    pub fn position(&self) -> Position {
        Position::new(self.row, self.col)
    }
}

/// Ordered, append-only history of half-moves used as a value-table key.
///
/// Keys compare and hash by value. Every key starts from the empty triple
/// `(0, 0, mark)` of the agent that owns it, so its flattened length is always
/// a multiple of three.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(into = "Vec<i64>", try_from = "Vec<i64>")]
pub struct StateKey(Vec<Triple>);

impl StateKey {
    /// The empty-history key for an agent playing `mark`
    pub fn initial(mark: Mark) -> Self {
        StateKey(vec![Triple {
            row: 0,
            col: 0,
            mark,
        }])
    }

    pub(crate) fn from_triples(triples: Vec<Triple>) -> Self {
        StateKey(triples)
    }

    /// Append one half-move
    pub fn push(&mut self, pos: Position, mark: Mark) {
        self.0.push(Triple::new(pos, mark));
    }

    /// Candidate key for a hypothetical move, leaving `self` untouched
    #[must_use = "extended returns a new key; the original is unchanged"]
    pub fn extended(&self, pos: Position, mark: Mark) -> Self {
        let mut next = self.clone();
        next.push(pos, mark);
        next
    }

    pub fn triples(&self) -> &[Triple] {
        &self.0
    }

    /// Number of triples in the key
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for StateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self
            .0
            .iter()
            .map(|t| format!("{},{},{}", t.row, t.col, t.mark))
            .collect();
        write!(f, "({})", parts.join(", "))
    }
}

// On-disk keys always use the default sentinels.
impl From<StateKey> for Vec<i64> {
    fn from(key: StateKey) -> Self {
        MarkSentinels::default().encode(&key)
    }
}

impl TryFrom<Vec<i64>> for StateKey {
    type Error = crate::Error;

    fn try_from(raw: Vec<i64>) -> Result<Self, Self::Error> {
        MarkSentinels::default().decode(&raw)
    }
}
