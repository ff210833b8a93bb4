//! Board representation and basic operations

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use super::{game::GameStatus, lines::LineAnalyzer};
use crate::{Error, Result};

/// One of the two symbols a player can place
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Mark {
    X,
    O,
}

impl Mark {
    pub const ALL: [Mark; 2] = [Mark::X, Mark::O];

    /// Get the opposing mark
    pub fn opponent(self) -> Mark {
        match self {
            Mark::X => Mark::O,
            Mark::O => Mark::X,
        }
    }

    pub fn to_cell(self) -> Cell {
        match self {
            Mark::X => Cell::X,
            Mark::O => Cell::O,
        }
    }

    pub fn to_char(self) -> char {
        self.to_cell().to_char()
    }
}

impl fmt::Display for Mark {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_char())
    }
}

/// A cell on the board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Cell {
    Empty,
    X,
    O,
}

impl Cell {
    pub fn to_char(self) -> char {
        match self {
            Cell::Empty => '.',
            Cell::X => 'X',
            Cell::O => 'O',
        }
    }

    pub fn mark(self) -> Option<Mark> {
        match self {
            Cell::Empty => None,
            Cell::X => Some(Mark::X),
            Cell::O => Some(Mark::O),
        }
    }
}

/// Zero-based (row, col) coordinate on the board
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.row, self.col)
    }
}

impl FromStr for Position {
    type Err = Error;

    /// Parse the `row col` text a human types at the prompt.
    fn from_str(s: &str) -> Result<Self> {
        let malformed = |reason: &str| Error::MalformedInput {
            input: s.to_string(),
            reason: reason.to_string(),
        };

        let tokens: Vec<&str> = s.split_whitespace().collect();
        if tokens.len() != 2 {
            return Err(malformed(&format!(
                "expected two numbers 'row col', got {} token(s)",
                tokens.len()
            )));
        }

        let row = tokens[0]
            .parse::<usize>()
            .map_err(|_| malformed(&format!("'{}' is not a row index", tokens[0])))?;
        let col = tokens[1]
            .parse::<usize>()
            .map_err(|_| malformed(&format!("'{}' is not a column index", tokens[1])))?;

        Ok(Position { row, col })
    }
}

/// Square grid of cells stored in row-major order
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Board {
    size: usize,
    cells: Vec<Cell>,
}

impl Board {
    /// Create an empty board of `size`×`size` cells
    pub fn new(size: usize) -> Self {
        Self {
            size,
            cells: vec![Cell::Empty; size * size],
        }
    }

    /// Rebuild a board from nested rows (the persisted layout).
    ///
    /// # Errors
    ///
    /// Returns `SerializationSchemaMismatch` when the rows do not form a
    /// square grid.
    pub fn from_rows(rows: &[Vec<Cell>]) -> Result<Self> {
        let size = rows.len();
        if let Some((idx, row)) = rows.iter().enumerate().find(|(_, row)| row.len() != size) {
            return Err(Error::schema(format!(
                "board row {idx} has {} cells, expected {size}",
                row.len()
            )));
        }

        Ok(Self {
            size,
            cells: rows.iter().flatten().copied().collect(),
        })
    }

    pub fn size(&self) -> usize {
        self.size
    }

    /// Cells as nested rows
    pub fn rows(&self) -> Vec<Vec<Cell>> {
        if self.size == 0 {
            return Vec::new();
        }
        self.cells.chunks(self.size).map(<[Cell]>::to_vec).collect()
    }

    fn index(&self, pos: Position) -> Result<usize> {
        if pos.row >= self.size || pos.col >= self.size {
            return Err(Error::OutOfBounds {
                row: pos.row,
                col: pos.col,
                size: self.size,
            });
        }
        Ok(pos.row * self.size + pos.col)
    }

    /// Get the cell at a position
    pub fn get(&self, pos: Position) -> Result<Cell> {
        self.index(pos).map(|idx| self.cells[idx])
    }

    /// Bounds-checked occupancy test
    pub fn is_occupied(&self, pos: Position) -> Result<bool> {
        self.get(pos).map(|cell| cell != Cell::Empty)
    }

    /// All empty cells in row-major order
    pub fn legal_actions(&self) -> Vec<Position> {
        self.cells
            .iter()
            .enumerate()
            .filter(|&(_, &cell)| cell == Cell::Empty)
            .map(|(i, _)| Position::new(i / self.size, i % self.size))
            .collect()
    }

    /// Count the number of occupied cells on the board
    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|&&c| c != Cell::Empty).count()
    }

    /// Place a mark on an empty cell
    pub fn place(&mut self, pos: Position, mark: Mark) -> Result<()> {
        let idx = self.index(pos)?;
        if self.cells[idx] != Cell::Empty {
            return Err(Error::CellOccupied {
                row: pos.row,
                col: pos.col,
            });
        }
        self.cells[idx] = mark.to_cell();
        Ok(())
    }

    /// Check if a mark completes any row, column or main diagonal
    pub fn has_won(&self, mark: Mark) -> bool {
        LineAnalyzer::has_won(&self.cells, self.size, mark)
    }

    /// Terminal-state detection
    pub fn winner(&self) -> GameStatus {
        if let Some(mark) = Mark::ALL.into_iter().find(|&m| self.has_won(m)) {
            return GameStatus::Win(mark);
        }
        if self.cells.contains(&Cell::Empty) {
            GameStatus::InProgress
        } else {
            GameStatus::Draw
        }
    }

    /// Clear every cell
    pub fn reset(&mut self) {
        self.cells.fill(Cell::Empty);
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.rows() {
            let line: Vec<String> = row.iter().map(|c| c.to_char().to_string()).collect();
            writeln!(f, "{}", line.join(" "))?;
        }
        Ok(())
    }
}
