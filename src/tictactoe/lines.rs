//! Winning line analysis for N×N boards

use super::{Cell, Mark};

/// Utility for analyzing winning lines
pub struct LineAnalyzer;

impl LineAnalyzer {
    /// Cell indices of every winning line: rows, then columns, then the two
    /// main diagonals. No other lines count.
    pub fn winning_lines(size: usize) -> Vec<Vec<usize>> {
        let mut lines = Vec::with_capacity(2 * size + 2);
        for r in 0..size {
            lines.push((0..size).map(|c| r * size + c).collect());
        }
        for c in 0..size {
            lines.push((0..size).map(|r| r * size + c).collect());
        }
        lines.push((0..size).map(|i| i * size + i).collect());
        lines.push((0..size).map(|i| i * size + (size - 1 - i)).collect());
        lines
    }

    /// Check if a mark fills a complete line
    pub fn has_won(cells: &[Cell], size: usize, mark: Mark) -> bool {
        if size == 0 {
            return false;
        }
        let target = mark.to_cell();
        let filled = |idx: usize| cells[idx] == target;

        (0..size).any(|r| (0..size).all(|c| filled(r * size + c)))
            || (0..size).any(|c| (0..size).all(|r| filled(r * size + c)))
            || (0..size).all(|i| filled(i * size + i))
            || (0..size).all(|i| filled(i * size + (size - 1 - i)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classic_board_has_eight_lines() {
        let lines = LineAnalyzer::winning_lines(3);
        assert_eq!(lines.len(), 8);
        assert_eq!(lines[0], vec![0, 1, 2]);
        assert_eq!(lines[3], vec![0, 3, 6]);
        assert_eq!(lines[6], vec![0, 4, 8]);
        assert_eq!(lines[7], vec![2, 4, 6]);
    }

    #[test]
    fn test_has_won_on_anti_diagonal() {
        let mut cells = vec![Cell::Empty; 16];
        for idx in [3, 6, 9, 12] {
            cells[idx] = Cell::O;
        }
        assert!(LineAnalyzer::has_won(&cells, 4, Mark::O));
        assert!(!LineAnalyzer::has_won(&cells, 4, Mark::X));
    }

    #[test]
    fn test_has_won_agrees_with_line_list() {
        for size in 1..=5 {
            for line in LineAnalyzer::winning_lines(size) {
                let mut cells = vec![Cell::Empty; size * size];
                for &idx in &line {
                    cells[idx] = Cell::X;
                }
                assert!(LineAnalyzer::has_won(&cells, size, Mark::X));
                assert!(!LineAnalyzer::has_won(&cells, size, Mark::O));

                if size > 1 {
                    cells[line[size / 2]] = Cell::O;
                    assert!(!LineAnalyzer::has_won(&cells, size, Mark::X));
                }
            }
        }
    }
}
