use serde::{Deserialize, Serialize};

/// Offsets of the Moore neighborhood, as `[row, col]` deltas.
const NEIGHBOR_RELATIVE_POSITIONS: &[[i64; 2]] = &[
    [-1, -1],
    [-1, 0],
    [-1, 1],
    [0, -1],
    [0, 1],
    [1, -1],
    [1, 0],
    [1, 1],
];

/// A coordinate on the unbounded plane. Ordered row-major.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Cell {
    pub row: i64,
    pub col: i64,
}

impl Cell {
    pub const fn new(row: i64, col: i64) -> Self {
        Self { row, col }
    }

    pub const fn translate(self, d_row: i64, d_col: i64) -> Self {
        Self {
            row: self.row + d_row,
            col: self.col + d_col,
        }
    }

    pub fn neighbors(self) -> impl Iterator<Item = Cell> {
        NEIGHBOR_RELATIVE_POSITIONS
            .iter()
            .map(move |[d_row, d_col]| self.translate(*d_row, *d_col))
    }

    /// Whether `other` is within Chebyshev distance 1 and not `self`.
    pub fn is_neighbor_of(self, other: Cell) -> bool {
        self != other && (self.row - other.row).abs() <= 1 && (self.col - other.col).abs() <= 1
    }
}

impl From<(i64, i64)> for Cell {
    fn from((row, col): (i64, i64)) -> Self {
        Self { row, col }
    }
}

impl From<[i64; 2]> for Cell {
    fn from(value: [i64; 2]) -> Self {
        Self {
            row: value[0],
            col: value[1],
        }
    }
}

impl From<Cell> for [i64; 2] {
    fn from(value: Cell) -> Self {
        [value.row, value.col]
    }
}

impl From<Cell> for (i64, i64) {
    fn from(value: Cell) -> Self {
        (value.row, value.col)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn neighbors_are_the_eight_surrounding_cells() {
        let center = Cell::new(-4, 7);
        let neighbors: HashSet<_> = center.neighbors().collect();

        assert_eq!(neighbors.len(), 8);
        assert!(!neighbors.contains(&center));
        assert!(neighbors.iter().all(|n| n.is_neighbor_of(center)));
    }

    #[test]
    fn ordering_is_row_major() {
        assert!(Cell::new(0, 5) < Cell::new(1, -5));
        assert!(Cell::new(-1, 0) < Cell::new(-1, 1));
    }
}
