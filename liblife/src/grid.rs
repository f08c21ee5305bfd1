use std::{collections::BTreeSet, fmt, str::FromStr};

use itertools::Itertools;
use serde::{Deserialize, Serialize};

use super::{
    error::{Error, Result},
    pos::Cell,
};

/// An immutable snapshot of the live cells of one generation.
///
/// Presence in the set means alive, absence means dead, for every coordinate on the
/// plane. Nothing hands out a mutable handle into the set, so a `Grid` can be shared
/// freely between threads while a step reads it.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Grid {
    cells: BTreeSet<Cell>,
}

impl Grid {
    pub fn new<I, C>(cells: I) -> Self
    where
        I: IntoIterator<Item = C>,
        C: Into<Cell>,
    {
        Self::with_cells(cells.into_iter().map(Into::into).collect())
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub(crate) fn with_cells(cells: BTreeSet<Cell>) -> Self {
        Self { cells }
    }

    pub fn is_alive<C>(&self, cell: C) -> bool
    where
        C: Into<Cell>,
    {
        self.cells.contains(&cell.into())
    }

    pub fn live_cells(&self) -> &BTreeSet<Cell> {
        &self.cells
    }

    pub fn iter(&self) -> impl Iterator<Item = Cell> + '_ {
        self.cells.iter().copied()
    }

    pub fn population(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn live_neighbor_count(&self, cell: Cell) -> usize {
        cell.neighbors()
            .filter(|neighbor| self.cells.contains(neighbor))
            .count()
    }

    pub fn bounds(&self) -> Option<Bounds> {
        let (min_row, max_row) = self.cells.iter().map(|cell| cell.row).minmax().into_option()?;
        let (min_col, max_col) = self.cells.iter().map(|cell| cell.col).minmax().into_option()?;

        Some(Bounds {
            min: Cell::new(min_row, min_col),
            max: Cell::new(max_row, max_col),
        })
    }

    /// A copy of this grid with `cell` alive.
    pub fn with_cell<C>(&self, cell: C) -> Self
    where
        C: Into<Cell>,
    {
        let mut cells = self.cells.clone();
        cells.insert(cell.into());
        Self::with_cells(cells)
    }

    /// A copy of this grid with `cell` dead.
    pub fn without_cell<C>(&self, cell: C) -> Self
    where
        C: Into<Cell>,
    {
        let mut cells = self.cells.clone();
        cells.remove(&cell.into());
        Self::with_cells(cells)
    }

    pub fn translated(&self, d_row: i64, d_col: i64) -> Self {
        self.iter().map(|cell| cell.translate(d_row, d_col)).collect()
    }

    /// Translated so the bounding box starts at (0, 0).
    pub fn normalized(&self) -> Self {
        match self.bounds() {
            Some(bounds) => self.translated(-bounds.min.row, -bounds.min.col),
            None => Self::empty(),
        }
    }
}

impl FromIterator<Cell> for Grid {
    fn from_iter<T: IntoIterator<Item = Cell>>(iter: T) -> Self {
        Self::with_cells(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a Grid {
    type Item = Cell;
    type IntoIter = std::iter::Copied<std::collections::btree_set::Iter<'a, Cell>>;

    fn into_iter(self) -> Self::IntoIter {
        self.cells.iter().copied()
    }
}

const ALIVE_SYMBOL: char = '*';
const DEAD_SYMBOL: char = '.';

fn parse_symbol(ch: char) -> Option<bool> {
    match ch {
        '*' | 'O' | '1' => Some(true),
        '.' | ' ' | '0' => Some(false),
        _ => None,
    }
}

impl FromStr for Grid {
    type Err = Error;

    /// Parses a picture of the pattern. Blank lines around the picture are ignored; row 0
    /// is the first non-blank line and column 0 is the first character of every line.
    fn from_str(s: &str) -> Result<Self> {
        let lines = s
            .lines()
            .map(|line| line.trim_end_matches('\r'))
            .skip_while(|line| line.trim().is_empty())
            .collect_vec();

        let picture_len = lines
            .iter()
            .rposition(|line| !line.trim().is_empty())
            .map_or(0, |last| last + 1);

        let mut cells = BTreeSet::new();

        for (row, line) in lines[..picture_len].iter().enumerate() {
            for (col, ch) in line.chars().enumerate() {
                let alive = parse_symbol(ch).ok_or(Error::ParsePattern {
                    ch,
                    line: row + 1,
                    column: col + 1,
                })?;

                if alive {
                    cells.insert(Cell::new(row as i64, col as i64));
                }
            }
        }

        Ok(Self::with_cells(cells))
    }
}

impl fmt::Display for Grid {
    /// Renders the bounding box of the live cells. The empty grid renders as nothing.
    ///
    /// Output grows with [`Bounds::area`], not with the population.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Some(bounds) = self.bounds() else {
            return Ok(());
        };

        let rows = (bounds.min.row..=bounds.max.row).map(|row| {
            (bounds.min.col..=bounds.max.col)
                .map(|col| {
                    if self.is_alive((row, col)) {
                        ALIVE_SYMBOL
                    } else {
                        DEAD_SYMBOL
                    }
                })
                .collect::<String>()
        });

        write!(f, "{}", rows.format("\n"))
    }
}

/// Inclusive rectangle on the plane.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Bounds {
    pub min: Cell,
    pub max: Cell,
}

impl Bounds {
    pub fn new<A, B>(min: A, max: B) -> Self
    where
        A: Into<Cell>,
        B: Into<Cell>,
    {
        Self {
            min: min.into(),
            max: max.into(),
        }
    }

    pub fn rows(&self) -> u64 {
        extent(self.min.row, self.max.row)
    }

    pub fn cols(&self) -> u64 {
        extent(self.min.col, self.max.col)
    }

    /// Cell count of the rectangle. Wide enough for any pair of `i64` corners.
    pub fn area(&self) -> u128 {
        u128::from(self.rows()) * u128::from(self.cols())
    }

    pub fn contains(&self, cell: Cell) -> bool {
        (self.min.row..=self.max.row).contains(&cell.row)
            && (self.min.col..=self.max.col).contains(&cell.col)
    }

    pub fn cells(&self) -> impl Iterator<Item = Cell> {
        (self.min.row..=self.max.row)
            .cartesian_product(self.min.col..=self.max.col)
            .map(Cell::from)
    }
}

/// Number of coordinates in `min..=max`, saturating at `u64::MAX`.
fn extent(min: i64, max: i64) -> u64 {
    if max < min {
        0
    } else {
        max.abs_diff(min).saturating_add(1)
    }
}
