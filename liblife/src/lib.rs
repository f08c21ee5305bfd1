use std::collections::{BTreeSet, HashMap};

use itertools::Itertools;
use rayon::iter::{IntoParallelRefIterator, ParallelIterator};

pub use error::{Error, Result};
pub use grid::{Bounds, Grid};
pub use pos::Cell;
pub use rule::Rule;

pub mod analysis;
pub mod error;
pub mod grid;
pub mod pattern;
pub mod pos;
pub mod rule;
pub mod transform;

/// Advances `grid` by one generation under Conway's rules.
pub fn step(grid: &Grid) -> Grid {
    Engine::default().step(grid)
}

/// Pure transition function from one generation to the next.
///
/// The engine holds nothing but its rule, so the same grid always evolves into the same
/// successor, and any history is up to the caller.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Engine {
    pub rule: Rule,

    /// Whether multi-generation helpers use [`Engine::step_parallel`].
    pub parallel: bool,
}

impl Engine {
    pub fn new(rule: Rule) -> Self {
        Self {
            rule,
            parallel: false,
        }
    }

    pub fn with_parallel(self, parallel: bool) -> Self {
        Self { parallel, ..self }
    }

    pub fn step(&self, grid: &Grid) -> Grid {
        let neighbor_counts = grid.iter().flat_map(Cell::neighbors).counts();

        log::trace!(
            "stepping population {} over {} candidates",
            grid.population(),
            neighbor_counts.len()
        );

        // Live cells with no live neighbors are absent from the counts but still need
        // their survival checked.
        let isolated = grid
            .iter()
            .filter(|cell| !neighbor_counts.contains_key(cell))
            .map(|cell| (cell, 0));

        neighbor_counts
            .iter()
            .map(|(cell, count)| (*cell, *count))
            .chain(isolated)
            .filter(|(cell, count)| self.rule.next_state(grid.is_alive(*cell), *count))
            .map(|(cell, _)| cell)
            .collect()
    }

    /// Same result as [`Engine::step`], with neighbor counting and evaluation spread over
    /// the rayon pool. Each worker counts into its own map; the maps are merged before the
    /// candidates are evaluated.
    pub fn step_parallel(&self, grid: &Grid) -> Grid {
        let live_cells = grid.live_cells();

        let neighbor_counts = live_cells
            .par_iter()
            .fold(HashMap::new, |mut counts: HashMap<Cell, usize>, cell| {
                for neighbor in cell.neighbors() {
                    *counts.entry(neighbor).or_default() += 1;
                }
                counts
            })
            .reduce(HashMap::new, merge_counts);

        log::trace!(
            "stepping population {} over {} candidates in parallel",
            grid.population(),
            neighbor_counts.len()
        );

        let survivors_without_neighbors = live_cells
            .par_iter()
            .filter(|cell| !neighbor_counts.contains_key(*cell))
            .filter(|_| self.rule.next_state(true, 0))
            .copied();

        let next_cells: BTreeSet<Cell> = neighbor_counts
            .par_iter()
            .filter(|(cell, count)| self.rule.next_state(live_cells.contains(*cell), **count))
            .map(|(cell, _)| *cell)
            .chain(survivors_without_neighbors)
            .collect();

        Grid::with_cells(next_cells)
    }

    fn next_generation(&self, grid: &Grid) -> Grid {
        if self.parallel {
            self.step_parallel(grid)
        } else {
            self.step(grid)
        }
    }

    /// Applies [`Engine::step`] `n` times. Fails on a negative `n`.
    pub fn step_n(&self, grid: &Grid, n: i64) -> Result<Grid> {
        let generations = usize::try_from(n).map_err(|_| Error::InvalidArgument {
            name: "n",
            value: n,
        })?;

        Ok(self.advance(grid, generations))
    }

    /// Applies [`Engine::step`] `generations` times, stopping early at a fixed point.
    pub fn advance(&self, grid: &Grid, generations: usize) -> Grid {
        let mut current = grid.clone();

        for _ in 0..generations {
            let next = self.next_generation(&current);
            if next == current {
                break;
            }
            current = next;
        }

        current
    }

    /// The seed followed by each successive generation, without end.
    pub fn generations(&self, seed: &Grid) -> Generations<'_> {
        Generations {
            engine: self,
            seed: Some(seed.clone()),
            previous: None,
        }
    }
}

fn merge_counts(
    mut into: HashMap<Cell, usize>,
    from: HashMap<Cell, usize>,
) -> HashMap<Cell, usize> {
    for (cell, count) in from {
        *into.entry(cell).or_default() += count;
    }
    into
}

/// Iterator over successive generations, see [`Engine::generations`].
///
/// Each generation is computed only when it is asked for.
#[derive(Debug, Clone)]
pub struct Generations<'a> {
    engine: &'a Engine,
    seed: Option<Grid>,
    previous: Option<Grid>,
}

impl Iterator for Generations<'_> {
    type Item = Grid;

    fn next(&mut self) -> Option<Self::Item> {
        let current = match (self.seed.take(), &self.previous) {
            (Some(seed), _) => seed,
            (None, Some(previous)) => self.engine.next_generation(previous),
            (None, None) => return None,
        };

        self.previous = Some(current.clone());
        Some(current)
    }
}
