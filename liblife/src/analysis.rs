//! Observations over a pattern's evolution: what kind of pattern it is, how its
//! population behaves, and which cells are about to change.

use std::{
    cmp::Reverse,
    collections::{BTreeMap, BTreeSet},
    fmt,
};

use itertools::Itertools;
use serde::Serialize;

use super::{Engine, grid::Grid, pos::Cell};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PatternKind {
    StillLife,
    Oscillator { period: usize },
    Spaceship { period: usize, offset: (i64, i64) },
    Unknown,
}

impl fmt::Display for PatternKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PatternKind::StillLife => write!(f, "still life"),
            PatternKind::Oscillator { period } => write!(f, "oscillator (period {period})"),
            PatternKind::Spaceship {
                period,
                offset: (d_row, d_col),
            } => write!(f, "spaceship (period {period}, moves {d_row},{d_col})"),
            PatternKind::Unknown => write!(f, "unknown"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PopulationPeak {
    pub generation: usize,
    pub population: usize,
}

impl fmt::Display for PopulationPeak {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "peak at generation {} with population {}",
            self.generation, self.population
        )
    }
}

pub fn is_still_life(engine: &Engine, grid: &Grid) -> bool {
    engine.step(grid) == *grid
}

/// The smallest `p` in `1..=max_generations` after which `grid` reappears unchanged.
pub fn find_period(engine: &Engine, grid: &Grid, max_generations: usize) -> Option<usize> {
    let period = engine
        .generations(grid)
        .skip(1)
        .take(max_generations)
        .position(|generation| generation == *grid)
        .map(|index| index + 1);

    log::debug!("period search over {max_generations} generations: {period:?}");
    period
}

/// The smallest `p` after which `grid` reappears translated by a non-zero offset,
/// together with that offset.
pub fn find_displacement(
    engine: &Engine,
    grid: &Grid,
    max_generations: usize,
) -> Option<(usize, (i64, i64))> {
    let origin = grid.bounds()?.min;
    let shape = grid.normalized();

    let displacement = engine
        .generations(grid)
        .enumerate()
        .skip(1)
        .take(max_generations)
        .find_map(|(generation, next)| {
            let next_origin = next.bounds()?.min;
            let offset = (next_origin.row - origin.row, next_origin.col - origin.col);

            (offset != (0, 0) && next.normalized() == shape).then_some((generation, offset))
        });

    log::debug!("displacement search over {max_generations} generations: {displacement:?}");
    displacement
}

pub fn classify(engine: &Engine, grid: &Grid, max_generations: usize) -> PatternKind {
    if is_still_life(engine, grid) {
        return PatternKind::StillLife;
    }

    if let Some(period) = find_period(engine, grid, max_generations) {
        return PatternKind::Oscillator { period };
    }

    match find_displacement(engine, grid, max_generations) {
        Some((period, offset)) => PatternKind::Spaceship { period, offset },
        None => PatternKind::Unknown,
    }
}

/// Cells that are born or die in the next generation.
pub fn changing_cells(engine: &Engine, grid: &Grid) -> BTreeSet<Cell> {
    let next = engine.step(grid);

    grid.live_cells()
        .symmetric_difference(next.live_cells())
        .copied()
        .collect()
}

/// Live cells without a single live neighbor.
pub fn isolated_cells(grid: &Grid) -> BTreeSet<Cell> {
    grid.iter()
        .filter(|cell| grid.live_neighbor_count(*cell) == 0)
        .collect()
}

/// Every cell of the bounding box, grouped by its live-neighbor count.
///
/// Visits all of [`Bounds::area`](crate::Bounds::area) cells, so two live cells far
/// apart make this as expensive as a dense grid of that size.
pub fn group_by_neighbor_count(grid: &Grid) -> BTreeMap<usize, Vec<Cell>> {
    let Some(bounds) = grid.bounds() else {
        return BTreeMap::new();
    };

    bounds.cells().fold(BTreeMap::new(), |mut groups, cell| {
        groups
            .entry(grid.live_neighbor_count(cell))
            .or_insert_with(Vec::new)
            .push(cell);
        groups
    })
}

/// Share of the bounding box that is alive; 0.0 for the empty grid.
pub fn density(grid: &Grid) -> f64 {
    grid.bounds().map_or(0.0, |bounds| {
        grid.population() as f64 / bounds.area() as f64
    })
}

/// Population of the seed followed by `generations` successors.
pub fn track_population(engine: &Engine, grid: &Grid, generations: usize) -> Vec<usize> {
    engine
        .generations(grid)
        .take(generations + 1)
        .map(|generation| generation.population())
        .collect_vec()
}

/// The earliest generation with the highest population.
pub fn population_peak(
    engine: &Engine,
    grid: &Grid,
    max_generations: usize,
) -> Option<PopulationPeak> {
    track_population(engine, grid, max_generations)
        .into_iter()
        .enumerate()
        .min_by_key(|(_, population)| Reverse(*population))
        .map(|(generation, population)| PopulationPeak {
            generation,
            population,
        })
}

pub fn average_population(engine: &Engine, grid: &Grid, generations: usize) -> f64 {
    let populations = track_population(engine, grid, generations);
    populations.iter().sum::<usize>() as f64 / populations.len() as f64
}

/// The first generation whose population holds for three consecutive generations.
pub fn stabilization_point(engine: &Engine, grid: &Grid, max_generations: usize) -> Option<usize> {
    track_population(engine, grid, max_generations)
        .into_iter()
        .tuple_windows()
        .position(|(a, b, c)| a == b && b == c)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pattern::Pattern;

    #[test]
    fn density_of_the_bounding_box() {
        assert_eq!(density(&Pattern::Block.grid()), 1.0);
        assert_eq!(density(&Grid::new([(0, 0), (1, 1)])), 0.5);
        assert_eq!(density(&Grid::empty()), 0.0);
    }

    #[test]
    fn density_of_a_widely_spread_grid() {
        let spread = Grid::new([(0, 0), (5_000_000_000, 5_000_000_000)]);
        let ratio = density(&spread);

        assert!(ratio > 0.0);
        assert!(ratio < 1e-18);
    }

    #[test]
    fn isolated_cells_have_no_live_neighbors() {
        let grid = Grid::new([(0, 0), (0, 1), (5, 5)]);
        assert_eq!(isolated_cells(&grid), BTreeSet::from([Cell::new(5, 5)]));
    }

    #[test]
    fn groups_cover_the_bounding_box() {
        let groups = group_by_neighbor_count(&Pattern::Block.grid());

        assert_eq!(groups.len(), 1);
        assert_eq!(groups[&3].len(), 4);
        assert!(group_by_neighbor_count(&Grid::empty()).is_empty());
    }

    #[test]
    fn blinker_changes_four_cells() {
        let engine = Engine::default();
        let changing = changing_cells(&engine, &Pattern::Blinker.grid());

        assert_eq!(
            changing,
            BTreeSet::from([
                Cell::new(0, 1),
                Cell::new(1, 0),
                Cell::new(1, 2),
                Cell::new(2, 1),
            ])
        );
        assert!(changing_cells(&engine, &Pattern::Block.grid()).is_empty());
    }

    #[test]
    fn peak_prefers_the_earliest_generation() {
        let engine = Engine::default();

        assert_eq!(
            population_peak(&engine, &Pattern::Block.grid(), 5),
            Some(PopulationPeak {
                generation: 0,
                population: 4
            })
        );

        // L-tromino grows into a block on the first step and stays there.
        let tromino = Grid::new([(0, 0), (0, 1), (1, 0)]);
        assert_eq!(
            population_peak(&engine, &tromino, 5),
            Some(PopulationPeak {
                generation: 1,
                population: 4
            })
        );
    }

    #[test]
    fn stabilization_needs_three_equal_generations() {
        let engine = Engine::default();
        let tromino = Grid::new([(0, 0), (0, 1), (1, 0)]);

        assert_eq!(stabilization_point(&engine, &tromino, 5), Some(1));
        assert_eq!(stabilization_point(&engine, &tromino, 2), None);
        assert_eq!(stabilization_point(&engine, &Pattern::Blinker.grid(), 10), Some(0));
    }
}
