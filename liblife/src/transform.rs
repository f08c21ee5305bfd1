//! Geometric transforms. Every function returns a new grid and leaves its input alone.

use itertools::Itertools;

use super::{
    grid::{Bounds, Grid},
    pos::Cell,
};

pub fn translate(grid: &Grid, d_row: i64, d_col: i64) -> Grid {
    grid.translated(d_row, d_col)
}

/// Rotates clockwise by a quarter turn. The rotated pattern keeps the top-left corner of
/// the original bounding box.
pub fn rotate90(grid: &Grid) -> Grid {
    let Some(Bounds { min, max }) = grid.bounds() else {
        return Grid::empty();
    };

    grid.iter()
        .map(|cell| Cell::new(min.row + (cell.col - min.col), min.col + (max.row - cell.row)))
        .collect()
}

/// Mirrors across the vertical axis of the bounding box.
pub fn flip_horizontal(grid: &Grid) -> Grid {
    let Some(Bounds { min, max }) = grid.bounds() else {
        return Grid::empty();
    };

    grid.iter()
        .map(|cell| Cell::new(cell.row, min.col + max.col - cell.col))
        .collect()
}

/// Mirrors across the horizontal axis of the bounding box.
pub fn flip_vertical(grid: &Grid) -> Grid {
    let Some(Bounds { min, max }) = grid.bounds() else {
        return Grid::empty();
    };

    grid.iter()
        .map(|cell| Cell::new(min.row + max.row - cell.row, cell.col))
        .collect()
}

/// Offsets at which the normalized `pattern` lies entirely inside `region` without
/// covering any live cell of `target`. Offsets are the pattern's top-left corner.
pub fn valid_placements(target: &Grid, pattern: &Grid, region: Bounds) -> Vec<Cell> {
    let pattern = pattern.normalized();

    let Some(pattern_bounds) = pattern.bounds() else {
        return region.cells().collect_vec();
    };

    let corners = Bounds {
        min: region.min,
        max: Cell::new(
            region.max.row - pattern_bounds.max.row,
            region.max.col - pattern_bounds.max.col,
        ),
    };

    if corners.min.row > corners.max.row || corners.min.col > corners.max.col {
        return Vec::new();
    }

    corners
        .cells()
        .filter(|offset| {
            pattern
                .iter()
                .all(|cell| !target.is_alive(cell.translate(offset.row, offset.col)))
        })
        .collect_vec()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pattern::Pattern;

    #[test]
    fn rotating_a_blinker_makes_it_vertical() {
        let horizontal = Grid::new([(0, 0), (0, 1), (0, 2)]);
        assert_eq!(rotate90(&horizontal), Grid::new([(0, 0), (1, 0), (2, 0)]));
    }

    #[test]
    fn four_rotations_are_identity() {
        let glider = Pattern::Glider.grid().translated(-7, 3);
        let rotated = (0..4).fold(glider.clone(), |grid, _| rotate90(&grid));
        assert_eq!(rotated.normalized(), glider.normalized());
    }

    #[test]
    fn rotation_is_clockwise() {
        // .*.      *..
        // ..*  ->  *.*
        // ***      **.
        let glider = Pattern::Glider.grid();
        let expected: Grid = "*..\n*.*\n**.".parse().unwrap();
        assert_eq!(rotate90(&glider), expected);
    }

    #[test]
    fn flips_preserve_the_bounding_box() {
        let glider = Pattern::Glider.grid().translated(10, -10);

        for flipped in [flip_horizontal(&glider), flip_vertical(&glider)] {
            assert_eq!(flipped.bounds(), glider.bounds());
            assert_eq!(flipped.population(), glider.population());
        }

        assert_eq!(flip_horizontal(&flip_horizontal(&glider)), glider);
        assert_eq!(flip_vertical(&flip_vertical(&glider)), glider);
    }

    #[test]
    fn flip_horizontal_mirrors_columns() {
        let glider = Pattern::Glider.grid();
        let expected: Grid = ".*.\n*..\n***".parse().unwrap();
        assert_eq!(flip_horizontal(&glider), expected);
    }

    #[test]
    fn translate_moves_every_cell() {
        let block = Pattern::Block.grid();
        assert_eq!(
            translate(&block, -1, 2),
            Grid::new([(-1, 2), (-1, 3), (0, 2), (0, 3)])
        );
    }

    #[test]
    fn placements_avoid_live_cells_and_stay_in_region() {
        let target = Grid::new([(1, 1)]);
        let block = Pattern::Block.grid();
        let region = Bounds::new((0, 0), (2, 2));

        // Every 2x2 window of a 3x3 region touches the center.
        assert!(valid_placements(&target, &block, region).is_empty());

        let region = Bounds::new((0, 0), (3, 3));
        let placements = valid_placements(&target, &block, region);
        assert_eq!(
            placements,
            vec![
                Cell::new(0, 2),
                Cell::new(1, 2),
                Cell::new(2, 0),
                Cell::new(2, 1),
                Cell::new(2, 2),
            ]
        );
    }

    #[test]
    fn oversized_patterns_have_no_placement() {
        let region = Bounds::new((0, 0), (1, 1));
        assert!(valid_placements(&Grid::empty(), &Pattern::Pulsar.grid(), region).is_empty());
    }
}
