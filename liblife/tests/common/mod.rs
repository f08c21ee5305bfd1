//! Helpers shared by the integration tests.

#![allow(dead_code)]

use liblife::{Cell, Grid};
use rand::{Rng, SeedableRng, rngs::StdRng};

/// A reproducible random soup filling a `size` x `size` square centered on the origin.
pub fn random_soup(seed: u64, size: i64, density: f64) -> Grid {
    let mut rng = StdRng::seed_from_u64(seed);
    let half = size / 2;

    (-half..size - half)
        .flat_map(|row| (-half..size - half).map(move |col| Cell::new(row, col)))
        .filter(|_| rng.random_bool(density))
        .collect()
}

pub fn glider() -> Grid {
    Grid::new([(0, 1), (1, 2), (2, 0), (2, 1), (2, 2)])
}

pub fn block() -> Grid {
    Grid::new([(0, 0), (0, 1), (1, 0), (1, 1)])
}
