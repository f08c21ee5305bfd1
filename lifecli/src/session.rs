use std::{collections::VecDeque, fs, path::Path, str::FromStr};

use anyhow::{Context, bail};
use liblife::{Engine, Grid, Rule, pattern::Pattern};

use crate::config::Config;

/// Everything the shell remembers between commands. The engine itself stays stateless;
/// the generation counter and undo history live here.
pub struct Session {
    pub config: Config,
    pub engine: Engine,
    pub grid: Grid,
    pub generation: u64,
    history: VecDeque<(u64, Grid)>,
}

impl Session {
    pub fn new(config: Config, grid: Grid) -> Self {
        let engine = Engine::new(config.rule.clone()).with_parallel(config.parallel);

        Self {
            config,
            engine,
            grid,
            generation: 0,
            history: VecDeque::new(),
        }
    }

    pub fn step(&mut self, times: i64) -> anyhow::Result<()> {
        // A negative count is left for `step_n` to reject.
        let generation = match u64::try_from(times) {
            Ok(advance) => self
                .generation
                .checked_add(advance)
                .with_context(|| format!("Generation counter can't advance by {times}"))?,
            Err(_) => self.generation,
        };
        let next = self.engine.step_n(&self.grid, times)?;

        self.remember();
        self.grid = next;
        self.generation = generation;

        log::debug!(
            "generation {} has population {}",
            self.generation,
            self.grid.population()
        );
        Ok(())
    }

    /// Undoes the last `times` commands that changed the grid.
    pub fn back(&mut self, times: usize) -> anyhow::Result<()> {
        if times > self.history.len() {
            bail!("Only {} entries of history", self.history.len());
        }

        for _ in 0..times {
            if let Some((generation, grid)) = self.history.pop_back() {
                self.generation = generation;
                self.grid = grid;
            }
        }

        Ok(())
    }

    /// Replaces the grid with a fresh seed, starting over at generation 0.
    pub fn reset(&mut self, grid: Grid) {
        self.remember();
        self.grid = grid;
        self.generation = 0;
    }

    /// Edits the current generation in place, keeping the counter.
    pub fn edit(&mut self, grid: Grid) {
        self.remember();
        self.grid = grid;
    }

    pub fn set_rule(&mut self, rule: Rule) {
        self.engine.rule = rule;
    }

    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    fn remember(&mut self) {
        if self.config.history_limit == 0 {
            return;
        }

        if self.history.len() == self.config.history_limit {
            self.history.pop_front();
        }

        self.history.push_back((self.generation, self.grid.clone()));
    }
}

/// Resolves a seed argument: a built-in pattern name, a `.json` grid save, or a
/// picture file.
pub fn load_seed(seed: &str) -> anyhow::Result<Grid> {
    if let Ok(pattern) = Pattern::from_str(seed) {
        return Ok(pattern.grid());
    }

    let path = Path::new(seed);
    let contents = fs::read_to_string(path)
        .with_context(|| format!("{seed:?} is neither a pattern nor a readable file"))?;

    let grid = if path.extension().is_some_and(|ext| ext == "json") {
        serde_json::from_str(&contents).context("Couldn't deserialize grid")?
    } else {
        contents.parse().context("Couldn't parse pattern picture")?
    };

    Ok(grid)
}

pub fn save_grid<P>(grid: &Grid, path: P) -> anyhow::Result<()>
where
    P: AsRef<Path>,
{
    let grid_serialized = serde_json::to_string_pretty(grid).context("Couldn't serialize grid")?;

    let path = path.as_ref();
    if let Some(parent_path) = path.parent() {
        let _ = fs::create_dir_all(parent_path);
    }

    fs::write(path, grid_serialized).context("Couldn't write grid")?;
    Ok(())
}
