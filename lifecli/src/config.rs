use std::{fs, path::Path};

use anyhow::Context;
use liblife::Rule;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    /// The rule new sessions start with, as a `B3/S23` rulestring.
    pub rule: Rule,

    /// Whether to spread each step over the rayon pool. Worth it for large soups only.
    pub parallel: bool,

    /// How many past generations `back` can return to.
    pub history_limit: usize,

    /// How far `classify` and `stats` look ahead.
    pub max_analysis_generations: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            rule: Rule::conway(),
            parallel: false,
            history_limit: 1000,
            max_analysis_generations: 50,
        }
    }
}

impl Config {
    pub fn load<P>(path: P) -> anyhow::Result<Self>
    where
        P: AsRef<Path>,
    {
        let config_serialized = fs::read(path).context("Couldn't read config")?;
        let config =
            serde_json::from_slice(&config_serialized).context("Couldn't deserialize config")?;
        Ok(config)
    }
}
