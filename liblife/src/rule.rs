use std::{fmt, str::FromStr};

use itertools::Itertools;
use serde::{Deserialize, Serialize};

use super::error::{Error, Result};

/// The largest live-neighbor count a Moore neighborhood can produce.
pub const MAX_NEIGHBORS: usize = 8;

/// Outer-totalistic birth/survival thresholds, written `B3/S23` for Conway's Life.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Rule {
    birth: Vec<usize>,
    survive: Vec<usize>,
}

impl Rule {
    /// Rejects counts above 8 and birth on zero neighbors, since the latter would make
    /// every empty cell of the infinite plane come alive.
    pub fn new<B, S>(birth: B, survive: S) -> Result<Self>
    where
        B: IntoIterator<Item = usize>,
        S: IntoIterator<Item = usize>,
    {
        let birth = birth.into_iter().sorted().dedup().collect_vec();
        let survive = survive.into_iter().sorted().dedup().collect_vec();

        if let Some(count) = birth.iter().chain(&survive).find(|&&count| count > MAX_NEIGHBORS) {
            return Err(Error::InvalidRule(format!(
                "neighbor count {count} exceeds {MAX_NEIGHBORS}"
            )));
        }

        if birth.contains(&0) {
            return Err(Error::InvalidRule(
                "birth on 0 neighbors is not supported on an unbounded grid".to_owned(),
            ));
        }

        Ok(Self { birth, survive })
    }

    pub fn conway() -> Self {
        Self::preset(&[3], &[2, 3])
    }

    pub fn high_life() -> Self {
        Self::preset(&[3, 6], &[2, 3])
    }

    pub fn seeds() -> Self {
        Self::preset(&[2], &[])
    }

    pub fn day_and_night() -> Self {
        Self::preset(&[3, 6, 7, 8], &[3, 4, 6, 7, 8])
    }

    pub fn life_without_death() -> Self {
        Self::preset(&[3], &[0, 1, 2, 3, 4, 5, 6, 7, 8])
    }

    fn preset(birth: &[usize], survive: &[usize]) -> Self {
        Self {
            birth: birth.to_vec(),
            survive: survive.to_vec(),
        }
    }

    pub fn birth(&self) -> &[usize] {
        &self.birth
    }

    pub fn survive(&self) -> &[usize] {
        &self.survive
    }

    pub fn next_state(&self, alive: bool, live_neighbors: usize) -> bool {
        if alive {
            self.survive.contains(&live_neighbors)
        } else {
            self.birth.contains(&live_neighbors)
        }
    }
}

impl Default for Rule {
    fn default() -> Self {
        Self::conway()
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "B{}/S{}",
            self.birth.iter().join(""),
            self.survive.iter().join("")
        )
    }
}

impl FromStr for Rule {
    type Err = Error;

    /// Accepts `B3/S23`, `b3/s23` and `S23/B3`.
    fn from_str(s: &str) -> Result<Self> {
        let malformed = || Error::ParseRule(s.to_owned());

        let (first, second) = s.trim().split_once('/').ok_or_else(malformed)?;

        let mut birth = None;
        let mut survive = None;

        for part in [first, second] {
            let mut chars = part.chars();
            let slot = match chars.next().map(|ch| ch.to_ascii_uppercase()) {
                Some('B') => &mut birth,
                Some('S') => &mut survive,
                _ => return Err(malformed()),
            };

            if slot.is_some() {
                return Err(malformed());
            }

            let counts = chars
                .map(|ch| ch.to_digit(10).map(|digit| digit as usize))
                .collect::<Option<Vec<_>>>()
                .ok_or_else(malformed)?;

            *slot = Some(counts);
        }

        Self::new(birth.ok_or_else(malformed)?, survive.ok_or_else(malformed)?)
    }
}

impl TryFrom<String> for Rule {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<Rule> for String {
    fn from(value: Rule) -> Self {
        value.to_string()
    }
}
