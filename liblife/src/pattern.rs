use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

use super::grid::Grid;

/// Well-known seeds, named in kebab-case (`lightweight-spaceship`).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize, EnumString, EnumIter, Display,
)]
#[strum(serialize_all = "kebab-case", ascii_case_insensitive)]
#[serde(rename_all = "kebab-case")]
pub enum Pattern {
    Block,
    Beehive,
    Loaf,
    Boat,
    Blinker,
    Toad,
    Beacon,
    Pulsar,
    Glider,
    LightweightSpaceship,
    RPentomino,
}

impl Pattern {
    pub fn text(&self) -> &'static str {
        match self {
            Pattern::Block => BLOCK,
            Pattern::Beehive => BEEHIVE,
            Pattern::Loaf => LOAF,
            Pattern::Boat => BOAT,
            Pattern::Blinker => BLINKER,
            Pattern::Toad => TOAD,
            Pattern::Beacon => BEACON,
            Pattern::Pulsar => PULSAR,
            Pattern::Glider => GLIDER,
            Pattern::LightweightSpaceship => LIGHTWEIGHT_SPACESHIP,
            Pattern::RPentomino => R_PENTOMINO,
        }
    }

    pub fn grid(&self) -> Grid {
        self.text()
            .parse()
            .expect("Built-in pattern picture doesn't parse")
    }
}

const BLOCK: &str = "
**
**
";

const BEEHIVE: &str = "
.**.
*..*
.**.
";

const LOAF: &str = "
.**.
*..*
.*.*
..*.
";

const BOAT: &str = "
**.
*.*
.*.
";

const BLINKER: &str = "
...
***
...
";

const TOAD: &str = "
.***
***.
";

const BEACON: &str = "
**..
**..
..**
..**
";

const PULSAR: &str = "
..***...***..
.............
*....*.*....*
*....*.*....*
*....*.*....*
..***...***..
.............
..***...***..
*....*.*....*
*....*.*....*
*....*.*....*
.............
..***...***..
";

const GLIDER: &str = "
.*.
..*
***
";

const LIGHTWEIGHT_SPACESHIP: &str = "
.*..*
*....
*...*
****.
";

const R_PENTOMINO: &str = "
.**
**.
.*.
";
