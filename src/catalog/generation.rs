//! Generation bands: the fixed partition of the id space used as a coarse filter.

use std::fmt;
use std::ops::RangeInclusive;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{DexError, Result};

/// The eighteen category tags offered as filter controls
pub const ELEMENT_TYPES: &[&str] = &[
    "normal", "fire", "water", "grass", "electric", "ice", "fighting", "poison", "ground",
    "flying", "psychic", "bug", "rock", "ghost", "dragon", "dark", "steel", "fairy",
];

/// A named, closed band of catalog ids
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Generation {
    I,
    II,
    III,
    IV,
    V,
    VI,
    VII,
    VIII,
    IX,
}

impl Generation {
    /// All bands in ascending id order
    pub const ALL: [Generation; 9] = [
        Generation::I,
        Generation::II,
        Generation::III,
        Generation::IV,
        Generation::V,
        Generation::VI,
        Generation::VII,
        Generation::VIII,
        Generation::IX,
    ];

    pub fn number(self) -> u8 {
        self as u8 + 1
    }

    pub fn numeral(self) -> &'static str {
        match self {
            Generation::I => "I",
            Generation::II => "II",
            Generation::III => "III",
            Generation::IV => "IV",
            Generation::V => "V",
            Generation::VI => "VI",
            Generation::VII => "VII",
            Generation::VIII => "VIII",
            Generation::IX => "IX",
        }
    }

    pub fn label(self) -> String {
        format!("Generation {}", self.numeral())
    }

    pub fn range(self) -> RangeInclusive<u32> {
        match self {
            Generation::I => 1..=151,
            Generation::II => 152..=251,
            Generation::III => 252..=386,
            Generation::IV => 387..=493,
            Generation::V => 494..=649,
            Generation::VI => 650..=721,
            Generation::VII => 722..=809,
            Generation::VIII => 810..=898,
            Generation::IX => 899..=1010,
        }
    }

    pub fn contains(self, id: u32) -> bool {
        self.range().contains(&id)
    }

    /// The band holding `id`, if any
    pub fn containing(id: u32) -> Option<Generation> {
        Self::ALL.into_iter().find(|g| g.contains(id))
    }
}

impl fmt::Display for Generation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Generation {}", self.numeral())
    }
}

impl FromStr for Generation {
    type Err = DexError;

    /// Accepts `4`, `iv`, `gen4`, `Generation IV`
    fn from_str(s: &str) -> Result<Self> {
        let lower = s.trim().to_lowercase();
        let key = lower
            .strip_prefix("generation")
            .or_else(|| lower.strip_prefix("gen"))
            .unwrap_or(&lower)
            .trim();

        Self::ALL
            .into_iter()
            .find(|g| key == g.number().to_string() || key == g.numeral().to_lowercase())
            .ok_or_else(|| {
                DexError::InvalidCommand(format!(
                    "unknown generation '{s}', expected 1-9 or I-IX"
                ))
            })
    }
}
