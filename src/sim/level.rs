//! Level catalog
//!
//! Twelve levels in four bands of three. Within a band the levels cycle
//! through addition, subtraction, then both mixed.

use serde::{Deserialize, Serialize};

use crate::consts::LEVEL_COUNT;

/// Numeric ceiling of a level band (also the menu colour tier)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Band {
    UpTo10,
    UpTo20,
    UpTo50,
    UpTo100,
}

impl Band {
    /// Largest answer a problem in this band can have
    pub fn max(&self) -> u32 {
        match self {
            Band::UpTo10 => 10,
            Band::UpTo20 => 20,
            Band::UpTo50 => 50,
            Band::UpTo100 => 100,
        }
    }

    /// Half-width of the window distractors are drawn from
    pub fn offset_range(&self) -> u32 {
        if self.max() <= 20 { 4 } else { 10 }
    }
}

/// Which operators a level draws from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OperatorMode {
    AddOnly,
    SubtractOnly,
    /// Addition or subtraction, 50/50 per problem
    Mixed,
}

impl OperatorMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            OperatorMode::AddOnly => "Addition",
            OperatorMode::SubtractOnly => "Subtraction",
            OperatorMode::Mixed => "Addition and Subtraction",
        }
    }
}

/// A difficulty level, always within 1..=LEVEL_COUNT
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct Level(u32);

impl Level {
    pub const FIRST: Level = Level(1);
    pub const LAST: Level = Level(LEVEL_COUNT);

    /// Returns `None` when `n` is not a playable level
    pub fn new(n: u32) -> Option<Self> {
        (1..=LEVEL_COUNT).contains(&n).then_some(Level(n))
    }

    pub fn get(&self) -> u32 {
        self.0
    }

    /// All levels in menu order
    pub fn all() -> impl Iterator<Item = Level> {
        (1..=LEVEL_COUNT).map(Level)
    }

    pub fn next(&self) -> Option<Level> {
        Level::new(self.0 + 1)
    }

    pub fn band(&self) -> Band {
        match self.0 {
            1..=3 => Band::UpTo10,
            4..=6 => Band::UpTo20,
            7..=9 => Band::UpTo50,
            _ => Band::UpTo100,
        }
    }

    pub fn mode(&self) -> OperatorMode {
        match (self.0 - 1) % 3 {
            0 => OperatorMode::AddOnly,
            1 => OperatorMode::SubtractOnly,
            _ => OperatorMode::Mixed,
        }
    }

    /// Menu label, e.g. "Level 4: Addition up to 20"
    pub fn title(&self) -> String {
        format!(
            "Level {}: {} up to {}",
            self.0,
            self.mode().as_str(),
            self.band().max()
        )
    }
}

impl Default for Level {
    fn default() -> Self {
        Level::FIRST
    }
}

impl TryFrom<u32> for Level {
    type Error = String;

    fn try_from(n: u32) -> Result<Self, Self::Error> {
        Level::new(n).ok_or_else(|| format!("level {} is outside 1..={}", n, LEVEL_COUNT))
    }
}

impl From<Level> for u32 {
    fn from(level: Level) -> u32 {
        level.0
    }
}

impl std::fmt::Display for Level {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
