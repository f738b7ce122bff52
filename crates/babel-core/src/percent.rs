//! Integers clamped to the 0-100 range.
//!
//! Used for the three player stats and for character affection. Every
//! constructor clamps, including deserialization, so a `Percent` read from
//! a hand-edited save file still honours the range.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A value in `0..=100`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(from = "i64", into = "u8")]
pub struct Percent(u8);

impl Percent {
    /// The lower bound.
    pub const MIN: Self = Self(0);
    /// The upper bound.
    pub const MAX: Self = Self(100);

    /// Clamp any integer into range.
    pub fn clamped(value: i64) -> Self {
        Self(value.clamp(0, 100) as u8)
    }

    /// The raw value.
    pub fn value(self) -> u8 {
        self.0
    }
}

impl From<i64> for Percent {
    fn from(value: i64) -> Self {
        Self::clamped(value)
    }
}

impl From<Percent> for u8 {
    fn from(p: Percent) -> Self {
        p.0
    }
}

impl fmt::Display for Percent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
