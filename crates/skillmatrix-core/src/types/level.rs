//! Ordinal skill scale.
//!
//! Levels are a closed integer range with a name table. Comparison is always
//! by ordinal value; there is no implicit cast from a named enum.

use super::WorkforceError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A skill level on the ordinal 1..=5 scale ("Beginner" .. "Expert").
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct SkillLevel(u8);

impl SkillLevel {
    /// Lowest valid ordinal.
    pub const MIN_VALUE: u8 = 1;
    /// Highest valid ordinal.
    pub const MAX_VALUE: u8 = 5;

    pub const BEGINNER: Self = Self(1);
    pub const DEVELOPING: Self = Self(2);
    pub const COMPETENT: Self = Self(3);
    pub const ADVANCED: Self = Self(4);
    pub const EXPERT: Self = Self(5);

    /// Every level in ascending order.
    pub const ALL: [Self; 5] = [
        Self::BEGINNER,
        Self::DEVELOPING,
        Self::COMPETENT,
        Self::ADVANCED,
        Self::EXPERT,
    ];

    /// Validate an ordinal.
    pub const fn new(value: u8) -> Result<Self, WorkforceError> {
        if value >= Self::MIN_VALUE && value <= Self::MAX_VALUE {
            Ok(Self(value))
        } else {
            Err(WorkforceError::InvalidSkillLevel(value))
        }
    }

    /// The raw ordinal value.
    #[must_use]
    pub const fn value(self) -> u8 {
        self.0
    }

    /// Human-readable level name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self.0 {
            1 => "Beginner",
            2 => "Developing",
            3 => "Competent",
            4 => "Advanced",
            _ => "Expert",
        }
    }

    /// True if `self` satisfies a requirement of `required`.
    #[must_use]
    pub const fn meets(self, required: Self) -> bool {
        self.0 >= required.0
    }

    /// Ordinal distance from `current` up to `self`.
    ///
    /// An absent skill counts as level 0, so the gap is the full required
    /// level. Zero when `current` already meets `self`.
    #[must_use]
    pub fn gap_from(self, current: Option<Self>) -> u8 {
        self.0.saturating_sub(current.map_or(0, Self::value))
    }
}

impl TryFrom<u8> for SkillLevel {
    type Error = WorkforceError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<SkillLevel> for u8 {
    fn from(level: SkillLevel) -> Self {
        level.0
    }
}

impl fmt::Display for SkillLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name(), self.0)
    }
}
