//! Currency amounts in integer minor units (cents).

use super::WorkforceError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign};

/// A currency amount in minor units. `Money::from_minor(150_050)` is 1500.50.
///
/// Snapshot files carry amounts in minor units; configuration and the outer
/// surfaces accept major units and convert through [`Money::from_major_f64`].
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Money(i64);

impl Money {
    pub const ZERO: Self = Self(0);

    #[must_use]
    pub const fn from_minor(minor: i64) -> Self {
        Self(minor)
    }

    #[must_use]
    pub const fn from_major(major: i64) -> Self {
        Self(major.saturating_mul(100))
    }

    /// Convert a major-unit decimal (e.g. `5000.0`) to minor units,
    /// rounding half-cents to even.
    pub fn from_major_f64(major: f64) -> Result<Self, WorkforceError> {
        let minor = (major * 100.0).round_ties_even();
        if !minor.is_finite() || minor.abs() >= i64::MAX as f64 {
            return Err(WorkforceError::InvalidParameter(format!(
                "amount out of range: {major}"
            )));
        }
        Ok(Self(minor as i64))
    }

    #[must_use]
    pub const fn minor(self) -> i64 {
        self.0
    }

    /// Value in major units. Only for ratios and display.
    #[must_use]
    pub fn to_major(self) -> f64 {
        self.0 as f64 / 100.0
    }

    #[must_use]
    pub const fn is_negative(self) -> bool {
        self.0 < 0
    }

    /// `self × factor`, saturating.
    #[must_use]
    pub fn times(self, factor: u64) -> Self {
        let factor = i64::try_from(factor).unwrap_or(i64::MAX);
        Self(self.0.saturating_mul(factor))
    }

    /// Mean of two amounts, truncated toward zero at the cent.
    #[must_use]
    pub fn midpoint(self, other: Self) -> Self {
        let sum = i128::from(self.0) + i128::from(other.0);
        Self((sum / 2) as i64)
    }
}

impl Add for Money {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self(self.0.saturating_add(rhs.0))
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Add::add)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        write!(f, "{sign}{}.{:02}", abs / 100, abs % 100)
    }
}
