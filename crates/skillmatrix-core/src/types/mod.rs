//! # Core Type Definitions
//!
//! This module contains the shared vocabulary of the workforce engine:
//! - Entity identifiers (`SkillId`, `EmployeeId`, `DepartmentId`, `PositionId`,
//!   `ProcessId`, `TrainingId`)
//! - The ordinal skill scale (`SkillLevel`)
//! - Currency amounts (`Money`)
//! - Closed status/category enums carried by the snapshot records
//! - Error types (`WorkforceError`)
//!
//! ## Determinism Guarantees
//!
//! Every identifier implements `Ord` so it can key a `BTreeMap`/`BTreeSet`.
//! Currency is held in integer minor units; only percentages and scores are
//! floating point, and they never feed back into ordering keys without an
//! explicit total order.

mod level;
mod money;

pub use level::SkillLevel;
pub use money::Money;

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

// =============================================================================
// ENTITY IDENTIFIERS
// =============================================================================

macro_rules! entity_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(pub u32);

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

entity_id!(
    /// Identifier of a [`Skill`](crate::snapshot::Skill).
    SkillId
);
entity_id!(
    /// Identifier of an [`Employee`](crate::snapshot::Employee).
    EmployeeId
);
entity_id!(
    /// Identifier of a [`Department`](crate::snapshot::Department).
    DepartmentId
);
entity_id!(
    /// Identifier of a [`Position`](crate::snapshot::Position).
    PositionId
);
entity_id!(
    /// Identifier of an operational [`Process`](crate::snapshot::Process).
    ProcessId
);
entity_id!(
    /// Identifier of a [`Training`](crate::snapshot::Training).
    TrainingId
);

// =============================================================================
// STATUS & CATEGORY ENUMS
// =============================================================================

/// Employment status. Only `Active` employees take part in any analysis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum EmployeeStatus {
    #[default]
    Active,
    Terminated,
}

/// Broad skill classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SkillCategory {
    Technical,
    Soft,
    #[default]
    Unclassified,
}

/// Where an employee's skill came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SkillSource {
    Training,
    #[default]
    Previous,
}

/// Lifecycle of a training offering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum TrainingStatus {
    #[default]
    Suggested,
    Assigned,
    Planned,
    Ongoing,
    Completed,
    Cancelled,
}

impl TrainingStatus {
    /// Cancelled trainings are never proposed as remediation.
    #[must_use]
    pub const fn is_offered(self) -> bool {
        !matches!(self, Self::Cancelled)
    }
}

/// How a training's cost is quoted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum TrainingCostType {
    #[default]
    PerAttendee,
    Total,
}

/// An employee's enrollment state for one training.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum EnrollmentStatus {
    #[default]
    Assigned,
    Planned,
    Ongoing,
    Completed,
    Cancelled,
}

/// Outcome of an attended training.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum TrainingResult {
    Passed,
    Failed,
    #[default]
    Pending,
}

// =============================================================================
// ERROR TYPES
// =============================================================================

/// Errors that can occur in the workforce engine and its surfaces.
///
/// Empty requirement sets and dangling references are NOT errors: they
/// produce empty results or the "Unknown" label respectively.
#[derive(Debug, Error)]
pub enum WorkforceError {
    /// The requested position does not exist in the snapshot.
    #[error("Position not found: {0}")]
    PositionNotFound(PositionId),

    /// The requested process does not exist in the snapshot.
    #[error("Process not found: {0}")]
    ProcessNotFound(ProcessId),

    /// A skill level outside the ordinal 1..=5 scale.
    #[error("Invalid skill level {0}: expected 1..=5")]
    InvalidSkillLevel(u8),

    /// A caller-supplied parameter is out of range.
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Configuration could not be loaded or is inconsistent.
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// A serialization error occurred.
    #[error("Serialization error: {0}")]
    SerializationError(String),

    /// A deserialization error occurred.
    #[error("Deserialization error: {0}")]
    DeserializationError(String),

    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    IoError(String),
}

impl WorkforceError {
    /// True for the "referenced id does not exist" family.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::PositionNotFound(_) | Self::ProcessNotFound(_))
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_order_numerically() {
        let mut ids = vec![EmployeeId(7), EmployeeId(2), EmployeeId(11)];
        ids.sort();
        assert_eq!(ids, vec![EmployeeId(2), EmployeeId(7), EmployeeId(11)]);
    }

    #[test]
    fn ids_serialize_transparently() {
        let json = serde_json::to_string(&PositionId(42)).expect("serialize");
        assert_eq!(json, "42");
    }

    #[test]
    fn cancelled_training_is_not_offered() {
        assert!(!TrainingStatus::Cancelled.is_offered());
        assert!(TrainingStatus::Suggested.is_offered());
        assert!(TrainingStatus::Completed.is_offered());
    }

    #[test]
    fn enums_use_snake_case() {
        let json = serde_json::to_string(&TrainingCostType::PerAttendee).expect("serialize");
        assert_eq!(json, "\"per_attendee\"");
    }

    #[test]
    fn not_found_family() {
        assert!(WorkforceError::PositionNotFound(PositionId(1)).is_not_found());
        assert!(WorkforceError::ProcessNotFound(ProcessId(1)).is_not_found());
        assert!(!WorkforceError::InvalidSkillLevel(9).is_not_found());
    }
}
