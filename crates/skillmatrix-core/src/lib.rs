//! # skillmatrix-core
//!
//! The deterministic workforce-capability engine for skillmatrix - THE LOGIC.
//!
//! This crate compares employee skill profiles against the requirements of
//! positions and operational processes, scores and ranks the results, and
//! assembles remediation proposals (training paths, cost and time estimates).
//!
//! ## Services
//!
//! - `employment` - internal candidates for a position vs. external hiring
//! - `capability` - staffing adequacy of every process and how to close gaps
//! - `reliance` - processes that depend on zero or one capable worker
//!
//! ## Architectural Constraints
//!
//! - Input is an immutable [`Snapshot`] of plain relational records
//! - Every analysis is a pure function of the snapshot and its parameters
//! - Id-keyed collections are `BTreeMap`s; ranking ties resolve in id order
//! - Has NO async, NO I/O, NO network dependencies (pure Rust)

// =============================================================================
// MODULES
// =============================================================================

pub mod builder;
pub mod capability;
pub mod employment;
mod index;
pub mod matching;
pub mod primitives;
pub mod reliance;
pub mod snapshot;
pub mod suggestion;
pub mod summary;
pub mod training;
pub mod types;
pub mod workforce;

// =============================================================================
// RE-EXPORTS: Core Types (from types module)
// =============================================================================

pub use types::{
    DepartmentId, EmployeeId, EmployeeStatus, EnrollmentStatus, Money, PositionId, ProcessId,
    SkillCategory, SkillId, SkillLevel, SkillSource, TrainingCostType, TrainingId, TrainingResult,
    TrainingStatus, WorkforceError,
};

// =============================================================================
// RE-EXPORTS: Snapshot & Matching
// =============================================================================

pub use builder::SnapshotBuilder;
pub use matching::{
    HeldSkill, MatchResult, Requirement, SkillDirectory, SkillGap, SkillProfile, evaluate,
    is_capable, match_percentage, meets_all,
};
pub use snapshot::Snapshot;
pub use training::{TrainingPath, TrainingPathStep, TrainingScope};
pub use workforce::Workforce;

// =============================================================================
// RE-EXPORTS: Services
// =============================================================================

pub use capability::{
    CapabilityPriority, CapabilityReport, MissingSkillSummary, ProcessCapabilityGap,
    TrainingSuggestion,
};
pub use employment::{
    EmploymentAnalysis, ExternalHiringOption, InternalCandidate, OpenPosition, ScoreBreakdown,
};
pub use reliance::{CapableEmployee, RelianceIssue, RelianceReport, ReliancePriority};
pub use suggestion::EmployeeSuggestion;
pub use summary::SnapshotSummary;
