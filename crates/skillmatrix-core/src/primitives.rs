//! # Analysis Primitives
//!
//! Fixed thresholds, weights and caps used by the analysis services.
//!
//! These are compiled in and immutable at runtime. The only per-call tunable
//! is the training cost per skill level, which callers pass explicitly;
//! [`DEFAULT_TRAINING_COST_PER_LEVEL`] is what the outer surfaces fall back to.

use crate::types::{Money, SkillLevel};

// =============================================================================
// MATCH THRESHOLDS
// =============================================================================

/// Minimum match percentage for an internal employment candidate.
pub const MIN_EMPLOYMENT_MATCH_PERCENT: f64 = 70.0;

/// Minimum match percentage for a capability-enhancement employee suggestion.
pub const MIN_CAPABILITY_MATCH_PERCENT: f64 = 75.0;

/// Maximum missing requirements for a worker-reliance suggestion.
///
/// Suggestions need at least one and at most this many unmet requirements.
pub const MAX_MISSING_FOR_RELIANCE: usize = 2;

// =============================================================================
// CANDIDATE SCORE WEIGHTS
// =============================================================================

/// Weight of the matching-skills sub-score.
pub const WEIGHT_MATCHING_SKILLS: f64 = 0.60;

/// Weight of the level-proximity sub-score.
pub const WEIGHT_LEVEL_PROXIMITY: f64 = 0.25;

/// Weight of the training-cost sub-score.
pub const WEIGHT_TRAINING_COST: f64 = 0.15;

/// Highest ordinal on the skill scale, used to normalise gaps and costs.
pub const MAX_SKILL_LEVEL: u8 = SkillLevel::MAX_VALUE;

// =============================================================================
// RESULT CAPS
// =============================================================================

/// Ranked internal candidates returned per position.
pub const TOP_CANDIDATES: usize = 5;

/// Employees per suggestion list (quickest, cheapest, same/cross department).
pub const MAX_SUGGESTIONS: usize = 5;

/// Trainings proposed per skill gap.
pub const MAX_TRAININGS_PER_GAP: usize = 2;

// =============================================================================
// DEFAULTS & LABELS
// =============================================================================

/// Default training cost per skill level (5000.00).
pub const DEFAULT_TRAINING_COST_PER_LEVEL: Money = Money::from_major(5000);

/// Label used whenever a referenced entity is absent from the snapshot.
pub const UNKNOWN_LABEL: &str = "Unknown";

/// Days in a tenure month.
pub const DAYS_PER_TENURE_MONTH: i64 = 30;
