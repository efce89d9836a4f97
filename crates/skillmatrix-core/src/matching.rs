//! # Skill Match Primitive
//!
//! Compares one skill profile against one requirement list. Every analysis
//! service funnels through [`evaluate`].
//!
//! For each requirement the profile either *matches* (held at or above the
//! required level) or produces a [`SkillGap`]. An absent skill is a gap of
//! the full required level and is flagged `is_missing`; a skill held below
//! the required level is a partial gap with `is_missing == false`.
//!
//! ## Zero requirements
//!
//! `evaluate` on an empty requirement list reports a 100% match, while
//! [`is_capable`] reports `false`. The two conventions coexist on purpose;
//! callers that count capable workers use `is_capable`.

use crate::primitives::UNKNOWN_LABEL;
use crate::types::{Money, SkillId, SkillLevel};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// An employee's held skills: skill → current level.
pub type SkillProfile = BTreeMap<SkillId, SkillLevel>;

/// One (skill, minimum level) requirement of a position or process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Requirement {
    pub skill_id: SkillId,
    pub required_level: SkillLevel,
}

impl Requirement {
    #[must_use]
    pub const fn new(skill_id: SkillId, required_level: SkillLevel) -> Self {
        Self {
            skill_id,
            required_level,
        }
    }

    /// True if `profile` holds this skill at or above the required level.
    #[must_use]
    pub fn is_met_by(&self, profile: &SkillProfile) -> bool {
        profile
            .get(&self.skill_id)
            .is_some_and(|level| level.meets(self.required_level))
    }
}

/// Resolves skill names for display.
pub trait SkillDirectory {
    fn skill_name(&self, id: SkillId) -> Option<&str>;

    /// Name or the "Unknown" label.
    fn skill_label(&self, id: SkillId) -> &str {
        self.skill_name(id).unwrap_or(UNKNOWN_LABEL)
    }
}

impl SkillDirectory for BTreeMap<SkillId, String> {
    fn skill_name(&self, id: SkillId) -> Option<&str> {
        self.get(&id).map(String::as_str)
    }
}

/// A requirement the profile does not meet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillGap {
    pub skill_id: SkillId,
    pub skill_name: String,
    pub required_level: SkillLevel,
    /// `None` when the skill is not held at all.
    pub current_level: Option<SkillLevel>,
    pub gap_amount: u8,
    pub is_missing: bool,
}

/// A requirement whose skill the profile holds, at any level.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeldSkill {
    pub skill_id: SkillId,
    pub skill_name: String,
    pub required_level: SkillLevel,
    pub current_level: SkillLevel,
    pub meets_requirement: bool,
}

/// Aggregate outcome of [`evaluate`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchResult {
    pub matching_count: usize,
    pub total_required: usize,
    pub match_percentage: f64,
    /// Gaps in requirement order.
    pub gaps: Vec<SkillGap>,
    /// Held requirement skills in requirement order.
    pub held: Vec<HeldSkill>,
    /// Σ gap_amount × cost per level.
    pub estimated_cost: Money,
}

impl MatchResult {
    #[must_use]
    pub fn missing_count(&self) -> usize {
        self.total_required - self.matching_count
    }

    /// Mean gap amount over the gapped requirements only; 0 without gaps.
    #[must_use]
    pub fn average_gap(&self) -> f64 {
        if self.gaps.is_empty() {
            return 0.0;
        }
        let total: u32 = self.gaps.iter().map(|g| u32::from(g.gap_amount)).sum();
        f64::from(total) / self.gaps.len() as f64
    }
}

/// `matching / total × 100`, or 100 when `total == 0`.
#[must_use]
pub fn match_percentage(matching: usize, total: usize) -> f64 {
    if total == 0 {
        return 100.0;
    }
    matching as f64 / total as f64 * 100.0
}

/// Evaluate `profile` against `requirements`.
pub fn evaluate<D>(
    profile: &SkillProfile,
    requirements: &[Requirement],
    directory: &D,
    cost_per_level: Money,
) -> MatchResult
where
    D: SkillDirectory + ?Sized,
{
    let mut matching_count = 0;
    let mut gaps = Vec::new();
    let mut held = Vec::new();
    let mut estimated_cost = Money::ZERO;

    for req in requirements {
        let current = profile.get(&req.skill_id).copied();
        let name = directory.skill_label(req.skill_id);

        if let Some(level) = current {
            held.push(HeldSkill {
                skill_id: req.skill_id,
                skill_name: name.to_string(),
                required_level: req.required_level,
                current_level: level,
                meets_requirement: level.meets(req.required_level),
            });
        }

        if current.is_some_and(|level| level.meets(req.required_level)) {
            matching_count += 1;
            continue;
        }

        let gap_amount = req.required_level.gap_from(current);
        estimated_cost += cost_per_level.times(u64::from(gap_amount));
        gaps.push(SkillGap {
            skill_id: req.skill_id,
            skill_name: name.to_string(),
            required_level: req.required_level,
            current_level: current,
            gap_amount,
            is_missing: current.is_none(),
        });
    }

    MatchResult {
        matching_count,
        total_required: requirements.len(),
        match_percentage: match_percentage(matching_count, requirements.len()),
        gaps,
        held,
        estimated_cost,
    }
}

/// True if every requirement is met.
///
/// Vacuously true for an empty list; see [`is_capable`] for the capability
/// convention.
#[must_use]
pub fn meets_all(profile: &SkillProfile, requirements: &[Requirement]) -> bool {
    requirements.iter().all(|req| req.is_met_by(profile))
}

/// Capable worker test: a non-empty requirement list, all met.
#[must_use]
pub fn is_capable(profile: &SkillProfile, requirements: &[Requirement]) -> bool {
    !requirements.is_empty() && meets_all(profile, requirements)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn level(v: u8) -> SkillLevel {
        SkillLevel::new(v).expect("valid level")
    }

    fn req(skill: u32, lvl: u8) -> Requirement {
        Requirement::new(SkillId(skill), level(lvl))
    }

    fn names() -> BTreeMap<SkillId, String> {
        BTreeMap::from([
            (SkillId(1), "Welding".to_string()),
            (SkillId(2), "Blueprints".to_string()),
        ])
    }

    #[test]
    fn partial_gap_is_not_missing() {
        let profile = SkillProfile::from([(SkillId(1), level(4)), (SkillId(2), level(1))]);
        let result = evaluate(
            &profile,
            &[req(1, 4), req(2, 3)],
            &names(),
            Money::from_major(5000),
        );
        assert_eq!(result.matching_count, 1);
        assert!((result.match_percentage - 50.0).abs() < f64::EPSILON);
        assert_eq!(result.gaps.len(), 1);
        let gap = &result.gaps[0];
        assert_eq!(gap.skill_id, SkillId(2));
        assert_eq!(gap.skill_name, "Blueprints");
        assert_eq!(gap.gap_amount, 2);
        assert!(!gap.is_missing);
        assert_eq!(gap.current_level, Some(level(1)));
        assert_eq!(result.estimated_cost, Money::from_major(10_000));
    }

    #[test]
    fn absent_skill_is_full_gap() {
        let result = evaluate(
            &SkillProfile::new(),
            &[req(1, 3)],
            &names(),
            Money::from_major(100),
        );
        let gap = &result.gaps[0];
        assert!(gap.is_missing);
        assert_eq!(gap.gap_amount, 3);
        assert_eq!(gap.current_level, None);
        assert!(result.held.is_empty());
    }

    #[test]
    fn unknown_skill_is_labelled() {
        let result = evaluate(&SkillProfile::new(), &[req(99, 1)], &names(), Money::ZERO);
        assert_eq!(result.gaps[0].skill_name, UNKNOWN_LABEL);
    }

    #[test]
    fn held_lists_every_held_requirement() {
        let profile = SkillProfile::from([(SkillId(1), level(5)), (SkillId(2), level(2))]);
        let result = evaluate(&profile, &[req(1, 3), req(2, 3)], &names(), Money::ZERO);
        assert_eq!(result.held.len(), 2);
        assert!(result.held[0].meets_requirement);
        assert!(!result.held[1].meets_requirement);
    }

    #[test]
    fn average_gap_over_gapped_only() {
        let profile = SkillProfile::from([(SkillId(1), level(5))]);
        let result = evaluate(
            &profile,
            &[req(1, 3), req(2, 4), req(3, 2)],
            &names(),
            Money::ZERO,
        );
        assert!((result.average_gap() - 3.0).abs() < f64::EPSILON);
        assert_eq!(result.missing_count(), 2);
    }

    #[test]
    fn empty_requirements_match_fully_but_are_not_capable() {
        let profile = SkillProfile::from([(SkillId(1), level(5))]);
        let result = evaluate(&profile, &[], &names(), Money::ZERO);
        assert!((result.match_percentage - 100.0).abs() < f64::EPSILON);
        assert!(meets_all(&profile, &[]));
        assert!(!is_capable(&profile, &[]));
    }

    #[test]
    fn capable_requires_every_requirement() {
        let profile = SkillProfile::from([(SkillId(1), level(3)), (SkillId(2), level(3))]);
        assert!(is_capable(&profile, &[req(1, 3), req(2, 2)]));
        assert!(!is_capable(&profile, &[req(1, 3), req(2, 4)]));
    }
}
