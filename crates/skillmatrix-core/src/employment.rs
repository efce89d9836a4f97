//! # Employment Analysis
//!
//! Ranks internal employees as substitutes for hiring into a position and
//! prices the external alternative. Also answers the open-position queries.
//!
//! ## Candidate score
//!
//! Three sub-scores, each in 0..=100:
//!
//! | Sub-score       | Formula                                   | Weight |
//! |-----------------|-------------------------------------------|--------|
//! | matching skills | match percentage                          | 0.60   |
//! | level proximity | `(1 - average_gap / 5) * 100`, floor 0    | 0.25   |
//! | training cost   | `(1 - cost / max_cost) * 100`, floor 0    | 0.15   |
//!
//! `max_cost = required_count * 5 * cost_per_level`. A zero average gap or
//! a zero `max_cost` scores 100. The total is rounded to two decimals,
//! half to even.

use crate::matching::{HeldSkill, SkillGap, evaluate};
use crate::primitives::{
    MAX_SKILL_LEVEL, MIN_EMPLOYMENT_MATCH_PERCENT, TOP_CANDIDATES, WEIGHT_LEVEL_PROXIMITY,
    WEIGHT_MATCHING_SKILLS, WEIGHT_TRAINING_COST,
};
use crate::snapshot::Position;
use crate::types::{DepartmentId, EmployeeId, Money, PositionId, WorkforceError};
use crate::workforce::{Workforce, check_cost_per_level};
use serde::{Deserialize, Serialize};

/// Round to two decimals, ties to even.
#[must_use]
pub fn round_score(value: f64) -> f64 {
    (value * 100.0).round_ties_even() / 100.0
}

/// The weighted sub-scores of one candidate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub matching_score: f64,
    pub proximity_score: f64,
    pub cost_score: f64,
}

impl ScoreBreakdown {
    #[must_use]
    pub fn compute(
        match_percentage: f64,
        average_gap: f64,
        training_cost: Money,
        max_possible_cost: Money,
    ) -> Self {
        let max_level = f64::from(MAX_SKILL_LEVEL);
        let proximity_score = if average_gap == 0.0 {
            100.0
        } else {
            ((1.0 - average_gap / max_level) * 100.0).max(0.0)
        };
        let cost_score = if max_possible_cost == Money::ZERO {
            100.0
        } else {
            ((1.0 - training_cost.to_major() / max_possible_cost.to_major()) * 100.0).max(0.0)
        };
        Self {
            matching_score: match_percentage,
            proximity_score,
            cost_score,
        }
    }

    /// Weighted total, rounded to two decimals.
    #[must_use]
    pub fn total(&self) -> f64 {
        round_score(
            self.matching_score * WEIGHT_MATCHING_SKILLS
                + self.proximity_score * WEIGHT_LEVEL_PROXIMITY
                + self.cost_score * WEIGHT_TRAINING_COST,
        )
    }
}

/// An internal employee ranked for a position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InternalCandidate {
    pub employee_id: EmployeeId,
    pub employee_name: String,
    pub current_position_name: String,
    pub current_salary: Money,
    pub match_percentage: f64,
    pub total_score: f64,
    pub score: ScoreBreakdown,
    pub matching_skills_count: usize,
    pub required_skills_count: usize,
    pub average_skill_gap: f64,
    pub estimated_training_cost: Money,
    pub skill_gaps: Vec<SkillGap>,
    pub held_skills: Vec<HeldSkill>,
}

/// Cost of hiring externally into a position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExternalHiringOption {
    pub position_name: String,
    pub hiring_cost: Money,
    /// Midpoint of the salary band.
    pub starting_salary: Money,
    pub total_cost: Money,
}

impl ExternalHiringOption {
    #[must_use]
    pub fn for_position(position: &Position) -> Self {
        let starting_salary = position.min_salary.midpoint(position.max_salary);
        Self {
            position_name: position.name.clone(),
            hiring_cost: position.hiring_cost,
            starting_salary,
            total_cost: position.hiring_cost + starting_salary,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmploymentAnalysis {
    pub position_id: PositionId,
    pub position_name: String,
    pub training_cost_per_level: Money,
    pub required_skills_count: usize,
    /// Top candidates by total score, descending.
    pub candidates: Vec<InternalCandidate>,
    /// `None` when the position defines no required skills.
    pub external_option: Option<ExternalHiringOption>,
}

impl EmploymentAnalysis {
    /// True when the position defines no required skills, so no candidate
    /// ranking was attempted.
    #[must_use]
    pub fn has_no_requirements(&self) -> bool {
        self.required_skills_count == 0
    }
}

/// A position with unfilled capacity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OpenPosition {
    pub position_id: PositionId,
    pub name: String,
    pub department_id: DepartmentId,
    pub department_name: String,
    pub level: u32,
    pub capacity: u32,
    pub open_slots: i64,
}

impl Workforce {
    /// Rank active employees as internal candidates for `position_id`.
    pub fn analyze_candidates(
        &self,
        position_id: PositionId,
        cost_per_level: Money,
    ) -> Result<EmploymentAnalysis, WorkforceError> {
        let cost_per_level = check_cost_per_level(cost_per_level)?;
        let position = self.require_position(position_id)?;
        let requirements = self.position_requirements(position_id);

        let mut analysis = EmploymentAnalysis {
            position_id,
            position_name: position.name.clone(),
            training_cost_per_level: cost_per_level,
            required_skills_count: requirements.len(),
            candidates: Vec::new(),
            external_option: None,
        };
        if requirements.is_empty() {
            tracing::debug!(position = %position_id, "position has no required skills");
            return Ok(analysis);
        }

        let max_possible_cost = cost_per_level
            .times(u64::from(MAX_SKILL_LEVEL))
            .times(requirements.len() as u64);

        let mut candidates: Vec<InternalCandidate> = self
            .active_employees()
            .filter_map(|employee| {
                let result = evaluate(self.profile(employee.id), requirements, self, cost_per_level);
                if result.match_percentage < MIN_EMPLOYMENT_MATCH_PERCENT {
                    return None;
                }
                let average_gap = result.average_gap();
                let score = ScoreBreakdown::compute(
                    result.match_percentage,
                    average_gap,
                    result.estimated_cost,
                    max_possible_cost,
                );
                Some(InternalCandidate {
                    employee_id: employee.id,
                    employee_name: employee.full_name(),
                    current_position_name: self.position_name(employee.position_id).to_string(),
                    current_salary: employee.current_salary,
                    match_percentage: result.match_percentage,
                    total_score: score.total(),
                    score,
                    matching_skills_count: result.matching_count,
                    required_skills_count: result.total_required,
                    average_skill_gap: average_gap,
                    estimated_training_cost: result.estimated_cost,
                    skill_gaps: result.gaps,
                    held_skills: result.held,
                })
            })
            .collect();

        let qualified = candidates.len();
        candidates.sort_by(|a, b| b.total_score.total_cmp(&a.total_score));
        candidates.truncate(TOP_CANDIDATES);

        tracing::debug!(
            position = %position_id,
            qualified,
            returned = candidates.len(),
            "employment analysis complete"
        );

        analysis.candidates = candidates;
        analysis.external_option = Some(ExternalHiringOption::for_position(position));
        Ok(analysis)
    }

    // =========================================================================
    // OPEN POSITIONS
    // =========================================================================

    fn open_positions_where(&self, keep: impl Fn(&Position) -> bool) -> Vec<OpenPosition> {
        let mut open: Vec<OpenPosition> = self
            .positions()
            .filter(|p| keep(p))
            .filter_map(|p| {
                let open_slots = self.open_slots(p);
                (open_slots > 0).then(|| OpenPosition {
                    position_id: p.id,
                    name: p.name.clone(),
                    department_id: p.department_id,
                    department_name: self.department_name(p.department_id).to_string(),
                    level: p.level,
                    capacity: p.capacity,
                    open_slots,
                })
            })
            .collect();
        open.sort_by(|a, b| b.open_slots.cmp(&a.open_slots));
        open
    }

    /// Positions with open slots, most open first.
    pub fn open_positions(&self) -> Vec<OpenPosition> {
        self.open_positions_where(|_| true)
    }

    pub fn open_positions_in_department(&self, department: DepartmentId) -> Vec<OpenPosition> {
        self.open_positions_where(|p| p.department_id == department)
    }

    /// Open positions with `min_level <= level <= max_level`.
    pub fn open_positions_by_level(
        &self,
        min_level: u32,
        max_level: u32,
    ) -> Result<Vec<OpenPosition>, WorkforceError> {
        if min_level > max_level {
            return Err(WorkforceError::InvalidParameter(format!(
                "level range {min_level}..={max_level} is inverted"
            )));
        }
        Ok(self.open_positions_where(|p| (min_level..=max_level).contains(&p.level)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::SnapshotBuilder;
    use crate::primitives::DEFAULT_TRAINING_COST_PER_LEVEL;
    use crate::snapshot::Snapshot;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    fn snapshot() -> Snapshot {
        SnapshotBuilder::new()
            .department(1, "Engineering")
            .department(2, "Support")
            .skill(1, "Rust")
            .skill(2, "SQL")
            .skill(3, "Linux")
            .skill(4, "Networking")
            .position(1, "Backend Engineer", 1, 3)
            .position_level(1, 3)
            .position_compensation(
                1,
                Money::from_major(60_000),
                Money::from_major(80_000),
                Money::from_major(8_000),
            )
            .position_skill(1, 1, 4)
            .position_skill(1, 2, 3)
            .position_skill(1, 3, 3)
            .position_skill(1, 4, 2)
            .position(2, "Support Engineer", 2, 1)
            .position_level(2, 1)
            .position(3, "Empty Role", 1, 2)
            .position_level(3, 5)
            // Full match.
            .employee(1, "Ada Byron", 1, 2)
            .salary(1, Money::from_major(50_000))
            .employee_skill(1, 1, 4)
            .employee_skill(1, 2, 3)
            .employee_skill(1, 3, 5)
            .employee_skill(1, 4, 2)
            // 3 of 4, one skill missing entirely.
            .employee(2, "Alan Turing", 2, 2)
            .employee_skill(2, 1, 5)
            .employee_skill(2, 2, 3)
            .employee_skill(2, 3, 3)
            // 3 of 4, one skill one level short.
            .employee(3, "Grace Hopper", 2, 2)
            .employee_skill(3, 1, 4)
            .employee_skill(3, 2, 3)
            .employee_skill(3, 3, 3)
            .employee_skill(3, 4, 1)
            // 2 of 4, below threshold.
            .employee(4, "Edsger Dijkstra", 1, 99)
            .employee_skill(4, 1, 4)
            .employee_skill(4, 2, 3)
            .build()
            .expect("valid snapshot")
    }

    #[test]
    fn unknown_position_is_an_error() {
        let wf = Workforce::new(snapshot());
        assert!(matches!(
            wf.analyze_candidates(PositionId(42), DEFAULT_TRAINING_COST_PER_LEVEL),
            Err(WorkforceError::PositionNotFound(PositionId(42)))
        ));
    }

    #[test]
    fn negative_cost_is_invalid() {
        let wf = Workforce::new(snapshot());
        assert!(matches!(
            wf.analyze_candidates(PositionId(1), Money::from_minor(-5)),
            Err(WorkforceError::InvalidParameter(_))
        ));
    }

    #[test]
    fn no_requirements_yields_empty_result() {
        let wf = Workforce::new(snapshot());
        let analysis = wf
            .analyze_candidates(PositionId(2), DEFAULT_TRAINING_COST_PER_LEVEL)
            .expect("position exists");
        assert!(analysis.has_no_requirements());
        assert!(analysis.candidates.is_empty());
        assert!(analysis.external_option.is_none());
    }

    #[test]
    fn candidates_ranked_by_weighted_score() {
        let wf = Workforce::new(snapshot());
        let analysis = wf
            .analyze_candidates(PositionId(1), DEFAULT_TRAINING_COST_PER_LEVEL)
            .expect("position exists");
        let ids: Vec<_> = analysis.candidates.iter().map(|c| c.employee_id).collect();
        assert_eq!(ids, vec![EmployeeId(1), EmployeeId(3), EmployeeId(2)]);

        let top = &analysis.candidates[0];
        assert!(close(top.total_score, 100.0));
        assert_eq!(top.current_position_name, "Support Engineer");
        assert_eq!(top.current_salary, Money::from_major(50_000));

        // Grace: 75% match, one-level gap, cost 5000 of 100000.
        // 0.6*75 + 0.25*80 + 0.15*95 = 79.25
        let grace = &analysis.candidates[1];
        assert!(close(grace.total_score, 79.25));
        assert!(close(grace.average_skill_gap, 1.0));
        assert_eq!(grace.held_skills.len(), 4);

        // Alan: missing Networking (gap 2). 45 + 15 + 13.5 = 73.5
        let alan = &analysis.candidates[2];
        assert!(close(alan.total_score, 73.5));
        assert!(alan.skill_gaps[0].is_missing);
        assert_eq!(alan.estimated_training_cost, Money::from_major(10_000));
    }

    #[test]
    fn below_threshold_is_excluded() {
        let wf = Workforce::new(snapshot());
        let analysis = wf
            .analyze_candidates(PositionId(1), DEFAULT_TRAINING_COST_PER_LEVEL)
            .expect("position exists");
        assert!(analysis
            .candidates
            .iter()
            .all(|c| c.employee_id != EmployeeId(4)));
        assert!(analysis
            .candidates
            .iter()
            .all(|c| c.match_percentage >= MIN_EMPLOYMENT_MATCH_PERCENT));
    }

    #[test]
    fn external_option_uses_salary_midpoint() {
        let wf = Workforce::new(snapshot());
        let analysis = wf
            .analyze_candidates(PositionId(1), DEFAULT_TRAINING_COST_PER_LEVEL)
            .expect("position exists");
        let external = analysis.external_option.expect("requirements exist");
        assert_eq!(external.starting_salary, Money::from_major(70_000));
        assert_eq!(external.total_cost, Money::from_major(78_000));
    }

    #[test]
    fn zero_cost_per_level_scores_full_cost() {
        let score = ScoreBreakdown::compute(50.0, 2.0, Money::ZERO, Money::ZERO);
        assert!(close(score.cost_score, 100.0));
        assert!(close(score.proximity_score, 60.0));
        assert!(close(score.total(), 30.0 + 15.0 + 15.0));
    }

    #[test]
    fn sub_scores_floor_at_zero() {
        let score = ScoreBreakdown::compute(0.0, 6.0, Money::from_major(10), Money::from_major(5));
        assert!(close(score.proximity_score, 0.0));
        assert!(close(score.cost_score, 0.0));
    }

    #[test]
    fn rounding_is_half_to_even() {
        assert!(close(round_score(1.125), 1.12));
        assert!(close(round_score(79.254), 79.25));
    }

    #[test]
    fn open_positions_sorted_by_open_slots() {
        let wf = Workforce::new(snapshot());
        let open: Vec<_> = wf
            .open_positions()
            .iter()
            .map(|p| (p.position_id, p.open_slots))
            .collect();
        // Backend: 3 - 0, Empty Role: 2 - 0, Support: 1 - 3 (over-staffed).
        assert_eq!(open, vec![(PositionId(1), 3), (PositionId(3), 2)]);
    }

    #[test]
    fn open_positions_filters() {
        let wf = Workforce::new(snapshot());
        assert!(wf.open_positions_in_department(DepartmentId(2)).is_empty());
        let by_level = wf.open_positions_by_level(4, 5).expect("valid range");
        assert_eq!(by_level.len(), 1);
        assert_eq!(by_level[0].position_id, PositionId(3));
        assert_eq!(by_level[0].department_name, "Engineering");
        assert!(matches!(
            wf.open_positions_by_level(5, 1),
            Err(WorkforceError::InvalidParameter(_))
        ));
    }
}
