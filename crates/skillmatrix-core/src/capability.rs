//! # Capability Enhancement
//!
//! Classifies every process by how well it can be staffed and proposes
//! remediation: trainings that teach its required skills and employees from
//! the assigned positions' departments who are close to qualifying.
//!
//! ## Priority (first match wins)
//!
//! 1. `Critical`: no capable worker.
//! 2. `High`: assigned to at least one position and below target.
//! 3. `Medium`: below target.
//! 4. `Ok`: at or above target; left out of [`CapabilityReport`].
//!
//! A process without required skills has no capable workers.
//!
//! Training lookups stay inside the employee's department
//! ([`TrainingScope::DepartmentOnly`]).

use crate::matching::{Requirement, SkillDirectory};
use crate::primitives::{MAX_SUGGESTIONS, MIN_CAPABILITY_MATCH_PERCENT};
use crate::snapshot::{Process, Training};
use crate::suggestion::{EmployeeSuggestion, cheapest_first, quickest_first};
use crate::training::TrainingScope;
use crate::types::{DepartmentId, Money, ProcessId, SkillId, SkillLevel, TrainingId, WorkforceError};
use crate::workforce::{Workforce, check_cost_per_level};
use serde::{Deserialize, Serialize};
use std::cmp::Reverse;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CapabilityPriority {
    Critical,
    High,
    Medium,
    Ok,
}

impl CapabilityPriority {
    /// Classify a process.
    #[must_use]
    pub fn classify(capable_workers: usize, assigned_to_positions: bool, worker_gap: i64) -> Self {
        if capable_workers == 0 {
            Self::Critical
        } else if assigned_to_positions && worker_gap > 0 {
            Self::High
        } else if worker_gap > 0 {
            Self::Medium
        } else {
            Self::Ok
        }
    }

    /// 1 (most urgent) to 4.
    #[must_use]
    pub const fn rank(self) -> u8 {
        match self {
            Self::Critical => 1,
            Self::High => 2,
            Self::Medium => 3,
            Self::Ok => 4,
        }
    }

    #[must_use]
    pub fn reason(self, worker_gap: i64) -> String {
        match self {
            Self::Critical => "CRITICAL: No capable workers - process cannot be performed".into(),
            Self::High => "HIGH: Process assigned to positions but has worker gap".into(),
            Self::Medium => format!("MEDIUM: Below target by {worker_gap} workers"),
            Self::Ok => "OK: Meets or exceeds target".into(),
        }
    }
}

/// Coverage of one required skill among active employees.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MissingSkillSummary {
    pub skill_id: SkillId,
    pub skill_name: String,
    pub required_level: SkillLevel,
    /// Holding the skill at any level.
    pub employees_with_skill: usize,
    pub employees_at_required_level: usize,
}

/// An offered training that teaches some of a process's required skills.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrainingSuggestion {
    pub training_id: TrainingId,
    pub training_name: String,
    pub cost: Money,
    pub duration_hours: u32,
    pub target_department_id: DepartmentId,
    pub target_department_name: String,
    pub skills_it_addresses: Vec<SkillId>,
    /// Active employees of the target department meeting its prerequisites.
    pub eligible_employees_count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessCapabilityGap {
    pub process_id: ProcessId,
    pub process_description: String,
    pub priority: CapabilityPriority,
    pub priority_reason: String,
    pub capable_workers: usize,
    pub aimed_workers: u32,
    pub worker_gap: i64,
    pub assigned_position_names: Vec<String>,
    pub missing_skills: Vec<MissingSkillSummary>,
    pub suggested_trainings: Vec<TrainingSuggestion>,
    pub quickest_fix: Vec<EmployeeSuggestion>,
    pub cheapest_fix: Vec<EmployeeSuggestion>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CapabilityReport {
    pub training_cost_per_level: Money,
    /// Priority ascending, then worker gap descending.
    pub process_gaps: Vec<ProcessCapabilityGap>,
    pub critical_count: usize,
    pub high_count: usize,
    pub medium_count: usize,
}

impl Workforce {
    /// Capability gaps of every process that is not `Ok`.
    pub fn analyze_capability_gaps(
        &self,
        cost_per_level: Money,
    ) -> Result<CapabilityReport, WorkforceError> {
        let cost_per_level = check_cost_per_level(cost_per_level)?;

        let mut process_gaps: Vec<ProcessCapabilityGap> = self
            .processes()
            .filter_map(|process| self.process_gap(process, cost_per_level, false))
            .collect();
        process_gaps.sort_by_key(|g| (g.priority, Reverse(g.worker_gap)));

        let count = |p: CapabilityPriority| process_gaps.iter().filter(|g| g.priority == p).count();
        let (critical_count, high_count, medium_count) = (
            count(CapabilityPriority::Critical),
            count(CapabilityPriority::High),
            count(CapabilityPriority::Medium),
        );
        let report = CapabilityReport {
            training_cost_per_level: cost_per_level,
            process_gaps,
            critical_count,
            high_count,
            medium_count,
        };

        tracing::debug!(
            gaps = report.process_gaps.len(),
            critical = report.critical_count,
            high = report.high_count,
            medium = report.medium_count,
            "capability analysis complete"
        );
        Ok(report)
    }

    /// Capability record of one process, `Ok` included.
    pub fn analyze_process_gap(
        &self,
        process_id: ProcessId,
        cost_per_level: Money,
    ) -> Result<ProcessCapabilityGap, WorkforceError> {
        let cost_per_level = check_cost_per_level(cost_per_level)?;
        let process = self.require_process(process_id)?;
        self.process_gap(process, cost_per_level, true)
            .ok_or(WorkforceError::ProcessNotFound(process_id))
    }

    fn process_gap(
        &self,
        process: &Process,
        cost_per_level: Money,
        include_ok: bool,
    ) -> Option<ProcessCapabilityGap> {
        let requirements = self.process_requirements(process.id);
        let capable_workers = self.capable_employees(requirements).len();
        let worker_gap = i64::from(process.aimed_workers) - capable_workers as i64;
        let assigned_position_names = self.assigned_position_names(process.id);

        let priority =
            CapabilityPriority::classify(capable_workers, !assigned_position_names.is_empty(), worker_gap);
        if priority == CapabilityPriority::Ok && !include_ok {
            return None;
        }

        let (quickest_fix, cheapest_fix) = self.suggest_employees(process.id, cost_per_level);

        Some(ProcessCapabilityGap {
            process_id: process.id,
            process_description: process.description.clone(),
            priority,
            priority_reason: priority.reason(worker_gap),
            capable_workers,
            aimed_workers: process.aimed_workers,
            worker_gap,
            assigned_position_names,
            missing_skills: self.missing_skill_summary(requirements),
            suggested_trainings: self.suggest_trainings(requirements),
            quickest_fix,
            cheapest_fix,
        })
    }

    /// Holder counts for every requirement, in requirement order.
    pub fn missing_skill_summary(&self, requirements: &[Requirement]) -> Vec<MissingSkillSummary> {
        requirements
            .iter()
            .map(|req| {
                let (with_skill, at_level) = self.active_holders(req.skill_id).fold(
                    (0, 0),
                    |(with_skill, at_level), (_, level)| {
                        (
                            with_skill + 1,
                            at_level + usize::from(level.meets(req.required_level)),
                        )
                    },
                );
                MissingSkillSummary {
                    skill_id: req.skill_id,
                    skill_name: self.skill_label(req.skill_id).to_string(),
                    required_level: req.required_level,
                    employees_with_skill: with_skill,
                    employees_at_required_level: at_level,
                }
            })
            .collect()
    }

    /// Offered trainings teaching any required skill, most skills addressed
    /// first.
    pub fn suggest_trainings(&self, requirements: &[Requirement]) -> Vec<TrainingSuggestion> {
        let mut suggestions: Vec<TrainingSuggestion> = self
            .trainings()
            .filter(|t| t.status.is_offered())
            .filter_map(|training| {
                let skills_it_addresses: Vec<SkillId> = self
                    .taught_skills(training.id)
                    .iter()
                    .map(|&(skill, _)| skill)
                    .filter(|skill| requirements.iter().any(|r| r.skill_id == *skill))
                    .collect();
                if skills_it_addresses.is_empty() {
                    return None;
                }
                Some(TrainingSuggestion {
                    training_id: training.id,
                    training_name: training.name.clone(),
                    cost: training.cost,
                    duration_hours: training.duration_hours,
                    target_department_id: training.target_department_id,
                    target_department_name: self
                        .department_name(training.target_department_id)
                        .to_string(),
                    skills_it_addresses,
                    eligible_employees_count: self.count_eligible(training),
                })
            })
            .collect();
        suggestions.sort_by_key(|s| Reverse(s.skills_it_addresses.len()));
        suggestions
    }

    /// Active employees of the training's department meeting its prerequisites.
    pub fn count_eligible(&self, training: &Training) -> usize {
        self.active_in_department(training.target_department_id)
            .iter()
            .filter_map(|&id| self.employee(id))
            .filter(|employee| self.meets_prerequisites(employee, training))
            .count()
    }

    /// Quickest and cheapest fixes among the assigned departments' active
    /// employees with at least the minimum match. Empty for a process
    /// without requirements.
    fn suggest_employees(
        &self,
        process_id: ProcessId,
        cost_per_level: Money,
    ) -> (Vec<EmployeeSuggestion>, Vec<EmployeeSuggestion>) {
        let requirements = self.process_requirements(process_id);
        if requirements.is_empty() {
            return (Vec::new(), Vec::new());
        }
        let departments = self.process_departments(process_id);

        let candidates: Vec<EmployeeSuggestion> = self
            .active_employees()
            .filter(|e| departments.contains(&e.department_id))
            .map(|e| {
                self.evaluate_for_process(
                    e,
                    requirements,
                    &departments,
                    cost_per_level,
                    TrainingScope::DepartmentOnly,
                )
            })
            .filter(|s| s.match_percentage >= MIN_CAPABILITY_MATCH_PERCENT)
            .collect();

        let mut quickest = candidates.clone();
        quickest.sort_by(quickest_first);
        quickest.truncate(MAX_SUGGESTIONS);

        let mut cheapest = candidates;
        cheapest.sort_by(cheapest_first);
        cheapest.truncate(MAX_SUGGESTIONS);

        (quickest, cheapest)
    }
}
