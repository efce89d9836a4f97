//! # Worker Reliance
//!
//! Flags processes that depend on too few capable workers and lists the
//! employees closest to qualifying.
//!
//! Priorities reflect concentration risk rather than gap size:
//! `Critical` (nobody), `HighRisk` (exactly one worker), `BelowTarget`
//! (two or more, still short of target). Suggestions consider every active
//! employee who is not yet capable and is missing one or two requirements,
//! split by whether they already work in an assigned department. Training
//! lookups fall back to company-wide offerings
//! ([`TrainingScope::DepartmentThenCompanyWide`]).

use crate::primitives::{MAX_MISSING_FOR_RELIANCE, MAX_SUGGESTIONS};
use crate::snapshot::Process;
use crate::suggestion::{EmployeeSuggestion, closest_first};
use crate::training::TrainingScope;
use crate::types::{EmployeeId, Money, ProcessId, WorkforceError};
use crate::workforce::{Workforce, check_cost_per_level};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReliancePriority {
    Critical,
    HighRisk,
    BelowTarget,
    Ok,
}

impl ReliancePriority {
    #[must_use]
    pub fn classify(capable_workers: usize, worker_gap: i64) -> Self {
        match capable_workers {
            0 => Self::Critical,
            1 => Self::HighRisk,
            _ if worker_gap > 0 => Self::BelowTarget,
            _ => Self::Ok,
        }
    }

    #[must_use]
    pub const fn rank(self) -> u8 {
        match self {
            Self::Critical => 1,
            Self::HighRisk => 2,
            Self::BelowTarget => 3,
            Self::Ok => 4,
        }
    }

    #[must_use]
    pub fn reason(self, worker_gap: i64, gap_percentage: f64) -> String {
        match self {
            Self::Critical => "CRITICAL: No capable workers".into(),
            Self::HighRisk => "HIGH RISK: Only 1 capable worker (single point of failure)".into(),
            Self::BelowTarget => {
                format!("BELOW TARGET: Gap of {worker_gap} workers ({gap_percentage:.1}%)")
            }
            Self::Ok => "OK: Meets or exceeds target".into(),
        }
    }
}

/// `gap / aimed × 100`, or 0 when nothing is aimed for.
#[must_use]
pub fn gap_percentage(worker_gap: i64, aimed_workers: u32) -> f64 {
    if aimed_workers == 0 {
        return 0.0;
    }
    worker_gap as f64 / f64::from(aimed_workers) * 100.0
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CapableEmployee {
    pub employee_id: EmployeeId,
    pub employee_name: String,
    pub department_name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RelianceIssue {
    pub process_id: ProcessId,
    pub process_description: String,
    pub priority: ReliancePriority,
    pub priority_reason: String,
    pub capable_workers: usize,
    pub aimed_workers: u32,
    pub worker_gap: i64,
    pub gap_percentage: f64,
    pub capable_employees: Vec<CapableEmployee>,
    pub assigned_position_names: Vec<String>,
    pub same_department_suggestions: Vec<EmployeeSuggestion>,
    pub cross_department_suggestions: Vec<EmployeeSuggestion>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RelianceReport {
    pub training_cost_per_level: Money,
    /// Priority ascending, then gap percentage descending.
    pub reliance_issues: Vec<RelianceIssue>,
    pub critical_count: usize,
    pub high_risk_count: usize,
    pub below_target_count: usize,
}

impl Workforce {
    /// Reliance issues of every process that is not `Ok`.
    pub fn analyze_worker_reliance(
        &self,
        cost_per_level: Money,
    ) -> Result<RelianceReport, WorkforceError> {
        let cost_per_level = check_cost_per_level(cost_per_level)?;

        let mut issues: Vec<RelianceIssue> = self
            .processes()
            .filter_map(|process| self.reliance_issue(process, cost_per_level, false))
            .collect();
        issues.sort_by(|a, b| {
            a.priority
                .cmp(&b.priority)
                .then(b.gap_percentage.total_cmp(&a.gap_percentage))
        });

        let count = |p: ReliancePriority| issues.iter().filter(|i| i.priority == p).count();
        let (critical_count, high_risk_count, below_target_count) = (
            count(ReliancePriority::Critical),
            count(ReliancePriority::HighRisk),
            count(ReliancePriority::BelowTarget),
        );

        tracing::debug!(
            issues = issues.len(),
            critical = critical_count,
            high_risk = high_risk_count,
            below_target = below_target_count,
            "reliance analysis complete"
        );

        Ok(RelianceReport {
            training_cost_per_level: cost_per_level,
            reliance_issues: issues,
            critical_count,
            high_risk_count,
            below_target_count,
        })
    }

    /// Reliance record of one process, `Ok` included.
    pub fn analyze_process_reliance(
        &self,
        process_id: ProcessId,
        cost_per_level: Money,
    ) -> Result<RelianceIssue, WorkforceError> {
        let cost_per_level = check_cost_per_level(cost_per_level)?;
        let process = self.require_process(process_id)?;
        self.reliance_issue(process, cost_per_level, true)
            .ok_or(WorkforceError::ProcessNotFound(process_id))
    }

    fn reliance_issue(
        &self,
        process: &Process,
        cost_per_level: Money,
        include_ok: bool,
    ) -> Option<RelianceIssue> {
        let requirements = self.process_requirements(process.id);
        let capable = self.capable_employees(requirements);
        let worker_gap = i64::from(process.aimed_workers) - capable.len() as i64;
        let gap_percentage = gap_percentage(worker_gap, process.aimed_workers);

        let priority = ReliancePriority::classify(capable.len(), worker_gap);
        if priority == ReliancePriority::Ok && !include_ok {
            return None;
        }

        let capable_ids: Vec<EmployeeId> = capable.iter().map(|e| e.id).collect();
        let (same_department_suggestions, cross_department_suggestions) = if worker_gap > 0 {
            self.suggest_close_employees(process.id, &capable_ids, cost_per_level)
        } else {
            (Vec::new(), Vec::new())
        };

        Some(RelianceIssue {
            process_id: process.id,
            process_description: process.description.clone(),
            priority,
            priority_reason: priority.reason(worker_gap, gap_percentage),
            capable_workers: capable.len(),
            aimed_workers: process.aimed_workers,
            worker_gap,
            gap_percentage,
            capable_employees: capable
                .iter()
                .map(|e| CapableEmployee {
                    employee_id: e.id,
                    employee_name: e.full_name(),
                    department_name: self.department_name(e.department_id).to_string(),
                })
                .collect(),
            assigned_position_names: self.assigned_position_names(process.id),
            same_department_suggestions,
            cross_department_suggestions,
        })
    }

    /// Non-capable active employees missing 1..=2 requirements, split into
    /// same- and cross-department lists.
    fn suggest_close_employees(
        &self,
        process_id: ProcessId,
        capable: &[EmployeeId],
        cost_per_level: Money,
    ) -> (Vec<EmployeeSuggestion>, Vec<EmployeeSuggestion>) {
        let requirements = self.process_requirements(process_id);
        let departments = self.process_departments(process_id);

        let (mut same, mut cross): (Vec<_>, Vec<_>) = self
            .active_employees()
            .filter(|e| !capable.contains(&e.id))
            .map(|e| {
                self.evaluate_for_process(
                    e,
                    requirements,
                    &departments,
                    cost_per_level,
                    TrainingScope::DepartmentThenCompanyWide,
                )
            })
            .filter(|s| (1..=MAX_MISSING_FOR_RELIANCE).contains(&s.missing_skills_count))
            .partition(|s| s.is_same_department);

        for list in [&mut same, &mut cross] {
            list.sort_by(closest_first);
            list.truncate(MAX_SUGGESTIONS);
        }
        (same, cross)
    }
}
