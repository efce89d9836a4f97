//! Per-employee evaluation against a process, shared by the capability and
//! reliance services.

use crate::matching::{Requirement, SkillGap, evaluate};
use crate::snapshot::Employee;
use crate::training::{TrainingPathStep, TrainingScope};
use crate::types::{DepartmentId, EmployeeId, Money};
use crate::workforce::Workforce;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// An employee proposed for upskilling toward a process.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmployeeSuggestion {
    pub employee_id: EmployeeId,
    pub employee_name: String,
    pub current_position_name: String,
    pub department_name: String,
    pub matching_skills_count: usize,
    pub missing_skills_count: usize,
    pub match_percentage: f64,
    pub skill_gaps: Vec<SkillGap>,
    pub training_path: Vec<TrainingPathStep>,
    /// Σ gap × cost per level; independent of the path's training prices.
    pub estimated_training_cost: Money,
    pub estimated_training_hours: u64,
    /// Works in a department of a position the process is assigned to.
    pub is_same_department: bool,
}

impl Workforce {
    /// Evaluate `employee` against a process's requirements and build a
    /// training path for the gaps.
    pub fn evaluate_for_process(
        &self,
        employee: &Employee,
        requirements: &[Requirement],
        process_departments: &[DepartmentId],
        cost_per_level: Money,
        scope: TrainingScope,
    ) -> EmployeeSuggestion {
        let result = evaluate(self.profile(employee.id), requirements, self, cost_per_level);
        let path = self.build_training_path(employee, &result.gaps, scope);

        EmployeeSuggestion {
            employee_id: employee.id,
            employee_name: employee.full_name(),
            current_position_name: self.position_name(employee.position_id).to_string(),
            department_name: self.department_name(employee.department_id).to_string(),
            matching_skills_count: result.matching_count,
            missing_skills_count: result.missing_count(),
            match_percentage: result.match_percentage,
            skill_gaps: result.gaps,
            training_path: path.steps,
            estimated_training_cost: result.estimated_cost,
            estimated_training_hours: path.total_hours,
            is_same_department: process_departments.contains(&employee.department_id),
        }
    }
}

/// Match % descending, then fewest missing.
pub(crate) fn quickest_first(a: &EmployeeSuggestion, b: &EmployeeSuggestion) -> Ordering {
    b.match_percentage
        .total_cmp(&a.match_percentage)
        .then(a.missing_skills_count.cmp(&b.missing_skills_count))
}

/// Training cost ascending, then match % descending.
pub(crate) fn cheapest_first(a: &EmployeeSuggestion, b: &EmployeeSuggestion) -> Ordering {
    a.estimated_training_cost
        .cmp(&b.estimated_training_cost)
        .then(b.match_percentage.total_cmp(&a.match_percentage))
}

/// Quickest order, then training cost ascending.
pub(crate) fn closest_first(a: &EmployeeSuggestion, b: &EmployeeSuggestion) -> Ordering {
    quickest_first(a, b).then(a.estimated_training_cost.cmp(&b.estimated_training_cost))
}
