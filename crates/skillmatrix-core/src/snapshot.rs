//! # Workforce Snapshot
//!
//! Plain relational records handed over by the data-access collaborator:
//! entities plus junction rows keyed by foreign ids. There are no object
//! references between records; lookups go through [`crate::index`].
//!
//! Every collection defaults to empty when deserialised, so a partial file
//! still loads. Referential integrity is the caller's responsibility; a
//! dangling id surfaces as the "Unknown" label in results, never as a panic.

use crate::primitives::DAYS_PER_TENURE_MONTH;
use crate::types::{
    DepartmentId, EmployeeId, EmployeeStatus, EnrollmentStatus, Money, PositionId, ProcessId,
    SkillCategory, SkillId, SkillLevel, SkillSource, TrainingCostType, TrainingId, TrainingResult,
    TrainingStatus,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// =============================================================================
// ENTITIES
// =============================================================================

/// A named competency with its valid level range.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Skill {
    pub id: SkillId,
    pub name: String,
    #[serde(default)]
    pub category: SkillCategory,
    #[serde(default = "lowest_level")]
    pub min_level: SkillLevel,
    #[serde(default = "highest_level")]
    pub max_level: SkillLevel,
    #[serde(default)]
    pub description: String,
}

const fn lowest_level() -> SkillLevel {
    SkillLevel::BEGINNER
}

const fn highest_level() -> SkillLevel {
    SkillLevel::EXPERT
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Department {
    pub id: DepartmentId,
    pub name: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
    pub id: EmployeeId,
    pub first_name: String,
    pub last_name: String,
    #[serde(default)]
    pub status: EmployeeStatus,
    pub department_id: DepartmentId,
    pub position_id: PositionId,
    #[serde(default)]
    pub current_salary: Money,
    pub hire_date: NaiveDate,
    #[serde(default)]
    pub termination_date: Option<NaiveDate>,
}

impl Employee {
    #[must_use]
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        self.status == EmployeeStatus::Active
    }

    /// Whole 30-day months between hire and `as_of`.
    ///
    /// A termination date caps the interval. Truncates toward zero.
    #[must_use]
    pub fn tenure_months(&self, as_of: NaiveDate) -> i64 {
        let end = self.termination_date.unwrap_or(as_of);
        (end - self.hire_date).num_days() / DAYS_PER_TENURE_MONTH
    }
}

/// A headcount slot definition inside a department.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Position {
    pub id: PositionId,
    pub name: String,
    pub department_id: DepartmentId,
    #[serde(default)]
    pub capacity: u32,
    #[serde(default)]
    pub level: u32,
    #[serde(default)]
    pub min_salary: Money,
    #[serde(default)]
    pub max_salary: Money,
    #[serde(default)]
    pub hiring_cost: Money,
    #[serde(default)]
    pub reports_to: Option<PositionId>,
}

/// An operational process with a target headcount of capable workers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Process {
    pub id: ProcessId,
    pub description: String,
    #[serde(default)]
    pub aimed_workers: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Training {
    pub id: TrainingId,
    pub name: String,
    pub target_department_id: DepartmentId,
    #[serde(default)]
    pub cost: Money,
    #[serde(default)]
    pub cost_type: TrainingCostType,
    #[serde(default)]
    pub duration_hours: u32,
    #[serde(default)]
    pub capacity: u32,
    #[serde(default)]
    pub status: TrainingStatus,
    #[serde(default)]
    pub start_date: Option<NaiveDate>,
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
}

// =============================================================================
// JUNCTION RECORDS
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeSkill {
    pub employee_id: EmployeeId,
    pub skill_id: SkillId,
    pub level: SkillLevel,
    #[serde(default)]
    pub source: SkillSource,
    #[serde(default)]
    pub acquired_on: Option<NaiveDate>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeTraining {
    pub employee_id: EmployeeId,
    pub training_id: TrainingId,
    #[serde(default)]
    pub status: EnrollmentStatus,
    #[serde(default)]
    pub result: TrainingResult,
    #[serde(default)]
    pub completed_on: Option<NaiveDate>,
}

impl EmployeeTraining {
    /// Completed with a pass: the only state that satisfies a prerequisite.
    #[must_use]
    pub fn is_passed(&self) -> bool {
        self.status == EnrollmentStatus::Completed && self.result == TrainingResult::Passed
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PositionRequiredSkill {
    pub position_id: PositionId,
    pub skill_id: SkillId,
    pub required_level: SkillLevel,
    #[serde(default = "mandatory")]
    pub is_mandatory: bool,
}

const fn mandatory() -> bool {
    true
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PositionProcess {
    pub position_id: PositionId,
    pub process_id: ProcessId,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessRequiredSkill {
    pub process_id: ProcessId,
    pub skill_id: SkillId,
    pub required_level: SkillLevel,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrainingSkill {
    pub training_id: TrainingId,
    pub skill_id: SkillId,
    pub target_level: SkillLevel,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrainingPrerequisiteSkill {
    pub training_id: TrainingId,
    pub skill_id: SkillId,
    pub minimum_level: SkillLevel,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrainingPrerequisiteTraining {
    pub training_id: TrainingId,
    pub prerequisite_training_id: TrainingId,
}

// =============================================================================
// SNAPSHOT
// =============================================================================

/// Immutable input to every analysis.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Snapshot {
    pub skills: Vec<Skill>,
    pub departments: Vec<Department>,
    pub employees: Vec<Employee>,
    pub positions: Vec<Position>,
    pub processes: Vec<Process>,
    pub trainings: Vec<Training>,
    pub employee_skills: Vec<EmployeeSkill>,
    pub employee_trainings: Vec<EmployeeTraining>,
    pub position_required_skills: Vec<PositionRequiredSkill>,
    pub position_processes: Vec<PositionProcess>,
    pub process_required_skills: Vec<ProcessRequiredSkill>,
    pub training_skills: Vec<TrainingSkill>,
    pub training_prerequisite_skills: Vec<TrainingPrerequisiteSkill>,
    pub training_prerequisite_trainings: Vec<TrainingPrerequisiteTraining>,
}
