//! Fluent construction of [`Snapshot`]s.
//!
//! Levels are passed as raw ordinals and validated once at [`SnapshotBuilder::build`];
//! the first invalid value or unknown modifier target is reported there.

use crate::snapshot::{
    Department, Employee, EmployeeSkill, EmployeeTraining, Position, PositionProcess,
    PositionRequiredSkill, Process, ProcessRequiredSkill, Skill, Snapshot, Training, TrainingSkill,
    TrainingPrerequisiteSkill, TrainingPrerequisiteTraining,
};
use crate::types::{
    DepartmentId, EmployeeId, EmployeeStatus, EnrollmentStatus, Money, PositionId, ProcessId,
    SkillCategory, SkillId, SkillLevel, SkillSource, TrainingCostType, TrainingId, TrainingResult,
    TrainingStatus, WorkforceError,
};
use chrono::NaiveDate;

/// Builder for [`Snapshot`].
///
/// ```
/// use skillmatrix_core::SnapshotBuilder;
///
/// let snapshot = SnapshotBuilder::new()
///     .department(1, "Operations")
///     .skill(1, "Welding")
///     .position(1, "Welder", 1, 2)
///     .position_skill(1, 1, 3)
///     .employee(1, "Ada Byron", 1, 1)
///     .employee_skill(1, 1, 4)
///     .build()
///     .expect("valid snapshot");
/// assert_eq!(snapshot.employees.len(), 1);
/// ```
#[derive(Debug, Default)]
pub struct SnapshotBuilder {
    snapshot: Snapshot,
    error: Option<WorkforceError>,
}

impl SnapshotBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Finish and return the snapshot, or the first recorded error.
    pub fn build(self) -> Result<Snapshot, WorkforceError> {
        match self.error {
            Some(err) => Err(err),
            None => Ok(self.snapshot),
        }
    }

    fn fail(&mut self, err: WorkforceError) {
        if self.error.is_none() {
            self.error = Some(err);
        }
    }

    fn level(&mut self, value: u8) -> SkillLevel {
        match SkillLevel::new(value) {
            Ok(level) => level,
            Err(err) => {
                self.fail(err);
                SkillLevel::BEGINNER
            }
        }
    }

    // =========================================================================
    // ENTITIES
    // =========================================================================

    #[must_use]
    pub fn skill(self, id: u32, name: &str) -> Self {
        self.skill_in(id, name, SkillCategory::Technical)
    }

    #[must_use]
    pub fn skill_in(mut self, id: u32, name: &str, category: SkillCategory) -> Self {
        self.snapshot.skills.push(Skill {
            id: SkillId(id),
            name: name.to_string(),
            category,
            min_level: SkillLevel::BEGINNER,
            max_level: SkillLevel::EXPERT,
            description: String::new(),
        });
        self
    }

    #[must_use]
    pub fn department(mut self, id: u32, name: &str) -> Self {
        self.snapshot.departments.push(Department {
            id: DepartmentId(id),
            name: name.to_string(),
            description: String::new(),
        });
        self
    }

    /// Add an active employee hired on 1970-01-01 with no salary.
    /// `name` is split at the first space.
    #[must_use]
    pub fn employee(mut self, id: u32, name: &str, department: u32, position: u32) -> Self {
        let (first, last) = name.split_once(' ').unwrap_or((name, ""));
        self.snapshot.employees.push(Employee {
            id: EmployeeId(id),
            first_name: first.to_string(),
            last_name: last.to_string(),
            status: EmployeeStatus::Active,
            department_id: DepartmentId(department),
            position_id: PositionId(position),
            current_salary: Money::ZERO,
            hire_date: NaiveDate::default(),
            termination_date: None,
        });
        self
    }

    #[must_use]
    pub fn salary(mut self, employee: u32, salary: Money) -> Self {
        if let Some(e) = self.employee_mut(employee) {
            e.current_salary = salary;
        }
        self
    }

    #[must_use]
    pub fn hired_on(mut self, employee: u32, date: NaiveDate) -> Self {
        if let Some(e) = self.employee_mut(employee) {
            e.hire_date = date;
        }
        self
    }

    #[must_use]
    pub fn terminate(mut self, employee: u32, date: NaiveDate) -> Self {
        if let Some(e) = self.employee_mut(employee) {
            e.status = EmployeeStatus::Terminated;
            e.termination_date = Some(date);
        }
        self
    }

    fn employee_mut(&mut self, id: u32) -> Option<&mut Employee> {
        let found = self
            .snapshot
            .employees
            .iter()
            .position(|e| e.id == EmployeeId(id));
        match found {
            Some(i) => self.snapshot.employees.get_mut(i),
            None => {
                self.fail(WorkforceError::InvalidParameter(format!(
                    "unknown employee {id}"
                )));
                None
            }
        }
    }

    #[must_use]
    pub fn position(mut self, id: u32, name: &str, department: u32, capacity: u32) -> Self {
        self.snapshot.positions.push(Position {
            id: PositionId(id),
            name: name.to_string(),
            department_id: DepartmentId(department),
            capacity,
            level: 1,
            min_salary: Money::ZERO,
            max_salary: Money::ZERO,
            hiring_cost: Money::ZERO,
            reports_to: None,
        });
        self
    }

    #[must_use]
    pub fn position_level(mut self, position: u32, level: u32) -> Self {
        if let Some(p) = self.position_mut(position) {
            p.level = level;
        }
        self
    }

    /// Salary band and one-off hiring cost of a position.
    #[must_use]
    pub fn position_compensation(
        mut self,
        position: u32,
        min_salary: Money,
        max_salary: Money,
        hiring_cost: Money,
    ) -> Self {
        if let Some(p) = self.position_mut(position) {
            p.min_salary = min_salary;
            p.max_salary = max_salary;
            p.hiring_cost = hiring_cost;
        }
        self
    }

    fn position_mut(&mut self, id: u32) -> Option<&mut Position> {
        let found = self
            .snapshot
            .positions
            .iter()
            .position(|p| p.id == PositionId(id));
        match found {
            Some(i) => self.snapshot.positions.get_mut(i),
            None => {
                self.fail(WorkforceError::InvalidParameter(format!(
                    "unknown position {id}"
                )));
                None
            }
        }
    }

    #[must_use]
    pub fn process(mut self, id: u32, description: &str, aimed_workers: u32) -> Self {
        self.snapshot.processes.push(Process {
            id: ProcessId(id),
            description: description.to_string(),
            aimed_workers,
        });
        self
    }

    #[must_use]
    pub fn training(
        mut self,
        id: u32,
        name: &str,
        department: u32,
        cost: Money,
        duration_hours: u32,
    ) -> Self {
        self.snapshot.trainings.push(Training {
            id: TrainingId(id),
            name: name.to_string(),
            target_department_id: DepartmentId(department),
            cost,
            cost_type: TrainingCostType::PerAttendee,
            duration_hours,
            capacity: 0,
            status: TrainingStatus::Planned,
            start_date: None,
            end_date: None,
        });
        self
    }

    #[must_use]
    pub fn training_status(mut self, training: u32, status: TrainingStatus) -> Self {
        let found = self
            .snapshot
            .trainings
            .iter_mut()
            .find(|t| t.id == TrainingId(training));
        match found {
            Some(t) => t.status = status,
            None => self.fail(WorkforceError::InvalidParameter(format!(
                "unknown training {training}"
            ))),
        }
        self
    }

    // =========================================================================
    // JUNCTIONS
    // =========================================================================

    #[must_use]
    pub fn employee_skill(mut self, employee: u32, skill: u32, level: u8) -> Self {
        let level = self.level(level);
        self.snapshot.employee_skills.push(EmployeeSkill {
            employee_id: EmployeeId(employee),
            skill_id: SkillId(skill),
            level,
            source: SkillSource::Previous,
            acquired_on: None,
        });
        self
    }

    #[must_use]
    pub fn employee_training(
        mut self,
        employee: u32,
        training: u32,
        status: EnrollmentStatus,
        result: TrainingResult,
    ) -> Self {
        self.snapshot.employee_trainings.push(EmployeeTraining {
            employee_id: EmployeeId(employee),
            training_id: TrainingId(training),
            status,
            result,
            completed_on: None,
        });
        self
    }

    #[must_use]
    pub fn position_skill(mut self, position: u32, skill: u32, level: u8) -> Self {
        let required_level = self.level(level);
        self.snapshot
            .position_required_skills
            .push(PositionRequiredSkill {
                position_id: PositionId(position),
                skill_id: SkillId(skill),
                required_level,
                is_mandatory: true,
            });
        self
    }

    #[must_use]
    pub fn assign_process(mut self, position: u32, process: u32) -> Self {
        self.snapshot.position_processes.push(PositionProcess {
            position_id: PositionId(position),
            process_id: ProcessId(process),
        });
        self
    }

    #[must_use]
    pub fn process_skill(mut self, process: u32, skill: u32, level: u8) -> Self {
        let required_level = self.level(level);
        self.snapshot
            .process_required_skills
            .push(ProcessRequiredSkill {
                process_id: ProcessId(process),
                skill_id: SkillId(skill),
                required_level,
            });
        self
    }

    #[must_use]
    pub fn training_skill(mut self, training: u32, skill: u32, level: u8) -> Self {
        let target_level = self.level(level);
        self.snapshot.training_skills.push(TrainingSkill {
            training_id: TrainingId(training),
            skill_id: SkillId(skill),
            target_level,
        });
        self
    }

    #[must_use]
    pub fn training_prerequisite_skill(mut self, training: u32, skill: u32, level: u8) -> Self {
        let minimum_level = self.level(level);
        self.snapshot
            .training_prerequisite_skills
            .push(TrainingPrerequisiteSkill {
                training_id: TrainingId(training),
                skill_id: SkillId(skill),
                minimum_level,
            });
        self
    }

    #[must_use]
    pub fn training_prerequisite(mut self, training: u32, prerequisite: u32) -> Self {
        self.snapshot
            .training_prerequisite_trainings
            .push(TrainingPrerequisiteTraining {
                training_id: TrainingId(training),
                prerequisite_training_id: TrainingId(prerequisite),
            });
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_records_in_insertion_order() {
        let snapshot = SnapshotBuilder::new()
            .skill(2, "Rust")
            .skill(1, "Go")
            .employee(1, "Grace Hopper", 1, 1)
            .employee_skill(1, 2, 5)
            .build()
            .expect("valid snapshot");
        assert_eq!(snapshot.skills[0].id, SkillId(2));
        assert_eq!(snapshot.employees[0].first_name, "Grace");
        assert_eq!(snapshot.employees[0].last_name, "Hopper");
        assert_eq!(snapshot.employee_skills[0].level, SkillLevel::EXPERT);
    }

    #[test]
    fn invalid_level_fails_build() {
        let result = SnapshotBuilder::new()
            .skill(1, "Rust")
            .process(1, "Deploy", 1)
            .process_skill(1, 1, 7)
            .build();
        assert!(matches!(result, Err(WorkforceError::InvalidSkillLevel(7))));
    }

    #[test]
    fn modifier_on_unknown_id_fails_build() {
        let result = SnapshotBuilder::new()
            .salary(9, Money::from_major(1))
            .build();
        assert!(matches!(result, Err(WorkforceError::InvalidParameter(_))));
    }

    #[test]
    fn first_error_wins() {
        let result = SnapshotBuilder::new()
            .employee_skill(1, 1, 0)
            .employee_skill(1, 1, 9)
            .build();
        assert!(matches!(result, Err(WorkforceError::InvalidSkillLevel(0))));
    }

    #[test]
    fn terminate_sets_status_and_date() {
        let date = NaiveDate::from_ymd_opt(2024, 6, 1).expect("valid date");
        let snapshot = SnapshotBuilder::new()
            .employee(1, "Alan Turing", 1, 1)
            .terminate(1, date)
            .build()
            .expect("valid snapshot");
        assert_eq!(snapshot.employees[0].status, EmployeeStatus::Terminated);
        assert_eq!(snapshot.employees[0].termination_date, Some(date));
    }
}
