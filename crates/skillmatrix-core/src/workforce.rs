//! # Workforce
//!
//! The analysis facade: an immutable [`Snapshot`] plus its index.
//!
//! Every analysis is a `&self` method defined next to its service module
//! (`employment`, `capability`, `reliance`, `summary`). Nothing here mutates;
//! calling the same analysis twice yields identical output.

use crate::index::SnapshotIndex;
use crate::matching::{Requirement, SkillDirectory, SkillProfile, is_capable, meets_all};
use crate::primitives::UNKNOWN_LABEL;
use crate::snapshot::{Department, Employee, Position, Process, Skill, Snapshot, Training};
use crate::types::{
    DepartmentId, EmployeeId, Money, PositionId, ProcessId, SkillId, SkillLevel, TrainingId,
    WorkforceError,
};
use std::collections::BTreeMap;

static EMPTY_PROFILE: SkillProfile = BTreeMap::new();

/// An indexed, read-only workforce snapshot.
#[derive(Debug, Clone)]
pub struct Workforce {
    snapshot: Snapshot,
    index: SnapshotIndex,
}

impl Workforce {
    /// Index `snapshot` and take ownership of it.
    #[must_use]
    pub fn new(snapshot: Snapshot) -> Self {
        let index = SnapshotIndex::build(&snapshot);
        Self { snapshot, index }
    }

    #[must_use]
    pub fn snapshot(&self) -> &Snapshot {
        &self.snapshot
    }

    // =========================================================================
    // ENTITY LOOKUP
    // =========================================================================

    pub fn skill(&self, id: SkillId) -> Option<&Skill> {
        self.index
            .skills
            .get(&id)
            .and_then(|&row| self.snapshot.skills.get(row))
    }

    pub fn department(&self, id: DepartmentId) -> Option<&Department> {
        self.index
            .departments
            .get(&id)
            .and_then(|&row| self.snapshot.departments.get(row))
    }

    pub fn employee(&self, id: EmployeeId) -> Option<&Employee> {
        self.index
            .employees
            .get(&id)
            .and_then(|&row| self.snapshot.employees.get(row))
    }

    pub fn position(&self, id: PositionId) -> Option<&Position> {
        self.index
            .positions
            .get(&id)
            .and_then(|&row| self.snapshot.positions.get(row))
    }

    pub fn process(&self, id: ProcessId) -> Option<&Process> {
        self.index
            .processes
            .get(&id)
            .and_then(|&row| self.snapshot.processes.get(row))
    }

    pub fn training(&self, id: TrainingId) -> Option<&Training> {
        self.index
            .trainings
            .get(&id)
            .and_then(|&row| self.snapshot.trainings.get(row))
    }

    /// Position or `PositionNotFound`.
    pub fn require_position(&self, id: PositionId) -> Result<&Position, WorkforceError> {
        self.position(id).ok_or(WorkforceError::PositionNotFound(id))
    }

    /// Process or `ProcessNotFound`.
    pub fn require_process(&self, id: ProcessId) -> Result<&Process, WorkforceError> {
        self.process(id).ok_or(WorkforceError::ProcessNotFound(id))
    }

    // =========================================================================
    // LABELS
    // =========================================================================

    pub fn department_name(&self, id: DepartmentId) -> &str {
        self.department(id).map_or(UNKNOWN_LABEL, |d| d.name.as_str())
    }

    pub fn position_name(&self, id: PositionId) -> &str {
        self.position(id).map_or(UNKNOWN_LABEL, |p| p.name.as_str())
    }

    pub fn training_name(&self, id: TrainingId) -> &str {
        self.training(id).map_or(UNKNOWN_LABEL, |t| t.name.as_str())
    }

    // =========================================================================
    // ITERATION (id order)
    // =========================================================================

    pub fn employees(&self) -> impl Iterator<Item = &Employee> {
        self.index
            .employees
            .values()
            .filter_map(|&row| self.snapshot.employees.get(row))
    }

    pub fn active_employees(&self) -> impl Iterator<Item = &Employee> {
        self.employees().filter(|e| e.is_active())
    }

    pub fn positions(&self) -> impl Iterator<Item = &Position> {
        self.index
            .positions
            .values()
            .filter_map(|&row| self.snapshot.positions.get(row))
    }

    pub fn processes(&self) -> impl Iterator<Item = &Process> {
        self.index
            .processes
            .values()
            .filter_map(|&row| self.snapshot.processes.get(row))
    }

    pub fn trainings(&self) -> impl Iterator<Item = &Training> {
        self.index
            .trainings
            .values()
            .filter_map(|&row| self.snapshot.trainings.get(row))
    }

    pub(crate) fn departments_len(&self) -> usize {
        self.index.departments.len()
    }

    pub(crate) fn skills_len(&self) -> usize {
        self.index.skills.len()
    }

    // =========================================================================
    // RELATIONS
    // =========================================================================

    /// Held skills of an employee; empty when none are recorded.
    pub fn profile(&self, id: EmployeeId) -> &SkillProfile {
        self.index.profiles.get(&id).unwrap_or(&EMPTY_PROFILE)
    }

    /// True if the employee completed and passed `training`.
    pub fn has_passed(&self, employee: EmployeeId, training: TrainingId) -> bool {
        self.index
            .passed_trainings
            .get(&employee)
            .is_some_and(|passed| passed.contains(&training))
    }

    pub fn position_requirements(&self, id: PositionId) -> &[Requirement] {
        self.index
            .position_requirements
            .get(&id)
            .map_or(&[], Vec::as_slice)
    }

    pub fn process_requirements(&self, id: ProcessId) -> &[Requirement] {
        self.index
            .process_requirements
            .get(&id)
            .map_or(&[], Vec::as_slice)
    }

    pub fn processes_of_position(&self, id: PositionId) -> &[ProcessId] {
        self.index
            .position_processes
            .get(&id)
            .map_or(&[], Vec::as_slice)
    }

    pub fn positions_of_process(&self, id: ProcessId) -> &[PositionId] {
        self.index
            .process_positions
            .get(&id)
            .map_or(&[], Vec::as_slice)
    }

    /// Active employees holding `position`, in id order.
    pub fn active_in_position(&self, id: PositionId) -> &[EmployeeId] {
        self.index
            .active_by_position
            .get(&id)
            .map_or(&[], Vec::as_slice)
    }

    /// Active employees of `department`, in id order.
    pub fn active_in_department(&self, id: DepartmentId) -> &[EmployeeId] {
        self.index
            .active_by_department
            .get(&id)
            .map_or(&[], Vec::as_slice)
    }

    /// Active employees holding `skill` at any level, with that level.
    pub fn active_holders(&self, skill: SkillId) -> impl Iterator<Item = (EmployeeId, SkillLevel)> {
        self.index
            .active_holders
            .get(&skill)
            .into_iter()
            .flat_map(|holders| holders.iter().map(|(&id, &level)| (id, level)))
    }

    pub fn taught_skills(&self, id: TrainingId) -> &[(SkillId, SkillLevel)] {
        self.index.taught_skills.get(&id).map_or(&[], Vec::as_slice)
    }

    pub fn prerequisite_skills(&self, id: TrainingId) -> &[Requirement] {
        self.index
            .prerequisite_skills
            .get(&id)
            .map_or(&[], Vec::as_slice)
    }

    pub fn prerequisite_trainings(&self, id: TrainingId) -> &[TrainingId] {
        self.index
            .prerequisite_trainings
            .get(&id)
            .map_or(&[], Vec::as_slice)
    }

    /// Distinct departments of the positions a process is assigned to.
    /// Positions missing from the snapshot contribute nothing.
    pub fn process_departments(&self, id: ProcessId) -> Vec<DepartmentId> {
        let mut departments = Vec::new();
        for &position in self.positions_of_process(id) {
            if let Some(p) = self.position(position) {
                if !departments.contains(&p.department_id) {
                    departments.push(p.department_id);
                }
            }
        }
        departments
    }

    /// Names of the existing positions a process is assigned to.
    pub fn assigned_position_names(&self, id: ProcessId) -> Vec<String> {
        self.positions_of_process(id)
            .iter()
            .filter_map(|&position| self.position(position))
            .map(|p| p.name.clone())
            .collect()
    }

    // =========================================================================
    // CAPABILITY
    // =========================================================================

    /// Active employees meeting every requirement (none for an empty list).
    pub fn capable_employees(&self, requirements: &[Requirement]) -> Vec<&Employee> {
        self.active_employees()
            .filter(|e| is_capable(self.profile(e.id), requirements))
            .collect()
    }

    /// Capacity minus active incumbents. Negative when over-staffed.
    pub fn open_slots(&self, position: &Position) -> i64 {
        i64::from(position.capacity) - self.active_in_position(position.id).len() as i64
    }

    /// Processes of `position` that no active incumbent can perform.
    ///
    /// An incumbent performs a process when every requirement is met
    /// (vacuously for a process without requirements).
    pub fn unmet_processes(&self, id: PositionId) -> Result<Vec<&Process>, WorkforceError> {
        let position = self.require_position(id)?;
        let incumbents = self.active_in_position(position.id);

        Ok(self
            .processes_of_position(position.id)
            .iter()
            .filter_map(|&process| self.process(process))
            .filter(|process| {
                let requirements = self.process_requirements(process.id);
                !incumbents
                    .iter()
                    .any(|&e| meets_all(self.profile(e), requirements))
            })
            .collect())
    }
}

impl SkillDirectory for Workforce {
    fn skill_name(&self, id: SkillId) -> Option<&str> {
        self.skill(id).map(|s| s.name.as_str())
    }
}

/// Validate a caller-supplied training cost per level.
pub fn check_cost_per_level(cost_per_level: Money) -> Result<Money, WorkforceError> {
    if cost_per_level.is_negative() {
        return Err(WorkforceError::InvalidParameter(format!(
            "training cost per level must not be negative: {cost_per_level}"
        )));
    }
    Ok(cost_per_level)
}
