//! # Snapshot Index
//!
//! Lookup tables built once per [`Snapshot`], replacing object-graph
//! back-references with explicit id-keyed maps.
//!
//! ## Rules
//!
//! - Duplicate entity ids: the first record wins.
//! - Duplicate skills in one employee's profile: the first row wins.
//! - Requirement lists keep snapshot row order (gap lists follow it).
//! - Position/process assignments are deduplicated, first occurrence kept.
//! - "Active" tables only contain employees with status `Active`.

use crate::matching::{Requirement, SkillProfile};
use crate::snapshot::Snapshot;
use crate::types::{
    DepartmentId, EmployeeId, PositionId, ProcessId, SkillId, SkillLevel, TrainingId,
};
use std::collections::{BTreeMap, BTreeSet};

#[derive(Debug, Clone, Default)]
pub(crate) struct SnapshotIndex {
    // Entity id → row in the snapshot vector.
    pub(crate) skills: BTreeMap<SkillId, usize>,
    pub(crate) departments: BTreeMap<DepartmentId, usize>,
    pub(crate) employees: BTreeMap<EmployeeId, usize>,
    pub(crate) positions: BTreeMap<PositionId, usize>,
    pub(crate) processes: BTreeMap<ProcessId, usize>,
    pub(crate) trainings: BTreeMap<TrainingId, usize>,

    pub(crate) profiles: BTreeMap<EmployeeId, SkillProfile>,
    pub(crate) passed_trainings: BTreeMap<EmployeeId, BTreeSet<TrainingId>>,

    pub(crate) position_requirements: BTreeMap<PositionId, Vec<Requirement>>,
    pub(crate) process_requirements: BTreeMap<ProcessId, Vec<Requirement>>,
    pub(crate) position_processes: BTreeMap<PositionId, Vec<ProcessId>>,
    pub(crate) process_positions: BTreeMap<ProcessId, Vec<PositionId>>,

    pub(crate) active_by_position: BTreeMap<PositionId, Vec<EmployeeId>>,
    pub(crate) active_by_department: BTreeMap<DepartmentId, Vec<EmployeeId>>,
    pub(crate) active_holders: BTreeMap<SkillId, BTreeMap<EmployeeId, SkillLevel>>,

    pub(crate) taught_skills: BTreeMap<TrainingId, Vec<(SkillId, SkillLevel)>>,
    pub(crate) prerequisite_skills: BTreeMap<TrainingId, Vec<Requirement>>,
    pub(crate) prerequisite_trainings: BTreeMap<TrainingId, Vec<TrainingId>>,
}

fn first_wins<K: Ord>(map: &mut BTreeMap<K, usize>, keys: impl Iterator<Item = K>) {
    for (row, key) in keys.enumerate() {
        map.entry(key).or_insert(row);
    }
}

fn push_unique<K: Ord, V: PartialEq>(map: &mut BTreeMap<K, Vec<V>>, key: K, value: V) {
    let values = map.entry(key).or_default();
    if !values.contains(&value) {
        values.push(value);
    }
}

impl SnapshotIndex {
    pub(crate) fn build(snapshot: &Snapshot) -> Self {
        let mut index = Self::default();

        first_wins(&mut index.skills, snapshot.skills.iter().map(|s| s.id));
        first_wins(&mut index.departments, snapshot.departments.iter().map(|d| d.id));
        first_wins(&mut index.employees, snapshot.employees.iter().map(|e| e.id));
        first_wins(&mut index.positions, snapshot.positions.iter().map(|p| p.id));
        first_wins(&mut index.processes, snapshot.processes.iter().map(|p| p.id));
        first_wins(&mut index.trainings, snapshot.trainings.iter().map(|t| t.id));

        let mut active = BTreeSet::new();
        for &row in index.employees.values() {
            let Some(employee) = snapshot.employees.get(row) else {
                continue;
            };
            if employee.is_active() {
                active.insert(employee.id);
                index
                    .active_by_position
                    .entry(employee.position_id)
                    .or_default()
                    .push(employee.id);
                index
                    .active_by_department
                    .entry(employee.department_id)
                    .or_default()
                    .push(employee.id);
            }
        }

        for row in &snapshot.employee_skills {
            index
                .profiles
                .entry(row.employee_id)
                .or_default()
                .entry(row.skill_id)
                .or_insert(row.level);
        }
        for (employee_id, profile) in &index.profiles {
            if !active.contains(employee_id) {
                continue;
            }
            for (&skill_id, &level) in profile {
                index
                    .active_holders
                    .entry(skill_id)
                    .or_default()
                    .insert(*employee_id, level);
            }
        }

        for row in snapshot.employee_trainings.iter().filter(|r| r.is_passed()) {
            index
                .passed_trainings
                .entry(row.employee_id)
                .or_default()
                .insert(row.training_id);
        }

        for row in &snapshot.position_required_skills {
            index
                .position_requirements
                .entry(row.position_id)
                .or_default()
                .push(Requirement::new(row.skill_id, row.required_level));
        }
        for row in &snapshot.process_required_skills {
            index
                .process_requirements
                .entry(row.process_id)
                .or_default()
                .push(Requirement::new(row.skill_id, row.required_level));
        }
        for row in &snapshot.position_processes {
            push_unique(&mut index.position_processes, row.position_id, row.process_id);
            push_unique(&mut index.process_positions, row.process_id, row.position_id);
        }

        for row in &snapshot.training_skills {
            index
                .taught_skills
                .entry(row.training_id)
                .or_default()
                .push((row.skill_id, row.target_level));
        }
        for row in &snapshot.training_prerequisite_skills {
            index
                .prerequisite_skills
                .entry(row.training_id)
                .or_default()
                .push(Requirement::new(row.skill_id, row.minimum_level));
        }
        for row in &snapshot.training_prerequisite_trainings {
            index
                .prerequisite_trainings
                .entry(row.training_id)
                .or_default()
                .push(row.prerequisite_training_id);
        }

        tracing::debug!(
            employees = index.employees.len(),
            active = active.len(),
            positions = index.positions.len(),
            processes = index.processes.len(),
            trainings = index.trainings.len(),
            "snapshot indexed"
        );

        index
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::SnapshotBuilder;
    use chrono::NaiveDate;

    #[test]
    fn duplicate_ids_keep_first_row() {
        let snapshot = SnapshotBuilder::new()
            .skill(1, "First")
            .skill(1, "Second")
            .build()
            .expect("valid snapshot");
        let index = SnapshotIndex::build(&snapshot);
        assert_eq!(index.skills.get(&SkillId(1)), Some(&0));
    }

    #[test]
    fn profile_keeps_first_skill_row() {
        let snapshot = SnapshotBuilder::new()
            .employee(1, "A B", 1, 1)
            .employee_skill(1, 7, 2)
            .employee_skill(1, 7, 5)
            .build()
            .expect("valid snapshot");
        let index = SnapshotIndex::build(&snapshot);
        let profile = index.profiles.get(&EmployeeId(1)).expect("profile");
        assert_eq!(profile.get(&SkillId(7)), Some(&SkillLevel::DEVELOPING));
    }

    #[test]
    fn terminated_employees_are_not_active() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 1).expect("valid date");
        let snapshot = SnapshotBuilder::new()
            .employee(1, "A B", 3, 9)
            .employee(2, "C D", 3, 9)
            .terminate(2, date)
            .employee_skill(2, 1, 5)
            .build()
            .expect("valid snapshot");
        let index = SnapshotIndex::build(&snapshot);
        assert_eq!(
            index.active_by_position.get(&PositionId(9)),
            Some(&vec![EmployeeId(1)])
        );
        assert_eq!(
            index.active_by_department.get(&DepartmentId(3)),
            Some(&vec![EmployeeId(1)])
        );
        assert!(index.active_holders.get(&SkillId(1)).is_none());
    }

    #[test]
    fn assignments_are_deduplicated() {
        let snapshot = SnapshotBuilder::new()
            .assign_process(1, 5)
            .assign_process(1, 5)
            .assign_process(2, 5)
            .build()
            .expect("valid snapshot");
        let index = SnapshotIndex::build(&snapshot);
        assert_eq!(
            index.process_positions.get(&ProcessId(5)),
            Some(&vec![PositionId(1), PositionId(2)])
        );
        assert_eq!(
            index.position_processes.get(&PositionId(1)),
            Some(&vec![ProcessId(5)])
        );
    }

    #[test]
    fn only_passed_trainings_are_recorded() {
        use crate::types::{EnrollmentStatus, TrainingResult};
        let snapshot = SnapshotBuilder::new()
            .employee_training(1, 10, EnrollmentStatus::Completed, TrainingResult::Passed)
            .employee_training(1, 11, EnrollmentStatus::Completed, TrainingResult::Failed)
            .employee_training(1, 12, EnrollmentStatus::Ongoing, TrainingResult::Pending)
            .build()
            .expect("valid snapshot");
        let index = SnapshotIndex::build(&snapshot);
        let passed = index.passed_trainings.get(&EmployeeId(1)).expect("passed");
        assert_eq!(passed.iter().copied().collect::<Vec<_>>(), vec![TrainingId(10)]);
    }
}
