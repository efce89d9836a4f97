//! Snapshot statistics for status surfaces.

use crate::workforce::Workforce;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SnapshotSummary {
    pub skills: usize,
    pub departments: usize,
    pub employees: usize,
    pub active_employees: usize,
    pub positions: usize,
    pub processes: usize,
    pub trainings: usize,
    pub employee_skills: usize,
    pub employee_trainings: usize,
    pub position_required_skills: usize,
    pub position_processes: usize,
    pub process_required_skills: usize,
    pub training_skills: usize,
    pub training_prerequisite_skills: usize,
    pub training_prerequisite_trainings: usize,
    /// Σ open slots over positions with any.
    pub open_slots: i64,
}

impl Workforce {
    /// Entity counts (distinct ids), junction row counts and open headcount.
    pub fn summary(&self) -> SnapshotSummary {
        let snapshot = self.snapshot();
        SnapshotSummary {
            skills: self.skills_len(),
            departments: self.departments_len(),
            employees: self.employees().count(),
            active_employees: self.active_employees().count(),
            positions: self.positions().count(),
            processes: self.processes().count(),
            trainings: self.trainings().count(),
            employee_skills: snapshot.employee_skills.len(),
            employee_trainings: snapshot.employee_trainings.len(),
            position_required_skills: snapshot.position_required_skills.len(),
            position_processes: snapshot.position_processes.len(),
            process_required_skills: snapshot.process_required_skills.len(),
            training_skills: snapshot.training_skills.len(),
            training_prerequisite_skills: snapshot.training_prerequisite_skills.len(),
            training_prerequisite_trainings: snapshot.training_prerequisite_trainings.len(),
            open_slots: self
                .positions()
                .map(|p| self.open_slots(p).max(0))
                .sum(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::SnapshotBuilder;
    use chrono::NaiveDate;

    #[test]
    fn counts_entities_and_open_slots() {
        let date = NaiveDate::from_ymd_opt(2023, 5, 1).expect("valid date");
        let snapshot = SnapshotBuilder::new()
            .department(1, "Plant")
            .skill(1, "Welding")
            .skill(1, "Welding (dup)")
            .position(1, "Welder", 1, 3)
            .position(2, "Lead", 1, 1)
            .employee(1, "Ada Byron", 1, 1)
            .employee(2, "Alan Turing", 1, 2)
            .employee(3, "Grace Hopper", 1, 2)
            .employee(4, "Old Timer", 1, 1)
            .terminate(4, date)
            .employee_skill(1, 1, 3)
            .build()
            .expect("valid snapshot");
        let summary = Workforce::new(snapshot).summary();
        assert_eq!(summary.skills, 1);
        assert_eq!(summary.employees, 4);
        assert_eq!(summary.active_employees, 3);
        assert_eq!(summary.employee_skills, 1);
        // Welder 3 - 1; Lead over-staffed contributes nothing.
        assert_eq!(summary.open_slots, 2);
    }

    #[test]
    fn empty_snapshot_is_all_zero() {
        let summary = Workforce::new(crate::snapshot::Snapshot::default()).summary();
        assert_eq!(summary, SnapshotSummary::default());
    }
}
