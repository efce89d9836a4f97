//! # Training Path Resolver
//!
//! Finds cost-ranked trainings for a skill gap, checks an employee's
//! enrollment prerequisites, and assembles flat training paths.
//!
//! Prerequisite checks are shallow: a prerequisite training counts when the
//! employee completed and passed it. Its own prerequisites are not chased,
//! so cyclic prerequisite data cannot loop.

use crate::matching::{SkillDirectory, SkillGap};
use crate::primitives::MAX_TRAININGS_PER_GAP;
use crate::snapshot::{Employee, Training};
use crate::types::{Money, SkillId, SkillLevel, TrainingId};
use crate::workforce::Workforce;
use serde::{Deserialize, Serialize};

/// Where trainings for a gap may come from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrainingScope {
    /// Only trainings targeted at the employee's department.
    DepartmentOnly,
    /// The employee's department first; company-wide if it has none.
    DepartmentThenCompanyWide,
}

/// One training in a path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrainingPathStep {
    /// 1-based position in the path.
    pub step_number: usize,
    pub training_id: TrainingId,
    pub training_name: String,
    pub cost: Money,
    pub duration_hours: u32,
    pub skills_it_teaches: Vec<String>,
    pub meets_prerequisites: bool,
    /// Display strings; empty when prerequisites are met.
    pub missing_prerequisites: Vec<String>,
}

/// A flat, unvalidated list of trainings addressing one employee's gaps.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrainingPath {
    pub steps: Vec<TrainingPathStep>,
    pub total_hours: u64,
}

impl TrainingPath {
    #[must_use]
    pub fn contains(&self, training: TrainingId) -> bool {
        self.steps.iter().any(|s| s.training_id == training)
    }
}

fn teaches(workforce: &Workforce, training: &Training, skill: SkillId, level: SkillLevel) -> bool {
    workforce
        .taught_skills(training.id)
        .iter()
        .any(|&(taught, target)| taught == skill && target.meets(level))
}

impl Workforce {
    /// Offered trainings teaching `skill` to at least `target`, cheapest
    /// first, at most [`MAX_TRAININGS_PER_GAP`].
    pub fn find_trainings_for_gap(
        &self,
        skill: SkillId,
        target: SkillLevel,
        employee: &Employee,
        scope: TrainingScope,
    ) -> Vec<&Training> {
        let mut candidates: Vec<&Training> = self
            .trainings()
            .filter(|t| t.status.is_offered() && teaches(self, t, skill, target))
            .collect();
        candidates.sort_by_key(|t| t.cost);

        let in_department: Vec<&Training> = candidates
            .iter()
            .copied()
            .filter(|t| t.target_department_id == employee.department_id)
            .collect();

        let mut chosen = match scope {
            TrainingScope::DepartmentOnly => in_department,
            TrainingScope::DepartmentThenCompanyWide if in_department.is_empty() => candidates,
            TrainingScope::DepartmentThenCompanyWide => in_department,
        };
        chosen.truncate(MAX_TRAININGS_PER_GAP);
        chosen
    }

    /// Direct prerequisite check: every prerequisite skill at its minimum
    /// level and every prerequisite training completed and passed.
    pub fn meets_prerequisites(&self, employee: &Employee, training: &Training) -> bool {
        let profile = self.profile(employee.id);
        self.prerequisite_skills(training.id)
            .iter()
            .all(|req| req.is_met_by(profile))
            && self
                .prerequisite_trainings(training.id)
                .iter()
                .all(|&pre| self.has_passed(employee.id, pre))
    }

    /// Human-readable unmet prerequisites, skills first.
    pub fn missing_prerequisites(&self, employee: &Employee, training: &Training) -> Vec<String> {
        let profile = self.profile(employee.id);
        let skills = self
            .prerequisite_skills(training.id)
            .iter()
            .filter(|req| !req.is_met_by(profile))
            .map(|req| {
                format!(
                    "{} (Level {})",
                    self.skill_label(req.skill_id),
                    req.required_level.value()
                )
            });
        let trainings = self
            .prerequisite_trainings(training.id)
            .iter()
            .filter(|&&pre| !self.has_passed(employee.id, pre))
            .map(|&pre| format!("Training: {}", self.training_name(pre)));
        skills.chain(trainings).collect()
    }

    pub fn build_path_step(
        &self,
        training: &Training,
        employee: &Employee,
        step_number: usize,
    ) -> TrainingPathStep {
        let meets_prerequisites = self.meets_prerequisites(employee, training);
        TrainingPathStep {
            step_number,
            training_id: training.id,
            training_name: training.name.clone(),
            cost: training.cost,
            duration_hours: training.duration_hours,
            skills_it_teaches: self
                .taught_skills(training.id)
                .iter()
                .map(|&(skill, _)| self.skill_label(skill).to_string())
                .collect(),
            meets_prerequisites,
            missing_prerequisites: if meets_prerequisites {
                Vec::new()
            } else {
                self.missing_prerequisites(employee, training)
            },
        }
    }

    /// Trainings for every gap in order, each training once.
    pub fn build_training_path(
        &self,
        employee: &Employee,
        gaps: &[SkillGap],
        scope: TrainingScope,
    ) -> TrainingPath {
        let mut path = TrainingPath::default();
        for gap in gaps {
            for training in self.find_trainings_for_gap(gap.skill_id, gap.required_level, employee, scope) {
                if path.contains(training.id) {
                    continue;
                }
                let step = self.build_path_step(training, employee, path.steps.len() + 1);
                path.total_hours += u64::from(training.duration_hours);
                path.steps.push(step);
            }
        }
        path
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::SnapshotBuilder;
    use crate::matching::evaluate;
    use crate::types::{EmployeeId, EnrollmentStatus, TrainingResult, TrainingStatus};

    fn workforce() -> Workforce {
        let snapshot = SnapshotBuilder::new()
            .department(1, "Operations")
            .department(2, "Quality")
            .skill(1, "Welding")
            .skill(2, "Safety")
            .employee(1, "Ada Byron", 1, 1)
            .employee_skill(1, 2, 2)
            .employee(2, "Alan Turing", 2, 1)
            // Operations welding courses; the cheapest is cancelled.
            .training(10, "Weld Basics", 1, Money::from_major(800), 8)
            .training_skill(10, 1, 3)
            .training(11, "Weld Pro", 1, Money::from_major(1500), 16)
            .training_skill(11, 1, 5)
            .training_skill(11, 2, 3)
            .training(12, "Weld Cheap", 1, Money::from_major(100), 4)
            .training_skill(12, 1, 5)
            .training_status(12, TrainingStatus::Cancelled)
            .training(13, "Weld Premium", 1, Money::from_major(3000), 40)
            .training_skill(13, 1, 4)
            // Company-wide only via Quality.
            .training(20, "Safety First", 2, Money::from_major(200), 4)
            .training_skill(20, 2, 4)
            .training_prerequisite_skill(11, 2, 3)
            .training_prerequisite(11, 10)
            .training_prerequisite(13, 10)
            .employee_training(2, 10, EnrollmentStatus::Completed, TrainingResult::Passed)
            .build()
            .expect("valid snapshot");
        Workforce::new(snapshot)
    }

    fn employee(wf: &Workforce, id: u32) -> &Employee {
        wf.employee(EmployeeId(id)).expect("employee exists")
    }

    #[test]
    fn cheapest_offered_department_trainings_first() {
        let wf = workforce();
        let ada = employee(&wf, 1);
        let found: Vec<_> = wf
            .find_trainings_for_gap(SkillId(1), SkillLevel::COMPETENT, ada, TrainingScope::DepartmentOnly)
            .iter()
            .map(|t| t.id)
            .collect();
        assert_eq!(found, vec![TrainingId(10), TrainingId(11)]);
    }

    #[test]
    fn taught_level_must_reach_target() {
        let wf = workforce();
        let ada = employee(&wf, 1);
        let found: Vec<_> = wf
            .find_trainings_for_gap(SkillId(1), SkillLevel::EXPERT, ada, TrainingScope::DepartmentOnly)
            .iter()
            .map(|t| t.id)
            .collect();
        assert_eq!(found, vec![TrainingId(11)]);
    }

    #[test]
    fn department_only_never_falls_back() {
        let wf = workforce();
        let ada = employee(&wf, 1);
        assert!(wf
            .find_trainings_for_gap(SkillId(2), SkillLevel::ADVANCED, ada, TrainingScope::DepartmentOnly)
            .is_empty());
        let found = wf.find_trainings_for_gap(
            SkillId(2),
            SkillLevel::ADVANCED,
            ada,
            TrainingScope::DepartmentThenCompanyWide,
        );
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, TrainingId(20));
    }

    #[test]
    fn fallback_only_when_department_has_none() {
        let wf = workforce();
        let alan = employee(&wf, 2);
        // Quality has no welding course, so company-wide applies.
        let found: Vec<_> = wf
            .find_trainings_for_gap(
                SkillId(1),
                SkillLevel::COMPETENT,
                alan,
                TrainingScope::DepartmentThenCompanyWide,
            )
            .iter()
            .map(|t| t.id)
            .collect();
        assert_eq!(found, vec![TrainingId(10), TrainingId(11)]);
    }

    #[test]
    fn prerequisites_need_skill_and_passed_training() {
        let wf = workforce();
        let ada = employee(&wf, 1);
        let alan = employee(&wf, 2);
        let pro = wf.training(TrainingId(11)).expect("training");
        let premium = wf.training(TrainingId(13)).expect("training");
        assert!(!wf.meets_prerequisites(ada, pro));
        assert!(!wf.meets_prerequisites(alan, pro));
        assert!(wf.meets_prerequisites(alan, premium));
        assert_eq!(
            wf.missing_prerequisites(ada, pro),
            vec!["Safety (Level 3)".to_string(), "Training: Weld Basics".to_string()]
        );
    }

    #[test]
    fn path_step_lists_taught_skills() {
        let wf = workforce();
        let ada = employee(&wf, 1);
        let pro = wf.training(TrainingId(11)).expect("training");
        let step = wf.build_path_step(pro, ada, 3);
        assert_eq!(step.step_number, 3);
        assert_eq!(step.skills_it_teaches, vec!["Welding", "Safety"]);
        assert!(!step.meets_prerequisites);
        assert_eq!(step.missing_prerequisites.len(), 2);

        let basics = wf.training(TrainingId(10)).expect("training");
        let step = wf.build_path_step(basics, ada, 1);
        assert!(step.meets_prerequisites);
        assert!(step.missing_prerequisites.is_empty());
    }

    #[test]
    fn path_deduplicates_trainings_and_sums_hours() {
        let wf = workforce();
        let ada = employee(&wf, 1);
        let requirements = [
            crate::matching::Requirement::new(SkillId(1), SkillLevel::COMPETENT),
            crate::matching::Requirement::new(SkillId(2), SkillLevel::COMPETENT),
        ];
        let result = evaluate(wf.profile(ada.id), &requirements, &wf, Money::ZERO);
        let path = wf.build_training_path(ada, &result.gaps, TrainingScope::DepartmentOnly);
        let ids: Vec<_> = path.steps.iter().map(|s| s.training_id).collect();
        // Weld Pro teaches both skills and appears once.
        assert_eq!(ids, vec![TrainingId(10), TrainingId(11)]);
        assert_eq!(path.steps[1].step_number, 2);
        assert_eq!(path.total_hours, 24);
    }

    #[test]
    fn cyclic_prerequisites_terminate() {
        let snapshot = SnapshotBuilder::new()
            .employee(1, "A B", 1, 1)
            .training(1, "One", 1, Money::ZERO, 1)
            .training(2, "Two", 1, Money::ZERO, 1)
            .training_prerequisite(1, 2)
            .training_prerequisite(2, 1)
            .build()
            .expect("valid snapshot");
        let wf = Workforce::new(snapshot);
        let emp = employee(&wf, 1);
        let one = wf.training(TrainingId(1)).expect("training");
        assert!(!wf.meets_prerequisites(emp, one));
        assert_eq!(wf.missing_prerequisites(emp, one), vec!["Training: Two"]);
    }
}
