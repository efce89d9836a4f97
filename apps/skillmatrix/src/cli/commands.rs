//! # CLI Command Implementations
//!
//! Every command loads the snapshot file, runs one analysis and prints it
//! either as text or, with `--json-mode`, as pretty JSON.

use super::Output;
use crate::api::{self, AppState, OpenPositionsQuery, UnmetProcessesResponse};
use crate::config::AppConfig;
use crate::loader::load_workforce;
use serde::Serialize;
use skillmatrix_core::{
    EmployeeSuggestion, Money, PositionId, ProcessCapabilityGap, ProcessId, RelianceIssue,
    WorkforceError,
};
use std::path::Path;

/// Print `value` as pretty JSON.
fn print_json<T: Serialize>(value: &T) -> Result<(), WorkforceError> {
    let text = serde_json::to_string_pretty(value)
        .map_err(|e| WorkforceError::SerializationError(e.to_string()))?;
    println!("{}", text);
    Ok(())
}

fn print_heading(title: &str) {
    println!("{}", title);
    println!("{}", "=".repeat(title.chars().count()));
}

// =============================================================================
// SERVER COMMAND
// =============================================================================

/// Start the HTTP server.
pub async fn cmd_server(snapshot: &Path, config: &AppConfig) -> Result<(), WorkforceError> {
    let workforce = load_workforce(snapshot)?;
    let state = AppState::new(workforce, config)?;

    println!("skillmatrix Server Starting...");
    println!();
    println!("Configuration:");
    println!("  Host:           {}", config.server.host);
    println!("  Port:           {}", config.server.port);
    println!("  Snapshot:       {}", snapshot.display());
    println!("  Cost per level: {}", state.cost_per_level);
    println!();
    println!("Endpoints:");
    println!("  GET  /summary                         - Snapshot statistics");
    println!("  GET  /positions/open                  - Open positions");
    println!("  GET  /positions/{{id}}/candidates       - Internal candidates");
    println!("  GET  /positions/{{id}}/unmet-processes  - Unmet processes");
    println!("  GET  /capability[/{{id}}]               - Capability gaps");
    println!("  GET  /reliance[/{{id}}]                 - Worker reliance");
    println!("  PUT  /snapshot                        - Replace snapshot");
    println!("  GET  /health                          - Health check");
    println!();
    println!("Press Ctrl+C to stop");
    println!();

    let addr = format!("{}:{}", config.server.host, config.server.port);
    api::run_server(&addr, state).await
}

// =============================================================================
// SUMMARY COMMAND
// =============================================================================

/// Show snapshot statistics.
pub fn cmd_summary(snapshot: &Path, out: Output) -> Result<(), WorkforceError> {
    let workforce = load_workforce(snapshot)?;
    let summary = workforce.summary();

    if out.json_mode {
        return print_json(&summary);
    }

    print_heading("Workforce Summary");
    println!("Snapshot: {}", snapshot.display());
    println!();
    println!("Employees:   {} ({} active)", summary.employees, summary.active_employees);
    println!("Departments: {}", summary.departments);
    println!("Positions:   {} ({} open slots)", summary.positions, summary.open_slots);
    println!("Processes:   {}", summary.processes);
    println!("Skills:      {}", summary.skills);
    println!("Trainings:   {}", summary.trainings);

    if out.verbose {
        println!();
        println!("Relations:");
        println!("  Employee skills:          {}", summary.employee_skills);
        println!("  Employee trainings:       {}", summary.employee_trainings);
        println!("  Position requirements:    {}", summary.position_required_skills);
        println!("  Position processes:       {}", summary.position_processes);
        println!("  Process requirements:     {}", summary.process_required_skills);
        println!("  Training skills:          {}", summary.training_skills);
        println!("  Training prereq skills:   {}", summary.training_prerequisite_skills);
        println!("  Training prereq trainings: {}", summary.training_prerequisite_trainings);
    }

    Ok(())
}

// =============================================================================
// EMPLOYMENT COMMANDS
// =============================================================================

/// Rank internal candidates for a position against an external hire.
pub fn cmd_candidates(
    snapshot: &Path,
    out: Output,
    position: u32,
    cost_per_level: Money,
) -> Result<(), WorkforceError> {
    let workforce = load_workforce(snapshot)?;
    let analysis = workforce.analyze_candidates(PositionId(position), cost_per_level)?;

    if out.json_mode {
        return print_json(&analysis);
    }

    print_heading(&format!(
        "Employment Analysis: {} (#{})",
        analysis.position_name, analysis.position_id
    ));
    println!("Training cost per level: {}", analysis.training_cost_per_level);
    println!("Required skills:         {}", analysis.required_skills_count);
    println!();

    if analysis.has_no_requirements() {
        println!("Position has no required skills defined; nothing to match.");
        return Ok(());
    }

    if analysis.candidates.is_empty() {
        println!("No internal candidates at or above the match threshold.");
    }

    let today = chrono::Local::now().date_naive();
    for (rank, c) in analysis.candidates.iter().enumerate() {
        let tenure = workforce
            .employee(c.employee_id)
            .map(|e| e.tenure_months(today))
            .unwrap_or_default();
        println!(
            "{}. {} (#{}) - {}, {} months",
            rank + 1,
            c.employee_name,
            c.employee_id,
            c.current_position_name,
            tenure
        );
        println!(
            "   Score {:.2} | Match {:.1}% ({}/{}) | Avg gap {:.2} | Training {}",
            c.total_score,
            c.match_percentage,
            c.matching_skills_count,
            c.required_skills_count,
            c.average_skill_gap,
            c.estimated_training_cost
        );
        if out.verbose {
            println!("   Salary: {}", c.current_salary);
            for gap in &c.skill_gaps {
                let current = gap
                    .current_level
                    .map(|l| l.to_string())
                    .unwrap_or_else(|| "missing".to_string());
                println!(
                    "   - {}: {} -> {} (+{})",
                    gap.skill_name, current, gap.required_level, gap.gap_amount
                );
            }
        }
    }

    if let Some(external) = &analysis.external_option {
        println!();
        println!("External hire:");
        println!("  Hiring cost:     {}", external.hiring_cost);
        println!("  Starting salary: {}", external.starting_salary);
        println!("  Total:           {}", external.total_cost);
    }

    Ok(())
}

/// List positions with open slots.
pub fn cmd_open_positions(
    snapshot: &Path,
    out: Output,
    department: Option<u32>,
    min_level: Option<u32>,
    max_level: Option<u32>,
) -> Result<(), WorkforceError> {
    let workforce = load_workforce(snapshot)?;
    let query = OpenPositionsQuery {
        department,
        min_level,
        max_level,
    };
    let positions = query.apply(&workforce)?;

    if out.json_mode {
        return print_json(&positions);
    }

    print_heading("Open Positions");
    if positions.is_empty() {
        println!("No open positions.");
    }
    for p in &positions {
        println!(
            "#{} {} ({}, level {}) - {} of {} open",
            p.position_id, p.name, p.department_name, p.level, p.open_slots, p.capacity
        );
    }

    Ok(())
}

/// Processes of a position that no active incumbent can perform.
pub fn cmd_unmet(snapshot: &Path, out: Output, position: u32) -> Result<(), WorkforceError> {
    let workforce = load_workforce(snapshot)?;
    let response = UnmetProcessesResponse::for_position(&workforce, PositionId(position))?;

    if out.json_mode {
        return print_json(&response);
    }

    print_heading(&format!(
        "Unmet Processes: {} (#{})",
        response.position_name, response.position_id
    ));
    if response.processes.is_empty() {
        println!("Every assigned process is covered by an incumbent.");
    }
    for p in &response.processes {
        println!("#{} {} (aimed {})", p.process_id, p.description, p.aimed_workers);
    }

    Ok(())
}

// =============================================================================
// CAPABILITY COMMANDS
// =============================================================================

/// Capability gaps of every process.
pub fn cmd_gaps(snapshot: &Path, out: Output, cost_per_level: Money) -> Result<(), WorkforceError> {
    let workforce = load_workforce(snapshot)?;
    let report = workforce.analyze_capability_gaps(cost_per_level)?;

    if out.json_mode {
        return print_json(&report);
    }

    print_heading("Capability Gaps");
    println!(
        "Critical: {}  High: {}  Medium: {}",
        report.critical_count, report.high_count, report.medium_count
    );
    println!();
    for gap in &report.process_gaps {
        print_process_gap(gap, out.verbose);
    }

    Ok(())
}

/// Capability record of one process.
pub fn cmd_gap(
    snapshot: &Path,
    out: Output,
    process: u32,
    cost_per_level: Money,
) -> Result<(), WorkforceError> {
    let workforce = load_workforce(snapshot)?;
    let gap = workforce.analyze_process_gap(ProcessId(process), cost_per_level)?;

    if out.json_mode {
        return print_json(&gap);
    }

    print_process_gap(&gap, true);
    Ok(())
}

fn print_process_gap(gap: &ProcessCapabilityGap, detailed: bool) {
    println!("#{} {}", gap.process_id, gap.process_description);
    println!("  {}", gap.priority_reason);
    println!(
        "  Capable {} / aimed {} (gap {})",
        gap.capable_workers, gap.aimed_workers, gap.worker_gap
    );
    if !detailed {
        println!();
        return;
    }

    if !gap.assigned_position_names.is_empty() {
        println!("  Positions: {}", gap.assigned_position_names.join(", "));
    }
    if !gap.missing_skills.is_empty() {
        println!("  Skill coverage:");
        for s in &gap.missing_skills {
            println!(
                "    {} at {}: {} hold it, {} at level",
                s.skill_name, s.required_level, s.employees_with_skill, s.employees_at_required_level
            );
        }
    }
    if !gap.suggested_trainings.is_empty() {
        println!("  Trainings:");
        for t in &gap.suggested_trainings {
            println!(
                "    {} ({}) - {}, {}h, {} eligible",
                t.training_name,
                t.target_department_name,
                t.cost,
                t.duration_hours,
                t.eligible_employees_count
            );
        }
    }
    print_suggestions("Quickest fix", &gap.quickest_fix);
    print_suggestions("Cheapest fix", &gap.cheapest_fix);
    println!();
}

// =============================================================================
// RELIANCE COMMANDS
// =============================================================================

/// Worker reliance issues of every process.
pub fn cmd_reliance(
    snapshot: &Path,
    out: Output,
    cost_per_level: Money,
) -> Result<(), WorkforceError> {
    let workforce = load_workforce(snapshot)?;
    let report = workforce.analyze_worker_reliance(cost_per_level)?;

    if out.json_mode {
        return print_json(&report);
    }

    print_heading("Worker Reliance");
    println!(
        "Critical: {}  High risk: {}  Below target: {}",
        report.critical_count, report.high_risk_count, report.below_target_count
    );
    println!();
    for issue in &report.reliance_issues {
        print_reliance_issue(issue, out.verbose);
    }

    Ok(())
}

/// Reliance record of one process.
pub fn cmd_reliance_of(
    snapshot: &Path,
    out: Output,
    process: u32,
    cost_per_level: Money,
) -> Result<(), WorkforceError> {
    let workforce = load_workforce(snapshot)?;
    let issue = workforce.analyze_process_reliance(ProcessId(process), cost_per_level)?;

    if out.json_mode {
        return print_json(&issue);
    }

    print_reliance_issue(&issue, true);
    Ok(())
}

fn print_reliance_issue(issue: &RelianceIssue, detailed: bool) {
    println!("#{} {}", issue.process_id, issue.process_description);
    println!("  {}", issue.priority_reason);
    println!(
        "  Capable {} / aimed {} (gap {}, {:.1}%)",
        issue.capable_workers, issue.aimed_workers, issue.worker_gap, issue.gap_percentage
    );
    if !detailed {
        println!();
        return;
    }

    for e in &issue.capable_employees {
        println!("  Capable: {} ({})", e.employee_name, e.department_name);
    }
    print_suggestions("Same department", &issue.same_department_suggestions);
    print_suggestions("Other departments", &issue.cross_department_suggestions);
    println!();
}

fn print_suggestions(title: &str, suggestions: &[EmployeeSuggestion]) {
    if suggestions.is_empty() {
        return;
    }
    println!("  {}:", title);
    for s in suggestions {
        println!(
            "    {} ({}) - {:.1}%, {} missing, {} / {}h",
            s.employee_name,
            s.department_name,
            s.match_percentage,
            s.missing_skills_count,
            s.estimated_training_cost,
            s.estimated_training_hours
        );
        for step in &s.training_path {
            let note = if step.meets_prerequisites {
                String::new()
            } else {
                format!(" [needs {}]", step.missing_prerequisites.join(", "))
            };
            println!(
                "      {}. {} ({}, {}h){}",
                step.step_number, step.training_name, step.cost, step.duration_hours, note
            );
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use skillmatrix_core::{SnapshotBuilder, Workforce};
    use std::io::Write;

    const TEXT: Output = Output {
        json_mode: false,
        verbose: true,
    };
    const JSON: Output = Output {
        json_mode: true,
        verbose: false,
    };

    fn snapshot_file() -> tempfile::NamedTempFile {
        let snapshot = SnapshotBuilder::new()
            .department(1, "Plant")
            .skill(1, "Welding")
            .position(1, "Welder", 1, 2)
            .position_skill(1, 1, 3)
            .process(1, "Weld", 2)
            .process_skill(1, 1, 3)
            .assign_process(1, 1)
            .employee(1, "Ada Byron", 1, 1)
            .employee_skill(1, 1, 2)
            .build()
            .expect("valid snapshot");
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        let json = serde_json::to_vec(&snapshot).expect("serialize");
        file.write_all(&json).expect("write");
        file
    }

    #[test]
    fn test_commands_run_in_both_modes() {
        let file = snapshot_file();
        let path = file.path();
        let cost = Money::from_major(100);
        for out in [TEXT, JSON] {
            cmd_summary(path, out).expect("summary");
            cmd_candidates(path, out, 1, cost).expect("candidates");
            cmd_gaps(path, out, cost).expect("gaps");
            cmd_gap(path, out, 1, cost).expect("gap");
            cmd_reliance(path, out, cost).expect("reliance");
            cmd_reliance_of(path, out, 1, cost).expect("reliance-of");
            cmd_open_positions(path, out, Some(1), None, None).expect("open positions");
            cmd_unmet(path, out, 1).expect("unmet");
        }
    }

    #[test]
    fn test_unknown_ids_propagate() {
        let file = snapshot_file();
        let cost = Money::from_major(100);
        let err = cmd_candidates(file.path(), TEXT, 9, cost).expect_err("unknown position");
        assert!(matches!(err, WorkforceError::PositionNotFound(_)));
        let err = cmd_gap(file.path(), TEXT, 9, cost).expect_err("unknown process");
        assert!(matches!(err, WorkforceError::ProcessNotFound(_)));
    }

    #[test]
    fn test_inverted_level_range() {
        let file = snapshot_file();
        let err = cmd_open_positions(file.path(), TEXT, None, Some(5), Some(1))
            .expect_err("inverted");
        assert!(matches!(err, WorkforceError::InvalidParameter(_)));
    }

    #[test]
    fn test_missing_snapshot_file() {
        let dir = tempfile::tempdir().expect("temp dir");
        let err = cmd_summary(&dir.path().join("absent.json"), TEXT).expect_err("missing");
        assert!(matches!(err, WorkforceError::IoError(_)));
    }

    #[test]
    fn test_workforce_loaded_matches_file() {
        let file = snapshot_file();
        let wf: Workforce = load_workforce(file.path()).expect("load");
        assert_eq!(wf.summary().employees, 1);
    }
}
