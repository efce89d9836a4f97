//! # Snapshot Loading
//!
//! Reads a workforce snapshot from a JSON file. Collections missing from the
//! document default to empty.

use skillmatrix_core::{Snapshot, Workforce, WorkforceError};
use std::path::{Path, PathBuf};

/// Maximum snapshot file size (100 MB).
///
/// This prevents memory exhaustion from malicious or accidental large files.
pub const MAX_SNAPSHOT_FILE_SIZE: u64 = 100 * 1024 * 1024;

/// Validate file path.
///
/// Canonicalizes the path (resolving symlinks and "..") and ensures it names
/// an existing regular file.
fn validate_file_path(path: &Path) -> Result<PathBuf, WorkforceError> {
    let canonical = path.canonicalize().map_err(|e| {
        WorkforceError::IoError(format!("Invalid file path '{}': {}", path.display(), e))
    })?;

    if !canonical.is_file() {
        return Err(WorkforceError::IoError(format!(
            "Path '{}' is not a regular file",
            path.display()
        )));
    }

    Ok(canonical)
}

/// Validate file size before reading.
fn validate_file_size(path: &Path, max_size: u64) -> Result<(), WorkforceError> {
    let metadata = std::fs::metadata(path)
        .map_err(|e| WorkforceError::IoError(format!("Cannot read file metadata: {}", e)))?;

    if metadata.len() > max_size {
        return Err(WorkforceError::IoError(format!(
            "File size {} bytes exceeds maximum allowed {} bytes",
            metadata.len(),
            max_size
        )));
    }
    Ok(())
}

/// Parse a JSON snapshot document.
pub fn parse_snapshot(bytes: &[u8]) -> Result<Snapshot, WorkforceError> {
    serde_json::from_slice(bytes).map_err(|e| WorkforceError::DeserializationError(e.to_string()))
}

/// Load a snapshot file.
pub fn load_snapshot(path: &Path) -> Result<Snapshot, WorkforceError> {
    let validated_path = validate_file_path(path)?;
    validate_file_size(&validated_path, MAX_SNAPSHOT_FILE_SIZE)?;

    let contents = std::fs::read(&validated_path)
        .map_err(|e| WorkforceError::IoError(format!("Read file: {}", e)))?;
    parse_snapshot(&contents)
}

/// Load a snapshot file and index it.
pub fn load_workforce(path: &Path) -> Result<Workforce, WorkforceError> {
    let snapshot = load_snapshot(path)?;
    let workforce = Workforce::new(snapshot);
    let summary = workforce.summary();
    tracing::info!(
        path = %path.display(),
        employees = summary.employees,
        positions = summary.positions,
        processes = summary.processes,
        trainings = summary.trainings,
        "snapshot loaded"
    );
    Ok(workforce)
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use skillmatrix_core::{EmployeeId, SkillLevel};
    use std::io::Write;

    const DOCUMENT: &str = r#"{
        "skills": [{ "id": 1, "name": "Welding" }],
        "departments": [{ "id": 1, "name": "Plant" }],
        "employees": [{
            "id": 1, "first_name": "Ada", "last_name": "Byron",
            "department_id": 1, "position_id": 1, "hire_date": "2020-03-01"
        }],
        "employee_skills": [{ "employee_id": 1, "skill_id": 1, "level": 4 }]
    }"#;

    #[test]
    fn test_parse_defaults_missing_collections() {
        let snapshot = parse_snapshot(DOCUMENT.as_bytes()).expect("parse");
        assert_eq!(snapshot.employees.len(), 1);
        assert!(snapshot.trainings.is_empty());
        assert!(snapshot.position_processes.is_empty());
    }

    #[test]
    fn test_parse_rejects_invalid_level() {
        let doc = r#"{ "employee_skills": [{ "employee_id": 1, "skill_id": 1, "level": 9 }] }"#;
        let err = parse_snapshot(doc.as_bytes()).expect_err("level out of range");
        assert!(matches!(err, WorkforceError::DeserializationError(_)));
    }

    #[test]
    fn test_load_workforce_from_file() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        file.write_all(DOCUMENT.as_bytes()).expect("write");

        let wf = load_workforce(file.path()).expect("load");
        assert_eq!(
            wf.profile(EmployeeId(1)).values().next(),
            Some(&SkillLevel::ADVANCED)
        );
    }

    #[test]
    fn test_missing_file() {
        let dir = tempfile::tempdir().expect("temp dir");
        let err = load_snapshot(&dir.path().join("absent.json")).expect_err("missing");
        assert!(matches!(err, WorkforceError::IoError(_)));
    }

    #[test]
    fn test_directory_rejected() {
        let dir = tempfile::tempdir().expect("temp dir");
        let err = load_snapshot(dir.path()).expect_err("directory");
        assert!(err.to_string().contains("not a regular file"));
    }
}
