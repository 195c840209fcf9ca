//! Schema file loading
//!
//! Reads schema documents from disk and runs them through a validator. The
//! core never touches the filesystem; this is the only place that does.

use serde::Serialize;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use walkdir::WalkDir;

use crate::diagnostic::ValidationResult;
use crate::error::{Result, SchemaError};
use crate::walker::SchemaValidator;

/// What happened to one file
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum FileOutcome {
    Checked(ValidationResult),
    /// Could not be read or parsed
    Failed { error: String },
}

/// Validation report for one schema file
#[derive(Debug, Clone, Serialize)]
pub struct FileReport {
    pub source: PathBuf,
    #[serde(flatten)]
    pub outcome: FileOutcome,
}

impl FileReport {
    pub fn is_valid(&self) -> bool {
        matches!(&self.outcome, FileOutcome::Checked(result) if result.valid)
    }

    pub fn is_failed(&self) -> bool {
        matches!(self.outcome, FileOutcome::Failed { .. })
    }
}

/// Read and parse one schema document
pub fn load_schema(path: &Path) -> Result<Value> {
    if !path.exists() {
        return Err(SchemaError::NotFound(path.to_path_buf()));
    }
    let content = fs::read_to_string(path)?;
    serde_json::from_str(&content).map_err(|source| SchemaError::Json {
        path: path.to_path_buf(),
        source,
    })
}

/// Load and validate one file
pub fn validate_file(validator: &SchemaValidator, path: &Path) -> Result<FileReport> {
    let schema = load_schema(path)?;
    debug!(path = %path.display(), "validating schema file");
    Ok(FileReport {
        source: path.to_path_buf(),
        outcome: FileOutcome::Checked(validator.validate(&schema)),
    })
}

/// Validate every `*.json` file under `dir`, in path order.
///
/// Files that fail to load are reported in place; the walk goes on.
pub fn validate_dir(validator: &SchemaValidator, dir: &Path) -> Result<Vec<FileReport>> {
    if !dir.is_dir() {
        return Err(SchemaError::NotFound(dir.to_path_buf()));
    }

    let mut reports = Vec::new();
    for entry in WalkDir::new(dir)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .filter(|e| e.path().extension().map(|x| x == "json").unwrap_or(false))
    {
        let path = entry.path();
        let report = match validate_file(validator, path) {
            Ok(report) => report,
            Err(err) => {
                warn!(path = %path.display(), error = %err, "skipping unreadable schema");
                FileReport {
                    source: path.to_path_buf(),
                    outcome: FileOutcome::Failed {
                        error: err.to_string(),
                    },
                }
            }
        };
        reports.push(report);
    }

    Ok(reports)
}

/// Validate a mix of files and directories
pub fn validate_paths(validator: &SchemaValidator, paths: &[PathBuf]) -> Result<Vec<FileReport>> {
    let mut reports = Vec::new();
    for path in paths {
        if path.is_dir() {
            reports.extend(validate_dir(validator, path)?);
        } else {
            reports.push(validate_file(validator, path)?);
        }
    }
    Ok(reports)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write(dir: &Path, name: &str, content: &str) -> PathBuf {
        let path = dir.join(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_load_schema_errors() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.json");
        assert!(matches!(load_schema(&missing), Err(SchemaError::NotFound(_))));

        let broken = write(dir.path(), "broken.json", "{\"type\": ");
        assert!(matches!(load_schema(&broken), Err(SchemaError::Json { .. })));
    }

    #[test]
    fn test_validate_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(
            dir.path(),
            "user.json",
            r#"{"type": "object", "required": ["id", "id"]}"#,
        );

        let report = validate_file(&SchemaValidator::default(), &path).unwrap();
        assert!(!report.is_valid());
        match report.outcome {
            FileOutcome::Checked(result) => {
                assert_eq!(result.diagnostics.len(), 1);
                assert_eq!(result.diagnostics[0].path.to_pointer(), "/required/1");
            }
            FileOutcome::Failed { error } => panic!("unexpected failure: {}", error),
        }
    }

    #[test]
    fn test_validate_dir_sorted_and_tolerant() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "b.json", r#"{"type": "string"}"#);
        write(dir.path(), "a.json", r#"{"minLength": -1}"#);
        write(dir.path(), "nested/c.json", "not json");
        write(dir.path(), "notes.txt", "ignored");

        let reports = validate_dir(&SchemaValidator::default(), dir.path()).unwrap();
        let names: Vec<_> = reports
            .iter()
            .map(|r| r.source.strip_prefix(dir.path()).unwrap().to_path_buf())
            .collect();
        assert_eq!(
            names,
            vec![PathBuf::from("a.json"), PathBuf::from("b.json"), PathBuf::from("nested/c.json")]
        );
        assert!(!reports[0].is_valid());
        assert!(reports[1].is_valid());
        assert!(reports[2].is_failed());
    }

    #[test]
    fn test_report_serialization() {
        let report = FileReport {
            source: PathBuf::from("s.json"),
            outcome: FileOutcome::Failed {
                error: "boom".to_string(),
            },
        };
        let value = serde_json::to_value(&report).unwrap();
        assert_eq!(value["source"], "s.json");
        assert_eq!(value["status"], "failed");
        assert_eq!(value["error"], "boom");
    }
}
