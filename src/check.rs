//! Batch checking of AAS JSON documents
//!
//! Walks a directory tree, parses every matching file as one identifiable or
//! an array of identifiables, and reports the first rule violation per file.

use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::config::CheckConfig;
use crate::error::AasError;
use crate::model::identifiables_from_json;

/// Outcome of checking one file
#[derive(Debug, Clone, Serialize)]
pub struct CheckReport {
    /// Path relative to the checked root
    pub path: PathBuf,
    /// Number of identifiables parsed from the file
    pub entities: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub failure: Option<CheckFailure>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CheckFailure {
    pub rule: String,
    pub message: String,
}

impl From<&AasError> for CheckFailure {
    fn from(error: &AasError) -> Self {
        Self {
            rule: error.rule().to_string(),
            message: error.to_string(),
        }
    }
}

impl CheckReport {
    pub fn is_ok(&self) -> bool {
        self.failure.is_none()
    }
}

/// Check a single file
pub fn check_file(path: &Path) -> Result<usize, AasError> {
    let content = std::fs::read_to_string(path)?;
    let entities = identifiables_from_json(&content)?;
    Ok(entities.len())
}

/// Check every matching file under `root` (or `root` itself when it is a file)
pub fn check_path(root: &Path, config: &CheckConfig) -> Vec<CheckReport> {
    let mut reports = Vec::new();

    let entries = walkdir::WalkDir::new(root)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| e.depth() == 0 || !config.is_ignored(relative(root, e.path()).as_path()));

    for entry in entries {
        let report = match entry {
            Ok(entry) if entry.file_type().is_file() && config.matches_extension(entry.path()) => {
                check_entry(root, entry.path())
            }
            Ok(_) => continue,
            // an unreadable root or subdirectory is a failed check, not an empty one
            Err(e) => {
                let rel = e.path().map(|p| relative(root, p)).unwrap_or_else(|| root.to_path_buf());
                let error = AasError::Io(e.into());
                tracing::debug!(path = %rel.display(), rule = error.rule(), "walk failed");
                CheckReport {
                    path: rel,
                    entities: 0,
                    failure: Some(CheckFailure::from(&error)),
                }
            }
        };

        let failed = !report.is_ok();
        reports.push(report);
        if failed && config.fail_fast {
            break;
        }
    }

    reports
}

fn check_entry(root: &Path, path: &Path) -> CheckReport {
    let rel = relative(root, path);
    tracing::debug!(path = %rel.display(), "checking document");

    match check_file(path) {
        Ok(entities) => CheckReport {
            path: rel,
            entities,
            failure: None,
        },
        Err(e) => {
            tracing::debug!(path = %rel.display(), rule = e.rule(), "document rejected");
            CheckReport {
                path: rel,
                entities: 0,
                failure: Some(CheckFailure::from(&e)),
            }
        }
    }
}

fn relative(root: &Path, path: &Path) -> PathBuf {
    match path.strip_prefix(root) {
        // a single-file root strips to nothing
        Ok(p) if p.as_os_str().is_empty() => path
            .file_name()
            .map(PathBuf::from)
            .unwrap_or_else(|| path.to_path_buf()),
        Ok(p) => p.to_path_buf(),
        Err(_) => path.to_path_buf(),
    }
}
