//! Typed paths into the project layout.
//!
//! Centralizing path construction keeps file access consistent across the
//! runner, summary generator, and tests.
use crate::config::RunConfig;
use crate::phase::Phase;
use std::path::{Path, PathBuf};

/// Convenience wrapper for locating project artifacts.
#[derive(Debug, Clone)]
pub struct ProjectPaths {
    root: PathBuf,
    manifest_dir: String,
    source_dir: String,
    reports_dir: String,
}

impl ProjectPaths {
    /// Create a new path helper rooted at the project root.
    pub fn new(root: &Path, config: &RunConfig) -> Self {
        Self {
            root: root.to_path_buf(),
            manifest_dir: config.manifest_dir.clone(),
            source_dir: config.source_dir.clone(),
            reports_dir: config.reports_dir.clone(),
        }
    }

    /// Return the `<manifest-dir>/<manifest-id>.package.xml` path for a phase.
    pub fn manifest_path(&self, phase: &Phase) -> PathBuf {
        self.root
            .join(&self.manifest_dir)
            .join(format!("{}.package.xml", phase.manifest_id))
    }

    /// Return the `<source-dir>/<n>-<phase>/` target directory for a phase.
    pub fn target_dir(&self, phase: &Phase) -> PathBuf {
        self.root.join(&self.source_dir).join(phase.target_leaf)
    }

    /// Return the reports directory path.
    pub fn reports_dir(&self) -> PathBuf {
        self.root.join(&self.reports_dir)
    }

    /// Return the `phase-<n>-summary.md` path for a phase.
    pub fn summary_path(&self, phase: &Phase) -> PathBuf {
        self.reports_dir()
            .join(format!("phase-{}-summary.md", phase.ordinal))
    }

    /// Return the append-only `errors.log` path.
    pub fn error_log_path(&self) -> PathBuf {
        self.reports_dir().join("errors.log")
    }

    /// Return the directory holding captured CLI output.
    pub fn attempt_logs_dir(&self) -> PathBuf {
        self.reports_dir().join("logs")
    }

    /// Return the attempt-scoped `phase-<n>-attempt-<k>.log` path.
    pub fn attempt_log_path(&self, phase: &Phase, attempt: u32) -> PathBuf {
        self.attempt_logs_dir()
            .join(format!("phase-{}-attempt-{}.log", phase.ordinal, attempt))
    }

    /// Render a path relative to the project root for report output.
    pub fn display_rel(&self, path: &Path) -> String {
        path.strip_prefix(&self.root)
            .unwrap_or(path)
            .display()
            .to_string()
    }
}
