//! Run configuration: defaults, optional JSON file, validation.
//!
//! The config is project-owned and optional; defaults match the standard
//! sfdx project layout so a bare `sfpull run` works without one.
use anyhow::{anyhow, Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Component, Path};

pub const CONFIG_FILE_NAME: &str = "sfpull.config.json";

/// Project-owned run configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RunConfig {
    /// Retrieval CLI command; may be multi-word (e.g. "npx sf").
    pub tool: String,
    /// Directory holding `<manifest-id>.package.xml` files.
    pub manifest_dir: String,
    /// Directory receiving per-phase retrieval output.
    pub source_dir: String,
    /// Directory receiving summaries, attempt logs, and the error log.
    pub reports_dir: String,
    /// `--wait` bound in minutes for the first attempt.
    pub wait_minutes: u32,
    /// `--wait` bound in minutes for the retry attempt.
    pub retry_wait_minutes: u32,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            tool: "sf".to_string(),
            manifest_dir: "manifest".to_string(),
            source_dir: "force-app".to_string(),
            reports_dir: "reports".to_string(),
            wait_minutes: 10,
            retry_wait_minutes: 15,
        }
    }
}

/// Build the default config used when the project has no config file.
pub fn default_config() -> RunConfig {
    RunConfig::default()
}

/// Load the project config, falling back to defaults when no file exists.
///
/// An explicit `--config` path must exist; the conventional
/// `sfpull.config.json` in the project root is optional.
pub fn load_config(project_dir: &Path, explicit: Option<&Path>) -> Result<RunConfig> {
    let path = match explicit {
        Some(path) => path.to_path_buf(),
        None => {
            let candidate = project_dir.join(CONFIG_FILE_NAME);
            if !candidate.is_file() {
                return Ok(default_config());
            }
            candidate
        }
    };
    let bytes = fs::read(&path).with_context(|| format!("read config {}", path.display()))?;
    let config: RunConfig = serde_json::from_slice(&bytes).context("parse run config JSON")?;
    validate_config(&config)?;
    Ok(config)
}

/// Validate the tool command, wait bounds, and directory entries.
pub fn validate_config(config: &RunConfig) -> Result<()> {
    tool_argv(&config.tool)?;
    if config.wait_minutes == 0 {
        return Err(anyhow!("wait_minutes must be positive"));
    }
    if config.retry_wait_minutes < config.wait_minutes {
        return Err(anyhow!(
            "retry_wait_minutes ({}) must be at least wait_minutes ({})",
            config.retry_wait_minutes,
            config.wait_minutes
        ));
    }
    validate_relative_dir(&config.manifest_dir, "manifest_dir")?;
    validate_relative_dir(&config.source_dir, "source_dir")?;
    validate_relative_dir(&config.reports_dir, "reports_dir")?;
    Ok(())
}

/// Split the configured tool command into an argv vector.
pub fn tool_argv(tool: &str) -> Result<Vec<String>> {
    let argv = shell_words::split(tool).context("parse tool command")?;
    if argv.is_empty() {
        return Err(anyhow!("tool command must be non-empty"));
    }
    Ok(argv)
}

fn validate_relative_dir(rel: &str, label: &str) -> Result<()> {
    if rel.trim().is_empty() {
        return Err(anyhow!("{label} must be non-empty"));
    }
    let path = Path::new(rel);
    if path.is_absolute() || has_parent_components(path) {
        return Err(anyhow!(
            "{label} must be a relative path without '..' (got {rel:?})"
        ));
    }
    Ok(())
}

fn has_parent_components(path: &Path) -> bool {
    path.components()
        .any(|component| matches!(component, Component::ParentDir))
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
