//! Filesystem scanning for summary generation.
//!
//! Counts are computed at generation time from whatever the retrieval left on
//! disk. The directory tree is rendered by the external `tree` tool when it
//! is on `PATH`, with a bounded fallback listing otherwise.
use crate::phase::{PhaseExtra, MAX_KEY_OBJECTS};
use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

pub const TREE_DEPTH: usize = 3;
pub const MAX_FALLBACK_DIRS: usize = 30;
const MAX_ENDPOINT_ENTRIES: usize = 50;

/// Directory statistics backing one summary report.
#[derive(Debug)]
pub struct DirStats {
    pub total_files: usize,
    /// Immediate subdirectory name paired with its recursive file count.
    pub by_subdir: Vec<(String, usize)>,
    pub tree: String,
}

/// Phase-specific extra statistics.
#[derive(Debug, PartialEq, Eq)]
pub enum ExtraStats {
    KeyObjects(Vec<String>),
    Automation {
        classes: usize,
        triggers: usize,
        flows: usize,
    },
    Ui {
        lwc_components: usize,
        aura_components: usize,
        pages: usize,
    },
    Integration {
        named_credentials: Vec<String>,
        remote_sites: Vec<String>,
    },
}

/// Scan a target directory; `None` when it does not exist.
pub fn scan_target(dir: &Path) -> Result<Option<DirStats>> {
    if !dir.is_dir() {
        return Ok(None);
    }
    let total_files = count_files_recursive(dir)?;
    let mut by_subdir = Vec::new();
    for entry in read_dir_sorted(dir)? {
        if entry.is_dir() {
            let count = count_files_recursive(&entry)?;
            by_subdir.push((entry_name(&entry), count));
        }
    }
    let tree = render_tree(dir);
    Ok(Some(DirStats {
        total_files,
        by_subdir,
        tree,
    }))
}

/// Collect the extra statistics for a phase, if it has any.
pub fn collect_extra(extra: PhaseExtra, dir: &Path) -> Result<Option<ExtraStats>> {
    let stats = match extra {
        PhaseExtra::KeyObjects => {
            ExtraStats::KeyObjects(top_level_names(&dir.join("objects"), MAX_KEY_OBJECTS)?)
        }
        PhaseExtra::AutomationCounts => ExtraStats::Automation {
            classes: count_files_with_suffixes(dir, &[".cls"])?,
            triggers: count_files_with_suffixes(dir, &[".trigger"])?,
            flows: count_files_with_suffixes(dir, &[".flow", ".flow-meta.xml"])?,
        },
        PhaseExtra::UiComponentCounts => ExtraStats::Ui {
            lwc_components: subdir_count(&dir.join("lwc"))?,
            aura_components: subdir_count(&dir.join("aura"))?,
            pages: count_files_with_suffixes(dir, &[".page"])?,
        },
        PhaseExtra::IntegrationEndpoints => ExtraStats::Integration {
            named_credentials: top_level_names(
                &dir.join("namedCredentials"),
                MAX_ENDPOINT_ENTRIES,
            )?,
            remote_sites: top_level_names(&dir.join("remoteSiteSettings"), MAX_ENDPOINT_ENTRIES)?,
        },
        PhaseExtra::None => return Ok(None),
    };
    Ok(Some(stats))
}

/// Count regular files under a directory, recursively.
pub fn count_files_recursive(dir: &Path) -> Result<usize> {
    let mut count = 0;
    for entry in read_dir_sorted(dir)? {
        if entry.is_dir() {
            count += count_files_recursive(&entry)?;
        } else if entry.is_file() {
            count += 1;
        }
    }
    Ok(count)
}

/// Count files whose name ends with any of the given suffixes, recursively.
pub fn count_files_with_suffixes(dir: &Path, suffixes: &[&str]) -> Result<usize> {
    if !dir.is_dir() {
        return Ok(0);
    }
    let mut count = 0;
    for entry in read_dir_sorted(dir)? {
        if entry.is_dir() {
            count += count_files_with_suffixes(&entry, suffixes)?;
        } else if entry.is_file() {
            let name = entry_name(&entry);
            if suffixes.iter().any(|suffix| name.ends_with(suffix)) {
                count += 1;
            }
        }
    }
    Ok(count)
}

/// Sorted top-level entry names with extensions trimmed, capped.
pub fn top_level_names(dir: &Path, cap: usize) -> Result<Vec<String>> {
    if !dir.is_dir() {
        return Ok(Vec::new());
    }
    let mut names: Vec<String> = read_dir_sorted(dir)?
        .iter()
        .map(|path| entry_stem(path))
        .collect();
    names.dedup();
    names.truncate(cap);
    Ok(names)
}

/// Count immediate subdirectories; zero when the directory is absent.
pub fn subdir_count(dir: &Path) -> Result<usize> {
    if !dir.is_dir() {
        return Ok(0);
    }
    Ok(read_dir_sorted(dir)?
        .iter()
        .filter(|path| path.is_dir())
        .count())
}

/// Render a depth-limited tree via the external `tree` tool, else fall back
/// to a bounded directory listing.
pub fn render_tree(dir: &Path) -> String {
    if let Ok(tree_bin) = which::which("tree") {
        let output = Command::new(tree_bin)
            .arg("-L")
            .arg(TREE_DEPTH.to_string())
            .arg(dir)
            .output();
        if let Ok(output) = output {
            if output.status.success() {
                return String::from_utf8_lossy(&output.stdout).trim_end().to_string();
            }
        }
    }
    fallback_tree(dir)
}

fn fallback_tree(dir: &Path) -> String {
    let mut lines = Vec::new();
    let mut truncated = false;
    collect_dirs(dir, dir, 1, &mut lines, &mut truncated);
    if lines.is_empty() {
        lines.push("(no subdirectories)".to_string());
    }
    if truncated {
        lines.push(format!(
            "... (listing capped at {MAX_FALLBACK_DIRS} directories)"
        ));
    }
    lines.join("\n")
}

// Display-only; unreadable entries drop out of the listing.
fn collect_dirs(
    root: &Path,
    dir: &Path,
    depth: usize,
    lines: &mut Vec<String>,
    truncated: &mut bool,
) {
    if depth > TREE_DEPTH {
        return;
    }
    let Ok(entries) = read_dir_sorted(dir) else {
        return;
    };
    for entry in entries {
        if !entry.is_dir() {
            continue;
        }
        if lines.len() >= MAX_FALLBACK_DIRS {
            *truncated = true;
            return;
        }
        let rel = entry.strip_prefix(root).unwrap_or(&entry).display();
        lines.push(format!("{rel}/"));
        collect_dirs(root, &entry, depth + 1, lines, truncated);
    }
}

fn read_dir_sorted(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut entries = Vec::new();
    for entry in fs::read_dir(dir).with_context(|| format!("read dir {}", dir.display()))? {
        let entry = entry.with_context(|| format!("read dir entry in {}", dir.display()))?;
        entries.push(entry.path());
    }
    entries.sort();
    Ok(entries)
}

fn entry_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().to_string())
        .unwrap_or_default()
}

fn entry_stem(path: &Path) -> String {
    path.file_stem()
        .or_else(|| path.file_name())
        .map(|name| name.to_string_lossy().to_string())
        .unwrap_or_default()
}

#[cfg(test)]
#[path = "summary_tests.rs"]
mod tests;
