//! External retrieval CLI invocation.
//!
//! The collaborator is opaque: argv in, exit status out. Captured output goes
//! to an attempt-scoped log file so diagnostics survive retries.
use anyhow::{anyhow, Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

/// One captured attempt against the retrieval CLI.
#[derive(Debug)]
pub struct Attempt {
    pub succeeded: bool,
    pub exit_code: Option<i32>,
    pub log_path: PathBuf,
}

/// Invoke `<tool> project retrieve start` for one manifest/target pair.
///
/// A spawn failure (tool not installed) is reported as a failed attempt, not
/// an error; only log-file I/O failures propagate.
pub fn retrieve(
    tool_argv: &[String],
    manifest: &Path,
    target_dir: &Path,
    wait_minutes: u32,
    log_path: &Path,
) -> Result<Attempt> {
    let (program, prefix_args) = tool_argv
        .split_first()
        .ok_or_else(|| anyhow!("tool command must be non-empty"))?;

    let mut cmd = Command::new(program);
    cmd.args(prefix_args);
    cmd.args(["project", "retrieve", "start", "--manifest"]);
    cmd.arg(manifest);
    cmd.arg("--target-metadata-dir");
    cmd.arg(target_dir);
    cmd.args(["--wait", &wait_minutes.to_string()]);

    match cmd.output() {
        Ok(output) => {
            let mut captured = output.stdout;
            captured.extend_from_slice(&output.stderr);
            fs::write(log_path, captured)
                .with_context(|| format!("write attempt log {}", log_path.display()))?;
            Ok(Attempt {
                succeeded: output.status.success(),
                exit_code: output.status.code(),
                log_path: log_path.to_path_buf(),
            })
        }
        Err(err) => {
            let message = format!("failed to spawn {}: {err}\n", command_line(tool_argv));
            fs::write(log_path, message)
                .with_context(|| format!("write attempt log {}", log_path.display()))?;
            Ok(Attempt {
                succeeded: false,
                exit_code: None,
                log_path: log_path.to_path_buf(),
            })
        }
    }
}

/// Operator-facing rendering of the tool argv.
pub fn command_line(argv: &[String]) -> String {
    argv.iter()
        .map(|arg| shell_quote(arg))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Read the tail of an attempt log for console diagnostics.
pub fn log_tail(log_path: &Path, max_lines: usize) -> String {
    let Ok(content) = fs::read_to_string(log_path) else {
        return String::new();
    };
    let lines: Vec<&str> = content.lines().collect();
    let start = lines.len().saturating_sub(max_lines);
    lines[start..].join("\n")
}

fn shell_quote(arg: &str) -> String {
    if arg.is_empty() {
        return "''".to_string();
    }
    let safe = arg.chars().all(|ch| {
        matches!(
            ch,
            'a'..='z' | 'A'..='Z' | '0'..='9' | '_' | '-' | '.' | '/' | ':' | '@' | '+' | '='
        )
    });
    if safe {
        return arg.to_string();
    }
    let escaped = arg.replace('\'', "'\"'\"'");
    format!("'{escaped}'")
}

#[cfg(test)]
#[path = "retrieve_tests.rs"]
mod tests;
