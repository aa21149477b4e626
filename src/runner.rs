//! Phase orchestration: retry-once policy, error log, and the run tally.
//!
//! Phase-level retrieval failures are caught and recorded; infrastructure
//! I/O failures (directory creation, report and log writes) propagate and
//! abort the run.
use crate::cli::{RunArgs, SummarizeArgs};
use crate::config::{self, RunConfig};
use crate::paths::ProjectPaths;
use crate::phase::{Outcome, Phase, PHASES};
use crate::report;
use crate::retrieve;
use crate::summary;
use anyhow::{anyhow, Context, Result};
use chrono::Local;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::Path;
use std::time::{Duration, Instant};

const LOG_TAIL_LINES: usize = 20;

/// Accumulated counters for one full run.
#[derive(Debug, Default)]
pub struct RunReport {
    pub succeeded: usize,
    pub failed: usize,
    pub elapsed: Duration,
}

/// Run all six phases sequentially and print the final tally.
///
/// The process exits 0 even when phases fail; failures are visible in the
/// console tally, the stub summaries, and the error log.
pub fn run_all(args: &RunArgs) -> Result<()> {
    let mut config = config::load_config(&args.project_dir, args.config.as_deref())?;
    if let Some(tool) = &args.tool {
        config.tool = tool.clone();
    }
    config::validate_config(&config)?;
    let paths = ProjectPaths::new(&args.project_dir, &config);

    fs::create_dir_all(paths.reports_dir()).context("create reports dir")?;
    fs::create_dir_all(paths.attempt_logs_dir()).context("create attempt logs dir")?;

    let started = Instant::now();
    let mut run_report = RunReport::default();
    for phase in &PHASES {
        if run_phase(&config, &paths, phase, args.verbose)?.is_success() {
            run_report.succeeded += 1;
        } else {
            run_report.failed += 1;
        }
    }
    run_report.elapsed = started.elapsed();

    print_final_summary(&run_report, &paths);
    Ok(())
}

/// Regenerate one phase summary from whatever is on disk.
pub fn run_summarize(args: &SummarizeArgs) -> Result<()> {
    let config = config::load_config(&args.project_dir, args.config.as_deref())?;
    let phase = Phase::by_ordinal(args.phase)
        .ok_or_else(|| anyhow!("no phase with ordinal {} (valid: 1-6)", args.phase))?;
    let paths = ProjectPaths::new(&args.project_dir, &config);
    fs::create_dir_all(paths.reports_dir()).context("create reports dir")?;

    let target = paths.target_dir(phase);
    generate_summary(&paths, phase, &target)?;
    println!("Wrote {}", paths.summary_path(phase).display());
    Ok(())
}

/// Run one phase: first attempt, retry once with the longer wait, then
/// summarize or record the terminal failure.
pub fn run_phase(
    config: &RunConfig,
    paths: &ProjectPaths,
    phase: &Phase,
    verbose: bool,
) -> Result<Outcome> {
    let manifest = paths.manifest_path(phase);
    let target = paths.target_dir(phase);

    // A missing manifest is deterministic; retrying cannot help.
    if !manifest.is_file() {
        tracing::error!(
            "phase {} ({}): manifest {} not found",
            phase.ordinal,
            phase.name,
            manifest.display()
        );
        let reason = format!("Manifest `{}` was not found.", paths.display_rel(&manifest));
        record_failure(paths, phase, &reason)?;
        return Ok(Outcome::Failed);
    }

    let tool_argv = config::tool_argv(&config.tool)?;
    tracing::info!(
        "phase {} ({}): retrieving with {}",
        phase.ordinal,
        phase.name,
        retrieve::command_line(&tool_argv)
    );

    let first = retrieve::retrieve(
        &tool_argv,
        &manifest,
        &target,
        config.wait_minutes,
        &paths.attempt_log_path(phase, 1),
    )?;
    if first.succeeded {
        generate_summary(paths, phase, &target)?;
        tracing::info!("phase {} ({}): retrieved", phase.ordinal, phase.name);
        return Ok(Outcome::Success);
    }

    tracing::warn!(
        "phase {} ({}): attempt 1 failed (exit {}), retrying with --wait {}",
        phase.ordinal,
        phase.name,
        exit_label(first.exit_code),
        config.retry_wait_minutes
    );
    if verbose {
        echo_log_tail(&first.log_path);
    }

    let second = retrieve::retrieve(
        &tool_argv,
        &manifest,
        &target,
        config.retry_wait_minutes,
        &paths.attempt_log_path(phase, 2),
    )?;
    if second.succeeded {
        generate_summary(paths, phase, &target)?;
        tracing::info!("phase {} ({}): retrieved on retry", phase.ordinal, phase.name);
        return Ok(Outcome::SuccessOnRetry);
    }

    tracing::error!(
        "phase {} ({}): both attempts failed (exit {})",
        phase.ordinal,
        phase.name,
        exit_label(second.exit_code)
    );
    if verbose {
        echo_log_tail(&second.log_path);
    }
    record_failure(paths, phase, "Retrieval failed after 2 attempts.")?;
    Ok(Outcome::Failed)
}

/// Generate the summary document for a phase from its target directory.
pub fn generate_summary(paths: &ProjectPaths, phase: &Phase, target: &Path) -> Result<()> {
    let document = match summary::scan_target(target)? {
        None => report::render_missing_dir(phase, &paths.display_rel(target)),
        Some(stats) => {
            let extra = summary::collect_extra(phase.extra(), target)?;
            report::render_summary(
                phase,
                &paths.display_rel(&paths.manifest_path(phase)),
                &paths.display_rel(target),
                &timestamp(),
                &stats,
                extra.as_ref(),
            )
        }
    };
    write_summary_file(paths, phase, &document)
}

fn record_failure(paths: &ProjectPaths, phase: &Phase, reason: &str) -> Result<()> {
    append_error_log(paths, phase)?;
    let stub = report::render_failure_stub(
        phase,
        &timestamp(),
        reason,
        &paths.display_rel(&paths.error_log_path()),
        &paths.display_rel(&paths.attempt_logs_dir()),
    );
    write_summary_file(paths, phase, &stub)
}

fn append_error_log(paths: &ProjectPaths, phase: &Phase) -> Result<()> {
    let path = paths.error_log_path();
    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("open error log {}", path.display()))?;
    writeln!(
        file,
        "[{}] Phase {}: {} failed",
        timestamp(),
        phase.ordinal,
        phase.name
    )
    .with_context(|| format!("append error log {}", path.display()))?;
    Ok(())
}

fn write_summary_file(paths: &ProjectPaths, phase: &Phase, document: &str) -> Result<()> {
    let path = paths.summary_path(phase);
    fs::write(&path, document).with_context(|| format!("write summary {}", path.display()))?;
    tracing::debug!("wrote {}", path.display());
    Ok(())
}

fn print_final_summary(run_report: &RunReport, paths: &ProjectPaths) {
    println!();
    println!(
        "Retrieval run complete in {}",
        format_duration(run_report.elapsed)
    );
    println!("  phases succeeded: {}", run_report.succeeded);
    println!("  phases failed: {}", run_report.failed);
    println!("Reports written to {}", paths.reports_dir().display());
}

fn format_duration(elapsed: Duration) -> String {
    let total_secs = elapsed.as_secs();
    if total_secs < 60 {
        format!("{total_secs}s")
    } else {
        let minutes = total_secs / 60;
        let seconds = total_secs % 60;
        format!("{minutes}m {seconds:02}s")
    }
}

fn timestamp() -> String {
    Local::now().format("%Y-%m-%d %H:%M:%S").to_string()
}

fn exit_label(code: Option<i32>) -> String {
    match code {
        Some(code) => code.to_string(),
        None => "none".to_string(),
    }
}

fn echo_log_tail(log_path: &Path) {
    let tail = retrieve::log_tail(log_path, LOG_TAIL_LINES);
    if !tail.is_empty() {
        eprintln!("--- attempt log tail ({}) ---", log_path.display());
        eprintln!("{tail}");
    }
}

#[cfg(test)]
#[path = "runner_tests.rs"]
mod tests;
