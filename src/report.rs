//! Markdown rendering for per-phase summaries.
//!
//! Reports are rendered in full on each invocation; the writer overwrites any
//! previous report for the phase.
use crate::phase::Phase;
use crate::summary::{DirStats, ExtraStats, TREE_DEPTH};

/// Render the full summary for a successful retrieval.
pub fn render_summary(
    phase: &Phase,
    manifest_rel: &str,
    target_rel: &str,
    generated_at: &str,
    stats: &DirStats,
    extra: Option<&ExtraStats>,
) -> String {
    let mut out = String::new();
    push_line(&mut out, &header_line(phase));
    push_line(&mut out, "");
    push_line(&mut out, &format!("Generated: {generated_at}"));
    push_line(&mut out, "");
    push_line(&mut out, "## Overview");
    push_line(&mut out, "");
    push_line(&mut out, &format!("- Manifest: `{manifest_rel}`"));
    push_line(&mut out, &format!("- Target directory: `{target_rel}`"));
    push_line(
        &mut out,
        &format!("- Total metadata files: {}", stats.total_files),
    );
    push_line(&mut out, "");
    render_by_type(&mut out, &stats.by_subdir);
    render_tree_section(&mut out, &stats.tree);
    if let Some(extra) = extra {
        render_extra_section(&mut out, extra);
    }
    out
}

/// Render the stub written when a phase fails terminally.
pub fn render_failure_stub(
    phase: &Phase,
    generated_at: &str,
    reason: &str,
    error_log_rel: &str,
    logs_dir_rel: &str,
) -> String {
    let mut out = String::new();
    push_line(&mut out, &header_line(phase));
    push_line(&mut out, "");
    push_line(&mut out, &format!("Generated: {generated_at}"));
    push_line(&mut out, "");
    push_line(&mut out, &format!("**{reason}**"));
    push_line(&mut out, "");
    push_line(
        &mut out,
        &format!("See `{error_log_rel}` and the attempt logs under `{logs_dir_rel}`."),
    );
    out
}

/// Render the warning document for a missing target directory.
pub fn render_missing_dir(phase: &Phase, target_rel: &str) -> String {
    let mut out = String::new();
    push_line(&mut out, &header_line(phase));
    push_line(&mut out, "");
    push_line(
        &mut out,
        &format!("Warning: target directory `{target_rel}` was not found."),
    );
    out
}

fn header_line(phase: &Phase) -> String {
    format!(
        "# Phase {}: {} - Retrieval Summary",
        phase.ordinal, phase.name
    )
}

fn render_by_type(out: &mut String, by_subdir: &[(String, usize)]) {
    push_line(out, "## By Type");
    push_line(out, "");
    if by_subdir.is_empty() {
        push_line(out, "No metadata subdirectories were retrieved.");
    } else {
        for (name, count) in by_subdir {
            push_line(out, &format!("- {name}: {count} files"));
        }
    }
    push_line(out, "");
}

fn render_tree_section(out: &mut String, tree: &str) {
    push_line(out, &format!("## Directory Tree (depth {TREE_DEPTH})"));
    push_line(out, "");
    push_line(out, "```text");
    push_line(out, tree);
    push_line(out, "```");
    push_line(out, "");
}

fn render_extra_section(out: &mut String, extra: &ExtraStats) {
    match extra {
        ExtraStats::KeyObjects(names) => {
            push_line(out, "## Key Objects");
            push_line(out, "");
            if names.is_empty() {
                push_line(out, "No objects were retrieved.");
            } else {
                for name in names {
                    push_line(out, &format!("- {name}"));
                }
            }
        }
        ExtraStats::Automation {
            classes,
            triggers,
            flows,
        } => {
            push_line(out, "## Automation Counts");
            push_line(out, "");
            push_line(out, &format!("- Apex classes: {classes}"));
            push_line(out, &format!("- Apex triggers: {triggers}"));
            push_line(out, &format!("- Flows: {flows}"));
        }
        ExtraStats::Ui {
            lwc_components,
            aura_components,
            pages,
        } => {
            push_line(out, "## UI Components");
            push_line(out, "");
            push_line(out, &format!("- LWC components: {lwc_components}"));
            push_line(out, &format!("- Aura components: {aura_components}"));
            push_line(out, &format!("- Visualforce pages: {pages}"));
        }
        ExtraStats::Integration {
            named_credentials,
            remote_sites,
        } => {
            push_line(out, "## Integration Endpoints");
            push_line(out, "");
            render_name_list(out, "Named credentials", named_credentials);
            render_name_list(out, "Remote site settings", remote_sites);
        }
    }
    push_line(out, "");
}

fn render_name_list(out: &mut String, label: &str, names: &[String]) {
    if names.is_empty() {
        push_line(out, &format!("- {label}: none"));
        return;
    }
    push_line(out, &format!("- {label}:"));
    for name in names {
        push_line(out, &format!("  - {name}"));
    }
}

fn push_line(out: &mut String, line: &str) {
    out.push_str(line);
    out.push('\n');
}

#[cfg(test)]
#[path = "report_tests.rs"]
mod tests;
