//! End-to-end tests for the six-phase retrieval run.
//!
//! A stub retrieval tool stands in for the real CLI so the retry policy,
//! report layout, and exit semantics can be observed from the outside.

mod common;

use common::{TestProject, PHASE_COUNT};

#[test]
fn clean_run_writes_one_summary_per_phase() {
    let project = TestProject::new();
    let tool = project.install_stub_tool(0);
    let output = project.run(&tool);
    assert!(
        output.status.success(),
        "sfpull run failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    assert_eq!(project.call_count(), PHASE_COUNT);
    for ordinal in 1..=6u8 {
        let summary = project.summary(ordinal);
        assert!(
            summary.contains("Total metadata files: 2"),
            "phase {ordinal} summary:\n{summary}"
        );
    }
    assert!(project.error_log().is_empty());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("phases succeeded: 6"));
    assert!(stdout.contains("phases failed: 0"));
}

#[test]
fn first_failure_retries_once_and_succeeds() {
    let project = TestProject::new();
    let tool = project.install_stub_tool(1);
    let output = project.run(&tool);
    assert!(output.status.success());

    // One retry per phase, no third attempt anywhere.
    assert_eq!(project.call_count(), PHASE_COUNT * 2);
    assert_eq!(project.calls_for_target("1-foundation"), 2);
    assert!(project.error_log().is_empty());
    assert!(project.summary(1).contains("Total metadata files: 2"));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("phases succeeded: 6"));
}

#[test]
fn terminal_failure_writes_stub_and_error_log() {
    let project = TestProject::new();
    let tool = project.install_stub_tool(2);
    let output = project.run(&tool);
    // Exit status stays 0 even when phases fail.
    assert!(output.status.success());

    assert_eq!(project.call_count(), PHASE_COUNT * 2);
    for ordinal in 1..=6u8 {
        let summary = project.summary(ordinal);
        assert!(summary.contains("Retrieval failed after 2 attempts."));
        assert!(!summary.contains("Total metadata files"));
    }
    let error_log = project.error_log();
    assert_eq!(error_log.lines().count(), PHASE_COUNT);
    assert!(error_log.contains("Phase 1: Foundation failed"));
    // Attempt-scoped logs survive for every attempt of every phase.
    for ordinal in 1..=6u8 {
        for attempt in 1..=2u32 {
            assert!(project
                .root()
                .join("reports/logs")
                .join(format!("phase-{ordinal}-attempt-{attempt}.log"))
                .is_file());
        }
    }
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("phases failed: 6"));
}

#[test]
fn missing_manifest_fails_phase_without_retrieval_calls() {
    let project = TestProject::new();
    project.remove_manifest("03-ui");
    let tool = project.install_stub_tool(0);
    let output = project.run(&tool);
    assert!(output.status.success());

    assert_eq!(project.call_count(), PHASE_COUNT - 1);
    assert!(project.summary(3).contains("was not found"));
    assert!(project.error_log().contains("Phase 3: User Interface failed"));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("phases succeeded: 5"));
    assert!(stdout.contains("phases failed: 1"));
}

#[test]
fn summarize_regenerates_from_disk_without_tool() {
    let project = TestProject::new();
    let tool = project.install_stub_tool(0);
    assert!(project.run(&tool).status.success());
    let calls_after_run = project.call_count();

    // Add a file after the run, then regenerate only phase 1.
    std::fs::write(
        project
            .root()
            .join("force-app/1-foundation/objects/Lead.object"),
        b"x",
    )
    .unwrap();
    let output = project.summarize(1);
    assert!(output.status.success());
    assert_eq!(project.call_count(), calls_after_run);

    let summary = project.summary(1);
    assert!(summary.contains("Total metadata files: 3"));
    assert!(summary.contains("## Key Objects"));
    assert!(summary.contains("- Account"));
    assert!(summary.contains("- Lead"));
}

#[test]
fn summarize_missing_target_writes_warning() {
    let project = TestProject::new();
    let output = project.summarize(5);
    assert!(output.status.success());
    let summary = project.summary(5);
    assert!(summary.contains("was not found"));
    assert!(!summary.contains("## By Type"));
}
