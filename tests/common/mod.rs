//! Shared fixture harness for integration tests.
//!
//! Materializes a temp project (manifests plus a stub retrieval tool) and
//! runs the built binary against it.

use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

pub const PHASE_COUNT: usize = 6;

const MANIFEST_IDS: [&str; PHASE_COUNT] = [
    "01-foundation",
    "02-automation",
    "03-ui",
    "04-integration",
    "05-communication",
    "06-testing",
];

/// A throwaway project directory the binary runs against.
pub struct TestProject {
    dir: TempDir,
}

impl TestProject {
    /// Create a project with all six manifests present.
    pub fn new() -> Self {
        let dir = TempDir::new().expect("create temp project");
        let manifest_dir = dir.path().join("manifest");
        fs::create_dir_all(&manifest_dir).expect("create manifest dir");
        for id in MANIFEST_IDS {
            fs::write(
                manifest_dir.join(format!("{id}.package.xml")),
                "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<Package/>\n",
            )
            .expect("write manifest");
        }
        Self { dir }
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    pub fn remove_manifest(&self, id: &str) {
        fs::remove_file(
            self.root()
                .join("manifest")
                .join(format!("{id}.package.xml")),
        )
        .expect("remove manifest");
    }

    /// Install a stub retrieval tool.
    ///
    /// The stub appends each invocation's argv to `calls.log`, exits non-zero
    /// for the first `failures_before_success` calls per target directory,
    /// and on success drops two object files into the target.
    pub fn install_stub_tool(&self, failures_before_success: u32) -> PathBuf {
        let script_path = self.root().join("stub-sf.sh");
        let state_dir = self.root().join("stub-state");
        fs::create_dir_all(&state_dir).expect("create stub state dir");
        let script = format!(
            r#"#!/bin/sh
echo "$@" >> "{calls}"
target=""
prev=""
for arg in "$@"; do
  if [ "$prev" = "--target-metadata-dir" ]; then target="$arg"; fi
  prev="$arg"
done
key=$(echo "$target" | tr '/' '_')
count_file="{state}/$key"
count=0
[ -f "$count_file" ] && count=$(cat "$count_file")
count=$((count + 1))
echo "$count" > "$count_file"
if [ "$count" -le {failures} ]; then
  echo "stub: simulated retrieval failure" >&2
  exit 1
fi
mkdir -p "$target/objects"
printf x > "$target/objects/Account.object"
printf x > "$target/objects/Contact.object"
exit 0
"#,
            calls = self.calls_log().display(),
            state = state_dir.display(),
            failures = failures_before_success,
        );
        fs::write(&script_path, script).expect("write stub tool");
        let mut perms = fs::metadata(&script_path)
            .expect("stat stub tool")
            .permissions();
        perms.set_mode(0o755);
        fs::set_permissions(&script_path, perms).expect("chmod stub tool");
        script_path
    }

    pub fn calls_log(&self) -> PathBuf {
        self.root().join("calls.log")
    }

    /// Total retrieval invocations recorded by the stub.
    pub fn call_count(&self) -> usize {
        fs::read_to_string(self.calls_log())
            .map(|content| content.lines().count())
            .unwrap_or(0)
    }

    /// Retrieval invocations whose argv mentions the given target leaf.
    pub fn calls_for_target(&self, target_leaf: &str) -> usize {
        fs::read_to_string(self.calls_log())
            .map(|content| {
                content
                    .lines()
                    .filter(|line| line.contains(target_leaf))
                    .count()
            })
            .unwrap_or(0)
    }

    pub fn summary_path(&self, ordinal: u8) -> PathBuf {
        self.root()
            .join("reports")
            .join(format!("phase-{ordinal}-summary.md"))
    }

    pub fn summary(&self, ordinal: u8) -> String {
        fs::read_to_string(self.summary_path(ordinal)).expect("read summary")
    }

    pub fn error_log(&self) -> String {
        fs::read_to_string(self.root().join("reports/errors.log")).unwrap_or_default()
    }

    /// Run `sfpull run` against this project with the given stub tool.
    pub fn run(&self, tool: &Path) -> Output {
        Command::new(env!("CARGO_BIN_EXE_sfpull"))
            .args(["run", "--project-dir"])
            .arg(self.root())
            .arg("--tool")
            .arg(tool)
            .output()
            .expect("run sfpull")
    }

    /// Run `sfpull summarize` for one phase.
    pub fn summarize(&self, ordinal: u8) -> Output {
        Command::new(env!("CARGO_BIN_EXE_sfpull"))
            .args(["summarize", "--phase", &ordinal.to_string(), "--project-dir"])
            .arg(self.root())
            .output()
            .expect("run sfpull summarize")
    }
}
