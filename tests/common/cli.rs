//! Test harness for running the `im` binary in an isolated directory.

use std::ffi::OsStr;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitStatus;

use assert_cmd::Command;
use tempfile::TempDir;

/// A temporary working directory holding one issue file.
pub struct ImWorkspace {
    dir: TempDir,
}

impl ImWorkspace {
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().expect("create temp dir"),
        }
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    /// The issue file used when no `--file` is given.
    pub fn data_file(&self) -> PathBuf {
        self.root().join("issues.txt")
    }

    pub fn read_data_file(&self) -> String {
        fs::read_to_string(self.data_file()).expect("read issue file")
    }

    pub fn write(&self, name: &str, content: &str) -> PathBuf {
        let path = self.root().join(name);
        fs::write(&path, content).expect("write workspace file");
        path
    }
}

/// Captured output of one `im` invocation.
pub struct ImOutput {
    pub status: ExitStatus,
    pub stdout: String,
    pub stderr: String,
}

impl ImOutput {
    pub fn json(&self) -> serde_json::Value {
        serde_json::from_str(&self.stdout)
            .unwrap_or_else(|e| panic!("invalid JSON ({e}): {}", self.stdout))
    }
}

/// Build an `im` command rooted in the workspace with a clean environment.
pub fn im_cmd(workspace: &ImWorkspace) -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("im"));
    cmd.current_dir(workspace.root());
    cmd.env_remove("IM_FILE");
    cmd.env_remove("IM_LOG_FORMAT");
    cmd.env("IM_LOG", "error");
    cmd
}

/// Run `im` with `args`, labelling failures with `label`.
pub fn run_im<I, S>(workspace: &ImWorkspace, args: I, label: &str) -> ImOutput
where
    I: IntoIterator<Item = S>,
    S: AsRef<OsStr>,
{
    let output = im_cmd(workspace)
        .args(args)
        .output()
        .unwrap_or_else(|e| panic!("{label}: failed to run im: {e}"));
    ImOutput {
        status: output.status,
        stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
        stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
    }
}

/// Run `im` and assert it succeeded.
pub fn run_im_ok<I, S>(workspace: &ImWorkspace, args: I, label: &str) -> ImOutput
where
    I: IntoIterator<Item = S>,
    S: AsRef<OsStr>,
{
    let out = run_im(workspace, args, label);
    assert!(
        out.status.success(),
        "{label} failed:\nstdout: {}\nstderr: {}",
        out.stdout,
        out.stderr
    );
    out
}
