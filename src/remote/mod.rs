//! Remote command execution -- the management host and per-node SSH.
//!
//! Everything downstream of node resolution talks to a host through the
//! [`Executor`] trait, so tests can substitute a scripted fake for the whole
//! SSH/subprocess layer.

pub mod local;
pub mod ssh;

pub use local::LocalExec;
pub use ssh::SshExec;

use anyhow::Result;
use async_trait::async_trait;

/// Captured output of one command run on some host.
#[derive(Debug, Clone)]
pub struct CmdOutput {
    pub stdout: String,
    pub stderr: String,
    /// Exit code; -1 when the process was killed by a signal.
    pub status: i32,
}

impl CmdOutput {
    pub fn success(&self) -> bool {
        self.status == 0
    }

    /// First line of stdout, trimmed; `None` when there is none.
    pub fn first_line(&self) -> Option<String> {
        let line = self.stdout.lines().next()?.trim();
        if line.is_empty() {
            None
        } else {
            Some(line.to_string())
        }
    }
}

/// One host we can run commands on.
///
/// `run` captures output; `stream` inherits stdio so interactive-ish commands
/// (operation A's container exec) write straight to the console. Neither
/// configures a timeout: a hung remote command hangs the operation.
#[async_trait]
pub trait Executor: Send + Sync {
    /// Run `argv`, capturing stdout/stderr and the exit status.
    async fn run(&self, argv: &[String]) -> Result<CmdOutput>;

    /// Run `argv` with inherited stdio; returns the exit code if there is one.
    async fn stream(&self, argv: &[String]) -> Result<Option<i32>>;

    /// Human-readable target for log lines.
    fn target(&self) -> String;
}
