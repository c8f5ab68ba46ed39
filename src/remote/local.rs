//! Executor for the invoking host (the default/management connection).

use anyhow::{Context, Result};
use async_trait::async_trait;

use super::{CmdOutput, Executor};

/// Runs argv directly on the machine swarmops was invoked on, which is
/// assumed to reach the Swarm manager.
pub struct LocalExec;

#[async_trait]
impl Executor for LocalExec {
    async fn run(&self, argv: &[String]) -> Result<CmdOutput> {
        let (program, args) = argv.split_first().context("empty command")?;
        tracing::debug!(%program, ?args, "running local command");
        let out = tokio::process::Command::new(program)
            .args(args)
            .output()
            .await
            .with_context(|| format!("failed to launch '{program}'"))?;
        Ok(CmdOutput {
            stdout: String::from_utf8_lossy(&out.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&out.stderr).into_owned(),
            status: out.status.code().unwrap_or(-1),
        })
    }

    async fn stream(&self, argv: &[String]) -> Result<Option<i32>> {
        let (program, args) = argv.split_first().context("empty command")?;
        let status = tokio::process::Command::new(program)
            .args(args)
            .status()
            .await
            .with_context(|| format!("failed to launch '{program}'"))?;
        Ok(status.code())
    }

    fn target(&self) -> String {
        "local".to_string()
    }
}
