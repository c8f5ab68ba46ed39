//! SSH executor -- one `ssh` process per command, no pooling.

use anyhow::{Context, Result};
use async_trait::async_trait;

use super::{CmdOutput, Executor};
use crate::config::Endpoint;

/// Runs commands on one cluster node by spawning `ssh -p <port> <host>`.
///
/// Credentials are whatever the local ssh identity resolution produces; no
/// negotiation happens here. Each call is an independent ssh invocation, so
/// there is nothing to close and nothing shared between operations.
pub struct SshExec {
    host: String,
    port: u16,
}

impl SshExec {
    pub fn new(endpoint: &Endpoint) -> Self {
        Self {
            host: endpoint.host.clone(),
            port: endpoint.port,
        }
    }

    /// Compose the local argv: `ssh -p <port> <host> -- <quoted remote command>`.
    ///
    /// sshd re-joins the remote command through a shell on the far side, so
    /// each remote argv element is shell-quoted before joining.
    fn ssh_argv(&self, argv: &[String]) -> Vec<String> {
        let remote = argv
            .iter()
            .map(|a| shell_quote(a))
            .collect::<Vec<_>>()
            .join(" ");
        vec![
            "ssh".to_string(),
            "-p".to_string(),
            self.port.to_string(),
            self.host.clone(),
            "--".to_string(),
            remote,
        ]
    }
}

#[async_trait]
impl Executor for SshExec {
    async fn run(&self, argv: &[String]) -> Result<CmdOutput> {
        let local = self.ssh_argv(argv);
        tracing::debug!(host = %self.target(), remote = %local[5], "running over ssh");
        let out = tokio::process::Command::new(&local[0])
            .args(&local[1..])
            .output()
            .await
            .context("failed to launch 'ssh'")?;
        Ok(CmdOutput {
            stdout: String::from_utf8_lossy(&out.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&out.stderr).into_owned(),
            status: out.status.code().unwrap_or(-1),
        })
    }

    async fn stream(&self, argv: &[String]) -> Result<Option<i32>> {
        let local = self.ssh_argv(argv);
        let status = tokio::process::Command::new(&local[0])
            .args(&local[1..])
            .status()
            .await
            .context("failed to launch 'ssh'")?;
        Ok(status.code())
    }

    fn target(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Quote one argument for a POSIX shell.
///
/// Plain identifier-ish strings pass through untouched; anything else is
/// single-quoted with embedded single quotes escaped as `'\''`.
pub fn shell_quote(arg: &str) -> String {
    let safe = !arg.is_empty()
        && arg
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_' | '/' | ':' | '=' | '@' | '%'));
    if safe {
        arg.to_string()
    } else {
        format!("'{}'", arg.replace('\'', r"'\''"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ssh_argv_uses_endpoint_host_and_port() {
        let exec = SshExec::new(&Endpoint {
            host: "root@bsp-server-1".to_string(),
            port: 2200,
        });
        let argv = exec.ssh_argv(&[
            "docker".to_string(),
            "ps".to_string(),
            "--filter".to_string(),
            "name=mec-upf".to_string(),
            "--format".to_string(),
            "{{.ID}}".to_string(),
        ]);
        assert_eq!(
            argv,
            vec![
                "ssh",
                "-p",
                "2200",
                "root@bsp-server-1",
                "--",
                "docker ps --filter name=mec-upf --format '{{.ID}}'",
            ]
        );
    }

    #[test]
    fn quote_passes_plain_args_through() {
        assert_eq!(shell_quote("iperf3"), "iperf3");
        assert_eq!(shell_quote("10.0.9.5"), "10.0.9.5");
        assert_eq!(shell_quote("desired-state=running"), "desired-state=running");
    }

    #[test]
    fn quote_wraps_shell_metacharacters() {
        assert_eq!(shell_quote("{{.Node}}"), "'{{.Node}}'");
        assert_eq!(shell_quote("a b"), "'a b'");
        assert_eq!(shell_quote("echo $HOME"), "'echo $HOME'");
        assert_eq!(shell_quote("it's"), r"'it'\''s'");
        assert_eq!(shell_quote(""), "''");
    }
}
