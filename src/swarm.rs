//! Docker Swarm / container-engine queries, run through an [`Executor`].
//!
//! Each query is one `docker` invocation with a `--format` template that
//! narrows the output to a single field; only the first line is used.

use anyhow::{bail, Result};
use tracing::debug;

use crate::remote::Executor;

/// Ask the orchestrator which node runs `service`'s task.
///
/// Returns `None` when the service has no running task. Only the first task
/// is considered; replicated services pin the measurement to whichever task
/// the orchestrator lists first.
pub async fn resolve_node(exec: &dyn Executor, service: &str) -> Result<Option<String>> {
    validate_name(service)?;
    let argv: Vec<String> = vec![
        "docker".into(),
        "service".into(),
        "ps".into(),
        service.into(),
        "--filter".into(),
        "desired-state=running".into(),
        "--format".into(),
        "{{.Node}}".into(),
    ];
    let out = exec.run(&argv).await?;
    if !out.success() {
        bail!(
            "docker service ps failed on {}: {}",
            exec.target(),
            out.stderr.trim()
        );
    }
    let node = out.first_line();
    debug!(%service, ?node, "resolved service node");
    Ok(node)
}

/// Find the id of the container backing `service` on the executor's node.
///
/// Returns `None` when no container matches the name filter.
pub async fn find_container(exec: &dyn Executor, service: &str) -> Result<Option<String>> {
    validate_name(service)?;
    let argv: Vec<String> = vec![
        "docker".into(),
        "ps".into(),
        "--filter".into(),
        format!("name={service}"),
        "--format".into(),
        "{{.ID}}".into(),
    ];
    let out = exec.run(&argv).await?;
    if !out.success() {
        bail!(
            "docker ps failed on {}: {}",
            exec.target(),
            out.stderr.trim()
        );
    }
    Ok(out.first_line())
}

/// Read the container's IP address on the named virtual network.
pub async fn container_ip(
    exec: &dyn Executor,
    container: &str,
    network: &str,
) -> Result<String> {
    validate_name(network)?;
    let argv: Vec<String> = vec![
        "docker".into(),
        "inspect".into(),
        "-f".into(),
        format!("{{{{.NetworkSettings.Networks.{network}.IPAddress}}}}"),
        container.into(),
    ];
    let out = exec.run(&argv).await?;
    if !out.success() {
        bail!(
            "docker inspect failed on {}: {}",
            exec.target(),
            out.stderr.trim()
        );
    }
    Ok(out.stdout.trim().to_string())
}

/// Reject names that could not be a service/node/network identifier.
///
/// Everything validated here ends up inside a remote argv; the quoting layer
/// would keep metacharacters inert anyway, but a name that needs quoting is
/// already a sign the caller passed the wrong thing.
pub fn validate_name(name: &str) -> Result<()> {
    if name.is_empty() {
        bail!("name cannot be empty");
    }
    if name.starts_with('-') {
        bail!("name cannot start with a hyphen: '{name}'");
    }
    if name
        .chars()
        .any(|c| !c.is_ascii_alphanumeric() && c != '.' && c != '-' && c != '_')
    {
        bail!("name contains invalid characters: '{name}'");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validate_accepts_service_names() {
        assert!(validate_name("mec-upf").is_ok());
        assert!(validate_name("bsp-server-1").is_ok());
        assert!(validate_name("stack_svc.1").is_ok());
    }

    #[test]
    fn validate_rejects_injection_shapes() {
        assert!(validate_name("").is_err());
        assert!(validate_name("-rf").is_err());
        assert!(validate_name("svc; rm -rf /").is_err());
        assert!(validate_name("svc$(id)").is_err());
    }
}
