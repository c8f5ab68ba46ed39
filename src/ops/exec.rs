//! Operation A: run an arbitrary command inside a service's container.

use crate::config::HostDirectory;
use crate::ops::{locate, Dialer, OpError};

/// Execute `command` inside the container backing `service`, streaming
/// output to the console.
///
/// The command vector is passed through unmodified; the remote command's
/// exit status is not inspected.
pub async fn exec_service(
    dialer: &dyn Dialer,
    directory: &HostDirectory,
    service: &str,
    command: &[String],
) -> Result<(), OpError> {
    let found = locate(dialer, directory, service).await?;

    println!(
        "Executing command in container '{}' on node '{}'...",
        found.container, found.node
    );
    let mut argv: Vec<String> = vec![
        "docker".to_string(),
        "exec".to_string(),
        found.container.clone(),
    ];
    argv.extend(command.iter().cloned());
    found
        .exec
        .stream(&argv)
        .await
        .map_err(OpError::Transport)?;
    Ok(())
}
