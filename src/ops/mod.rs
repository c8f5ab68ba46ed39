//! The two operations: container exec and iperf3 bandwidth testing.
//!
//! Both follow the same spine: resolve the service's node through the
//! management connection, look the node up in the host directory, dial it
//! over SSH, locate the backing container, then act. The three expected
//! negative outcomes are typed so callers can tell them apart without
//! scraping console text.

pub mod exec;
pub mod iperf;

use std::sync::Arc;

use thiserror::Error;

use crate::config::{Endpoint, HostDirectory};
use crate::remote::{Executor, LocalExec, SshExec};
use crate::swarm;

/// Outcome of one operation. The first three kinds are expected negative
/// results, not faults; `Transport` carries everything else unchanged.
#[derive(Debug, Error)]
pub enum OpError {
    #[error("no running task found for service '{service}'")]
    NoRunningTask { service: String },

    #[error("no SSH configuration found for node '{node}'")]
    UnknownNode { node: String },

    #[error("no running container found for service '{service}' on node '{node}'")]
    NoContainer { service: String, node: String },

    #[error(transparent)]
    Transport(#[from] anyhow::Error),
}

impl OpError {
    /// True for the three named conditions the CLI reports and swallows.
    pub fn is_expected(&self) -> bool {
        !matches!(self, OpError::Transport(_))
    }
}

/// Produces executors: the default/management connection and one per dialed
/// SSH endpoint. A fresh executor is requested per resolved node per
/// operation; nothing is pooled or reused.
pub trait Dialer: Send + Sync {
    /// The management connection the orchestrator queries go through.
    fn local(&self) -> Arc<dyn Executor>;

    /// Open a connection to one cluster node.
    fn dial(&self, endpoint: &Endpoint) -> Arc<dyn Executor>;
}

/// Production dialer: local subprocesses plus per-node `ssh`.
pub struct SshDialer;

impl Dialer for SshDialer {
    fn local(&self) -> Arc<dyn Executor> {
        Arc::new(LocalExec)
    }

    fn dial(&self, endpoint: &Endpoint) -> Arc<dyn Executor> {
        Arc::new(SshExec::new(endpoint))
    }
}

/// A service pinned to its node, container, and node executor.
pub struct Located {
    pub node: String,
    pub container: String,
    pub exec: Arc<dyn Executor>,
}

/// Resolve a service to a node, dial the node, and locate the container.
///
/// This is the shared prefix of both operations; every step is an abort
/// point mapping to one of the named [`OpError`] kinds.
pub async fn locate(
    dialer: &dyn Dialer,
    directory: &HostDirectory,
    service: &str,
) -> Result<Located, OpError> {
    println!("Finding the node where service '{service}' is running...");
    let node = swarm::resolve_node(dialer.local().as_ref(), service)
        .await?
        .ok_or_else(|| OpError::NoRunningTask {
            service: service.to_string(),
        })?;
    println!("Service '{service}' is running on node: {node}");

    let endpoint = directory
        .lookup(&node)
        .ok_or_else(|| OpError::UnknownNode { node: node.clone() })?;
    let exec = dialer.dial(endpoint);

    println!("Finding the container for service '{service}' on node '{node}'...");
    let container = swarm::find_container(exec.as_ref(), service)
        .await?
        .ok_or_else(|| OpError::NoContainer {
            service: service.to_string(),
            node: node.clone(),
        })?;
    println!("Found container '{container}' for service '{service}' on node '{node}'.");

    Ok(Located {
        node,
        container,
        exec,
    })
}
