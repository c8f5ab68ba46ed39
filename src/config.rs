//! SSH host directory -- node name to endpoint, with TOML override.
//!
//! The directory is an immutable snapshot handed to both operations at call
//! time. Compiled-in defaults cover the lab cluster; a TOML file (explicit
//! path, `SWARMOPS_HOSTS`, or `/etc/swarmops/hosts.toml`) replaces them.

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

/// SSH endpoint for one cluster node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Endpoint {
    /// `user@host` string handed to ssh as the destination.
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_port() -> u16 {
    22
}

/// Immutable node -> SSH endpoint mapping.
///
/// A lookup miss means the static configuration is incomplete or stale for
/// the cluster being queried, not a transient fault.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HostDirectory {
    #[serde(default)]
    hosts: BTreeMap<String, Endpoint>,
}

impl Default for HostDirectory {
    fn default() -> Self {
        let mut hosts = BTreeMap::new();
        hosts.insert(
            "bsp-server-1".to_string(),
            Endpoint {
                host: "root@bsp-server-1".to_string(),
                port: 2200,
            },
        );
        hosts.insert(
            "bsp-server-4".to_string(),
            Endpoint {
                host: "root@bsp-server-4".to_string(),
                port: 22,
            },
        );
        Self { hosts }
    }
}

impl HostDirectory {
    /// Load a host directory from a TOML file at `path`.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read host directory: {}", path.display()))?;
        let dir: Self = toml::from_str(&content)
            .with_context(|| format!("failed to parse host directory: {}", path.display()))?;
        info!(path = %path.display(), nodes = dir.hosts.len(), "loaded host directory");
        Ok(dir)
    }

    /// Resolve the effective directory, in order:
    /// 1. An explicit path (hard error if it does not load).
    /// 2. The path in the `SWARMOPS_HOSTS` environment variable.
    /// 3. `/etc/swarmops/hosts.toml`.
    /// 4. Compiled-in defaults.
    pub fn load_or_default(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::load(path);
        }

        if let Ok(env_path) = std::env::var("SWARMOPS_HOSTS") {
            let path = Path::new(&env_path);
            match Self::load(path) {
                Ok(dir) => return Ok(dir),
                Err(e) => {
                    warn!(
                        path = %path.display(),
                        error = %e,
                        "SWARMOPS_HOSTS set but file could not be loaded, trying fallback"
                    );
                }
            }
        }

        let system_path = Path::new("/etc/swarmops/hosts.toml");
        if system_path.exists() {
            match Self::load(system_path) {
                Ok(dir) => return Ok(dir),
                Err(e) => {
                    warn!(error = %e, "system host directory unreadable, using defaults");
                }
            }
        }

        Ok(Self::default())
    }

    /// Look up the SSH endpoint for a node, if the directory knows it.
    pub fn lookup(&self, node: &str) -> Option<&Endpoint> {
        self.hosts.get(node)
    }

    /// Iterate over all entries, sorted by node name.
    pub fn entries(&self) -> impl Iterator<Item = (&str, &Endpoint)> {
        self.hosts.iter().map(|(k, v)| (k.as_str(), v))
    }
}
