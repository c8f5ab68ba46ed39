use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use swarmops::config::HostDirectory;
use swarmops::ops::{self, OpError, SshDialer};

#[derive(Parser)]
#[command(
    name = "swarmops",
    about = "Remote exec and iperf3 bandwidth testing for Docker Swarm services over SSH",
    version,
    long_about = None
)]
struct Cli {
    /// Path to a TOML host directory (overrides SWARMOPS_HOSTS and
    /// /etc/swarmops/hosts.toml)
    #[arg(long, global = true)]
    hosts: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a command inside the container of a running Swarm service
    Exec {
        /// Name of the Swarm service
        service: String,

        /// Command and arguments to run inside the container
        #[arg(trailing_var_arg = true, allow_hyphen_values = true, required = true)]
        command: Vec<String>,
    },

    /// Run an iperf3 bandwidth test between two Swarm services
    Iperf {
        /// Service whose container runs the iperf3 server
        server_service: String,

        /// Service whose container runs the iperf3 client
        client_service: String,

        /// Overlay network whose address the server container advertises
        #[arg(long, default_value = "mec")]
        network: String,

        /// Test duration in seconds
        #[arg(long, default_value = "5")]
        duration: u32,

        /// Run the client with -J and print a parsed Mbps summary
        #[arg(long)]
        json: bool,
    },

    /// Print the effective host directory
    Hosts,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let directory = HostDirectory::load_or_default(cli.hosts.as_deref())?;
    let dialer = SshDialer;

    match cli.command {
        Commands::Exec { service, command } => {
            report(ops::exec::exec_service(&dialer, &directory, &service, &command).await)
        }
        Commands::Iperf {
            server_service,
            client_service,
            network,
            duration,
            json,
        } => {
            let params = ops::iperf::IperfParams {
                network,
                duration,
                json,
            };
            report(
                ops::iperf::run_iperf3(&dialer, &directory, &server_service, &client_service, &params)
                    .await,
            )
        }
        Commands::Hosts => {
            for (node, endpoint) in directory.entries() {
                println!("{node} -> {} (port {})", endpoint.host, endpoint.port);
            }
            Ok(())
        }
    }
}

/// Print the expected negative outcomes as diagnostics; let faults propagate
/// to anyhow's default reporting.
fn report(result: Result<(), OpError>) -> Result<()> {
    match result {
        Ok(()) => Ok(()),
        Err(OpError::Transport(e)) => Err(e),
        Err(e) => {
            println!("Error: {e}.");
            Ok(())
        }
    }
}
