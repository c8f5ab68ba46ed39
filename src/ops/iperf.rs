//! Operation B: iperf3 bandwidth test between two services.

use crate::config::HostDirectory;
use crate::ops::{locate, Dialer, OpError};
use crate::report;
use crate::swarm;

/// Knobs for one bandwidth test. Defaults match the lab setup: the "mec"
/// overlay network, 5 seconds, raw text output.
#[derive(Debug, Clone)]
pub struct IperfParams {
    /// Overlay network whose address the server container advertises.
    pub network: String,
    /// Test duration in seconds.
    pub duration: u32,
    /// Run the client with `-J` and print a parsed Mbps summary.
    pub json: bool,
}

impl Default for IperfParams {
    fn default() -> Self {
        Self {
            network: "mec".to_string(),
            duration: 5,
            json: false,
        }
    }
}

/// Run an iperf3 test: server process in `server_service`'s container,
/// client in `client_service`'s container against the server's IP on
/// `params.network`.
///
/// The server and client nodes are dialed independently even when they
/// coincide. A failure after the server has been started leaves the server
/// process running; there is no rollback.
pub async fn run_iperf3(
    dialer: &dyn Dialer,
    directory: &HostDirectory,
    server_service: &str,
    client_service: &str,
    params: &IperfParams,
) -> Result<(), OpError> {
    // 1. Server side: node, container, IP on the overlay network.
    let server = locate(dialer, directory, server_service).await?;
    let server_ip =
        swarm::container_ip(server.exec.as_ref(), &server.container, &params.network).await?;
    println!(
        "Server container '{}' is running on node '{}' with IP '{}'.",
        server.container, server.node, server_ip
    );

    // 2. Client side.
    let client = locate(dialer, directory, client_service).await?;

    // 3. Start the iperf3 server detached.
    println!(
        "Starting iperf3 server in container '{}' on node '{}'...",
        server.container, server.node
    );
    let start_argv: Vec<String> = vec![
        "docker".into(),
        "exec".into(),
        "-d".into(),
        server.container.clone(),
        "iperf3".into(),
        "-s".into(),
    ];
    let out = server.exec.run(&start_argv).await?;
    if !out.success() {
        return Err(OpError::Transport(anyhow::anyhow!(
            "failed to start iperf3 server in '{}': {}",
            server.container,
            out.stderr.trim()
        )));
    }

    // 4. Run the client synchronously and print whatever it produced.
    println!(
        "Running iperf3 client in container '{}' on node '{}'...",
        client.container, client.node
    );
    let mut client_argv: Vec<String> = vec![
        "docker".into(),
        "exec".into(),
        client.container.clone(),
        "iperf3".into(),
        "-c".into(),
        server_ip,
        "-t".into(),
        params.duration.to_string(),
    ];
    if params.json {
        client_argv.push("-J".into());
    }
    let client_out = client.exec.run(&client_argv).await?;
    if !client_out.success() {
        // The server process keeps running on this path; the console output
        // above is the only trace of it.
        return Err(OpError::Transport(anyhow::anyhow!(
            "iperf3 client failed in '{}': {}",
            client.container,
            client_out.stderr.trim()
        )));
    }
    println!("iperf3 client output:\n{}", client_out.stdout);
    if params.json {
        match report::parse_report(&client_out.stdout) {
            Ok(rep) => println!("Result: {}", rep.summary()),
            Err(e) => tracing::warn!(error = %e, "could not parse iperf3 JSON output"),
        }
    }

    // 5. Stop the server by process name, in the same container it was
    // started in.
    println!("Stopping iperf3 server in container '{}'...", server.container);
    let stop_argv: Vec<String> = vec![
        "docker".into(),
        "exec".into(),
        server.container.clone(),
        "pkill".into(),
        "iperf3".into(),
    ];
    let out = server.exec.run(&stop_argv).await?;
    if !out.success() {
        return Err(OpError::Transport(anyhow::anyhow!(
            "failed to stop iperf3 server in '{}': {}",
            server.container,
            out.stderr.trim()
        )));
    }

    Ok(())
}
