//! iperf3 JSON report parsing -- the subset of fields behind the summary line.

use anyhow::Result;
use serde::Deserialize;

/// Parsed `iperf3 -J` result (end-of-test sums only).
#[derive(Debug, Deserialize)]
pub struct IperfReport {
    pub end: IperfEnd,
}

#[derive(Debug, Deserialize)]
pub struct IperfEnd {
    pub sum_sent: IperfSum,
    pub sum_received: IperfSum,
}

#[derive(Debug, Deserialize)]
pub struct IperfSum {
    pub bits_per_second: f64,
    pub bytes: u64,
}

impl IperfReport {
    /// One-line Mbps summary for console output.
    pub fn summary(&self) -> String {
        format!(
            "sent {:.2} Mbps, received {:.2} Mbps",
            self.end.sum_sent.bits_per_second / 1_000_000.0,
            self.end.sum_received.bits_per_second / 1_000_000.0
        )
    }
}

/// Parse an iperf3 JSON output string into a structured report.
pub fn parse_report(json_str: &str) -> Result<IperfReport> {
    let report: IperfReport = serde_json::from_str(json_str)?;
    Ok(report)
}
