//! swarmops -- remote exec and iperf3 bandwidth testing for Docker Swarm
//! services over SSH.
//!
//! This crate locates the container backing a named Swarm service (orchestrator
//! query for the node, SSH to the node, container-engine query for the
//! container id) and then either runs an arbitrary command inside it or
//! orchestrates an iperf3 measurement between two services.

pub mod config;
pub mod ops;
pub mod remote;
pub mod report;
pub mod swarm;
