//! segroute - segment-trie HTTP path router
//!
//! Maps registered URL paths to handlers through a trie of path segments,
//! dispatches requests by walking it, and streams per-request timing records
//! to a background consumer over a lossy bounded channel.

pub mod cli;
pub mod config;
pub mod error;
pub mod handlers;
pub mod metrics;
pub mod middleware;
pub mod router;
pub mod telemetry;
