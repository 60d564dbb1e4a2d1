//! Command-line interface for segroute
//!
//! Provides argument parsing and subcommand handling for the segroute binary.

use clap::{Parser, Subcommand};

/// Segment-trie HTTP router with per-request timing telemetry
#[derive(Parser)]
#[command(name = "segroute")]
#[command(version)]
#[command(about = "Segment-trie HTTP router with per-request timing telemetry")]
#[command(
    long_about = "segroute serves a fixed set of routes from a segment trie, timing every \
    dispatch and streaming the timings to a background consumer on a lossy bounded channel."
)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "config.toml", global = true)]
    pub config: String,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Generate a template configuration file
    Config {
        /// Output file path (prints to stdout if not specified)
        #[arg(short, long)]
        output: Option<String>,
    },
}

/// Generate template configuration content
pub fn generate_config_template() -> &'static str {
    r#"# segroute Configuration
# ======================

# ─────────────────────────────────────────────────────────────────────────────
# SERVER
# ─────────────────────────────────────────────────────────────────────────────

[server]
# IP address to bind to (0.0.0.0 for all interfaces, 127.0.0.1 for localhost only)
host = "0.0.0.0"

# Port to listen on
port = 3000

# ─────────────────────────────────────────────────────────────────────────────
# METRICS PIPELINE
# ─────────────────────────────────────────────────────────────────────────────
#
# Every matched request produces one timing record. Records travel on a
# bounded channel to a background consumer; when the channel is full new
# records are dropped rather than slowing requests down.

[metrics]
# Channel slots (1 - 1000000)
channel_capacity = 10000

# Idle timing records kept for reuse (0 - 1000000)
pool_max_idle = 1024

# ─────────────────────────────────────────────────────────────────────────────
# OBSERVABILITY
# ─────────────────────────────────────────────────────────────────────────────

[observability]
# Log level: "trace", "debug", "info", "warn", "error"
# "debug" logs one timing line per request
log_level = "info"

# Prometheus metrics are always available at /metrics on the server port
"#
}
