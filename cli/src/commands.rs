pub mod scan;

use clap::{ArgAction, Parser};
use portsweep_common::config::{DEFAULT_PROBE_TIMEOUT, DEFAULT_WORKER_COUNT};

#[derive(Parser, Debug)]
#[command(name = "portsweep", version)]
#[command(about = "A concurrent TCP connect scanner.")]
pub struct CommandLine {
    /// Comma-separated IPv4 targets, e.g. "10.0.0.1,10.0.0.2" (prompted for when omitted)
    pub targets: Option<String>,

    /// Highest port to scan, from 1 to 65535 (prompted for when omitted)
    #[arg(short = 'p', long)]
    pub max_port: Option<String>,

    /// Concurrent connection attempts per target
    #[arg(short, long, default_value_t = DEFAULT_WORKER_COUNT)]
    pub workers: usize,

    /// Per-port connect timeout in milliseconds
    #[arg(short, long = "timeout", value_name = "MS", default_value_t = DEFAULT_PROBE_TIMEOUT.as_millis() as u64)]
    pub timeout_ms: u64,

    /// Less output; repeat (-qq) to print only open "ip:port" lines
    #[arg(short, long, action = ArgAction::Count)]
    pub quiet: u8,

    /// Do not print the banner
    #[arg(long)]
    pub no_banner: bool,

    /// More diagnostics; repeat for more detail
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

impl CommandLine {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
