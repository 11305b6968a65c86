use thiserror::Error;

use crate::network::target::Target;

/// Errors surfaced by a scan run.
///
/// `Validation`, `Range` and `InvalidConfig` are raised before any socket is
/// opened. `PoolStartup` and `WorkerLost` only end the scan of one target.
#[derive(Debug, Error)]
pub enum ScanError {
    #[error("invalid targets: {}", .invalid.join(", "))]
    Validation { invalid: Vec<String> },

    #[error("invalid max port '{0}': must be between 1 and 65535")]
    Range(String),

    #[error("invalid scan configuration: {0}")]
    InvalidConfig(String),

    #[error("could not start workers for {target}: {reason}")]
    PoolStartup { target: Target, reason: String },

    #[error("a worker scanning {target} did not finish: {reason}")]
    WorkerLost { target: Target, reason: String },
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
