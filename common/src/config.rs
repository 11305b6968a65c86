use std::time::Duration;

use crate::error::ScanError;

pub const DEFAULT_WORKER_COUNT: usize = 30;
pub const DEFAULT_PROBE_TIMEOUT: Duration = Duration::from_millis(500);

/// Presentation flags for the front end.
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Skips the header banner.
    pub no_banner: bool,
    /// 0 prints everything, 1 drops decorations, 2 prints open ports only.
    pub quiet: u8,
}

/// Tunables of the scanning engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScanConfig {
    /// Concurrent connect attempts per target.
    pub worker_count: usize,
    /// Upper bound of a single connect attempt.
    pub probe_timeout: Duration,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            worker_count: DEFAULT_WORKER_COUNT,
            probe_timeout: DEFAULT_PROBE_TIMEOUT,
        }
    }
}

impl ScanConfig {
    pub fn validate(&self) -> Result<(), ScanError> {
        if self.worker_count == 0 {
            return Err(ScanError::InvalidConfig(
                "worker count must be at least 1".into(),
            ));
        }
        if self.probe_timeout.is_zero() {
            return Err(ScanError::InvalidConfig(
                "probe timeout must be greater than zero".into(),
            ));
        }
        Ok(())
    }

    /// Worst-case wall-clock time for `port_count` ports:
    /// `ceil(port_count / worker_count) * probe_timeout`.
    pub fn worst_case(&self, port_count: usize) -> Duration {
        let workers = self.worker_count.max(1);
        let rounds = port_count.div_ceil(workers);
        self.probe_timeout
            .saturating_mul(u32::try_from(rounds).unwrap_or(u32::MAX))
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
