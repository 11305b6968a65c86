//! # Scan Reporting
//!
//! The engine never writes output itself. Everything it learns is pushed to a
//! [`ScanReporter`] as a stream of [`ScanEvent`]s, in completion order.
//! Front ends decide how (and whether) to render each event.

use std::time::Duration;

use crate::network::target::Target;

/// How the scan of one target ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TargetStatus {
    /// Every port was probed.
    Completed,
    /// A stop was requested; some ports were never probed.
    Cancelled,
    /// The worker pool failed. Prior targets are unaffected.
    Failed(String),
}

/// Per-target tally produced once its worker pool has joined.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetSummary {
    pub target: Target,
    pub ports_total: usize,
    pub ports_probed: usize,
    /// Open ports in the order they were found, not numeric order.
    pub open_ports: Vec<u16>,
    pub closed_or_filtered: usize,
    pub errors: usize,
    pub elapsed: Duration,
    pub status: TargetStatus,
}

impl TargetSummary {
    pub fn new(target: Target, ports_total: usize) -> Self {
        Self {
            target,
            ports_total,
            ports_probed: 0,
            open_ports: Vec::new(),
            closed_or_filtered: 0,
            errors: 0,
            elapsed: Duration::ZERO,
            status: TargetStatus::Completed,
        }
    }

    pub fn is_complete(&self) -> bool {
        self.status == TargetStatus::Completed
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScanEvent {
    /// Validation passed; these targets will be scanned in this order.
    RunStarted { targets: Vec<Target> },
    ScanStarted { target: Target, ports_total: usize },
    PortOpen { target: Target, port: u16 },
    Progress { target: Target, probed: usize, total: usize },
    ScanFailed { target: Target, reason: String },
    ScanSummary(TargetSummary),
}

/// Receiver of scan events.
///
/// Calls are serialized by the engine, so implementations never see two
/// events at the same time and need no locking of their own.
pub trait ScanReporter: Send {
    fn report(&mut self, event: ScanEvent);
}

/// Collects every event, mostly useful for tests and library callers.
impl ScanReporter for Vec<ScanEvent> {
    fn report(&mut self, event: ScanEvent) {
        self.push(event);
    }
}

/// Discards every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullReporter;

impl ScanReporter for NullReporter {
    fn report(&mut self, _event: ScanEvent) {}
}
