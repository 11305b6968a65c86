//! The scan **orchestrator**.
//!
//! A run moves through a fixed pipeline: validate every target, validate the
//! port range, then scan the targets strictly one after the other. Only the
//! ports of the current target are probed concurrently, so no more than
//! `worker_count` sockets are ever open at once regardless of how many
//! targets were given.
//!
//! Nothing is written to the terminal from here. Results flow to the caller's
//! [`ScanReporter`] through an [`EventSink`].

use std::net::Ipv4Addr;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use async_trait::async_trait;
use portsweep_common::config::ScanConfig;
use portsweep_common::error::ScanError;
use portsweep_common::network::outcome::ProbeOutcome;
use portsweep_common::network::range::PortRange;
use portsweep_common::network::target::{self, Target};
use portsweep_common::report::{ScanEvent, ScanReporter, TargetStatus, TargetSummary};
use tokio::time::Instant;
use tracing::{debug, error, info, warn};

use crate::network::tcp::TcpConnectProbe;
use pool::WorkerPool;
use queue::PortQueue;
use sink::EventSink;

pub mod pool;
pub mod queue;
pub mod sink;

/// Strategy for probing a single transport-layer port.
#[async_trait]
pub trait Prober: Send + Sync {
    /// Makes exactly one attempt, bounded by `timeout`.
    async fn probe(&self, addr: Ipv4Addr, port: u16, timeout: Duration) -> ProbeOutcome;
}

/// Shared stop flag. Workers check it before taking each port; probes already
/// in flight are left to finish. A stop applies to one run only: the scanner
/// clears it once that run has returned.
#[derive(Debug, Clone, Default)]
pub struct StopSignal {
    stopped: Arc<AtomicBool>,
}

impl StopSignal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn trigger(&self) {
        self.stopped.store(true, Ordering::Relaxed);
    }

    pub fn is_stopped(&self) -> bool {
        self.stopped.load(Ordering::Relaxed)
    }

    fn reset(&self) {
        self.stopped.store(false, Ordering::Relaxed);
    }
}

pub struct Scanner<P = TcpConnectProbe> {
    cfg: ScanConfig,
    prober: Arc<P>,
    stop: StopSignal,
}

impl Scanner<TcpConnectProbe> {
    /// A scanner using real TCP connect probes.
    pub fn new(cfg: ScanConfig) -> Result<Self, ScanError> {
        Self::with_prober(cfg, TcpConnectProbe)
    }
}

impl<P: Prober + 'static> Scanner<P> {
    pub fn with_prober(cfg: ScanConfig, prober: P) -> Result<Self, ScanError> {
        cfg.validate()?;
        Ok(Self {
            cfg,
            prober: Arc::new(prober),
            stop: StopSignal::new(),
        })
    }

    pub fn config(&self) -> &ScanConfig {
        &self.cfg
    }

    pub fn prober(&self) -> &P {
        &self.prober
    }

    /// Handle that cancels this scanner's run when triggered.
    pub fn stop_signal(&self) -> StopSignal {
        self.stop.clone()
    }

    /// Validates the input and scans every target for ports `1..=max_port`.
    ///
    /// Any invalid target or an out-of-range `max_port` aborts the run before
    /// a single connection is attempted. Once scanning starts, failures are
    /// confined to the target they happened on and show up in its summary.
    pub async fn run_scan<S, R>(
        &self,
        targets: &[S],
        max_port: u32,
        sink: &EventSink<R>,
    ) -> Result<Vec<TargetSummary>, ScanError>
    where
        S: AsRef<str>,
        R: ScanReporter + 'static,
    {
        let prepared = target::validate(targets)
            .into_targets()
            .and_then(|targets| Ok((targets, PortRange::new(max_port)?)));
        let (targets, range) = match prepared {
            Ok(prepared) => prepared,
            Err(e) => {
                self.stop.reset();
                return Err(e);
            }
        };

        Ok(self.scan_targets(&targets, range, sink).await)
    }

    /// Scans already-validated targets in order.
    pub async fn scan_targets<R>(
        &self,
        targets: &[Target],
        range: PortRange,
        sink: &EventSink<R>,
    ) -> Vec<TargetSummary>
    where
        R: ScanReporter + 'static,
    {
        sink.emit(ScanEvent::RunStarted {
            targets: targets.to_vec(),
        });

        let mut summaries = Vec::with_capacity(targets.len());
        for &target in targets {
            if self.stop.is_stopped() {
                warn!("Scan cancelled, skipping remaining targets");
                break;
            }
            summaries.push(self.scan_target(target, range, sink).await);
        }

        self.stop.reset();
        summaries
    }

    async fn scan_target<R>(&self, target: Target, range: PortRange, sink: &EventSink<R>) -> TargetSummary
    where
        R: ScanReporter + 'static,
    {
        let queue = Arc::new(PortQueue::new(range));
        let total = queue.total();

        info!("Starting scan for {target} ({total} ports)");
        sink.emit(ScanEvent::ScanStarted {
            target,
            ports_total: total,
        });

        let tally = Arc::new(Mutex::new(TargetSummary::new(target, total)));
        let on_result = {
            let tally = Arc::clone(&tally);
            let sink = sink.clone();
            move |port: u16, outcome: ProbeOutcome| {
                let mut tally = tally.lock().unwrap_or_else(PoisonError::into_inner);
                tally.ports_probed += 1;
                match outcome {
                    ProbeOutcome::Open => {
                        tally.open_ports.push(port);
                        sink.emit(ScanEvent::PortOpen { target, port });
                    }
                    ProbeOutcome::ClosedOrFiltered => tally.closed_or_filtered += 1,
                    ProbeOutcome::Error(e) => {
                        debug!("probe {target}:{port} failed: {e}");
                        tally.errors += 1;
                    }
                }
                sink.emit(ScanEvent::Progress {
                    target,
                    probed: tally.ports_probed,
                    total,
                });
            }
        };

        let started = Instant::now();
        let pool = WorkerPool::new(self.cfg.worker_count, self.cfg.probe_timeout);
        let result = pool
            .run(
                Arc::clone(&self.prober),
                queue,
                target,
                self.stop.clone(),
                on_result,
            )
            .await;

        let mut summary = tally.lock().unwrap_or_else(PoisonError::into_inner).clone();
        summary.elapsed = started.elapsed();
        summary.status = match result {
            Err(e) => {
                error!("{e}");
                sink.emit(ScanEvent::ScanFailed {
                    target,
                    reason: e.to_string(),
                });
                TargetStatus::Failed(e.to_string())
            }
            Ok(()) if summary.ports_probed < total => {
                warn!("Scan of {target} cancelled after {} of {total} ports", summary.ports_probed);
                TargetStatus::Cancelled
            }
            Ok(()) => TargetStatus::Completed,
        };

        info!(
            "Finished {target}: {} open, {} closed/filtered, {} errors in {:.2}s",
            summary.open_ports.len(),
            summary.closed_or_filtered,
            summary.errors,
            summary.elapsed.as_secs_f64()
        );
        sink.emit(ScanEvent::ScanSummary(summary.clone()));
        summary
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
