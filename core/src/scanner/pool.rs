//! Fixed-size worker pool draining one target's [`PortQueue`].
//!
//! Workers are tokio tasks held in a [`JoinSet`]. [`WorkerPool::run`] returns
//! only after every worker has exited, which makes pool completion an explicit
//! join point instead of a side effect of the queue running dry.

use std::net::Ipv4Addr;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use portsweep_common::error::ScanError;
use portsweep_common::network::outcome::ProbeOutcome;
use portsweep_common::network::target::Target;
use tokio::runtime::Handle;
use tokio::task::JoinSet;
use tracing::{debug, error};

use super::queue::PortQueue;
use super::{Prober, StopSignal};

#[derive(Debug, Clone, Copy)]
pub struct WorkerPool {
    worker_count: usize,
    probe_timeout: Duration,
}

impl WorkerPool {
    pub fn new(worker_count: usize, probe_timeout: Duration) -> Self {
        Self {
            worker_count,
            probe_timeout,
        }
    }

    /// Probes every port in `queue` against `target` and hands each outcome to
    /// `on_result`, one call at a time.
    ///
    /// A probe error never stops the pool. The run fails only if workers
    /// cannot be started or a worker dies before finishing its loop.
    pub async fn run<P, F>(
        &self,
        prober: Arc<P>,
        queue: Arc<PortQueue>,
        target: Target,
        stop: StopSignal,
        on_result: F,
    ) -> Result<(), ScanError>
    where
        P: Prober + 'static,
        F: FnMut(u16, ProbeOutcome) + Send + 'static,
    {
        if self.worker_count == 0 {
            return Err(ScanError::PoolStartup {
                target,
                reason: "worker count is zero".into(),
            });
        }
        if let Err(e) = Handle::try_current() {
            return Err(ScanError::PoolStartup {
                target,
                reason: e.to_string(),
            });
        }

        let on_result = Arc::new(Mutex::new(on_result));
        let mut workers = JoinSet::new();

        for id in 0..self.worker_count {
            workers.spawn(worker_loop(
                id,
                Arc::clone(&prober),
                Arc::clone(&queue),
                target.addr(),
                self.probe_timeout,
                stop.clone(),
                Arc::clone(&on_result),
            ));
        }

        let mut lost: Option<String> = None;
        while let Some(joined) = workers.join_next().await {
            if let Err(e) = joined {
                error!("Worker for {target} exited abnormally: {e}");
                lost.get_or_insert_with(|| e.to_string());
            }
        }

        match lost {
            Some(reason) => Err(ScanError::WorkerLost { target, reason }),
            None => Ok(()),
        }
    }
}

async fn worker_loop<P, F>(
    id: usize,
    prober: Arc<P>,
    queue: Arc<PortQueue>,
    addr: Ipv4Addr,
    probe_timeout: Duration,
    stop: StopSignal,
    on_result: Arc<Mutex<F>>,
) where
    P: Prober,
    F: FnMut(u16, ProbeOutcome),
{
    let mut probed: usize = 0;

    loop {
        if stop.is_stopped() {
            break;
        }
        let Some(port) = queue.try_pop() else {
            break;
        };

        let outcome = prober.probe(addr, port, probe_timeout).await;
        probed += 1;

        let mut deliver = on_result.lock().unwrap_or_else(PoisonError::into_inner);
        deliver(port, outcome);
    }

    debug!("worker {id} for {addr} done after {probed} probes");
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scanner::testing::ScriptedConnector;
    use portsweep_common::network::range::PortRange;
    use std::collections::HashSet;
    use std::sync::atomic::{AtomicUsize, Ordering};

    const TIMEOUT: Duration = Duration::from_millis(500);

    fn target() -> Target {
        Target::new(Ipv4Addr::new(10, 0, 0, 1))
    }

    #[tokio::test(start_paused = true)]
    async fn every_port_reaches_on_result_once() {
        let prober = Arc::new(ScriptedConnector::with_open([22, 80]));
        let queue = Arc::new(PortQueue::new(PortRange::new(200).unwrap()));
        let seen = Arc::new(Mutex::new(Vec::new()));

        let sink = Arc::clone(&seen);
        WorkerPool::new(30, TIMEOUT)
            .run(prober, Arc::clone(&queue), target(), StopSignal::new(), move |port, outcome| {
                sink.lock().unwrap().push((port, outcome));
            })
            .await
            .unwrap();

        let seen = seen.lock().unwrap();
        assert_eq!(seen.len(), 200);
        let distinct: HashSet<u16> = seen.iter().map(|(p, _)| *p).collect();
        assert_eq!(distinct.len(), 200);

        let open: HashSet<u16> = seen.iter().filter(|(_, o)| o.is_open()).map(|(p, _)| *p).collect();
        assert_eq!(open, HashSet::from([22, 80]));
        assert!(queue.is_exhausted());
    }

    #[tokio::test(start_paused = true)]
    async fn probe_errors_do_not_abort_the_pool() {
        let prober = Arc::new(ScriptedConnector::with_open([5]).failing([1, 2, 3]));
        let queue = Arc::new(PortQueue::new(PortRange::new(10).unwrap()));
        let errors = Arc::new(AtomicUsize::new(0));
        let total = Arc::new(AtomicUsize::new(0));

        let (e, t) = (Arc::clone(&errors), Arc::clone(&total));
        let result = WorkerPool::new(4, TIMEOUT)
            .run(prober, queue, target(), StopSignal::new(), move |_, outcome| {
                t.fetch_add(1, Ordering::SeqCst);
                if matches!(outcome, ProbeOutcome::Error(_)) {
                    e.fetch_add(1, Ordering::SeqCst);
                }
            })
            .await;

        assert!(result.is_ok());
        assert_eq!(total.load(Ordering::SeqCst), 10);
        assert_eq!(errors.load(Ordering::SeqCst), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn more_workers_than_ports_is_fine() {
        let prober = Arc::new(ScriptedConnector::default());
        let queue = Arc::new(PortQueue::new(PortRange::new(3).unwrap()));
        let count = Arc::new(AtomicUsize::new(0));

        let c = Arc::clone(&count);
        WorkerPool::new(64, TIMEOUT)
            .run(prober, queue, target(), StopSignal::new(), move |_, _| {
                c.fetch_add(1, Ordering::SeqCst);
            })
            .await
            .unwrap();

        assert_eq!(count.load(Ordering::SeqCst), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn stop_signal_prevents_further_pops() {
        let prober = Arc::new(ScriptedConnector::default());
        let queue = Arc::new(PortQueue::new(PortRange::new(100).unwrap()));
        let stop = StopSignal::new();
        stop.trigger();

        let count = Arc::new(AtomicUsize::new(0));
        let c = Arc::clone(&count);
        WorkerPool::new(10, TIMEOUT)
            .run(prober, Arc::clone(&queue), target(), stop, move |_, _| {
                c.fetch_add(1, Ordering::SeqCst);
            })
            .await
            .unwrap();

        assert_eq!(count.load(Ordering::SeqCst), 0);
        assert_eq!(queue.remaining(), 100);
    }

    #[tokio::test]
    async fn zero_workers_is_a_startup_failure() {
        let prober = Arc::new(ScriptedConnector::default());
        let queue = Arc::new(PortQueue::new(PortRange::new(3).unwrap()));

        let result = WorkerPool::new(0, TIMEOUT)
            .run(prober, queue, target(), StopSignal::new(), |_, _| {})
            .await;

        assert!(matches!(result, Err(ScanError::PoolStartup { .. })));
    }

    #[tokio::test]
    async fn panicking_worker_is_reported() {
        let prober = Arc::new(ScriptedConnector::default());
        let queue = Arc::new(PortQueue::new(PortRange::new(3).unwrap()));

        let result = WorkerPool::new(1, TIMEOUT)
            .run(prober, queue, target(), StopSignal::new(), |port, _| {
                if port == 2 {
                    panic!("reporter blew up");
                }
            })
            .await;

        assert!(matches!(result, Err(ScanError::WorkerLost { .. })));
    }
}
