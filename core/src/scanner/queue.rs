use std::collections::VecDeque;
use std::sync::{Mutex, MutexGuard, PoisonError};

use portsweep_common::network::range::PortRange;

/// Pre-filled, non-blocking source of ports for one target.
///
/// Every port in the range is handed out exactly once, no matter how many
/// workers pop concurrently.
#[derive(Debug)]
pub struct PortQueue {
    pending: Mutex<VecDeque<u16>>,
    total: usize,
}

impl PortQueue {
    pub fn new(range: PortRange) -> Self {
        let pending: VecDeque<u16> = range.ports().collect();
        Self {
            total: pending.len(),
            pending: Mutex::new(pending),
        }
    }

    /// Takes the next port, or `None` once drained. Never waits for work.
    pub fn try_pop(&self) -> Option<u16> {
        self.lock().pop_front()
    }

    pub fn is_exhausted(&self) -> bool {
        self.lock().is_empty()
    }

    pub fn remaining(&self) -> usize {
        self.lock().len()
    }

    /// Number of ports the queue was created with.
    pub fn total(&self) -> usize {
        self.total
    }

    // A panic while holding the lock cannot leave the deque half-updated.
    fn lock(&self) -> MutexGuard<'_, VecDeque<u16>> {
        self.pending.lock().unwrap_or_else(PoisonError::into_inner)
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
