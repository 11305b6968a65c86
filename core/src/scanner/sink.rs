use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use portsweep_common::report::{ScanEvent, ScanReporter};

/// Cloneable handle that serializes events into a single [`ScanReporter`].
///
/// Only one event is delivered at a time, so lines written by the reporter
/// never interleave.
pub struct EventSink<R> {
    inner: Arc<Mutex<R>>,
}

impl<R> Clone for EventSink<R> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<R: ScanReporter> EventSink<R> {
    pub fn new(reporter: R) -> Self {
        Self {
            inner: Arc::new(Mutex::new(reporter)),
        }
    }

    pub fn emit(&self, event: ScanEvent) {
        self.lock().report(event);
    }

    /// Runs `f` against the reporter while holding the emit lock.
    pub fn with<T>(&self, f: impl FnOnce(&mut R) -> T) -> T {
        f(&mut self.lock())
    }

    /// Returns the reporter once every other handle has been dropped.
    pub fn into_inner(self) -> Option<R> {
        Arc::try_unwrap(self.inner)
            .ok()
            .map(|m| m.into_inner().unwrap_or_else(PoisonError::into_inner))
    }

    fn lock(&self) -> MutexGuard<'_, R> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
