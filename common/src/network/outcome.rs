use std::io;

use thiserror::Error;

/// Classification of a single connect attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProbeOutcome {
    /// The handshake completed within the timeout.
    Open,
    /// Refused outright, or no answer before the timeout.
    ClosedOrFiltered,
    /// Any other failure. Reported like a closed port but counted separately.
    Error(ProbeError),
}

impl ProbeOutcome {
    pub fn is_open(&self) -> bool {
        matches!(self, ProbeOutcome::Open)
    }
}

/// An abnormal connect failure, kept for diagnostics only.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind}: {message}")]
pub struct ProbeError {
    pub kind: io::ErrorKind,
    pub message: String,
}

impl From<&io::Error> for ProbeError {
    fn from(e: &io::Error) -> Self {
        Self {
            kind: e.kind(),
            message: e.to_string(),
        }
    }
}
