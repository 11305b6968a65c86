use std::ops::RangeInclusive;

use crate::error::ScanError;

pub const MIN_PORT: u16 = 1;
pub const MAX_PORT: u16 = u16::MAX;

/// The ports `1..=max_port` scanned on each target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PortRange {
    max_port: u16,
}

impl PortRange {
    /// Fails with [`ScanError::Range`] unless `1 <= max_port <= 65535`.
    pub fn new(max_port: u32) -> Result<Self, ScanError> {
        match u16::try_from(max_port) {
            Ok(port) if port >= MIN_PORT => Ok(Self { max_port: port }),
            _ => Err(ScanError::Range(max_port.to_string())),
        }
    }

    pub fn max_port(&self) -> u16 {
        self.max_port
    }

    pub fn len(&self) -> usize {
        usize::from(self.max_port)
    }

    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn ports(&self) -> RangeInclusive<u16> {
        MIN_PORT..=self.max_port
    }
}

/// Parses user-entered text such as `" 1024 "` into a [`PortRange`].
///
/// Anything that is not a number in `1..=65535` is a range error.
pub fn parse_max_port(s: &str) -> Result<PortRange, ScanError> {
    let trimmed = s.trim();
    trimmed
        .parse::<u32>()
        .map_err(|_| ScanError::Range(trimmed.to_string()))
        .and_then(PortRange::new)
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
