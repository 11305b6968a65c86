//! # Scan Target Model
//!
//! Defines what may be handed to the scanner as a host to probe.
//!
//! A target is always a single IPv4 address written as a dotted quad
//! (e.g. `192.168.1.5`). Hostnames, ranges, CIDR blocks and IPv6 are rejected.
//! Validation happens for the whole target list at once so that every bad
//! entry can be reported together before any packet leaves the machine.

use std::fmt;
use std::net::Ipv4Addr;
use std::str::FromStr;

use tracing::debug;

use crate::error::ScanError;

/// A validated IPv4 scan target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Target {
    addr: Ipv4Addr,
}

impl Target {
    pub fn new(addr: Ipv4Addr) -> Self {
        Self { addr }
    }

    pub fn addr(&self) -> Ipv4Addr {
        self.addr
    }
}

impl FromStr for Target {
    type Err = String;

    /// Parses a dotted-quad IPv4 address, ignoring surrounding whitespace.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        trimmed
            .parse::<Ipv4Addr>()
            .map(Target::new)
            .map_err(|e| format!("invalid target '{trimmed}': {e}"))
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.addr)
    }
}

/// Result of validating a list of candidate targets.
///
/// `valid` and `invalid` keep the input order. Invalid entries are stored
/// trimmed, exactly as they will be shown to the user.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TargetValidation {
    pub valid: Vec<Target>,
    pub invalid: Vec<String>,
}

impl TargetValidation {
    pub fn is_clean(&self) -> bool {
        self.invalid.is_empty()
    }

    /// Turns the validation into the list of targets to scan, or a
    /// [`ScanError::Validation`] naming every rejected entry.
    pub fn into_targets(self) -> Result<Vec<Target>, ScanError> {
        if self.is_clean() {
            Ok(self.valid)
        } else {
            Err(ScanError::Validation {
                invalid: self.invalid,
            })
        }
    }
}

/// Splits candidates into valid targets and rejected strings.
///
/// Pure: no I/O, no hidden state, same input always gives the same output.
pub fn validate<S: AsRef<str>>(candidates: &[S]) -> TargetValidation {
    let mut validation = TargetValidation::default();

    for candidate in candidates {
        let candidate = candidate.as_ref().trim();
        match candidate.parse::<Target>() {
            Ok(target) => validation.valid.push(target),
            Err(reason) => {
                debug!("{reason}");
                validation.invalid.push(candidate.to_string());
            }
        }
    }

    validation
}

/// Splits a comma-separated target list (e.g. `"10.0.0.1, 10.0.0.2"`),
/// dropping blank entries.
pub fn split_target_list(s: &str) -> Vec<String> {
    s.split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(String::from)
        .collect()
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
