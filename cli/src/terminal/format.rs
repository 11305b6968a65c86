use std::time::Duration;

use crate::terminal::colors;
use colored::*;
use portsweep_common::report::{TargetStatus, TargetSummary};

type Detail = (String, ColoredString);

/// Open ports in numeric order, e.g. `22, 80, 443`.
pub fn ports_to_string(ports: &[u16]) -> String {
    let mut sorted: Vec<u16> = ports.to_vec();
    sorted.sort_unstable();
    sorted
        .iter()
        .map(u16::to_string)
        .collect::<Vec<String>>()
        .join(", ")
}

pub fn duration_to_string(elapsed: Duration) -> String {
    format!("{:.2}s", elapsed.as_secs_f64())
}

pub fn status_to_colored(status: &TargetStatus) -> ColoredString {
    match status {
        TargetStatus::Completed => "completed".green(),
        TargetStatus::Cancelled => "cancelled".yellow(),
        TargetStatus::Failed(reason) => format!("failed ({reason})").red(),
    }
}

pub fn summary_to_details(summary: &TargetSummary) -> Vec<Detail> {
    let open: ColoredString = if summary.open_ports.is_empty() {
        "none".color(colors::SEPARATOR)
    } else {
        ports_to_string(&summary.open_ports).color(colors::OPEN_PORT).bold()
    };

    let mut details: Vec<Detail> = vec![
        ("Open".to_string(), open),
        (
            "Probed".to_string(),
            format!("{}/{}", summary.ports_probed, summary.ports_total).normal(),
        ),
        (
            "Closed".to_string(),
            summary.closed_or_filtered.to_string().normal(),
        ),
    ];

    if summary.errors > 0 {
        details.push(("Errors".to_string(), summary.errors.to_string().red()));
    }

    details.push((
        "Time".to_string(),
        duration_to_string(summary.elapsed).color(colors::ACCENT),
    ));
    details.push(("Status".to_string(), status_to_colored(&summary.status)));
    details
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
