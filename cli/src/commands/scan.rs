use std::time::Duration;

use portsweep_common::config::{Config, ScanConfig};
use portsweep_common::network::range::parse_max_port;
use portsweep_common::network::target::{self, split_target_list};
use portsweep_common::report::TargetSummary;
use portsweep_core::{EventSink, Scanner, StopSignal};
use tracing::warn;

use crate::commands::CommandLine;
use crate::terminal::reporter::TerminalReporter;
use crate::terminal::{input, print, spinner};

const TARGETS_PROMPT: &str = "[*] Enter targets (comma-separated IPs): ";
const MAX_PORT_PROMPT: &str = "[*] Enter max port number to scan (1-65535): ";

pub async fn scan(cmd: &CommandLine, cfg: &Config) -> anyhow::Result<Vec<TargetSummary>> {
    let scan_cfg = ScanConfig {
        worker_count: cmd.workers,
        probe_timeout: Duration::from_millis(cmd.timeout_ms),
    };
    let scanner = Scanner::new(scan_cfg)?;

    let raw_targets: String = match &cmd.targets {
        Some(targets) => targets.clone(),
        None => input::prompt_stdin(TARGETS_PROMPT)?,
    };
    let candidates: Vec<String> = split_target_list(&raw_targets);
    if candidates.is_empty() {
        anyhow::bail!("no targets given");
    }

    // Reject bad targets before asking for anything else.
    target::validate(&candidates).into_targets()?;

    let raw_max_port: String = match &cmd.max_port {
        Some(max_port) => max_port.clone(),
        None => input::prompt_stdin(MAX_PORT_PROMPT)?,
    };
    let range = parse_max_port(&raw_max_port)?;

    print::header("starting scanner", cfg.quiet);
    if cfg.quiet == 0 {
        print::aligned_line("Targets", &candidates.join(", "));
        print::aligned_line("Ports", &format!("1-{}", range.max_port()));
        print::aligned_line("Workers", &scan_cfg.worker_count.to_string());
        print::aligned_line("Timeout", &format!("{}ms", cmd.timeout_ms));
    }

    spinner::init_spinner(cfg.quiet == 0);
    watch_for_interrupt(scanner.stop_signal());

    let sink = EventSink::new(TerminalReporter::new(cfg.clone()));
    let summaries = scanner
        .run_scan(&candidates, u32::from(range.max_port()), &sink)
        .await?;

    sink.with(|reporter| reporter.print_totals());
    Ok(summaries)
}

fn watch_for_interrupt(stop: StopSignal) {
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("Interrupted, finishing in-flight probes");
            stop.trigger();
        }
    });
}
