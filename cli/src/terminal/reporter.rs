//! Renders scan events on the terminal.

use colored::*;
use portsweep_common::config::Config;
use portsweep_common::report::{ScanEvent, ScanReporter, TargetSummary};

use crate::terminal::{colors, format, print, spinner};

pub struct TerminalReporter {
    cfg: Config,
    finished: Vec<TargetSummary>,
}

impl TerminalReporter {
    pub fn new(cfg: Config) -> Self {
        Self {
            cfg,
            finished: Vec::new(),
        }
    }

    fn on_run_started(&self, target_count: usize) {
        if target_count > 1 && self.cfg.quiet < 2 {
            print::print(&format!(
                "{}",
                "[*] Scanning multiple targets...".yellow()
            ));
        }
    }

    fn on_scan_started(&self, target: &str) {
        if self.cfg.quiet < 2 {
            print::print("");
            print::print(&format!(
                "{}",
                format!("[*] Starting scan for {target}").color(colors::NOTICE)
            ));
        }
    }

    fn on_port_open(&self, target: &str, port: u16) {
        match self.cfg.quiet {
            2.. => print::print(&format!("{target}:{port}")),
            _ => print::print(&format!(
                "{}",
                format!("[+] {target}:{port} is open").color(colors::OPEN_PORT)
            )),
        }
    }

    fn on_scan_failed(&self, target: &str, reason: &str) {
        print::print(&format!(
            "{}",
            format!("[-] Scan of {target} failed: {reason}").red().bold()
        ));
    }

    fn on_summary(&mut self, summary: TargetSummary) {
        spinner::finish();
        if self.cfg.quiet == 0 {
            print::tree_head(self.finished.len(), &summary.target.to_string());
            print::as_tree_one_level(format::summary_to_details(&summary));
        }
        self.finished.push(summary);
    }

    /// Closing totals across every target scanned so far.
    pub fn print_totals(&self) {
        if self.cfg.quiet > 0 {
            return;
        }

        let open: usize = self.finished.iter().map(|s| s.open_ports.len()).sum();
        if open == 0 {
            print::no_results();
        }

        let targets: ColoredString = format!("{} targets", self.finished.len()).bold().green();
        let open_ports: ColoredString = format!("{open} open ports").bold().green();
        let output: ColoredString = format!("Scan Complete: {open_ports} on {targets}")
            .color(colors::TEXT_DEFAULT);

        print::closing_line(&output.to_string());
    }
}

impl ScanReporter for TerminalReporter {
    fn report(&mut self, event: ScanEvent) {
        match event {
            ScanEvent::RunStarted { targets } => self.on_run_started(targets.len()),
            ScanEvent::ScanStarted {
                target,
                ports_total,
            } => {
                self.on_scan_started(&target.to_string());
                spinner::start_target(&target, ports_total);
            }
            ScanEvent::PortOpen { target, port } => self.on_port_open(&target.to_string(), port),
            ScanEvent::Progress { probed, .. } => spinner::report_scan_progress(probed),
            ScanEvent::ScanFailed { target, reason } => {
                self.on_scan_failed(&target.to_string(), &reason)
            }
            ScanEvent::ScanSummary(summary) => self.on_summary(summary),
        }
    }
}
