use std::io::Write;
use std::sync::{Mutex, MutexGuard, OnceLock, PoisonError};
use std::time::Duration;

use colored::*;
use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use portsweep_common::network::target::Target;

const TICK_RATE: Duration = Duration::from_millis(100);
const TICKS: &[&str] = &[
    "▁▁▁▁▁",
    "▁▂▂▂▁",
    "▁▄▂▄▁",
    "▂▄▆▄▂",
    "▄▆█▆▄",
    "▂▄▆▄▂",
    "▁▄▂▄▁",
    "▁▂▂▂▁",
];

/// Progress bar for the target currently being scanned, if any.
pub struct SpinnerHandle {
    bar: Mutex<Option<ProgressBar>>,
    visible: bool,
}

impl SpinnerHandle {
    fn bar(&self) -> MutexGuard<'_, Option<ProgressBar>> {
        self.bar.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Prints above the bar, or straight to stdout when no bar is shown.
    pub fn println(&self, msg: &str) -> std::io::Result<()> {
        match self.bar().as_ref() {
            Some(pb) => {
                pb.println(msg);
                Ok(())
            }
            None => writeln!(std::io::stdout().lock(), "{msg}"),
        }
    }
}

pub(crate) static SPINNER: OnceLock<SpinnerHandle> = OnceLock::new();

/// Chooses whether progress is drawn. Must run before the first scan event;
/// later calls are ignored.
pub fn init_spinner(visible: bool) {
    let _ = SPINNER.set(SpinnerHandle {
        bar: Mutex::new(None),
        visible,
    });
}

pub fn get_spinner() -> &'static SpinnerHandle {
    SPINNER.get_or_init(|| SpinnerHandle {
        bar: Mutex::new(None),
        visible: false,
    })
}

fn build_bar(target: &Target, total: usize) -> ProgressBar {
    let pb = ProgressBar::with_draw_target(Some(total as u64), ProgressDrawTarget::stderr());

    if let Ok(style) = ProgressStyle::with_template(
        "{spinner:.blue} {msg} [{bar:30.green/bright_black}] {pos}/{len} ports",
    ) {
        pb.set_style(style.tick_strings(TICKS).progress_chars("█▓░"));
    }

    pb.set_message(format!("Scanning {}", target.to_string().bold()));
    pb.enable_steady_tick(TICK_RATE);
    pb
}

pub fn start_target(target: &Target, total: usize) {
    let handle = get_spinner();
    if !handle.visible {
        return;
    }
    if let Some(old) = handle.bar().replace(build_bar(target, total)) {
        old.finish_and_clear();
    }
}

pub fn report_scan_progress(probed: usize) {
    if let Some(pb) = get_spinner().bar().as_ref() {
        pb.set_position(probed as u64);
    }
}

/// Removes the bar once a target is done.
pub fn finish() {
    if let Some(pb) = get_spinner().bar().take() {
        pb.finish_and_clear();
    }
}

pub struct SpinnerWriter;

impl std::io::Write for SpinnerWriter {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        let msg = String::from_utf8_lossy(buf);
        get_spinner().println(msg.trim_end_matches('\n'))?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        std::io::stdout().flush()
    }
}
