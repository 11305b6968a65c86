use crate::terminal::colors;
use colored::*;
use portsweep_common::config::Config;
use tracing::info;
use unicode_width::UnicodeWidthStr;

pub const TOTAL_WIDTH: usize = 64;
pub const PRINT_TARGET: &str = "portsweep::print";
const KEY_WIDTH: usize = 14;

/// Writes one raw line of user-facing output through the logging pipeline,
/// so it lands above the progress bar instead of through it.
pub fn print(msg: &str) {
    info!(target: PRINT_TARGET, raw_msg = msg);
}

pub fn banner(cfg: &Config) {
    if cfg.no_banner || cfg.quiet > 0 {
        return;
    }

    let text_content: String = format!("⟦ PORTSWEEP v{} ⟧ ", env!("CARGO_PKG_VERSION"));
    let text_width: usize = UnicodeWidthStr::width(text_content.as_str());
    let text: ColoredString = text_content.bright_green().bold();
    let sep: ColoredString = "═".repeat(TOTAL_WIDTH.saturating_sub(text_width) / 2).bright_black();
    let output: String = format!("{}{}{}", sep, text, sep);

    print(&output);
}

/// Pads `title` with `fill` on both sides to `TOTAL_WIDTH` display columns.
fn ruled(title: &str, fill: &str) -> String {
    let width: usize = console::measure_text_width(title);
    let pad: usize = TOTAL_WIDTH.saturating_sub(width);
    let left: usize = pad / 2;
    format!("{}{}{}", fill.repeat(left), title, fill.repeat(pad - left))
}

/// Section title such as `────⟦ STARTING SCANNER ⟧────`.
pub fn header(msg: &str, q_level: u8) {
    if q_level > 0 {
        return;
    }
    let title: String = format!("⟦ {} ⟧", msg.to_uppercase());
    let line: String = ruled(&title, "─");
    if let Some((left, right)) = line.split_once(title.as_str()) {
        print(&format!("{}{}{}", left.bright_black(), title.bright_green(), right.bright_black()));
    }
}

/// Heavy rule followed by `msg` centred beneath it.
pub fn closing_line(msg: &str) {
    print(&"═".repeat(TOTAL_WIDTH).bright_black().to_string());
    print(ruled(msg, " ").trim_end());
}

/// `Key..........: value` line used for the scan parameters.
pub fn aligned_line(key: &str, value: &str) {
    let dots: ColoredString = ".".repeat((KEY_WIDTH + 1).saturating_sub(key.len())).color(colors::SEPARATOR);
    print(&format!(
        "{} {}{}{} {}",
        ">".color(colors::SEPARATOR),
        key.color(colors::PRIMARY),
        dots,
        ":".color(colors::SEPARATOR),
        value.color(colors::TEXT_DEFAULT)
    ));
}

pub fn tree_head(idx: usize, name: &str) {
    let idx_str: String = format!("[{}]", idx.to_string().color(colors::ACCENT));
    let output: String = format!(
        "{} {}",
        idx_str.color(colors::SEPARATOR),
        name.color(colors::PRIMARY)
    );
    print(&output);
}

pub fn as_tree_one_level(key_value_pair: Vec<(String, ColoredString)>) {
    let key_width: usize = key_value_pair.iter().map(|(k, _)| k.len()).max().unwrap_or(0);
    for (i, (key, value)) in key_value_pair.iter().enumerate() {
        let last: bool = i + 1 == key_value_pair.len();
        let branch: ColoredString = if !last {
            "├─".bright_black()
        } else {
            "└─".bright_black()
        };
        let output: String = format!(
            " {} {}{}{} {}",
            branch,
            key.color(colors::TEXT_DEFAULT),
            ".".repeat(key_width + 1 - key.len()).color(colors::SEPARATOR),
            ":".color(colors::SEPARATOR),
            value
        );
        print(&output);
    }
}

pub fn no_results() {
    print(&format!("{}", "No open ports found".red().bold()));
}

pub fn end_of_program(q_level: u8) {
    if q_level > 0 {
        return;
    }
    print(&format!(
        "{}",
        "═".repeat(TOTAL_WIDTH).color(colors::SEPARATOR)
    ));
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

    #[test]
    fn ruled_lines_fill_the_full_width() {
        let line = ruled("⟦ SCAN ⟧", "─");
        assert_eq!(console::measure_text_width(&line), TOTAL_WIDTH);
        assert!(line.starts_with('─') && line.ends_with('─'));

        let odd = ruled("abc", "-");
        assert_eq!(odd.len(), TOTAL_WIDTH);
        assert_eq!(odd.find("abc"), Some(30));
    }

    #[test]
    fn oversized_titles_are_not_padded() {
        let long = "x".repeat(TOTAL_WIDTH + 5);
        assert_eq!(ruled(&long, "─"), long);
    }
}
