mod commands;
mod terminal;

use std::process::ExitCode;

use commands::{CommandLine, scan};
use portsweep_common::config::Config;
use portsweep_common::error::ScanError;
use terminal::{logging, print};
use tracing::error;

const EXIT_FAILURE: u8 = 1;
const EXIT_INVALID_TARGETS: u8 = 3;
const EXIT_INVALID_PORT: u8 = 4;

#[tokio::main]
async fn main() -> ExitCode {
    let commands = CommandLine::parse_args();

    logging::init_logging(commands.verbose);

    let cfg = Config {
        no_banner: commands.no_banner,
        quiet: commands.quiet,
    };
    print::banner(&cfg);

    match scan::scan(&commands, &cfg).await {
        Ok(_) => {
            print::end_of_program(cfg.quiet);
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("{e}");
            ExitCode::from(exit_status(&e))
        }
    }
}

/// Bad targets and bad ports each get their own exit status.
fn exit_status(e: &anyhow::Error) -> u8 {
    match e.downcast_ref::<ScanError>() {
        Some(ScanError::Validation { .. }) => EXIT_INVALID_TARGETS,
        Some(ScanError::Range(_)) => EXIT_INVALID_PORT,
        _ => EXIT_FAILURE,
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
