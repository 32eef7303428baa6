mod cli;
mod distro;
mod logging;
mod settings;
mod state;
mod types;
mod ui;
mod worker;

use std::process::ExitCode;

use clap::Parser;
use tracing::{info, warn};

use crate::cli::Cli;
use crate::distro::{DistroKind, DistroProbe, detect_distro, read_os_identification};
use crate::settings::{effective_interval, load_app_settings};
use crate::types::UpdateCount;

fn main() -> ExitCode {
    restore_default_interrupt();

    let cli = Cli::parse();
    logging::init(cli.verbose);

    match run(cli) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("Error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> anyhow::Result<ExitCode> {
    let settings = load_app_settings();
    let kind = select_distro(&cli)?;
    info!(distro = kind.command_line_name(), "distribution selected");

    let probe = kind.build_probe(&settings);
    if cli.check {
        return Ok(check_once(probe.as_ref()));
    }

    let interval = effective_interval(cli.interval, &settings, probe.check_interval());
    ui::run(probe, interval, &settings)?;
    Ok(ExitCode::SUCCESS)
}

fn select_distro(cli: &Cli) -> anyhow::Result<DistroKind> {
    if let Some(kind) = cli.distro.selected() {
        return Ok(kind);
    }
    let os_identification = read_os_identification().unwrap_or_default();
    Ok(detect_distro(&os_identification)?)
}

fn check_once(probe: &dyn DistroProbe) -> ExitCode {
    let count = match probe.updateable_count() {
        Ok(count) => UpdateCount::Available(count),
        Err(err) => {
            warn!("Update check failed: {}", err);
            UpdateCount::ProbeFailed
        }
    };
    println!("{}", count.reported_count());
    if count == UpdateCount::ProbeFailed {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

/// Lets Ctrl+C terminate the process immediately.
fn restore_default_interrupt() {
    // SAFETY: called before any other thread exists; SIG_DFL installs no handler code.
    unsafe {
        libc::signal(libc::SIGINT, libc::SIG_DFL);
    }
}
