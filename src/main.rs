//! G600 Controller
//!
//! Runs shell commands for Logitech G600 side buttons until interrupted.

use clap::Parser;
use g600_controller::cli::Cli;
use g600_controller::controller;
use g600_controller::dispatch::Dispatcher;
use g600_controller::executor::ShellExecutor;
use g600_controller::keymap::CommandTable;
use g600_controller::{ControllerError, logging};
use std::process::ExitCode;
use tracing::{error, info, warn};

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let _ = e.print();
            return ExitCode::FAILURE;
        }
    };

    logging::init(cli.log_level());

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("Error: {}", e);
            for hint in e.suggestions() {
                warn!("Suggestion: {}", hint);
            }
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<(), ControllerError> {
    logging::print_banner();

    let table = CommandTable::builtin()?;
    if table.is_empty() {
        warn!("Key map has no bindings; button presses will do nothing");
    } else {
        info!("Loaded {} key bindings", table.len());
    }

    let mut device = controller::connect()?;

    // The grab is released by the kernel when the process exits.
    if let Err(e) = ctrlc::set_handler(|| {
        info!("G600 controller shutting down");
        std::process::exit(0);
    }) {
        warn!("Failed to install signal handler: {}", e);
    }

    info!("G600 controller started successfully.");

    let mut dispatcher = Dispatcher::new(&table, ShellExecutor::new());
    controller::run(&mut device, &mut dispatcher)
}
