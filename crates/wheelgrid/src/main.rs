use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use tracing::debug;

use wheelgrid_cli::Cli;

use crate::commands::ExitStatus;
use crate::settings::{GlobalSettings, SummarySettings};

mod commands;
mod logging;
mod printer;
mod report;
mod settings;

fn run() -> Result<ExitStatus> {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => err.exit(),
    };

    let globals = GlobalSettings::resolve(&cli.global_args);

    anstream::ColorChoice::write_global(globals.color.into());

    // Configure the `tracing` crate, which controls internal logging.
    logging::setup_logging(logging::Level::from(globals.verbose))?;

    // Configure the `Printer`, which controls user-facing output in the CLI.
    let printer = printer::Printer::new(globals.quiet);

    // Configure the `warn!` macros, which control user-facing warnings in the CLI.
    if !globals.quiet {
        wheelgrid_warnings::enable();
    }

    let filesystem = settings::load_filesystem_options(&cli)?;
    let settings = SummarySettings::resolve(&cli, filesystem);
    debug!("Resolved settings: {settings:?}");

    commands::summary(&settings, printer)
}

fn main() -> ExitCode {
    match run() {
        Ok(status) => status.into(),
        Err(err) => {
            let mut message = String::new();
            if wheelgrid_warnings::write_error_chain(err.as_ref(), &mut message).is_ok() {
                #[allow(clippy::print_stderr)]
                {
                    anstream::eprint!("{message}");
                }
            }
            ExitStatus::Error.into()
        }
    }
}
