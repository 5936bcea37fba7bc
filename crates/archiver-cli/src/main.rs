//! Archiver CLI - extract, compress and list archives, picking the format
//! from the archive's extension.

mod cli;
mod commands;
mod error;
mod logging;
mod output;

use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = cli::parse();
    logging::init(cli.verbose, cli.quiet);

    let formatter = output::create_formatter(cli.json, cli.verbose > 0, cli.quiet);

    match commands::run(&cli, &*formatter) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log::debug!("{err:?}");
            formatter.format_error(cli.command.operation(), &err);
            ExitCode::from(error::exit_code(&err))
        }
    }
}
