//! Subcommand implementations.

pub mod completion;
pub mod compress;
pub mod extract;
pub mod list;

use crate::cli::Cli;
use crate::cli::Commands;
use crate::output::OutputFormatter;
use anyhow::Result;

/// Runs the parsed subcommand.
pub fn run(cli: &Cli, formatter: &dyn OutputFormatter) -> Result<()> {
    match &cli.command {
        Commands::Extract(args) => extract::execute(args, formatter),
        Commands::Compress(args) => compress::execute(args, formatter),
        Commands::List(args) => list::execute(args, formatter),
        Commands::Completion { shell } => {
            completion::execute(*shell);
            Ok(())
        }
    }
}
