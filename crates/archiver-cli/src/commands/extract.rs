//! Extract command implementation.

use crate::cli::ExtractArgs;
use crate::output::OutputFormatter;
use anyhow::Result;
use archiver_core::Archiver;
use archiver_core::ArchiverConfig;

pub fn execute(args: &ExtractArgs, formatter: &dyn OutputFormatter) -> Result<()> {
    let config =
        ArchiverConfig::default().with_preserve_permissions(!args.no_preserve_permissions);

    let result = Archiver::new(config).extract(&args.archive, &args.destination)?;

    formatter.format_extraction_result(&args.archive, &result)
}
