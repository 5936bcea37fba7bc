//! Compress command implementation.

use crate::cli::CompressArgs;
use crate::output::OutputFormatter;
use anyhow::Result;
use archiver_core::Archiver;
use archiver_core::ArchiverConfig;

pub fn execute(args: &CompressArgs, formatter: &dyn OutputFormatter) -> Result<()> {
    let mut config = ArchiverConfig::default()
        .with_follow_symlinks(args.follow_symlinks)
        .with_preserve_permissions(!args.no_preserve_permissions);
    // clap already restricts the level to 1-9
    if let Some(level) = args.level {
        config = config.with_compression_level(level);
    }

    let result = Archiver::new(config).compress(&args.archive, &args.sources)?;

    formatter.format_compression_result(&result)
}
