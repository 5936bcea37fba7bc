//! CLI argument parsing using clap.

use clap::ArgAction;
use clap::Parser;
use clap::Subcommand;
use clap_complete::Shell;
use std::ffi::OsStr;
use std::ffi::OsString;
use std::path::Path;
use std::path::PathBuf;

/// Subcommand names that may also be used as the program name, so that a
/// link called `archiver-extract` behaves like `archiver archiver-extract`.
const MULTICALL_NAMES: [&str; 3] = ["archiver-extract", "archiver-compress", "archiver-list"];

#[derive(Parser)]
#[command(name = "archiver")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase log output (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Output results in JSON format
    #[arg(short, long, global = true)]
    pub json: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Extract an archive into a directory
    #[command(name = "archiver-extract", visible_alias = "extract")]
    Extract(ExtractArgs),
    /// Compress files and directories into a new archive
    #[command(name = "archiver-compress", visible_alias = "compress")]
    Compress(CompressArgs),
    /// List archive contents without extraction
    #[command(name = "archiver-list", visible_alias = "list")]
    List(ListArgs),
    /// Generate shell completions
    Completion {
        /// Target shell
        #[arg(value_enum)]
        shell: Shell,
    },
}

impl Commands {
    /// Operation name used in JSON output.
    pub const fn operation(&self) -> &'static str {
        match self {
            Self::Extract(_) => "extract",
            Self::Compress(_) => "compress",
            Self::List(_) => "list",
            Self::Completion { .. } => "completion",
        }
    }
}

#[derive(clap::Args)]
pub struct ExtractArgs {
    /// Path to the archive file; the format is picked from its extension
    #[arg(value_name = "ARCHIVE")]
    pub archive: PathBuf,

    /// Directory to extract into (created if missing)
    #[arg(value_name = "DESTINATION")]
    pub destination: PathBuf,

    /// Do not restore permission bits stored in the archive
    #[arg(long)]
    pub no_preserve_permissions: bool,
}

#[derive(clap::Args)]
pub struct CompressArgs {
    /// Archive to create; the format is picked from its extension
    #[arg(value_name = "ARCHIVE")]
    pub archive: PathBuf,

    /// Source files or directories to archive
    #[arg(value_name = "SOURCE", required = true)]
    pub sources: Vec<PathBuf>,

    /// Compression level (1-9)
    #[arg(short = 'l', long, value_parser = clap::value_parser!(u8).range(1..=9))]
    pub level: Option<u8>,

    /// Archive the files symlinks point to instead of the links
    #[arg(long)]
    pub follow_symlinks: bool,

    /// Do not store permission bits
    #[arg(long)]
    pub no_preserve_permissions: bool,
}

#[derive(clap::Args)]
pub struct ListArgs {
    /// Path to the archive file
    #[arg(value_name = "ARCHIVE")]
    pub archive: PathBuf,

    /// Show entry type and size
    #[arg(short, long)]
    pub long: bool,
}

/// Parses the process arguments, honouring multicall program names.
pub fn parse() -> Cli {
    Cli::parse_from(multicall_args(std::env::args_os()))
}

/// Inserts the program name as subcommand when it is one of
/// [`MULTICALL_NAMES`].
fn multicall_args(args: impl IntoIterator<Item = OsString>) -> Vec<OsString> {
    let mut args: Vec<OsString> = args.into_iter().collect();
    if let Some(name) = args
        .first()
        .and_then(|arg0| Path::new(arg0).file_stem())
        .and_then(OsStr::to_str)
        && MULTICALL_NAMES.contains(&name)
    {
        let name = OsString::from(name);
        args.insert(1, name);
    }
    args
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    fn parse_from(args: &[&str]) -> Result<Cli, clap::Error> {
        Cli::try_parse_from(multicall_args(args.iter().map(OsString::from)))
    }

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_extract() {
        let cli = parse_from(&["archiver", "archiver-extract", "test.tar", "out"]).unwrap();
        let Commands::Extract(args) = cli.command else {
            panic!("expected extract");
        };
        assert_eq!(args.archive, PathBuf::from("test.tar"));
        assert_eq!(args.destination, PathBuf::from("out"));
        assert!(!args.no_preserve_permissions);
    }

    #[test]
    fn test_parse_alias() {
        let cli = parse_from(&["archiver", "extract", "test.zip", "out"]).unwrap();
        assert_eq!(cli.command.operation(), "extract");
    }

    #[test]
    fn test_parse_compress() {
        let cli = parse_from(&[
            "archiver",
            "compress",
            "-l",
            "9",
            "out.tar.gz",
            "testfile_1.txt",
            "folder",
        ])
        .unwrap();
        let Commands::Compress(args) = cli.command else {
            panic!("expected compress");
        };
        assert_eq!(args.level, Some(9));
        assert_eq!(args.sources.len(), 2);
    }

    #[test]
    fn test_compress_requires_source() {
        assert!(parse_from(&["archiver", "compress", "out.zip"]).is_err());
    }

    #[test]
    fn test_compress_level_range() {
        assert!(parse_from(&["archiver", "compress", "-l", "0", "a.zip", "b"]).is_err());
        assert!(parse_from(&["archiver", "compress", "-l", "10", "a.zip", "b"]).is_err());
    }

    #[test]
    fn test_verbose_count() {
        let cli = parse_from(&["archiver", "-vv", "list", "a.zip"]).unwrap();
        assert_eq!(cli.verbose, 2);
        assert!(parse_from(&["archiver", "-v", "-q", "list", "a.zip"]).is_err());
    }

    #[test]
    fn test_multicall_name() {
        let cli = parse_from(&["/usr/local/bin/archiver-extract", "test.tar", "out"]).unwrap();
        assert_eq!(cli.command.operation(), "extract");

        let cli = parse_from(&["archiver-compress", "a.zip", "b"]).unwrap();
        assert_eq!(cli.command.operation(), "compress");
    }

    #[test]
    fn test_multicall_ignores_other_names() {
        let args = multicall_args(["archiver", "list", "a.zip"].map(OsString::from));
        assert_eq!(args.len(), 3);
    }
}
