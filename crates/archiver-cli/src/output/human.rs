//! Human-readable output formatter with colors and styling.

use super::formatter::OutputFormatter;
use crate::error;
use anyhow::Result;
use archiver_core::ListedEntry;
use archiver_core::OperationResult;
use console::Term;
use console::style;
use std::path::Path;

pub struct HumanFormatter {
    verbose: bool,
    quiet: bool,
    use_colors: bool,
    term: Term,
}

impl HumanFormatter {
    pub fn new(verbose: bool, quiet: bool) -> Self {
        Self {
            verbose,
            quiet,
            use_colors: console::colors_enabled(),
            term: Term::stdout(),
        }
    }

    #[allow(clippy::cast_precision_loss)]
    fn format_size(bytes: u64) -> String {
        const KB: u64 = 1024;
        const MB: u64 = KB * 1024;
        const GB: u64 = MB * 1024;

        if bytes >= GB {
            format!("{:.1} GB", bytes as f64 / GB as f64)
        } else if bytes >= MB {
            format!("{:.1} MB", bytes as f64 / MB as f64)
        } else if bytes >= KB {
            format!("{:.1} KB", bytes as f64 / KB as f64)
        } else {
            format!("{bytes} B")
        }
    }

    fn headline(&self, message: &str) -> Result<()> {
        if self.use_colors {
            self.term
                .write_line(&format!("{} {message}", style("✓").green().bold()))?;
        } else {
            self.term.write_line(message)?;
        }
        Ok(())
    }

    fn summary(&self, result: &OperationResult) -> Result<()> {
        self.term
            .write_line(&format!("  Files:        {}", result.files))?;
        self.term
            .write_line(&format!("  Directories:  {}", result.directories))?;
        self.term.write_line(&format!(
            "  Total size:   {}",
            Self::format_size(result.bytes_written)
        ))?;
        if self.verbose {
            self.term
                .write_line(&format!("  Duration:     {:?}", result.duration))?;
        }
        Ok(())
    }
}

impl OutputFormatter for HumanFormatter {
    fn format_extraction_result(&self, archive: &Path, result: &OperationResult) -> Result<()> {
        if self.quiet {
            return Ok(());
        }

        self.headline(&format!(
            "Extracted {} ({})",
            archive.display(),
            result.format
        ))?;
        self.summary(result)?;

        if self.verbose {
            for entry in result.entries() {
                self.term.write_line(&format!("    {}", entry.display()))?;
            }
        }

        Ok(())
    }

    fn format_compression_result(&self, result: &OperationResult) -> Result<()> {
        if self.quiet {
            return Ok(());
        }

        let archive = result.archive().unwrap_or_else(|| Path::new(""));
        self.headline(&format!(
            "Archive created: {} ({})",
            archive.display(),
            result.format
        ))?;
        self.summary(result)
    }

    fn format_listing(&self, archive: &Path, entries: &[ListedEntry], long: bool) -> Result<()> {
        if self.quiet {
            return Ok(());
        }

        for entry in entries {
            if long {
                self.term.write_line(&format!(
                    "{} {:>10}  {}",
                    entry.kind.tag(),
                    entry.size,
                    entry.path.display()
                ))?;
            } else {
                self.term.write_line(&format!("{}", entry.path.display()))?;
            }
        }

        if long {
            let total: u64 = entries.iter().map(|e| e.size).sum();
            self.term.write_line("")?;
            self.term.write_line(&format!(
                "{}: {} entries, {}",
                archive.display(),
                entries.len(),
                Self::format_size(total)
            ))?;
        }

        Ok(())
    }

    fn format_error(&self, _operation: &str, error: &anyhow::Error) {
        // Always shown, even in quiet mode
        let message = error::message(error);
        let stderr = Term::stderr();
        if self.use_colors {
            let _ = stderr.write_line(&format!("{} {message}", style("error:").red().bold()));
        } else {
            let _ = stderr.write_line(&format!("error: {message}"));
        }
    }
}
