//! JSON output formatter for machine-readable results.

use super::formatter::JsonOutput;
use super::formatter::OutputFormatter;
use crate::error;
use anyhow::Result;
use archiver_core::ListedEntry;
use archiver_core::OperationResult;
use serde::Serialize;
use std::io::Write;
use std::io::{self};
use std::path::Path;

pub struct JsonFormatter;

#[derive(Serialize)]
struct OperationData {
    archive: String,
    format: &'static str,
    files: usize,
    directories: usize,
    bytes_written: u64,
    duration_ms: u128,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    entries: Vec<String>,
}

impl OperationData {
    fn new(archive: &Path, result: &OperationResult) -> Self {
        Self {
            archive: archive.display().to_string(),
            format: result.format.name(),
            files: result.files,
            directories: result.directories,
            bytes_written: result.bytes_written,
            duration_ms: result.duration.as_millis(),
            entries: result
                .entries()
                .iter()
                .map(|p| p.display().to_string())
                .collect(),
        }
    }
}

#[derive(Serialize)]
struct EntryData {
    path: String,
    kind: &'static str,
    size: u64,
}

impl From<&ListedEntry> for EntryData {
    fn from(entry: &ListedEntry) -> Self {
        Self {
            path: entry.path.display().to_string(),
            kind: match entry.kind {
                archiver_core::EntryKind::File => "file",
                archiver_core::EntryKind::Directory => "directory",
                archiver_core::EntryKind::Symlink => "symlink",
            },
            size: entry.size,
        }
    }
}

impl JsonFormatter {
    fn output<T: Serialize>(value: &T) -> Result<()> {
        let json = serde_json::to_string_pretty(value)?;
        writeln!(io::stdout(), "{json}")?;
        Ok(())
    }
}

impl OutputFormatter for JsonFormatter {
    fn format_extraction_result(&self, archive: &Path, result: &OperationResult) -> Result<()> {
        Self::output(&JsonOutput::success(
            "extract",
            OperationData::new(archive, result),
        ))
    }

    fn format_compression_result(&self, result: &OperationResult) -> Result<()> {
        let archive = result.archive().unwrap_or_else(|| Path::new(""));
        Self::output(&JsonOutput::success(
            "compress",
            OperationData::new(archive, result),
        ))
    }

    fn format_listing(&self, archive: &Path, entries: &[ListedEntry], _long: bool) -> Result<()> {
        #[derive(Serialize)]
        struct ListingData {
            archive: String,
            total_entries: usize,
            entries: Vec<EntryData>,
        }

        let data = ListingData {
            archive: archive.display().to_string(),
            total_entries: entries.len(),
            entries: entries.iter().map(EntryData::from).collect(),
        };
        Self::output(&JsonOutput::success("list", data))
    }

    fn format_error(&self, operation: &str, error: &anyhow::Error) {
        let output = JsonOutput::error(operation, error::message(error));
        let _ = Self::output(&output);
    }
}
