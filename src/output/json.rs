//! JSON report for scripting.
//!
//! # Output Schema
//!
//! ```json
//! {
//!   "duplicates": [
//!     { "file": "/photos/copy.jpg", "matched_to": "/photos/img.jpg" }
//!   ],
//!   "summary": {
//!     "directories": 2,
//!     "total_files": 100,
//!     "pairs": 4950,
//!     "comparisons": 12,
//!     "skipped_pairs": 3,
//!     "duplicate_files": 1,
//!     "bytes_compared": 2048,
//!     "scan_duration_ms": 15
//!   }
//! }
//! ```

use std::io::Write;

use serde::Serialize;

use crate::duplicates::{DuplicateRecord, ScanSummary};

/// One duplicate in JSON form.
#[derive(Debug, Clone, Serialize)]
pub struct JsonDuplicate {
    /// The duplicate file
    pub file: String,
    /// The file it matched
    pub matched_to: String,
}

impl From<&DuplicateRecord> for JsonDuplicate {
    fn from(record: &DuplicateRecord) -> Self {
        Self {
            file: record.duplicate.to_string_lossy().into_owned(),
            matched_to: record.original.to_string_lossy().into_owned(),
        }
    }
}

/// Run statistics in JSON form.
#[derive(Debug, Clone, Serialize)]
pub struct JsonSummary {
    /// Directories listed
    pub directories: usize,
    /// Files found
    pub total_files: usize,
    /// Pairs generated
    pub pairs: u64,
    /// Pairs actually compared
    pub comparisons: u64,
    /// Pairs skipped because one file was already a duplicate
    pub skipped_pairs: u64,
    /// Duplicates found
    pub duplicate_files: usize,
    /// Bytes read while comparing
    pub bytes_compared: u64,
    /// Wall-clock duration
    pub scan_duration_ms: u64,
}

impl From<&ScanSummary> for JsonSummary {
    fn from(summary: &ScanSummary) -> Self {
        Self {
            directories: summary.directories,
            total_files: summary.total_files,
            pairs: summary.resolve.pairs_seen,
            comparisons: summary.resolve.comparisons,
            skipped_pairs: summary.resolve.pairs_skipped,
            duplicate_files: summary.resolve.duplicates,
            bytes_compared: summary.compare.bytes_read,
            scan_duration_ms: summary.duration_ms,
        }
    }
}

/// Complete JSON document.
#[derive(Debug, Clone, Serialize)]
pub struct JsonOutput {
    /// Duplicates sorted by file path
    pub duplicates: Vec<JsonDuplicate>,
    /// Statistics
    pub summary: JsonSummary,
}

impl JsonOutput {
    /// Build the document from the engine's results.
    #[must_use]
    pub fn new(records: &[DuplicateRecord], summary: &ScanSummary) -> Self {
        Self {
            duplicates: records.iter().map(JsonDuplicate::from).collect(),
            summary: JsonSummary::from(summary),
        }
    }

    /// Write pretty-printed JSON followed by a newline.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or writing fails.
    pub fn write_to<W: Write>(&self, writer: &mut W) -> anyhow::Result<()> {
        serde_json::to_writer_pretty(&mut *writer, self)?;
        writeln!(writer)?;
        Ok(())
    }
}
