//! Command-line interface definitions for dup.
//!
//! # Example
//!
//! ```bash
//! # Find duplicates within and across two directories
//! dup ~/Photos ~/Backup/Photos
//!
//! # Only compare files from different directories, recursively
//! dup -xr ~/Photos ~/Backup/Photos
//!
//! # Machine-readable report, no prompt
//! dup --output json --dry-run ~/Downloads
//! ```

use clap::{Parser, ValueEnum};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Find duplicate files in the given directories and optionally delete them.
///
/// Files are compared byte for byte, and only when their sizes match. Once
/// every file has been checked, a table of duplicates and the files they
/// matched is shown, followed by an offer to delete the duplicates.
#[derive(Debug, Parser)]
#[command(name = "dup")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Directories to check
    #[arg(value_name = "DIR")]
    pub dirs: Vec<PathBuf>,

    /// Cross check across directories only (skip comparisons within a directory)
    #[arg(short = 'x', long)]
    pub cross: bool,

    /// Recursively check files in subdirectories
    #[arg(short, long)]
    pub recursive: bool,

    /// Increase verbosity level (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress all output except errors and the report
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, env = "NO_COLOR")]
    pub no_color: bool,

    /// Report format
    #[arg(short, long, value_enum)]
    pub output: Option<OutputFormat>,

    /// Delete duplicates without asking
    #[arg(short = 'y', long, conflicts_with = "dry_run")]
    pub yes: bool,

    /// Only report duplicates; never prompt or delete
    #[arg(short = 'n', long)]
    pub dry_run: bool,

    /// Move duplicates to the system trash instead of deleting them permanently
    #[arg(long)]
    pub trash: bool,

    /// Bytes to read from each file per comparison step (e.g. 64KiB, 1MiB)
    ///
    /// Supports suffixes: B, KB, KiB, MB, MiB, GB, GiB
    #[arg(long, value_name = "SIZE", value_parser = parse_size)]
    pub chunk_size: Option<u64>,
}

/// Report format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Two-column table followed by a deletion prompt
    #[default]
    Table,
    /// JSON document for scripting
    Json,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Table => write!(f, "table"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

/// Parse a human-readable size string into bytes.
///
/// Case-insensitive. Numbers without suffix are treated as bytes.
///
/// # Examples
///
/// ```
/// use dup::cli::parse_size;
///
/// assert_eq!(parse_size("4096").unwrap(), 4096);
/// assert_eq!(parse_size("64KiB").unwrap(), 65_536);
/// assert_eq!(parse_size("1MiB").unwrap(), 1_048_576);
/// assert_eq!(parse_size("1MB").unwrap(), 1_000_000);
/// ```
///
/// # Errors
///
/// Returns an error if the string is empty, not a number, negative, or has an
/// unknown suffix.
pub fn parse_size(s: &str) -> Result<u64, String> {
    let s = s.trim();
    if s.is_empty() {
        return Err("Size cannot be empty".to_string());
    }
    if s.starts_with('-') {
        return Err("Size cannot be negative".to_string());
    }

    let (num_str, suffix) = match s.find(|c: char| !c.is_ascii_digit() && c != '.') {
        Some(idx) => (&s[..idx], s[idx..].trim().to_uppercase()),
        None => (s, String::new()),
    };

    let num: f64 = num_str
        .parse()
        .map_err(|_| format!("Invalid number: '{num_str}'"))?;

    let multiplier: u64 = match suffix.as_str() {
        "" | "B" => 1,
        "KB" | "K" => 1_000,
        "KIB" => 1_024,
        "MB" | "M" => 1_000_000,
        "MIB" => 1_048_576,
        "GB" | "G" => 1_000_000_000,
        "GIB" => 1_073_741_824,
        _ => return Err(format!("Unknown size suffix: '{suffix}'")),
    };

    Ok((num * multiplier as f64) as u64)
}
