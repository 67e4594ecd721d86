//! dup - find byte-identical files across directories.
//!
//! Files are paired according to a deterministic policy, compared by size and
//! then chunk by chunk, and resolved into a sorted `duplicate → original`
//! mapping that can be reviewed before anything is deleted.
//!
//! ```no_run
//! use dup::duplicates::{find_duplicates, FinderConfig};
//! use std::path::PathBuf;
//!
//! let dirs = vec![PathBuf::from("photos"), PathBuf::from("backup")];
//! let (records, _summary) = find_duplicates(&dirs, &FinderConfig::default().with_cross(true))?;
//! for record in records {
//!     println!("{} matches {}", record.duplicate.display(), record.original.display());
//! }
//! # Ok::<(), dup::error::DupError>(())
//! ```

pub mod actions;
pub mod cli;
pub mod config;
pub mod duplicates;
pub mod error;
pub mod logging;
pub mod output;
pub mod progress;
pub mod scanner;
pub mod signal;

use std::io::{self, BufRead, IsTerminal, Write};
use std::sync::atomic::Ordering;
use std::sync::Arc;

use anyhow::Result;
use terminal_size::{terminal_size, Width};

use crate::actions::{confirm, DeleteConfig, DeletionPlan, DELETE_PROMPT};
use crate::cli::{Cli, OutputFormat};
use crate::config::{Config, ScanOptions};
use crate::duplicates::{find_duplicates, validate_directories, FinderConfig};
use crate::error::{DupError, ExitCode};
use crate::output::{JsonOutput, TableOutput};
use crate::progress::Progress;

/// Run the application for parsed command-line arguments.
///
/// Reads the confirmation answer from stdin and writes the report to stdout.
///
/// # Errors
///
/// Any fatal [`DupError`](crate::error::DupError), wrapped in `anyhow`.
pub fn run_app(cli: Cli) -> Result<ExitCode> {
    logging::init_logging(cli.verbose, cli.quiet);
    if cli.no_color || !io::stdout().is_terminal() {
        yansi::disable();
    }

    // Argument errors win over everything else, including a broken config file
    validate_directories(&cli.dirs, cli.cross)?;

    let config = Config::load()?;
    let mut options = ScanOptions::from_cli(&cli, &config)?;
    let shutdown = signal::install_handler()?;

    if io::stdout().is_terminal() {
        options.table_width = terminal_size().map(|(Width(w), _)| usize::from(w));
    }
    let show_progress = !cli.quiet
        && options.output == OutputFormat::Table
        && io::stderr().is_terminal();
    let finder = FinderConfig::default()
        .with_cross(options.cross)
        .with_recursive(options.recursive)
        .with_chunk_size(options.chunk_size)
        .with_shutdown_flag(shutdown.get_flag())
        .with_progress_callback(Arc::new(Progress::new(!show_progress)));

    let stdin = io::stdin();
    let stdout = io::stdout();
    run(&options, &finder, &mut stdin.lock(), &mut stdout.lock())
}

/// Find duplicates, print the report, and delete on confirmation.
///
/// `input` supplies the confirmation answer; the report and prompt go to
/// `output`.
///
/// # Errors
///
/// Any fatal [`DupError`](crate::error::DupError) from the engine, or a
/// failure writing the report.
pub fn run<R: BufRead, W: Write>(
    options: &ScanOptions,
    finder: &FinderConfig,
    input: &mut R,
    output: &mut W,
) -> Result<ExitCode> {
    let (records, summary) = find_duplicates(&options.dirs, finder)?;
    log::info!(
        "Found {} duplicates among {} files in {} ms",
        records.len(),
        summary.total_files,
        summary.duration_ms
    );

    match options.output {
        OutputFormat::Table => TableOutput::new(&records)
            .with_color(yansi::is_enabled())
            .with_max_width(options.table_width)
            .write_to(output)?,
        OutputFormat::Json => JsonOutput::new(&records, &summary).write_to(output)?,
    }

    if records.is_empty() || options.dry_run {
        return Ok(ExitCode::Success);
    }

    // Duplicates as they are now; anything that changes before deletion is kept
    let plan = DeletionPlan::capture(&records);

    let interactive = options.output == OutputFormat::Table;
    let proceed = if options.assume_yes {
        true
    } else if interactive {
        confirm(input, output, DELETE_PROMPT)?
    } else {
        false
    };

    // Ctrl+C while the prompt was waiting
    if is_interrupted(finder) {
        return Err(DupError::Interrupted.into());
    }
    if !proceed {
        if interactive {
            writeln!(output, "Not deleting.")?;
        }
        return Ok(ExitCode::Success);
    }

    let delete_config = DeleteConfig {
        trash: options.trash,
        shutdown_flag: finder.shutdown_flag.clone(),
    };
    if interactive {
        writeln!(output, "Deleting {} files...", plan.len())?;
    }
    let result = plan.execute(&delete_config);
    if interactive {
        writeln!(output, "Done. {}", result.summary())?;
    } else {
        log::info!("{}", result.summary());
    }

    if result.interrupted {
        return Err(DupError::Interrupted.into());
    }
    Ok(ExitCode::Success)
}

fn is_interrupted(finder: &FinderConfig) -> bool {
    finder
        .shutdown_flag
        .as_ref()
        .is_some_and(|flag| flag.load(Ordering::SeqCst))
}
