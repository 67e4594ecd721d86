//! Duplicate detection engine.
//!
//! - [`pairs`]: which files get compared, and in what order
//! - [`compare`]: size check plus chunked byte comparison
//! - [`resolver`]: single-pass duplicate → original resolution
//!
//! [`find_duplicates`] runs the whole pipeline for a set of directories.

pub mod compare;
pub mod pairs;
pub mod resolver;

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

pub use compare::{
    files_equal, streams_equal, ChunkedComparator, CompareError, CompareStats, Comparator,
    Verdict, DEFAULT_CHUNK_SIZE,
};
pub use pairs::{count_pairs, generate_pairs, pairs, DirectorySet, Pair};
pub use resolver::{
    resolve_duplicates, DuplicateRecord, DuplicateResolver, Resolution, ResolveStats,
};

use crate::error::DupError;
use crate::progress::ProgressCallback;
use crate::scanner::list_files;

/// Options for one duplicate search.
#[derive(Clone)]
pub struct FinderConfig {
    /// Only compare files from different directories.
    pub cross: bool,
    /// Descend into subdirectories when listing.
    pub recursive: bool,
    /// Bytes read from each file per comparison step.
    pub chunk_size: usize,
    /// Optional shutdown flag for graceful termination.
    pub shutdown_flag: Option<Arc<AtomicBool>>,
    /// Optional progress callback.
    pub progress_callback: Option<Arc<dyn ProgressCallback>>,
}

impl std::fmt::Debug for FinderConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FinderConfig")
            .field("cross", &self.cross)
            .field("recursive", &self.recursive)
            .field("chunk_size", &self.chunk_size)
            .field("shutdown_flag", &self.shutdown_flag.is_some())
            .field("progress_callback", &self.progress_callback.is_some())
            .finish()
    }
}

impl Default for FinderConfig {
    fn default() -> Self {
        Self {
            cross: false,
            recursive: false,
            chunk_size: DEFAULT_CHUNK_SIZE,
            shutdown_flag: None,
            progress_callback: None,
        }
    }
}

impl FinderConfig {
    /// Set cross-directory-only mode.
    #[must_use]
    pub fn with_cross(mut self, cross: bool) -> Self {
        self.cross = cross;
        self
    }

    /// Set recursive listing.
    #[must_use]
    pub fn with_recursive(mut self, recursive: bool) -> Self {
        self.recursive = recursive;
        self
    }

    /// Set the comparison chunk size (minimum 1).
    #[must_use]
    pub fn with_chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = chunk_size.max(1);
        self
    }

    /// Set the shutdown flag.
    #[must_use]
    pub fn with_shutdown_flag(mut self, flag: Arc<AtomicBool>) -> Self {
        self.shutdown_flag = Some(flag);
        self
    }

    /// Set the progress callback.
    #[must_use]
    pub fn with_progress_callback(mut self, callback: Arc<dyn ProgressCallback>) -> Self {
        self.progress_callback = Some(callback);
        self
    }
}

/// Summary of a finished search.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScanSummary {
    /// Directories listed
    pub directories: usize,
    /// Files found across all directories
    pub total_files: usize,
    /// Pair and duplicate counters
    pub resolve: ResolveStats,
    /// Comparator counters
    pub compare: CompareStats,
    /// Wall-clock time of the search in milliseconds
    pub duration_ms: u64,
}

/// Check the directory arguments before any listing happens.
///
/// # Errors
///
/// [`DupError::InvalidArguments`] when no directory is given, or when
/// cross-mode is requested with fewer than two directories.
pub fn validate_directories(dirs: &[PathBuf], cross: bool) -> Result<(), DupError> {
    if dirs.is_empty() {
        return Err(DupError::InvalidArguments(
            "At least one directory is required.".to_string(),
        ));
    }
    if cross && dirs.len() < 2 {
        return Err(DupError::InvalidArguments(
            "At least two directories are required for cross directory check.".to_string(),
        ));
    }
    Ok(())
}

/// List every directory into a [`DirectorySet`], stopping at the first error.
///
/// A file reachable from more than one argument (a repeated directory, or a
/// root nested inside another recursive root) is kept only in the first list
/// that contains it, so no file is ever paired with itself. Files are
/// identified by canonical path.
///
/// # Errors
///
/// [`DupError::Traversal`] for the first directory that cannot be listed.
pub fn build_directory_set<P: AsRef<Path>>(
    dirs: &[P],
    recursive: bool,
) -> Result<DirectorySet, DupError> {
    let mut seen: HashSet<PathBuf> = HashSet::new();
    let mut lists = Vec::with_capacity(dirs.len());

    for dir in dirs {
        let files = list_files(dir.as_ref(), recursive)?;
        let listed = files.len();
        let unique: Vec<PathBuf> = files
            .into_iter()
            .filter(|path| seen.insert(identity(path)))
            .collect();
        if unique.len() < listed {
            log::warn!(
                "{}: {} files already listed from an earlier directory argument",
                dir.as_ref().display(),
                listed - unique.len()
            );
        }
        lists.push(unique);
    }
    Ok(DirectorySet::new(lists))
}

/// Canonical path of a listed file, or the path itself if it cannot be resolved.
fn identity(path: &Path) -> PathBuf {
    fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf())
}

/// Run the full pipeline: validate, list, pair, compare, resolve.
///
/// # Errors
///
/// - [`DupError::InvalidArguments`] before any filesystem access
/// - [`DupError::Traversal`] if listing fails
/// - [`DupError::Compare`] if a comparison fails
/// - [`DupError::Interrupted`] if the shutdown flag is raised
pub fn find_duplicates(
    dirs: &[PathBuf],
    config: &FinderConfig,
) -> Result<(Vec<DuplicateRecord>, ScanSummary), DupError> {
    let start_time = std::time::Instant::now();
    validate_directories(dirs, config.cross)?;

    let set = build_directory_set(dirs, config.recursive)?;
    let total_pairs = count_pairs(&set, config.cross);
    log::info!(
        "Comparing {} files in {} directories ({} pairs)",
        set.total_files(),
        set.len(),
        total_pairs
    );

    let mut resolver = DuplicateResolver::new(ChunkedComparator::new(config.chunk_size));
    if let Some(ref flag) = config.shutdown_flag {
        resolver = resolver.with_shutdown_flag(Arc::clone(flag));
    }
    if let Some(ref cb) = config.progress_callback {
        cb.on_phase_start("compare", total_pairs);
        resolver = resolver.with_progress_callback(Arc::clone(cb));
    }

    let result = resolver.resolve(pairs(&set, config.cross));
    if let Some(ref cb) = config.progress_callback {
        cb.on_phase_end("compare");
    }
    let resolution = result?;

    let summary = ScanSummary {
        directories: set.len(),
        total_files: set.total_files(),
        resolve: resolution.stats,
        compare: resolver.comparator().stats(),
        duration_ms: u64::try_from(start_time.elapsed().as_millis()).unwrap_or(u64::MAX),
    };
    log::debug!(
        "Comparator: {} size mismatches, {} content mismatches, {} bytes read",
        summary.compare.size_mismatches,
        summary.compare.content_mismatches,
        summary.compare.bytes_read
    );

    Ok((resolution.records, summary))
}
