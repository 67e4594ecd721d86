//! Turning pairwise equality into a duplicate → original mapping.
//!
//! # Overview
//!
//! The resolver walks the pair stream once, in generation order. For each
//! pair `(first, second)`:
//!
//! - if both sides are the same path, or either file is already known to be
//!   a duplicate, the pair is skipped without comparing anything;
//! - otherwise the files are compared, and on equality `second` is recorded
//!   as a duplicate of `first`.
//!
//! A file is never re-classified once marked, so the "original" of a
//! duplicate is simply the first file it was found equal to. This is not
//! necessarily the oldest file or the one with the smallest path.
//!
//! The finished records are sorted by the duplicate's path string.
//!
//! # Example
//!
//! ```no_run
//! use dup::duplicates::{generate_pairs, ChunkedComparator, DirectorySet, DuplicateResolver};
//! use std::path::PathBuf;
//!
//! let dirs = DirectorySet::new(vec![vec![PathBuf::from("a/1"), PathBuf::from("a/2")]]);
//! let pairs = generate_pairs(&dirs, false);
//!
//! let resolution = DuplicateResolver::new(ChunkedComparator::default()).resolve(pairs)?;
//! for record in &resolution.records {
//!     println!("{} -> {}", record.duplicate.display(), record.original.display());
//! }
//! # Ok::<(), dup::error::DupError>(())
//! ```

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use serde::Serialize;

use super::compare::Comparator;
use super::pairs::Pair;
use crate::error::DupError;
use crate::progress::ProgressCallback;

/// One confirmed duplicate and the file it matched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DuplicateRecord {
    /// File found identical to an earlier one; candidate for deletion
    pub duplicate: PathBuf,
    /// File it matched; kept
    pub original: PathBuf,
}

/// Counters for one resolver run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ResolveStats {
    /// Pairs taken from the stream
    pub pairs_seen: u64,
    /// Pairs skipped because one side was already a duplicate
    pub pairs_skipped: u64,
    /// Pairs handed to the comparator
    pub comparisons: u64,
    /// Duplicates recorded
    pub duplicates: usize,
}

/// Output of [`DuplicateResolver::resolve`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Resolution {
    /// Records sorted by duplicate path
    pub records: Vec<DuplicateRecord>,
    /// Counters
    pub stats: ResolveStats,
}

/// Single-pass duplicate resolver.
///
/// Owns the `marked` map (duplicate → original) for the duration of one run.
pub struct DuplicateResolver<C> {
    comparator: C,
    marked: HashMap<PathBuf, PathBuf>,
    shutdown_flag: Option<Arc<AtomicBool>>,
    progress: Option<Arc<dyn ProgressCallback>>,
}

impl<C: Comparator> DuplicateResolver<C> {
    /// Create a resolver with an empty mapping.
    #[must_use]
    pub fn new(comparator: C) -> Self {
        Self {
            comparator,
            marked: HashMap::new(),
            shutdown_flag: None,
            progress: None,
        }
    }

    /// Abort with [`DupError::Interrupted`] once `flag` becomes `true`.
    #[must_use]
    pub fn with_shutdown_flag(mut self, flag: Arc<AtomicBool>) -> Self {
        self.shutdown_flag = Some(flag);
        self
    }

    /// Report one tick per pair to `callback`.
    #[must_use]
    pub fn with_progress_callback(mut self, callback: Arc<dyn ProgressCallback>) -> Self {
        self.progress = Some(callback);
        self
    }

    /// Borrow the comparator, e.g. to read its statistics.
    #[must_use]
    pub fn comparator(&self) -> &C {
        &self.comparator
    }

    fn is_shutdown_requested(&self) -> bool {
        self.shutdown_flag
            .as_ref()
            .is_some_and(|f| f.load(Ordering::SeqCst))
    }

    /// Resolve `pairs` into sorted duplicate records.
    ///
    /// # Errors
    ///
    /// - [`DupError::Compare`] if any comparison fails; no partial result is
    ///   returned
    /// - [`DupError::Interrupted`] if the shutdown flag is raised
    pub fn resolve<'a, I>(&mut self, pairs: I) -> Result<Resolution, DupError>
    where
        I: IntoIterator<Item = Pair<'a>>,
    {
        let mut stats = ResolveStats::default();

        for pair in pairs {
            if self.is_shutdown_requested() {
                log::debug!("Resolver: shutdown requested after {} pairs", stats.pairs_seen);
                return Err(DupError::Interrupted);
            }

            stats.pairs_seen += 1;
            if let Some(ref cb) = self.progress {
                cb.on_progress(stats.pairs_seen, pair.second);
            }

            if pair.first == pair.second {
                log::warn!("Skipping file paired with itself: {}", pair.first.display());
                stats.pairs_skipped += 1;
                continue;
            }

            if self.marked.contains_key(pair.first) || self.marked.contains_key(pair.second) {
                stats.pairs_skipped += 1;
                continue;
            }

            stats.comparisons += 1;
            if self.comparator.equal(pair.first, pair.second)? {
                log::debug!(
                    "Duplicate: {} matches {}",
                    pair.second.display(),
                    pair.first.display()
                );
                self.marked
                    .insert(pair.second.to_path_buf(), pair.first.to_path_buf());
            }
        }

        let mut records: Vec<DuplicateRecord> = self
            .marked
            .drain()
            .map(|(duplicate, original)| DuplicateRecord {
                duplicate,
                original,
            })
            .collect();
        records.sort_by(|a, b| a.duplicate.as_os_str().cmp(b.duplicate.as_os_str()));
        stats.duplicates = records.len();

        log::info!(
            "Resolved {} pairs: {} compared, {} skipped, {} duplicates",
            stats.pairs_seen,
            stats.comparisons,
            stats.pairs_skipped,
            stats.duplicates
        );

        Ok(Resolution { records, stats })
    }
}

/// Resolve `pairs` with `comparator` and return only the records.
///
/// # Errors
///
/// See [`DuplicateResolver::resolve`].
pub fn resolve_duplicates<'a, C, I>(
    pairs: I,
    comparator: C,
) -> Result<Vec<DuplicateRecord>, DupError>
where
    C: Comparator,
    I: IntoIterator<Item = Pair<'a>>,
{
    DuplicateResolver::new(comparator)
        .resolve(pairs)
        .map(|resolution| resolution.records)
}
