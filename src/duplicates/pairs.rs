//! Candidate pair generation.
//!
//! # Overview
//!
//! Every file that could be a duplicate of another is paired with it exactly
//! once, in an order that depends only on the input order of directories and
//! the discovery order of files within them:
//!
//! 1. for each directory `i`:
//!    - unless cross-mode is on, every intra-directory pair `(x, y)` with
//!      `x < y`, `x`-major;
//!    - for every later directory `j > i`, the product `files[i] × files[j]`,
//!      outer list first.
//!
//! That order decides which file becomes the "original" of a duplicate, so it
//! must not change.
//!
//! # Example
//!
//! ```
//! use dup::duplicates::{count_pairs, generate_pairs, DirectorySet};
//! use std::path::PathBuf;
//!
//! let dirs = DirectorySet::new(vec![
//!     vec![PathBuf::from("a/1"), PathBuf::from("a/2")],
//!     vec![PathBuf::from("b/1")],
//! ]);
//!
//! let pairs = generate_pairs(&dirs, false);
//! assert_eq!(pairs.len(), 3);
//! assert_eq!(count_pairs(&dirs, false), 3);
//!
//! // Cross-mode drops the (a/1, a/2) pair
//! assert_eq!(generate_pairs(&dirs, true).len(), 2);
//! ```

use std::path::{Path, PathBuf};

/// File lists for every input directory, in input order.
///
/// Built once per run from the scanner's output and never modified.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DirectorySet {
    dirs: Vec<Vec<PathBuf>>,
}

impl DirectorySet {
    /// Wrap per-directory file lists.
    #[must_use]
    pub fn new(dirs: Vec<Vec<PathBuf>>) -> Self {
        Self { dirs }
    }

    /// Number of input directories.
    #[must_use]
    pub fn len(&self) -> usize {
        self.dirs.len()
    }

    /// Whether no directories were supplied.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.dirs.is_empty()
    }

    /// Files of directory `index`.
    #[must_use]
    pub fn files(&self, index: usize) -> &[PathBuf] {
        &self.dirs[index]
    }

    /// Total number of files across all directories.
    #[must_use]
    pub fn total_files(&self) -> usize {
        self.dirs.iter().map(Vec::len).sum()
    }

    /// Iterate directories in input order.
    pub fn iter(&self) -> impl Iterator<Item = &[PathBuf]> {
        self.dirs.iter().map(Vec::as_slice)
    }
}

/// Two files to compare. `first` precedes `second` in generation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pair<'a> {
    /// Candidate original
    pub first: &'a Path,
    /// Candidate duplicate
    pub second: &'a Path,
}

impl<'a> Pair<'a> {
    /// Create a pair.
    #[must_use]
    pub fn new(first: &'a Path, second: &'a Path) -> Self {
        Self { first, second }
    }
}

/// Lazily yield the pairs for `dirs` in generation order.
///
/// With `cross` set, files within the same directory are never paired.
pub fn pairs(dirs: &DirectorySet, cross: bool) -> impl Iterator<Item = Pair<'_>> {
    let dir_count = dirs.len();
    (0..dir_count).flat_map(move |i| {
        let files = dirs.files(i);

        let within = (!cross)
            .then(|| {
                files.iter().enumerate().flat_map(move |(x, a)| {
                    files[x + 1..].iter().map(move |b| Pair::new(a, b))
                })
            })
            .into_iter()
            .flatten();

        let across = (i + 1..dir_count).flat_map(move |j| {
            let others = dirs.files(j);
            files
                .iter()
                .flat_map(move |a| others.iter().map(move |b| Pair::new(a, b)))
        });

        within.chain(across)
    })
}

/// Collect [`pairs`] into a vector.
#[must_use]
pub fn generate_pairs(dirs: &DirectorySet, cross: bool) -> Vec<Pair<'_>> {
    let pairs: Vec<_> = pairs(dirs, cross).collect();
    log::debug!(
        "Generated {} pairs from {} directories ({} files, cross={})",
        pairs.len(),
        dirs.len(),
        dirs.total_files(),
        cross
    );
    pairs
}

/// Number of pairs [`pairs`] would yield, computed without generating them.
#[must_use]
pub fn count_pairs(dirs: &DirectorySet, cross: bool) -> u64 {
    let sizes: Vec<u64> = dirs.iter().map(|files| files.len() as u64).collect();

    let mut total = 0u64;
    for (i, &n) in sizes.iter().enumerate() {
        if !cross {
            total += n * n.saturating_sub(1) / 2;
        }
        total += sizes[i + 1..].iter().map(|&m| n * m).sum::<u64>();
    }
    total
}
