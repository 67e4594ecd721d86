//! Byte-for-byte file comparison.
//!
//! # Overview
//!
//! Two files are equal when they have the same length and the same bytes.
//! Lengths come from metadata, so files of different sizes are rejected
//! without reading any content. Same-size files are streamed side by side in
//! fixed-size chunks; the first differing chunk ends the comparison.
//!
//! Memory use is bounded by two chunk buffers regardless of file size.
//! Both file handles live only for the duration of one comparison.
//!
//! # Example
//!
//! ```no_run
//! use dup::duplicates::{files_equal, DEFAULT_CHUNK_SIZE};
//! use std::path::Path;
//!
//! let same = files_equal(Path::new("a.bin"), Path::new("b.bin"), DEFAULT_CHUNK_SIZE)?;
//! println!("identical: {same}");
//! # Ok::<(), dup::duplicates::CompareError>(())
//! ```

use std::fs::File;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

/// Default number of bytes read from each file per step (1 MiB).
pub const DEFAULT_CHUNK_SIZE: usize = 1024 * 1024;

/// Errors raised while comparing two files.
#[derive(thiserror::Error, Debug)]
pub enum CompareError {
    /// A file could not be opened.
    #[error("Failed to open {path}: {source}")]
    Open {
        /// File that failed to open
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: io::Error,
    },

    /// File metadata could not be read.
    #[error("Failed to stat {path}: {source}")]
    Metadata {
        /// File whose metadata was unavailable
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: io::Error,
    },

    /// A read failed part way through the comparison.
    #[error("Failed to read {path}: {source}")]
    Read {
        /// File that failed to read
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: io::Error,
    },
}

impl CompareError {
    /// The file the error refers to.
    #[must_use]
    pub fn path(&self) -> &Path {
        match self {
            Self::Open { path, .. } | Self::Metadata { path, .. } | Self::Read { path, .. } => {
                path
            }
        }
    }
}

/// Decides whether two files are byte-identical.
///
/// The resolver only talks to this trait, so tests can count or script
/// comparisons without touching the filesystem.
pub trait Comparator {
    /// Compare the files at `a` and `b`.
    ///
    /// # Errors
    ///
    /// Returns [`CompareError`] when either file cannot be opened, stat'd or
    /// read.
    fn equal(&mut self, a: &Path, b: &Path) -> Result<bool, CompareError>;
}

/// Result of comparing two streams, kept for statistics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    /// Same length and same bytes.
    Equal,
    /// Lengths differed, no content was read.
    SizeMismatch,
    /// Same length, but content (or actual stream length) differed.
    ContentMismatch,
}

impl Verdict {
    /// Whether the files were equal.
    #[must_use]
    pub fn is_equal(self) -> bool {
        self == Self::Equal
    }
}

/// Counters kept by [`ChunkedComparator`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CompareStats {
    /// Comparisons performed
    pub comparisons: usize,
    /// Comparisons settled by size alone
    pub size_mismatches: usize,
    /// Same-size comparisons that found differing content
    pub content_mismatches: usize,
    /// Bytes read across both files of every comparison
    pub bytes_read: u64,
}

/// The filesystem [`Comparator`]: size check, then chunked streaming.
#[derive(Debug, Clone)]
pub struct ChunkedComparator {
    chunk_size: usize,
    stats: CompareStats,
}

impl Default for ChunkedComparator {
    fn default() -> Self {
        Self::new(DEFAULT_CHUNK_SIZE)
    }
}

impl ChunkedComparator {
    /// Create a comparator reading `chunk_size` bytes per step.
    ///
    /// A zero chunk size is raised to one byte.
    #[must_use]
    pub fn new(chunk_size: usize) -> Self {
        Self {
            chunk_size: chunk_size.max(1),
            stats: CompareStats::default(),
        }
    }

    /// Bytes read from each file per step.
    #[must_use]
    pub fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    /// Counters accumulated so far.
    #[must_use]
    pub fn stats(&self) -> CompareStats {
        self.stats
    }
}

impl Comparator for ChunkedComparator {
    fn equal(&mut self, a: &Path, b: &Path) -> Result<bool, CompareError> {
        let (verdict, bytes_read) = compare_files(a, b, self.chunk_size)?;

        self.stats.comparisons += 1;
        self.stats.bytes_read += bytes_read;
        match verdict {
            Verdict::Equal => {}
            Verdict::SizeMismatch => self.stats.size_mismatches += 1,
            Verdict::ContentMismatch => self.stats.content_mismatches += 1,
        }

        log::trace!("{} <-> {}: {:?}", a.display(), b.display(), verdict);
        Ok(verdict.is_equal())
    }
}

/// Report whether the files at `a` and `b` are byte-identical.
///
/// # Errors
///
/// Returns [`CompareError`] if either file cannot be opened, its metadata
/// cannot be read, or a read fails mid-comparison.
pub fn files_equal(a: &Path, b: &Path, chunk_size: usize) -> Result<bool, CompareError> {
    compare_files(a, b, chunk_size).map(|(verdict, _)| verdict.is_equal())
}

/// Compare two files, returning the verdict and the number of bytes read.
fn compare_files(a: &Path, b: &Path, chunk_size: usize) -> Result<(Verdict, u64), CompareError> {
    let (file_a, len_a) = open_with_len(a)?;
    let (file_b, len_b) = open_with_len(b)?;

    let mut a_reader = Tracked::new(file_a, a);
    let mut b_reader = Tracked::new(file_b, b);
    let verdict = streams_equal(&mut a_reader, len_a, &mut b_reader, len_b, chunk_size)
        .map_err(|e| {
            let path = a_reader.failed_path().or_else(|| b_reader.failed_path());
            CompareError::Read {
                path: path.unwrap_or(a).to_path_buf(),
                source: e,
            }
        })?;

    Ok((verdict, a_reader.bytes_read + b_reader.bytes_read))
}

fn open_with_len(path: &Path) -> Result<(File, u64), CompareError> {
    let file = File::open(path).map_err(|e| CompareError::Open {
        path: path.to_path_buf(),
        source: e,
    })?;
    let len = file
        .metadata()
        .map_err(|e| CompareError::Metadata {
            path: path.to_path_buf(),
            source: e,
        })?
        .len();
    Ok((file, len))
}

/// Compare two streams whose lengths are already known.
///
/// When `len_a != len_b` neither stream is read. Otherwise both are read in
/// steps of up to `chunk_size` bytes until they diverge or both end. A stream
/// that ends before the other makes the result a mismatch, even though the
/// declared lengths agreed.
///
/// # Errors
///
/// Propagates the first read error other than [`io::ErrorKind::Interrupted`].
pub fn streams_equal<A: Read, B: Read>(
    a: &mut A,
    len_a: u64,
    b: &mut B,
    len_b: u64,
    chunk_size: usize,
) -> io::Result<Verdict> {
    if len_a != len_b {
        return Ok(Verdict::SizeMismatch);
    }

    // One byte past the declared length is enough to notice a file that grew.
    let cap = usize::try_from(len_a.saturating_add(1)).unwrap_or(usize::MAX);
    let buf_len = chunk_size.max(1).min(cap);
    let mut buf_a = vec![0u8; buf_len];
    let mut buf_b = vec![0u8; buf_len];

    loop {
        let n_a = read_chunk(a, &mut buf_a)?;
        let n_b = read_chunk(b, &mut buf_b)?;

        if n_a == 0 && n_b == 0 {
            return Ok(Verdict::Equal);
        }
        if n_a != n_b || buf_a[..n_a] != buf_b[..n_b] {
            return Ok(Verdict::ContentMismatch);
        }
    }
}

/// Fill `buf` as far as the stream allows. Returns 0 only at end of stream.
fn read_chunk<R: Read>(reader: &mut R, buf: &mut [u8]) -> io::Result<usize> {
    let mut filled = 0;
    while filled < buf.len() {
        match reader.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => {}
            Err(e) => return Err(e),
        }
    }
    Ok(filled)
}

/// Reader wrapper remembering byte counts and which file failed.
struct Tracked<'p, R> {
    inner: R,
    path: &'p Path,
    bytes_read: u64,
    failed: bool,
}

impl<'p, R: Read> Tracked<'p, R> {
    fn new(inner: R, path: &'p Path) -> Self {
        Self {
            inner,
            path,
            bytes_read: 0,
            failed: false,
        }
    }

    fn failed_path(&self) -> Option<&'p Path> {
        self.failed.then_some(self.path)
    }
}

impl<R: Read> Read for Tracked<'_, R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        match self.inner.read(buf) {
            Ok(n) => {
                self.bytes_read += n as u64;
                Ok(n)
            }
            Err(e) => {
                if e.kind() != io::ErrorKind::Interrupted {
                    self.failed = true;
                }
                Err(e)
            }
        }
    }
}
