//! Directory listing built on walkdir.
//!
//! # Overview
//!
//! The [`Walker`] turns one input directory into the flat list of regular
//! files it contains. Listing is single-threaded and deterministic: entries
//! within each directory are visited in file-name order, so the same tree
//! always yields the same list, and therefore the same pair order later on.
//!
//! Only regular files are reported. Directories are descended into when
//! recursion is enabled; symbolic links and other special files are skipped.
//!
//! # Example
//!
//! ```no_run
//! use dup::scanner::Walker;
//! use std::path::Path;
//!
//! let walker = Walker::new(Path::new("/home/user/Downloads"), true);
//! for entry in walker.walk() {
//!     match entry {
//!         Ok(path) => println!("{}", path.display()),
//!         Err(e) => eprintln!("Error: {}", e),
//!     }
//! }
//! ```

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use super::ScanError;

/// Lists the regular files below one root directory.
#[derive(Debug, Clone)]
pub struct Walker {
    /// Root directory to list
    root: PathBuf,
    /// Descend into subdirectories
    recursive: bool,
}

impl Walker {
    /// Create a walker for `root`.
    ///
    /// With `recursive == false` only the immediate children of `root` are
    /// considered.
    #[must_use]
    pub fn new(root: &Path, recursive: bool) -> Self {
        Self {
            root: root.to_path_buf(),
            recursive,
        }
    }

    /// Check that the root exists and is a directory.
    ///
    /// # Errors
    ///
    /// [`ScanError::NotFound`], [`ScanError::NotADirectory`],
    /// [`ScanError::PermissionDenied`] or [`ScanError::Io`].
    pub fn validate_root(&self) -> Result<(), ScanError> {
        let metadata = fs::metadata(&self.root).map_err(|e| io_to_scan_error(&self.root, e))?;
        if !metadata.is_dir() {
            return Err(ScanError::NotADirectory(self.root.clone()));
        }
        Ok(())
    }

    /// Walk the directory, yielding regular file paths in discovery order.
    ///
    /// Errors are yielded inline; callers that need fail-fast behavior
    /// should stop at the first `Err` (see [`list_files`]).
    pub fn walk(&self) -> impl Iterator<Item = Result<PathBuf, ScanError>> + '_ {
        let mut walk_dir = WalkDir::new(&self.root)
            .min_depth(1)
            .follow_links(false)
            .sort_by_file_name();
        if !self.recursive {
            walk_dir = walk_dir.max_depth(1);
        }

        walk_dir
            .into_iter()
            .filter_map(move |entry_result| match entry_result {
                Ok(entry) => {
                    let file_type = entry.file_type();
                    if file_type.is_file() {
                        Some(Ok(entry.into_path()))
                    } else {
                        if file_type.is_symlink() {
                            log::trace!("Skipping symlink: {}", entry.path().display());
                        }
                        None
                    }
                }
                Err(e) => Some(Err(self.handle_walk_error(e))),
            })
    }

    fn handle_walk_error(&self, error: walkdir::Error) -> ScanError {
        let path = error
            .path()
            .map_or_else(|| self.root.clone(), Path::to_path_buf);
        log::debug!("Walk error for {}: {}", path.display(), error);
        match error.into_io_error() {
            Some(io_error) => io_to_scan_error(&path, io_error),
            None => ScanError::Io {
                path,
                source: io::Error::new(io::ErrorKind::Other, "filesystem loop detected"),
            },
        }
    }
}

fn io_to_scan_error(path: &Path, error: io::Error) -> ScanError {
    match error.kind() {
        io::ErrorKind::NotFound => ScanError::NotFound(path.to_path_buf()),
        io::ErrorKind::PermissionDenied => ScanError::PermissionDenied(path.to_path_buf()),
        _ => ScanError::Io {
            path: path.to_path_buf(),
            source: error,
        },
    }
}

/// List the regular files in `dir`, descending when `recursive` is set.
///
/// Any traversal error aborts the listing: a partial file list would
/// silently hide duplicates.
///
/// # Errors
///
/// Returns the first [`ScanError`] encountered, including an invalid root.
pub fn list_files(dir: &Path, recursive: bool) -> Result<Vec<PathBuf>, ScanError> {
    let walker = Walker::new(dir, recursive);
    walker.validate_root()?;

    let files = walker.walk().collect::<Result<Vec<_>, _>>()?;
    log::debug!(
        "Listed {} files in {}{}",
        files.len(),
        dir.display(),
        if recursive { " (recursive)" } else { "" }
    );
    Ok(files)
}
