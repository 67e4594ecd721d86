//! Scanner module: turns input directories into file lists.
//!
//! - [`walker`]: deterministic directory listing via walkdir
//!
//! The scanner is the only part of dup that touches directory structure.
//! The duplicate engine consumes its output as an opaque
//! [`DirectorySet`](crate::duplicates::DirectorySet).

pub mod walker;

use std::path::PathBuf;

pub use walker::{list_files, Walker};

/// Errors that can occur while listing a directory.
///
/// All of them are fatal to a run.
#[derive(thiserror::Error, Debug)]
pub enum ScanError {
    /// Permission was denied when accessing a file or directory.
    #[error("Permission denied: {0}")]
    PermissionDenied(PathBuf),

    /// The specified path was not found.
    #[error("Path not found: {0}")]
    NotFound(PathBuf),

    /// The specified path is not a directory.
    #[error("Not a directory: {0}")]
    NotADirectory(PathBuf),

    /// An I/O error occurred while listing.
    #[error("I/O error for {path}: {source}")]
    Io {
        /// Path where the error occurred
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: std::io::Error,
    },
}
