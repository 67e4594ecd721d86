//! Deleting confirmed duplicates.
//!
//! # Overview
//!
//! Each duplicate is removed on its own: a failure is logged and recorded,
//! and the batch carries on with the next file. Files are either removed
//! permanently (the default) or moved to the system trash.
//!
//! Only the `duplicate` side of a record is ever touched; originals are
//! never deleted. Before each removal the record is checked again:
//!
//! - a record whose duplicate and original are the same path is refused
//! - the original must still exist as a regular file
//! - the duplicate must still match the [`FileSnapshot`] taken when the plan
//!   was built (still a regular file, same size and modification time)
//!
//! # Example
//!
//! ```no_run
//! use dup::actions::delete::{DeleteConfig, DeletionPlan};
//! use dup::duplicates::DuplicateRecord;
//! use std::path::PathBuf;
//!
//! let records = vec![DuplicateRecord {
//!     duplicate: PathBuf::from("/photos/copy.jpg"),
//!     original: PathBuf::from("/photos/img.jpg"),
//! }];
//! let plan = DeletionPlan::capture(&records);
//! let result = plan.execute(&DeleteConfig::default());
//! println!("{}", result.summary());
//! ```

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::SystemTime;

use thiserror::Error;

use crate::duplicates::DuplicateRecord;

/// Error type for deletion operations.
#[derive(Debug, Error)]
pub enum DeleteError {
    /// File was not found (may have been deleted or moved).
    #[error("file not found: {0}")]
    NotFound(PathBuf),

    /// Permission denied when attempting to delete.
    #[error("permission denied: {0}")]
    PermissionDenied(PathBuf),

    /// Trash operation failed.
    #[error("trash operation failed for {path}: {message}")]
    TrashFailed {
        /// File that could not be trashed
        path: PathBuf,
        /// Message from the trash backend
        message: String,
    },

    /// Not a regular file (anymore).
    #[error("not a regular file: {0}")]
    NotAFile(PathBuf),

    /// File changed between the report and the deletion.
    #[error("file was modified since it was compared: {0}")]
    Modified(PathBuf),

    /// Record names the same file as duplicate and original.
    #[error("refusing to delete {0}: it is recorded as its own original")]
    SelfMatch(PathBuf),

    /// The original a duplicate matched is gone, so the duplicate may be the
    /// last copy.
    #[error("refusing to delete {path}: original {original} is missing")]
    OriginalMissing {
        /// Duplicate that was kept
        path: PathBuf,
        /// Original that no longer exists
        original: PathBuf,
    },

    /// General I/O error.
    #[error("I/O error for {path}: {source}")]
    Io {
        /// File that could not be removed
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: io::Error,
    },
}

impl DeleteError {
    /// The file the error refers to.
    #[must_use]
    pub fn path(&self) -> &Path {
        match self {
            Self::NotFound(p)
            | Self::PermissionDenied(p)
            | Self::NotAFile(p)
            | Self::Modified(p)
            | Self::SelfMatch(p)
            | Self::OriginalMissing { path: p, .. }
            | Self::TrashFailed { path: p, .. }
            | Self::Io { path: p, .. } => p,
        }
    }

    fn from_io(path: &Path, error: io::Error) -> Self {
        match error.kind() {
            io::ErrorKind::NotFound => Self::NotFound(path.to_path_buf()),
            io::ErrorKind::PermissionDenied => Self::PermissionDenied(path.to_path_buf()),
            _ => Self::Io {
                path: path.to_path_buf(),
                source: error,
            },
        }
    }
}

/// Result of a successful deletion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteResult {
    /// Path that was deleted.
    pub path: PathBuf,
    /// Size of the deleted file in bytes.
    pub size: u64,
    /// Moved to trash (true) or removed permanently (false).
    pub trashed: bool,
}

/// Outcome of a batch of deletions.
#[derive(Debug, Default)]
pub struct BatchDeleteResult {
    /// Successfully deleted files.
    pub successes: Vec<DeleteResult>,
    /// Failed deletions.
    pub failures: Vec<DeleteError>,
    /// Total bytes freed.
    pub bytes_freed: u64,
    /// The batch stopped early on a shutdown request.
    pub interrupted: bool,
}

impl BatchDeleteResult {
    /// Number of successful deletions.
    #[must_use]
    pub fn success_count(&self) -> usize {
        self.successes.len()
    }

    /// Number of failed deletions.
    #[must_use]
    pub fn failure_count(&self) -> usize {
        self.failures.len()
    }

    /// Check if all deletions succeeded.
    #[must_use]
    pub fn all_succeeded(&self) -> bool {
        self.failures.is_empty()
    }

    /// Human-readable summary of the operation.
    #[must_use]
    pub fn summary(&self) -> String {
        if self.all_succeeded() {
            format!(
                "Deleted {} file(s), freed {} bytes",
                self.success_count(),
                self.bytes_freed
            )
        } else {
            format!(
                "Deleted {} file(s), {} failed, freed {} bytes",
                self.success_count(),
                self.failure_count(),
                self.bytes_freed
            )
        }
    }
}

/// How duplicates are removed.
#[derive(Debug, Clone, Default)]
pub struct DeleteConfig {
    /// Move to the system trash instead of removing permanently.
    pub trash: bool,
    /// Checked before every removal; once raised, no further file is touched.
    pub shutdown_flag: Option<Arc<AtomicBool>>,
}

impl DeleteConfig {
    fn is_shutdown_requested(&self) -> bool {
        self.shutdown_flag
            .as_ref()
            .is_some_and(|f| f.load(Ordering::SeqCst))
    }
}

/// State of a file at a point in time, used to detect later changes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileSnapshot {
    /// Path to the file.
    pub path: PathBuf,
    /// File size in bytes.
    pub size: u64,
    /// Last modification time, where the platform reports one.
    pub mtime: Option<SystemTime>,
}

impl FileSnapshot {
    /// Capture the current state of a regular file.
    ///
    /// # Errors
    ///
    /// `NotFound`, `PermissionDenied` or `Io` if the file cannot be stat'd,
    /// `NotAFile` if it is a directory, symlink or special file.
    pub fn capture(path: &Path) -> Result<Self, DeleteError> {
        let metadata = fs::symlink_metadata(path).map_err(|e| DeleteError::from_io(path, e))?;
        if !metadata.file_type().is_file() {
            return Err(DeleteError::NotAFile(path.to_path_buf()));
        }
        Ok(Self {
            path: path.to_path_buf(),
            size: metadata.len(),
            mtime: metadata.modified().ok(),
        })
    }

    /// Check that the file still matches this snapshot.
    ///
    /// # Errors
    ///
    /// Any [`capture`](Self::capture) error, or `Modified` if the size or
    /// modification time changed.
    pub fn verify(&self) -> Result<(), DeleteError> {
        let current = Self::capture(&self.path)?;
        let mtime_changed = matches!(
            (self.mtime, current.mtime),
            (Some(before), Some(now)) if before != now
        );
        if current.size != self.size || mtime_changed {
            return Err(DeleteError::Modified(self.path.clone()));
        }
        Ok(())
    }
}

/// Check that deleting `record.duplicate` leaves a copy behind.
///
/// # Errors
///
/// `SelfMatch` when both sides name the same file, `OriginalMissing` when the
/// original is no longer a regular file.
pub fn validate_preserves_copy(record: &DuplicateRecord) -> Result<(), DeleteError> {
    let same = record.duplicate == record.original
        || matches!(
            (fs::canonicalize(&record.duplicate), fs::canonicalize(&record.original)),
            (Ok(a), Ok(b)) if a == b
        );
    if same {
        return Err(DeleteError::SelfMatch(record.duplicate.clone()));
    }

    match fs::metadata(&record.original) {
        Ok(metadata) if metadata.is_file() => Ok(()),
        _ => Err(DeleteError::OriginalMissing {
            path: record.duplicate.clone(),
            original: record.original.clone(),
        }),
    }
}

/// Delete one file according to `config`.
///
/// # Errors
///
/// - `NotFound` if the file doesn't exist
/// - `PermissionDenied` if removal is not allowed
/// - `TrashFailed` if the trash backend refuses the file
/// - `Io` for any other failure
pub fn delete_file(path: &Path, config: &DeleteConfig) -> Result<DeleteResult, DeleteError> {
    let size = fs::symlink_metadata(path)
        .map_err(|e| DeleteError::from_io(path, e))?
        .len();

    if config.trash {
        trash::delete(path).map_err(|e| DeleteError::TrashFailed {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        log::info!("Moved to trash: {} ({} bytes)", path.display(), size);
    } else {
        fs::remove_file(path).map_err(|e| DeleteError::from_io(path, e))?;
        log::info!("Deleted: {} ({} bytes)", path.display(), size);
    }

    Ok(DeleteResult {
        path: path.to_path_buf(),
        size,
        trashed: config.trash,
    })
}

/// Duplicates to delete, each with the state it had when the report was shown.
#[derive(Debug, Clone, Default)]
pub struct DeletionPlan {
    items: Vec<PlannedDeletion>,
}

#[derive(Debug, Clone)]
struct PlannedDeletion {
    record: DuplicateRecord,
    snapshot: Option<FileSnapshot>,
}

impl DeletionPlan {
    /// Snapshot the duplicate of every record.
    ///
    /// A duplicate that cannot be snapshotted stays in the plan and fails
    /// when the plan is executed.
    #[must_use]
    pub fn capture(records: &[DuplicateRecord]) -> Self {
        let items = records
            .iter()
            .map(|record| PlannedDeletion {
                record: record.clone(),
                snapshot: FileSnapshot::capture(&record.duplicate)
                    .inspect_err(|e| log::debug!("Snapshot failed: {}", e))
                    .ok(),
            })
            .collect();
        Self { items }
    }

    /// Number of planned deletions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether nothing is planned.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Delete every planned duplicate that passes its checks, continuing
    /// past failures and stopping early on a shutdown request.
    #[must_use]
    pub fn execute(&self, config: &DeleteConfig) -> BatchDeleteResult {
        let mut result = BatchDeleteResult::default();

        for item in &self.items {
            if config.is_shutdown_requested() {
                log::warn!(
                    "Deletion interrupted, {} of {} files processed",
                    result.success_count() + result.failure_count(),
                    self.items.len()
                );
                result.interrupted = true;
                break;
            }

            match item.delete(config) {
                Ok(deleted) => {
                    result.bytes_freed += deleted.size;
                    result.successes.push(deleted);
                }
                Err(e) => {
                    log::error!("{}", e);
                    result.failures.push(e);
                }
            }
        }

        log::debug!("{}", result.summary());
        result
    }
}

impl PlannedDeletion {
    fn delete(&self, config: &DeleteConfig) -> Result<DeleteResult, DeleteError> {
        match &self.snapshot {
            Some(snapshot) => snapshot.verify()?,
            None => {
                // Unreadable when planned; report why, or treat a file that
                // has appeared since as changed
                FileSnapshot::capture(&self.record.duplicate)?;
                return Err(DeleteError::Modified(self.record.duplicate.clone()));
            }
        }
        validate_preserves_copy(&self.record)?;
        delete_file(&self.record.duplicate, config)
    }
}
