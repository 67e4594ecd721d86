//! Acting on a finished duplicate report.
//!
//! - [`confirm`]: yes/no prompt, default no
//! - [`delete`]: removal (or trashing) of confirmed duplicates, re-checked
//!   just before each removal and continuing past individual failures

pub mod confirm;
pub mod delete;

pub use confirm::{confirm, DELETE_PROMPT};
pub use delete::{
    delete_file, validate_preserves_copy, BatchDeleteResult, DeleteConfig, DeleteError,
    DeleteResult, DeletionPlan, FileSnapshot,
};
