//! Report rendering.
//!
//! - [`table`]: `File` / `Matched to` table for humans
//! - [`json`]: JSON document for scripts

pub mod json;
pub mod table;

pub use json::JsonOutput;
pub use table::TableOutput;
