//! Run report types and helpers.

mod result;
mod run_summary;

pub use result::{MigrationResult, MAX_FAILED_BODY_CHARS};
pub use run_summary::{MigrationReport, MirrorOutcome};
