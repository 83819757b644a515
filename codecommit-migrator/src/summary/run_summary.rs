//! Run report.

use super::result::MigrationResult;
use crate::runner::Stage;
use serde::Serialize;
use std::path::PathBuf;

/// How the mirror stage ended.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MirrorOutcome {
    /// The run stopped before the mirror stage.
    #[default]
    NotReached,
    /// History was pushed to GitHub.
    Pushed,
    /// Mirroring was disabled by configuration.
    Skipped,
    /// The mirror stage failed.
    Failed,
}

/// Terminal report of a run.
#[derive(Debug, Clone, Default, Serialize)]
pub struct MigrationReport {
    /// Last stage the run reached.
    pub stage: Stage,

    /// Workspace used by the run, if one was created.
    pub workspace: Option<PathBuf>,

    /// Whether the workspace was removed at the end of the run.
    pub workspace_removed: bool,

    /// Mirror stage outcome.
    pub mirror: MirrorOutcome,

    /// Number of open pull requests found on CodeCommit.
    pub change_requests_found: usize,

    /// One result per translated pull request, in order.
    pub results: Vec<MigrationResult>,

    /// Error that stopped the pipeline, if any.
    pub fatal_error: Option<String>,
}

impl MigrationReport {
    /// Creates a new empty report.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of pull requests created.
    #[must_use]
    pub fn created(&self) -> usize {
        self.results.iter().filter(|r| !r.is_failed()).count()
    }

    /// Number of pull requests that failed.
    #[must_use]
    pub fn failed(&self) -> usize {
        self.results.iter().filter(|r| r.is_failed()).count()
    }

    /// Returns the failed results.
    #[must_use]
    pub fn failures(&self) -> Vec<&MigrationResult> {
        self.results.iter().filter(|r| r.is_failed()).collect()
    }

    /// Returns true if a stage error stopped the pipeline.
    #[must_use]
    pub fn is_fatal(&self) -> bool {
        self.fatal_error.is_some()
    }

    /// Returns true if any pull request failed to be created.
    #[must_use]
    pub fn has_failures(&self) -> bool {
        self.failed() > 0
    }

    /// Returns true if the pipeline completed and every pull request was created.
    #[must_use]
    pub fn all_success(&self) -> bool {
        !self.is_fatal() && !self.has_failures()
    }
}
