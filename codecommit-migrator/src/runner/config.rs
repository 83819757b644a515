//! Runner configuration.

use crate::config::{ConfigError, SourceRepository, TargetRepository};
use std::path::{Path, PathBuf};
use url::Url;

/// Validated configuration for a migration run.
#[derive(Debug, Clone)]
pub struct RunnerConfig {
    /// CodeCommit repository to migrate.
    source: SourceRepository,
    /// GitHub repository to migrate into.
    target: TargetRepository,
    /// Issue tracker base URL for ticket links.
    tracker: Url,
    /// Skip cloning and pushing the history.
    no_mirror: bool,
    /// Strip big blobs before pushing.
    big_file_cleanup: bool,
    /// Directory in which the workspace is created.
    workspace_parent: PathBuf,
    /// Whether progress bars are shown.
    show_progress: bool,
}

impl RunnerConfig {
    /// Creates and validates a configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidTrackerUrl`] if `tracker` is not an
    /// absolute URL and [`ConfigError::ConflictingOptions`] if big file cleanup
    /// is requested without mirroring.
    pub fn new(
        source: SourceRepository,
        target: TargetRepository,
        tracker: &str,
        no_mirror: bool,
        big_file_cleanup: bool,
    ) -> Result<Self, ConfigError> {
        if no_mirror && big_file_cleanup {
            return Err(ConfigError::ConflictingOptions {
                message: "big file cleanup requires mirroring, remove --no-mirror or --big-file-cleanup"
                    .to_string(),
            });
        }

        let tracker = Url::parse(tracker).map_err(|e| ConfigError::InvalidTrackerUrl {
            url: tracker.to_string(),
            source: e,
        })?;

        Ok(Self {
            source,
            target,
            tracker,
            no_mirror,
            big_file_cleanup,
            workspace_parent: PathBuf::from("."),
            show_progress: true,
        })
    }

    /// Sets the directory in which the workspace is created.
    pub fn with_workspace_parent(mut self, workspace_parent: PathBuf) -> Self {
        self.workspace_parent = workspace_parent;
        self
    }

    /// Enables or disables progress bars.
    pub fn with_progress(mut self, show_progress: bool) -> Self {
        self.show_progress = show_progress;
        self
    }

    /// Returns the CodeCommit repository.
    pub fn source(&self) -> &SourceRepository {
        &self.source
    }

    /// Returns the GitHub repository.
    pub fn target(&self) -> &TargetRepository {
        &self.target
    }

    /// Returns the issue tracker base URL.
    pub fn tracker(&self) -> &Url {
        &self.tracker
    }

    /// Returns whether mirroring is skipped.
    pub fn no_mirror(&self) -> bool {
        self.no_mirror
    }

    /// Returns whether big file cleanup is enabled.
    pub fn big_file_cleanup(&self) -> bool {
        self.big_file_cleanup
    }

    /// Returns the workspace parent directory.
    pub fn workspace_parent(&self) -> &Path {
        &self.workspace_parent
    }

    /// Returns whether progress bars are shown.
    pub fn show_progress(&self) -> bool {
        self.show_progress
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn repositories() -> (SourceRepository, TargetRepository) {
        (
            SourceRepository::parse("codecommit://billing").unwrap(),
            TargetRepository::parse("acme/billing").unwrap(),
        )
    }

    #[test]
    fn rejects_cleanup_without_mirror() {
        let (source, target) = repositories();
        let result = RunnerConfig::new(source, target, "https://acme.atlassian.net", true, true);
        assert!(matches!(result, Err(ConfigError::ConflictingOptions { .. })));
    }

    #[test]
    fn rejects_relative_tracker() {
        let (source, target) = repositories();
        let result = RunnerConfig::new(source, target, "acme.atlassian.net", false, false);
        assert!(matches!(result, Err(ConfigError::InvalidTrackerUrl { .. })));
    }

    #[test]
    fn builds_with_defaults() {
        let (source, target) = repositories();
        let config = RunnerConfig::new(source, target, "https://acme.atlassian.net/", true, false)
            .unwrap()
            .with_workspace_parent(PathBuf::from("/tmp"))
            .with_progress(false);

        assert!(config.no_mirror());
        assert!(!config.big_file_cleanup());
        assert!(!config.show_progress());
        assert_eq!(config.workspace_parent(), Path::new("/tmp"));
        assert_eq!(config.tracker().as_str(), "https://acme.atlassian.net/");
        assert_eq!(config.target().full_name(), "acme/billing");
    }
}
