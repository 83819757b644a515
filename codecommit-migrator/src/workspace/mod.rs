//! Ephemeral migration workspace.
//!
//! Every run gets its own freshly created `cgm-*` directory. The bare clone
//! lives inside it and the whole tree is removed when the run ends. The
//! process working directory is never changed; callers pass
//! [`Workspace::path`] and [`Workspace::repository_dir`] to the tools they run.

mod error;

pub use error::WorkspaceError;

use std::path::{Path, PathBuf};
use tempfile::TempDir;
use tracing::{info, warn};

/// Directory name prefix of every workspace.
pub const WORKSPACE_PREFIX: &str = "cgm-";

/// Name of the bare clone inside the workspace.
pub const REPOSITORY_DIR: &str = "repo-to-migrate";

/// A run-scoped temporary directory.
///
/// Call [`Workspace::close`] to remove it and observe errors. If the value is
/// dropped instead, removal is still attempted and failures are ignored.
#[derive(Debug)]
pub struct Workspace {
    dir: TempDir,
}

impl Workspace {
    /// Creates a new unique workspace inside `parent`.
    ///
    /// # Errors
    ///
    /// Returns [`WorkspaceError::Create`] if the directory cannot be created.
    pub fn create(parent: &Path) -> Result<Self, WorkspaceError> {
        let dir = tempfile::Builder::new()
            .prefix(WORKSPACE_PREFIX)
            .tempdir_in(parent)
            .map_err(|e| WorkspaceError::Create {
                parent: parent.display().to_string(),
                source: e,
            })?;

        info!(workspace = %dir.path().display(), "Workspace created");
        Ok(Self { dir })
    }

    /// Returns the workspace root.
    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Returns the location of the bare clone.
    pub fn repository_dir(&self) -> PathBuf {
        self.dir.path().join(REPOSITORY_DIR)
    }

    /// Recursively removes the workspace.
    ///
    /// # Errors
    ///
    /// Returns [`WorkspaceError::Remove`] if the directory cannot be removed.
    pub fn close(self) -> Result<(), WorkspaceError> {
        let path = self.dir.path().to_path_buf();
        info!(workspace = %path.display(), "Removing workspace");

        self.dir.close().map_err(|e| {
            warn!(workspace = %path.display(), error = %e, "Failed to remove workspace");
            WorkspaceError::Remove {
                path: path.display().to_string(),
                source: e,
            }
        })
    }
}
