//! Optional TOML config file.

use crate::config::GitHubBackend;
use serde::Deserialize;
use std::path::PathBuf;

/// Settings read from a `cgm.toml` file.
///
/// Every field is optional; command-line values take precedence.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct ConfigFile {
    /// CodeCommit repository locator.
    pub source: Option<String>,

    /// GitHub repository locator.
    pub target: Option<String>,

    /// Issue tracker base URL.
    pub tracker: Option<String>,

    /// Skip the mirror stage.
    #[serde(default)]
    pub no_mirror: bool,

    /// Strip blobs bigger than 100 MB before pushing.
    #[serde(default)]
    pub big_file_cleanup: bool,

    /// AWS region for CodeCommit API calls.
    pub aws_region: Option<String>,

    /// AWS profile for CodeCommit API calls.
    pub aws_profile: Option<String>,

    /// GitHub integration to use.
    pub github_backend: Option<GitHubBackend>,

    /// Seconds to wait before each pull request creation.
    pub delay_secs: Option<u64>,

    /// Directory the workspace is created in.
    pub workspace_parent: Option<PathBuf>,
}
