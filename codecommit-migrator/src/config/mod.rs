//! Configuration loading and repository locators.
//!
//! This module parses the two repository locators and the optional
//! `cgm.toml` config file. Validation of the combined settings happens in
//! [`RunnerConfig`](crate::runner::RunnerConfig).

mod backend;
mod error;
mod file;
mod repository;

pub use backend::GitHubBackend;
pub use error::ConfigError;
pub use file::ConfigFile;
pub use repository::{SourceRepository, TargetRepository};

use std::path::Path;
use tracing::debug;

/// Loads a TOML config file.
///
/// ```text
/// source = "codecommit://REPO"
/// target = "https://github.com/ORG/REPO"
/// tracker = "https://ACCOUNT.atlassian.net"
/// big-file-cleanup = true
/// aws-region = "eu-central-1"
/// ```
///
/// # Errors
///
/// Returns [`ConfigError`] if the file cannot be read or parsed.
pub fn load_config_file(path: &Path) -> Result<ConfigFile, ConfigError> {
    debug!(path = %path.display(), "Loading config file");

    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::IoError {
        path: path.display().to_string(),
        source: e,
    })?;

    toml::from_str(&content).map_err(|e| ConfigError::TomlError {
        path: path.display().to_string(),
        source: e,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn can_load_config_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("cgm.toml");
        fs::write(
            &path,
            r#"
source = "codecommit://billing"
target = "https://github.com/acme/billing"
tracker = "https://acme.atlassian.net"
big-file-cleanup = true
aws-region = "eu-west-1"
github-backend = "gh-cli"
delay-secs = 2
"#,
        )
        .unwrap();

        let config = load_config_file(&path).unwrap();

        assert_eq!(config.source.as_deref(), Some("codecommit://billing"));
        assert_eq!(config.target.as_deref(), Some("https://github.com/acme/billing"));
        assert!(config.big_file_cleanup);
        assert!(!config.no_mirror);
        assert_eq!(config.aws_region.as_deref(), Some("eu-west-1"));
        assert_eq!(config.aws_profile, None);
        assert_eq!(config.github_backend, Some(GitHubBackend::GhCli));
        assert_eq!(config.delay_secs, Some(2));
    }

    #[test]
    fn load_config_file_missing() {
        let temp = TempDir::new().unwrap();
        let result = load_config_file(&temp.path().join("missing.toml"));
        assert!(matches!(result, Err(ConfigError::IoError { .. })));
    }

    #[test]
    fn load_config_file_rejects_unknown_keys() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("cgm.toml");
        fs::write(&path, "sourse = \"codecommit://typo\"\n").unwrap();

        let result = load_config_file(&path);
        assert!(matches!(result, Err(ConfigError::TomlError { .. })));
    }
}
