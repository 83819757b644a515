//! Selection of the GitHub integration.

use crate::config::ConfigError;
use serde::Deserialize;
use std::fmt;
use std::str::FromStr;

/// How pull requests are created on GitHub.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum GitHubBackend {
    /// GitHub REST API through octocrab.
    #[default]
    Api,

    /// The `gh` command-line tool.
    GhCli,
}

impl FromStr for GitHubBackend {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "api" => Ok(Self::Api),
            "gh-cli" | "gh" => Ok(Self::GhCli),
            _ => Err(ConfigError::UnknownBackend {
                value: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for GitHubBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Api => "api",
            Self::GhCli => "gh-cli",
        })
    }
}
