//! Repository locators for both ends of a migration.

use crate::config::ConfigError;
use regex::Regex;
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;
use url::Url;

/// `codecommit[::REGION]://[PROFILE@]REPO`, the git-remote-codecommit syntax.
static CODECOMMIT_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^codecommit(?:::([a-z0-9-]+))?://(?:([^@/]+)@)?([\w.-]+)/?$")
        .expect("CodeCommit locator pattern is valid")
});

/// `https://github.com/OWNER/REPO`, `git@github.com:OWNER/REPO` or `OWNER/REPO`.
static GITHUB_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:https?://github\.com/|git@github\.com:)?([\w-]+)/([\w.-]+?)(?:\.git)?/?$")
        .expect("GitHub locator pattern is valid")
});

/// Host prefix and suffix of CodeCommit HTTPS clone URLs.
const CODECOMMIT_HOST_PREFIX: &str = "git-codecommit.";
const CODECOMMIT_HOST_SUFFIX: &str = ".amazonaws.com";

/// Location of the CodeCommit repository being migrated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceRepository {
    /// Locator exactly as given; used as the clone URL.
    url: String,
    /// Repository name used for API calls.
    name: String,
    /// Region embedded in the locator, if any.
    region: Option<String>,
    /// AWS profile embedded in the locator, if any.
    profile: Option<String>,
}

impl SourceRepository {
    /// Parses a CodeCommit locator.
    ///
    /// Accepted forms:
    /// - `codecommit://REPO`
    /// - `codecommit://PROFILE@REPO`
    /// - `codecommit::REGION://[PROFILE@]REPO`
    /// - `https://git-codecommit.REGION.amazonaws.com/v1/repos/REPO`
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidSourceRepository`] for anything else.
    pub fn parse(input: &str) -> Result<Self, ConfigError> {
        let input = input.trim();

        if let Some(captures) = CODECOMMIT_PATTERN.captures(input) {
            return Ok(Self {
                url: input.to_string(),
                name: captures[3].to_string(),
                region: captures.get(1).map(|m| m.as_str().to_string()),
                profile: captures.get(2).map(|m| m.as_str().to_string()),
            });
        }

        if input.starts_with("https://") {
            return Self::parse_https(input);
        }

        Err(ConfigError::InvalidSourceRepository {
            url: input.to_string(),
            message: "expected codecommit://REPO or a CodeCommit HTTPS clone URL".to_string(),
        })
    }

    fn parse_https(input: &str) -> Result<Self, ConfigError> {
        let invalid = |message: &str| ConfigError::InvalidSourceRepository {
            url: input.to_string(),
            message: message.to_string(),
        };

        let url = Url::parse(input).map_err(|e| invalid(&e.to_string()))?;
        let host = url.host_str().unwrap_or_default();
        let region = host
            .strip_prefix(CODECOMMIT_HOST_PREFIX)
            .and_then(|rest| rest.strip_suffix(CODECOMMIT_HOST_SUFFIX))
            .filter(|region| !region.is_empty() && !region.contains('.'))
            .ok_or_else(|| invalid("host is not a CodeCommit git endpoint"))?;

        let segments: Vec<&str> = url
            .path_segments()
            .map(|segments| segments.filter(|s| !s.is_empty()).collect())
            .unwrap_or_default();
        let name = match segments.as_slice() {
            ["v1", "repos", name] => *name,
            _ => return Err(invalid("path must be /v1/repos/REPO")),
        };

        Ok(Self {
            url: input.to_string(),
            name: name.to_string(),
            region: Some(region.to_string()),
            profile: None,
        })
    }

    /// Returns the locator handed to `git clone`.
    pub fn clone_url(&self) -> &str {
        &self.url
    }

    /// Returns the repository name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the region embedded in the locator.
    pub fn region(&self) -> Option<&str> {
        self.region.as_deref()
    }

    /// Returns the AWS profile embedded in the locator.
    pub fn profile(&self) -> Option<&str> {
        self.profile.as_deref()
    }
}

impl FromStr for SourceRepository {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for SourceRepository {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.url)
    }
}

/// Location of the GitHub repository receiving the migration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetRepository {
    /// Repository owner (user or organization).
    pub owner: String,

    /// Repository name.
    pub name: String,

    /// URL used for `git push --mirror`.
    push_url: String,
}

impl TargetRepository {
    /// Parses a GitHub locator.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidTargetRepository`] if the input does not
    /// name a GitHub repository.
    pub fn parse(input: &str) -> Result<Self, ConfigError> {
        let input = input.trim();
        let captures =
            GITHUB_PATTERN
                .captures(input)
                .ok_or_else(|| ConfigError::InvalidTargetRepository {
                    url: input.to_string(),
                })?;

        let owner = captures[1].to_string();
        let name = captures[2].to_string();
        let push_url = if input.starts_with("https://")
            || input.starts_with("http://")
            || input.starts_with("git@")
        {
            input.to_string()
        } else {
            format!("https://github.com/{owner}/{name}.git")
        };

        Ok(Self {
            owner,
            name,
            push_url,
        })
    }

    /// Returns the repository in "owner/name" format.
    pub fn full_name(&self) -> String {
        format!("{}/{}", self.owner, self.name)
    }

    /// Returns the URL `git push --mirror` targets.
    pub fn push_url(&self) -> &str {
        &self.push_url
    }

    /// Returns the browser URL of the repository.
    pub fn html_url(&self) -> String {
        format!("https://github.com/{}/{}", self.owner, self.name)
    }
}

impl FromStr for TargetRepository {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for TargetRepository {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.push_url)
    }
}
