//! CodeCommit data model.
//!
//! Field names follow the AWS JSON shapes. Anything the model does not name
//! is kept in `extra` so the full object can be attached to the GitHub pull
//! request for audit.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// An open CodeCommit pull request, as returned by `get-pull-request`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawChangeRequest {
    /// Pull request identifier.
    #[serde(default)]
    pub pull_request_id: String,

    /// Pull request title.
    #[serde(default)]
    pub title: String,

    /// Pull request description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// ARN of the author (IAM user or assumed role).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author_arn: Option<String>,

    /// When the pull request was created.
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "super::timestamp"
    )]
    pub creation_date: Option<DateTime<Utc>>,

    /// When the pull request last changed.
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "super::timestamp"
    )]
    pub last_activity_date: Option<DateTime<Utc>>,

    /// `OPEN` or `CLOSED`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pull_request_status: Option<String>,

    /// Source/destination branch pairs.
    #[serde(default)]
    pub pull_request_targets: Vec<PullRequestTarget>,

    /// Fields not modelled above.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl RawChangeRequest {
    /// Returns the first source/destination pair, if any.
    #[must_use]
    pub fn primary_target(&self) -> Option<&PullRequestTarget> {
        self.pull_request_targets.first()
    }
}

/// A source/destination branch pair of a pull request.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PullRequestTarget {
    /// Repository the pair belongs to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub repository_name: Option<String>,

    /// Branch with the changes (e.g. `refs/heads/feature`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_reference: Option<String>,

    /// Branch the changes go into (e.g. `refs/heads/main`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub destination_reference: Option<String>,

    /// Fields not modelled above (commits, merge metadata).
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Repository information from `get-repository`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RepositoryMetadata {
    /// Repository name.
    #[serde(default)]
    pub repository_name: String,

    /// Repository ARN, `arn:aws:codecommit:REGION:ACCOUNT:NAME`.
    #[serde(rename = "Arn", default, skip_serializing_if = "Option::is_none")]
    pub arn: Option<String>,

    /// Owning AWS account.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub account_id: Option<String>,

    /// Fields not modelled above.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl RepositoryMetadata {
    /// Returns the region from the repository ARN.
    #[must_use]
    pub fn region(&self) -> Option<&str> {
        self.arn
            .as_deref()?
            .split(':')
            .nth(3)
            .filter(|region| !region.is_empty())
    }
}
