//! Maps CodeCommit pull requests onto GitHub pull requests.
//!
//! Translation is pure: no I/O and no failure mode. Missing source fields
//! become empty strings.

mod body;

pub use body::{
    author_name, codecommit_url, compose_body, display_timestamp, ticket_key, tracker_url,
    RAW_OBJECT_SUMMARY,
};

use crate::source::{RawChangeRequest, RepositoryMetadata};
use serde::{Deserialize, Serialize};
use url::Url;

/// Prefix CodeCommit puts in front of branch names.
const BRANCH_REF_PREFIX: &str = "refs/heads/";

/// A pull request ready to be created on GitHub.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranslatedChangeRequest {
    /// Pull request title, unchanged.
    pub title: String,

    /// Composed body with provenance and the raw source object.
    pub body: String,

    /// Branch to merge into.
    pub base: String,

    /// Branch with the changes.
    pub head: String,
}

/// Translates a single pull request.
#[must_use]
pub fn translate(
    raw: &RawChangeRequest,
    metadata: &RepositoryMetadata,
    tracker: &Url,
) -> TranslatedChangeRequest {
    let target = raw.primary_target();

    TranslatedChangeRequest {
        title: raw.title.clone(),
        body: compose_body(raw, metadata, tracker),
        base: branch_name(target.and_then(|t| t.destination_reference.as_deref())),
        head: branch_name(target.and_then(|t| t.source_reference.as_deref())),
    }
}

/// Translates every pull request, keeping their order.
#[must_use]
pub fn translate_all(
    requests: &[RawChangeRequest],
    metadata: &RepositoryMetadata,
    tracker: &Url,
) -> Vec<TranslatedChangeRequest> {
    requests
        .iter()
        .map(|raw| translate(raw, metadata, tracker))
        .collect()
}

fn branch_name(reference: Option<&str>) -> String {
    let reference = reference.unwrap_or_default();
    reference
        .strip_prefix(BRANCH_REF_PREFIX)
        .unwrap_or(reference)
        .to_string()
}
