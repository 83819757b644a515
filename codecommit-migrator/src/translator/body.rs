//! Pull request body composition.

use crate::source::{RawChangeRequest, RepositoryMetadata};
use chrono::{DateTime, Utc};
use regex::Regex;
use std::sync::LazyLock;
use tracing::debug;
use url::Url;

/// Jira-style ticket key at the very start of a title, e.g. `ABC-123`.
static TICKET_KEY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Z]+-[0-9]+").expect("ticket key pattern is valid"));

/// Display format for timestamps, e.g. `5 Jan 2023, 10:15:30 UTC`.
const TIMESTAMP_FORMAT: &str = "%-d %b %Y, %H:%M:%S UTC";

/// Summary line of the collapsed raw object.
pub const RAW_OBJECT_SUMMARY: &str = "Raw AWS Pull Request Object";

/// Returns the ticket key the title starts with.
#[must_use]
pub fn ticket_key(title: &str) -> Option<&str> {
    TICKET_KEY.find(title).map(|m| m.as_str())
}

/// Builds `<tracker>/browse/<key>`, keeping any query or fragment of the base.
#[must_use]
pub fn tracker_url(tracker: &Url, key: &str) -> String {
    let mut url = tracker.clone();
    if let Ok(mut segments) = url.path_segments_mut() {
        segments.pop_if_empty().extend(["browse", key]);
    }
    url.to_string()
}

/// Extracts a display name from an author ARN.
///
/// Assumed-role ARNs (`arn:aws:sts::ACCOUNT:assumed-role/ROLE/SESSION`)
/// yield the session name, the third `/` segment. Everything else yields the
/// sixth `:` segment, which for IAM users is `user/NAME`.
#[must_use]
pub fn author_name(author_arn: Option<&str>) -> String {
    let Some(arn) = author_arn else {
        return String::new();
    };

    if let Some(session) = arn.split('/').nth(2).filter(|s| !s.is_empty()) {
        return session.to_string();
    }

    match arn.split(':').nth(5) {
        Some(resource) => resource.to_string(),
        None => {
            debug!(author_arn = arn, "Unrecognised author ARN shape");
            String::new()
        }
    }
}

/// Formats a timestamp for the body; missing timestamps render as empty.
#[must_use]
pub fn display_timestamp(timestamp: Option<&DateTime<Utc>>) -> String {
    timestamp
        .map(|t| t.format(TIMESTAMP_FORMAT).to_string())
        .unwrap_or_default()
}

/// Builds the AWS console URL of the original pull request.
#[must_use]
pub fn codecommit_url(metadata: &RepositoryMetadata, pull_request_id: &str) -> String {
    let region = metadata.region().unwrap_or_default();
    format!(
        "https://{region}.console.aws.amazon.com/codesuite/codecommit/repositories/{}/pull-requests/{pull_request_id}",
        metadata.repository_name
    )
}

/// Composes the GitHub body for `raw`.
///
/// Layout: original description, a provenance list (back-link, author,
/// created, updated, ticket link when the title carries a key), and the raw
/// object as pretty JSON inside a collapsed `<details>` block.
#[must_use]
pub fn compose_body(raw: &RawChangeRequest, metadata: &RepositoryMetadata, tracker: &Url) -> String {
    let id = &raw.pull_request_id;
    let mut body = String::new();

    if let Some(description) = raw.description.as_deref().filter(|d| !d.is_empty()) {
        body.push_str(description);
        body.push_str("\n\n");
    }

    body.push_str("---\n");
    body.push_str(&format!(
        "- 🏚️ [Original CodeCommit-PR {id}]({})\n",
        codecommit_url(metadata, id)
    ));
    body.push_str(&format!(
        "  - 📧 Author: `{}`\n",
        author_name(raw.author_arn.as_deref())
    ));
    body.push_str(&format!(
        "  - 🚀 Created: {}\n",
        display_timestamp(raw.creation_date.as_ref())
    ));
    body.push_str(&format!(
        "  - 📝 Updated: {}\n",
        display_timestamp(raw.last_activity_date.as_ref())
    ));

    if let Some(key) = ticket_key(&raw.title) {
        body.push_str(&format!(
            "- 🎟️ [Ticket: {key}]({})\n",
            tracker_url(tracker, key)
        ));
    }

    let raw_json = serde_json::to_string_pretty(raw).unwrap_or_default();
    let fence = code_fence(&raw_json);
    body.push_str(&format!(
        "\n<details><summary>{RAW_OBJECT_SUMMARY}</summary>\n\n{fence}json\n{raw_json}\n{fence}\n\n</details>"
    ));

    body
}

/// Returns a backtick fence longer than any backtick run in `content`.
fn code_fence(content: &str) -> String {
    let longest = content
        .split(|c| c != '`')
        .map(str::len)
        .max()
        .unwrap_or(0);
    "`".repeat(longest.max(2) + 1)
}
