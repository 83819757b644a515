//! Per pull request outcome.

use crate::config::TargetRepository;
use crate::sink::CreatedChangeRequest;
use crate::translator::TranslatedChangeRequest;
use serde::Serialize;
use std::fmt::Display;

/// Failed bodies are cut to this many characters in reports.
pub const MAX_FAILED_BODY_CHARS: usize = 200;

/// Outcome of replicating a single pull request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum MigrationResult {
    /// Draft pull request created.
    Created {
        /// Pull request title.
        title: String,
        /// GitHub PR number.
        number: u64,
        /// GitHub PR URL.
        url: String,
    },

    /// Creation failed.
    Failed {
        /// The request as attempted, body truncated to [`MAX_FAILED_BODY_CHARS`].
        request: TranslatedChangeRequest,
        /// Target repository in "owner/name" format.
        repository: String,
        /// Error message.
        error: String,
    },
}

impl MigrationResult {
    /// Records a successful creation.
    #[must_use]
    pub fn created(request: &TranslatedChangeRequest, created: CreatedChangeRequest) -> Self {
        Self::Created {
            title: request.title.clone(),
            number: created.number,
            url: created.url,
        }
    }

    /// Records a failed creation, truncating the body.
    #[must_use]
    pub fn failed(
        request: &TranslatedChangeRequest,
        target: &TargetRepository,
        error: impl Display,
    ) -> Self {
        Self::Failed {
            request: TranslatedChangeRequest {
                body: truncate_chars(&request.body, MAX_FAILED_BODY_CHARS),
                ..request.clone()
            },
            repository: target.full_name(),
            error: error.to_string(),
        }
    }

    /// Returns the pull request title.
    #[must_use]
    pub fn title(&self) -> &str {
        match self {
            Self::Created { title, .. } => title,
            Self::Failed { request, .. } => &request.title,
        }
    }

    /// Returns true for [`MigrationResult::Failed`].
    #[must_use]
    pub fn is_failed(&self) -> bool {
        matches!(self, Self::Failed { .. })
    }
}

/// Returns the first `max` characters of `text`.
fn truncate_chars(text: &str, max: usize) -> String {
    match text.char_indices().nth(max) {
        Some((index, _)) => text[..index].to_string(),
        None => text.to_string(),
    }
}
