//! Creates translated pull requests on GitHub, one at a time.

mod pacing;

pub use pacing::{FixedDelay, NoDelay, PacingPolicy};

use crate::config::TargetRepository;
use crate::progress::progress_bar;
use crate::sink::{ChangeRequestSink, CreatedChangeRequest, SinkError};
use crate::summary::MigrationResult;
use crate::translator::TranslatedChangeRequest;
use bstr::ByteSlice;
use tracing::{debug, info, info_span, warn, Instrument};

/// Creates each request as a draft pull request on `target`.
///
/// Requests are processed serially in input order and `pacing` is consulted
/// once before each of them. A failure is recorded and the loop continues, so
/// the returned vector always has one entry per input request.
pub async fn replicate(
    sink: &dyn ChangeRequestSink,
    pacing: &dyn PacingPolicy,
    target: &TargetRepository,
    requests: &[TranslatedChangeRequest],
    show_progress: bool,
) -> Vec<MigrationResult> {
    let progress = progress_bar(requests.len(), show_progress, "Creating pull requests");
    let mut results = Vec::with_capacity(requests.len());

    for request in requests {
        pacing.pause().await;

        let span = info_span!("create_pull_request", title = %request.title);
        let result = match create_one(sink, target, request).instrument(span).await {
            Ok(created) => {
                info!(
                    title = %request.title,
                    number = created.number,
                    url = %created.url,
                    "Created draft pull request"
                );
                MigrationResult::created(request, created)
            }
            Err(e) => {
                warn!(title = %request.title, error = %e, "Failed to create pull request");
                MigrationResult::failed(request, target, e)
            }
        };

        results.push(result);
        progress.inc(1);
    }
    progress.finish_and_clear();

    let failures: Vec<_> = results.iter().filter(|r| r.is_failed()).collect();
    if !failures.is_empty() {
        let summary = serde_json::to_string_pretty(&failures).unwrap_or_default();
        warn!(
            failed = failures.len(),
            total = results.len(),
            "Some pull requests could not be created:\n{summary}"
        );
    }

    results
}

async fn create_one(
    sink: &dyn ChangeRequestSink,
    target: &TargetRepository,
    request: &TranslatedChangeRequest,
) -> Result<CreatedChangeRequest, SinkError> {
    validate_branch("base", &request.base)?;
    validate_branch("head", &request.head)?;
    debug!(base = %request.base, head = %request.head, "Creating pull request");
    sink.create_draft(target, request).await
}

/// Rejects branch names GitHub would refuse, without a network call.
fn validate_branch(role: &'static str, branch: &str) -> Result<(), SinkError> {
    let invalid = |message: String| SinkError::InvalidBranch {
        role,
        branch: branch.to_string(),
        message,
    };

    if branch.is_empty() {
        return Err(invalid("branch name is empty".to_string()));
    }

    let full = format!("refs/heads/{branch}");
    gix_validate::reference::name(full.as_bytes().as_bstr())
        .map(|_| ())
        .map_err(|e| invalid(e.to_string()))
}
