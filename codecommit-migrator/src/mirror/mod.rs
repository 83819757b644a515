//! Mirrors the CodeCommit history to GitHub.
//!
//! The heavy lifting is done by `git` (and optionally `bfg`); this module
//! only decides what runs, where, and in which order. Any failure aborts the
//! mirror: pull requests without their branches are meaningless.

mod checkpoint;
mod error;

pub use checkpoint::{Checkpoint, NoCheckpoint, StdinCheckpoint};
pub use error::MirrorError;

#[cfg(test)]
pub(crate) use checkpoint::MockCheckpoint;

use crate::command::ToolRunner;
use crate::config::{SourceRepository, TargetRepository};
use crate::workspace::{Workspace, REPOSITORY_DIR};
use tracing::{info, info_span, Instrument};

/// Blobs above this size are stripped by the big file cleanup.
pub const BIG_BLOB_THRESHOLD: &str = "100M";

const GIT: &str = "git";
const BFG: &str = "bfg";

/// Options for the mirror stage.
#[derive(Debug, Clone, Copy, Default)]
pub struct MirrorOptions {
    /// Strip blobs bigger than [`BIG_BLOB_THRESHOLD`] before pushing.
    pub big_file_cleanup: bool,
}

/// Clones `source` into the workspace and mirror-pushes it to `target`.
///
/// Steps:
/// 1. `git clone --bare` into `<workspace>/repo-to-migrate`
/// 2. Optional: `bfg --strip-blobs-bigger-than 100M`, then reflog expiry and
///    an aggressive gc so the stripped blobs are really gone
/// 3. Operator checkpoint
/// 4. `git push --mirror`
///
/// # Errors
///
/// Returns [`MirrorError`] for the first step that fails; later steps do not run.
pub async fn mirror_repository(
    runner: &dyn ToolRunner,
    checkpoint: &dyn Checkpoint,
    workspace: &Workspace,
    source: &SourceRepository,
    target: &TargetRepository,
    options: MirrorOptions,
) -> Result<(), MirrorError> {
    let span = info_span!("mirror", source = %source, target = %target);

    async {
        info!("Cloning CodeCommit repository");
        runner
            .run(
                workspace.path(),
                GIT,
                &args(&["clone", "--bare", source.clone_url(), REPOSITORY_DIR]),
            )
            .await
            .map_err(|e| MirrorError::CloneFailed {
                url: source.clone_url().to_string(),
                source: e,
            })?;

        let repository_dir = workspace.repository_dir();

        if options.big_file_cleanup {
            info!(threshold = BIG_BLOB_THRESHOLD, "Stripping big blobs");
            let cleanup = |e| MirrorError::CleanupFailed { source: e };

            runner
                .run(
                    workspace.path(),
                    BFG,
                    &args(&["--strip-blobs-bigger-than", BIG_BLOB_THRESHOLD, REPOSITORY_DIR]),
                )
                .await
                .map_err(cleanup)?;

            info!("Expiring reflog");
            runner
                .run(
                    &repository_dir,
                    GIT,
                    &args(&["reflog", "expire", "--expire=now", "--all"]),
                )
                .await
                .map_err(cleanup)?;

            info!("Running git gc");
            runner
                .run(
                    &repository_dir,
                    GIT,
                    &args(&["gc", "--prune=now", "--aggressive"]),
                )
                .await
                .map_err(cleanup)?;
        }

        checkpoint
            .wait(&format!(
                "Press Enter when you are ready (e.g. after disconnecting VPN) to push repo to: {target}"
            ))
            .await
            .map_err(|e| MirrorError::CheckpointFailed { source: e })?;

        info!("Pushing all branches and tags to GitHub");
        runner
            .run(
                &repository_dir,
                GIT,
                &args(&["push", "--mirror", target.push_url()]),
            )
            .await
            .map_err(|e| MirrorError::PushFailed {
                url: target.push_url().to_string(),
                source: e,
            })?;

        info!("Mirror complete");
        Ok(())
    }
    .instrument(span)
    .await
}

fn args(values: &[&str]) -> Vec<String> {
    values.iter().map(|value| value.to_string()).collect()
}
