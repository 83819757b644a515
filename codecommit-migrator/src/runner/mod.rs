//! Orchestrates a migration run.

mod config;
mod error;
mod stage;

pub use config::RunnerConfig;
pub use error::RunnerError;
pub use stage::Stage;

use crate::command::{SystemToolRunner, ToolRunner};
use crate::extractor::extract_change_requests;
use crate::mirror::{mirror_repository, Checkpoint, MirrorOptions, StdinCheckpoint};
use crate::replicator::{replicate, FixedDelay, PacingPolicy};
use crate::sink::{ChangeRequestSink, SinkError};
use crate::source::ChangeRequestSource;
use crate::summary::{MigrationReport, MirrorOutcome};
use crate::translator::translate_all;
use crate::workspace::Workspace;
use tracing::{error, info, info_span, warn, Instrument};

/// Runs the migration pipeline for one repository.
pub struct Runner {
    config: RunnerConfig,
    source: Box<dyn ChangeRequestSource>,
    sink: Box<dyn ChangeRequestSink>,
    tools: Box<dyn ToolRunner>,
    checkpoint: Box<dyn Checkpoint>,
    pacing: Box<dyn PacingPolicy>,
}

impl Runner {
    /// Builds a runner using real processes, a stdin checkpoint and the
    /// default creation delay.
    pub fn new(
        config: RunnerConfig,
        source: Box<dyn ChangeRequestSource>,
        sink: Box<dyn ChangeRequestSink>,
    ) -> Self {
        Self {
            config,
            source,
            sink,
            tools: Box::new(SystemToolRunner),
            checkpoint: Box::new(StdinCheckpoint),
            pacing: Box::new(FixedDelay::default()),
        }
    }

    /// Sets the runner used for `git` and `bfg`.
    pub fn with_tool_runner(mut self, tools: Box<dyn ToolRunner>) -> Self {
        self.tools = tools;
        self
    }

    /// Sets the checkpoint consulted before the mirror push.
    pub fn with_checkpoint(mut self, checkpoint: Box<dyn Checkpoint>) -> Self {
        self.checkpoint = checkpoint;
        self
    }

    /// Sets the pacing between pull request creations.
    pub fn with_pacing(mut self, pacing: Box<dyn PacingPolicy>) -> Self {
        self.pacing = pacing;
        self
    }

    /// Returns the run configuration.
    pub fn config(&self) -> &RunnerConfig {
        &self.config
    }

    /// Executes the full pipeline.
    ///
    /// Never fails: a stage error stops the pipeline and is recorded in
    /// [`MigrationReport::fatal_error`]. Once created, the workspace is
    /// removed on every path.
    pub async fn run(&self) -> MigrationReport {
        let mut report = MigrationReport::new();
        let span = info_span!(
            "migration",
            source = %self.config.source(),
            target = %self.config.target().full_name()
        );

        async {
            if let Err(e) = self.preflight().await {
                record_fatal(&mut report, e);
                return;
            }

            let workspace = match Workspace::create(self.config.workspace_parent()) {
                Ok(workspace) => workspace,
                Err(e) => {
                    record_fatal(&mut report, e.into());
                    return;
                }
            };
            report.workspace = Some(workspace.path().to_path_buf());
            report.stage = Stage::WorkspacePrepared;

            if let Err(e) = self.run_stages(&workspace, &mut report).await {
                record_fatal(&mut report, e);
            }

            info!(workspace = %workspace.path().display(), "Cleaning up workspace");
            match workspace.close() {
                Ok(()) => {
                    report.workspace_removed = true;
                    if !report.is_fatal() {
                        report.stage = Stage::CleanedUp;
                    }
                }
                Err(e) => warn!(error = %e, "Workspace was left behind"),
            }
        }
        .instrument(span)
        .await;

        info!(
            stage = %report.stage,
            found = report.change_requests_found,
            created = report.created(),
            failed = report.failed(),
            "Migration finished"
        );
        report
    }

    async fn preflight(&self) -> Result<(), RunnerError> {
        let target = self.config.target();
        info!(repo = %target.full_name(), "Checking GitHub repository");

        if !self.sink.exists(target).await? {
            return Err(SinkError::RepositoryNotFound {
                repository: target.html_url(),
            }
            .into());
        }
        Ok(())
    }

    async fn run_stages(
        &self,
        workspace: &Workspace,
        report: &mut MigrationReport,
    ) -> Result<(), RunnerError> {
        let config = &self.config;

        if config.no_mirror() {
            info!("Skipping mirror");
            report.mirror = MirrorOutcome::Skipped;
            report.stage = Stage::MirrorSkipped;
        } else {
            let options = MirrorOptions {
                big_file_cleanup: config.big_file_cleanup(),
            };
            let mirrored = mirror_repository(
                self.tools.as_ref(),
                self.checkpoint.as_ref(),
                workspace,
                config.source(),
                config.target(),
                options,
            )
            .await;

            if let Err(e) = mirrored {
                report.mirror = MirrorOutcome::Failed;
                return Err(e.into());
            }
            report.mirror = MirrorOutcome::Pushed;
            report.stage = Stage::Mirrored;
        }

        let extraction =
            extract_change_requests(self.source.as_ref(), config.source(), config.show_progress())
                .await?;
        report.change_requests_found = extraction.requests.len();
        report.stage = Stage::Extracted;

        let translated = translate_all(&extraction.requests, &extraction.metadata, config.tracker());
        report.stage = Stage::Translated;

        if translated.is_empty() {
            info!("No open pull requests to migrate");
        }

        report.results = replicate(
            self.sink.as_ref(),
            self.pacing.as_ref(),
            config.target(),
            &translated,
            config.show_progress(),
        )
        .await;
        report.stage = Stage::Replicated;

        Ok(())
    }
}

fn record_fatal(report: &mut MigrationReport, error: RunnerError) {
    error!(stage = %report.stage, error = %error, "Migration aborted");
    report.fatal_error = Some(error.to_string());
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::{CommandError, MockToolRunner};
    use crate::config::{SourceRepository, TargetRepository};
    use crate::mirror::NoCheckpoint;
    use crate::replicator::NoDelay;
    use crate::sink::MockChangeRequestSink;
    use crate::source::{MockChangeRequestSource, RepositoryMetadata};
    use tempfile::TempDir;

    fn config(parent: &TempDir, no_mirror: bool) -> RunnerConfig {
        RunnerConfig::new(
            SourceRepository::parse("codecommit://billing").unwrap(),
            TargetRepository::parse("acme/billing").unwrap(),
            "https://acme.atlassian.net",
            no_mirror,
            false,
        )
        .unwrap()
        .with_workspace_parent(parent.path().to_path_buf())
        .with_progress(false)
    }

    fn empty_source() -> MockChangeRequestSource {
        let mut source = MockChangeRequestSource::new();
        source.expect_list_open().returning(|_| Ok(Vec::new()));
        source.expect_repository_metadata().returning(|_| {
            Ok(RepositoryMetadata {
                repository_name: "billing".to_string(),
                arn: Some("arn:aws:codecommit:eu-central-1:123456789012:billing".to_string()),
                ..Default::default()
            })
        });
        source
    }

    fn existing_sink() -> MockChangeRequestSink {
        let mut sink = MockChangeRequestSink::new();
        sink.expect_exists().returning(|_| Ok(true));
        sink.expect_create_draft().never();
        sink
    }

    fn is_empty(dir: &TempDir) -> bool {
        std::fs::read_dir(dir.path()).unwrap().next().is_none()
    }

    #[tokio::test]
    async fn missing_target_stops_before_workspace() {
        let parent = TempDir::new().unwrap();
        let mut sink = MockChangeRequestSink::new();
        sink.expect_exists().returning(|_| Ok(false));

        let mut source = MockChangeRequestSource::new();
        source.expect_list_open().never();

        let mut tools = MockToolRunner::new();
        tools.expect_run().never();

        let report = Runner::new(config(&parent, false), Box::new(source), Box::new(sink))
            .with_tool_runner(Box::new(tools))
            .run()
            .await;

        assert_eq!(report.stage, Stage::Init);
        assert!(report.workspace.is_none());
        assert!(report
            .fatal_error
            .as_deref()
            .unwrap()
            .contains("https://github.com/acme/billing"));
        assert!(is_empty(&parent));
    }

    #[tokio::test]
    async fn skipped_mirror_runs_no_tools() {
        let parent = TempDir::new().unwrap();
        let mut tools = MockToolRunner::new();
        tools.expect_run().never();

        let report = Runner::new(
            config(&parent, true),
            Box::new(empty_source()),
            Box::new(existing_sink()),
        )
        .with_tool_runner(Box::new(tools))
        .with_pacing(Box::new(NoDelay))
        .run()
        .await;

        assert!(report.all_success());
        assert_eq!(report.mirror, MirrorOutcome::Skipped);
        assert_eq!(report.stage, Stage::CleanedUp);
        assert!(report.workspace_removed);
        assert!(!report.workspace.unwrap().exists());
        assert!(is_empty(&parent));
    }

    #[tokio::test]
    async fn clone_failure_is_fatal_and_cleans_up() {
        let parent = TempDir::new().unwrap();
        let mut tools = MockToolRunner::new();
        tools.expect_run().times(1).returning(|_, _, _| {
            Err(CommandError::Failed {
                command: "git clone".to_string(),
                status: "exit status: 128".to_string(),
                stderr: String::new(),
            })
        });

        let mut source = MockChangeRequestSource::new();
        source.expect_list_open().never();

        let report = Runner::new(
            config(&parent, false),
            Box::new(source),
            Box::new(existing_sink()),
        )
        .with_tool_runner(Box::new(tools))
        .with_checkpoint(Box::new(NoCheckpoint))
        .run()
        .await;

        assert!(report.is_fatal());
        assert_eq!(report.mirror, MirrorOutcome::Failed);
        assert_eq!(report.stage, Stage::WorkspacePrepared);
        assert!(report.workspace_removed);
        assert!(is_empty(&parent));
    }

    #[tokio::test]
    async fn mirror_then_extract_with_no_requests() {
        let parent = TempDir::new().unwrap();
        let mut tools = MockToolRunner::new();
        tools.expect_run().times(2).returning(|_, _, _| Ok(()));

        let report = Runner::new(
            config(&parent, false),
            Box::new(empty_source()),
            Box::new(existing_sink()),
        )
        .with_tool_runner(Box::new(tools))
        .with_checkpoint(Box::new(NoCheckpoint))
        .with_pacing(Box::new(NoDelay))
        .run()
        .await;

        assert!(report.all_success());
        assert_eq!(report.mirror, MirrorOutcome::Pushed);
        assert_eq!(report.change_requests_found, 0);
        assert!(report.results.is_empty());
        assert!(is_empty(&parent));
    }
}
