use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use codecommit_migrator::{
    ChangeRequestSink, ChangeRequestSource, CommandError, ConfigError, CreatedChangeRequest,
    MigrationResult, MirrorOutcome, NoCheckpoint, NoDelay, PullRequestTarget, RawChangeRequest,
    RepositoryMetadata, Runner, RunnerConfig, SinkError, SourceError, SourceRepository, Stage,
    TargetRepository, ToolRunner, TranslatedChangeRequest,
};
use tempfile::TempDir;

/// Source serving a fixed set of pull requests.
struct FakeSource {
    requests: Vec<RawChangeRequest>,
}

#[async_trait]
impl ChangeRequestSource for FakeSource {
    async fn list_open(&self, _repository: &str) -> Result<Vec<String>, SourceError> {
        Ok(self
            .requests
            .iter()
            .map(|r| r.pull_request_id.clone())
            .collect())
    }

    async fn get(&self, id: &str) -> Result<RawChangeRequest, SourceError> {
        let request = self.requests.iter().find(|r| r.pull_request_id == id);
        Ok(request.cloned().unwrap_or_default())
    }

    async fn repository_metadata(
        &self,
        repository: &str,
    ) -> Result<RepositoryMetadata, SourceError> {
        Ok(RepositoryMetadata {
            repository_name: repository.to_string(),
            arn: Some(format!("arn:aws:codecommit:eu-central-1:123456789012:{repository}")),
            ..Default::default()
        })
    }
}

/// Sink that rejects titles containing "reject" and records every call.
#[derive(Clone, Default)]
struct FakeSink {
    created: Arc<Mutex<Vec<TranslatedChangeRequest>>>,
}

#[async_trait]
impl ChangeRequestSink for FakeSink {
    async fn exists(&self, _target: &TargetRepository) -> Result<bool, SinkError> {
        Ok(true)
    }

    async fn create_draft(
        &self,
        target: &TargetRepository,
        request: &TranslatedChangeRequest,
    ) -> Result<CreatedChangeRequest, SinkError> {
        let mut created = self.created.lock().unwrap();
        created.push(request.clone());

        if request.title.contains("reject") {
            return Err(SinkError::UnexpectedOutput {
                message: "Validation Failed: a pull request already exists".to_string(),
            });
        }

        let number = created.len() as u64;
        Ok(CreatedChangeRequest {
            number,
            url: format!("{}/pull/{number}", target.html_url()),
        })
    }
}

/// Tool runner that records invocations and can fail `git push`.
#[derive(Clone, Default)]
struct FakeTools {
    fail_push: bool,
    calls: Arc<Mutex<Vec<(PathBuf, String)>>>,
}

#[async_trait]
impl ToolRunner for FakeTools {
    async fn run(&self, dir: &Path, program: &str, args: &[String]) -> Result<(), CommandError> {
        let command = format!("{program} {}", args.join(" "));
        self.calls
            .lock()
            .unwrap()
            .push((dir.to_path_buf(), command.clone()));

        if self.fail_push && args.first().map(String::as_str) == Some("push") {
            return Err(CommandError::Failed {
                command,
                status: "exit status: 1".to_string(),
                stderr: String::new(),
            });
        }
        Ok(())
    }
}

fn request(id: &str, title: &str) -> RawChangeRequest {
    RawChangeRequest {
        pull_request_id: id.to_string(),
        title: title.to_string(),
        description: Some("x".repeat(500)),
        author_arn: Some("arn:aws:iam::123456789012:user/jane".to_string()),
        pull_request_status: Some("OPEN".to_string()),
        pull_request_targets: vec![PullRequestTarget {
            repository_name: Some("billing".to_string()),
            source_reference: Some(format!("refs/heads/feature/{id}")),
            destination_reference: Some("refs/heads/main".to_string()),
            ..Default::default()
        }],
        ..Default::default()
    }
}

fn config(parent: &TempDir, no_mirror: bool) -> RunnerConfig {
    RunnerConfig::new(
        SourceRepository::parse("codecommit::eu-central-1://billing").unwrap(),
        TargetRepository::parse("https://github.com/acme/billing").unwrap(),
        "https://acme.atlassian.net",
        no_mirror,
        false,
    )
    .unwrap()
    .with_workspace_parent(parent.path().to_path_buf())
    .with_progress(false)
}

fn is_empty(dir: &TempDir) -> bool {
    std::fs::read_dir(dir.path()).unwrap().next().is_none()
}

#[tokio::test]
async fn partial_failure_is_reported_per_request() {
    let parent = TempDir::new().unwrap();
    let source = FakeSource {
        requests: vec![
            request("1", "ABC-1: first"),
            request("2", "ABC-2: reject me"),
            request("3", "third"),
        ],
    };
    let sink = FakeSink::default();
    let tools = FakeTools::default();

    let report = Runner::new(
        config(&parent, false),
        Box::new(source),
        Box::new(sink.clone()),
    )
    .with_tool_runner(Box::new(tools.clone()))
    .with_checkpoint(Box::new(NoCheckpoint))
    .with_pacing(Box::new(NoDelay))
    .run()
    .await;

    assert!(!report.is_fatal());
    assert_eq!(report.stage, Stage::CleanedUp);
    assert_eq!(report.mirror, MirrorOutcome::Pushed);
    assert_eq!(report.change_requests_found, 3);
    assert_eq!(report.created(), 2);
    assert_eq!(report.failed(), 1);

    let titles: Vec<_> = report.results.iter().map(MigrationResult::title).collect();
    assert_eq!(titles, vec!["ABC-1: first", "ABC-2: reject me", "third"]);

    let MigrationResult::Failed {
        request,
        repository,
        error,
    } = &report.results[1]
    else {
        panic!("second request should have failed");
    };
    assert!(request.body.chars().count() <= 200);
    assert_eq!(repository, "acme/billing");
    assert!(error.contains("already exists"));

    let workspace = report.workspace.unwrap();
    assert!(!workspace.exists());
    assert!(is_empty(&parent));

    let calls = tools.calls.lock().unwrap();
    assert_eq!(calls.len(), 2);
    assert_eq!(calls[0].0, workspace);
    assert_eq!(calls[1].0, workspace.join("repo-to-migrate"));
}

#[tokio::test]
async fn push_failure_creates_nothing() {
    let parent = TempDir::new().unwrap();
    let source = FakeSource {
        requests: vec![request("1", "ABC-1: first")],
    };
    let sink = FakeSink::default();
    let tools = FakeTools {
        fail_push: true,
        ..Default::default()
    };

    let report = Runner::new(
        config(&parent, false),
        Box::new(source),
        Box::new(sink.clone()),
    )
    .with_tool_runner(Box::new(tools))
    .with_checkpoint(Box::new(NoCheckpoint))
    .with_pacing(Box::new(NoDelay))
    .run()
    .await;

    assert!(report.is_fatal());
    assert_eq!(report.mirror, MirrorOutcome::Failed);
    assert!(report.results.is_empty());
    assert!(sink.created.lock().unwrap().is_empty());
    assert!(report.workspace_removed);
    assert!(is_empty(&parent));
}

#[tokio::test]
async fn ticket_link_reaches_github() {
    let parent = TempDir::new().unwrap();
    let source = FakeSource {
        requests: vec![request("7", "ABC-42: fix bug")],
    };
    let sink = FakeSink::default();

    let report = Runner::new(
        config(&parent, true),
        Box::new(source),
        Box::new(sink.clone()),
    )
    .with_pacing(Box::new(NoDelay))
    .run()
    .await;

    assert!(report.all_success());
    assert_eq!(report.mirror, MirrorOutcome::Skipped);

    let created = sink.created.lock().unwrap();
    assert_eq!(created.len(), 1);
    assert!(created[0]
        .body
        .contains("https://acme.atlassian.net/browse/ABC-42"));
    assert_eq!(created[0].base, "main");
    assert_eq!(created[0].head, "feature/7");
}

#[test]
fn cleanup_without_mirror_is_rejected() {
    let result = RunnerConfig::new(
        SourceRepository::parse("codecommit://billing").unwrap(),
        TargetRepository::parse("acme/billing").unwrap(),
        "https://acme.atlassian.net",
        true,
        true,
    );

    assert!(matches!(result, Err(ConfigError::ConflictingOptions { .. })));
}
