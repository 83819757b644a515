//! CLI for the CodeCommit migrator.
//!
//! Mirrors an AWS CodeCommit repository to GitHub and recreates its open
//! pull requests as drafts.

use clap::Parser;
use codecommit_migrator::{
    configured_github_token, load_config_file, resolve_github_token, validate_aws_credentials,
    validate_gh_cli, validate_github_token, AwsCliSource, ChangeRequestSink, ConfigError,
    ConfigFile, FixedDelay, GhCliSink, GitHubApiSink, GitHubBackend, MigrationReport,
    MigrationResult, NoCheckpoint, Runner, RunnerConfig, RunnerError, SourceRepository,
    TargetRepository,
};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{error, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Region used when neither the locator, the flag nor the config file sets one.
const DEFAULT_AWS_REGION: &str = "eu-central-1";

/// cgm - Migrate an AWS CodeCommit repository and its open pull requests to GitHub.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// CodeCommit repository, e.g. codecommit::eu-central-1://my-repo.
    #[arg(short = 'c', long)]
    source: Option<String>,

    /// GitHub repository, e.g. https://github.com/ORG/REPO.
    #[arg(short = 'g', long)]
    target: Option<String>,

    /// Issue tracker base URL, e.g. https://ACCOUNT.atlassian.net.
    #[arg(short = 'j', long)]
    tracker: Option<String>,

    /// Only migrate pull requests; do not mirror the history.
    #[arg(short = 'M', long)]
    no_mirror: bool,

    /// Strip blobs bigger than 100 MB with bfg before pushing.
    #[arg(short = 'b', long, conflicts_with = "no_mirror")]
    big_file_cleanup: bool,

    /// AWS region for CodeCommit API calls.
    #[arg(long, env = "AWS_REGION")]
    aws_region: Option<String>,

    /// AWS profile for CodeCommit API calls.
    #[arg(long, env = "AWS_PROFILE")]
    aws_profile: Option<String>,

    /// GitHub Personal Access Token. Falls back to `gh auth token`; passed to
    /// `gh` as `GH_TOKEN` with the gh-cli backend.
    #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true)]
    github_token: Option<String>,

    /// GitHub integration: `api` or `gh-cli`.
    #[arg(long)]
    github_backend: Option<GitHubBackend>,

    /// Push without waiting for confirmation.
    #[arg(short = 'y', long)]
    yes: bool,

    /// Seconds to wait before each pull request creation.
    #[arg(long)]
    delay_secs: Option<u64>,

    /// Directory the temporary workspace is created in.
    #[arg(long)]
    workspace_parent: Option<PathBuf>,

    /// Path to a TOML config file.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Hide progress bars.
    #[arg(long)]
    no_progress: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    init_tracing();

    // octocrab's TLS stack needs a process-wide crypto provider.
    let _ = rustls::crypto::aws_lc_rs::default_provider().install_default();

    let args = Args::parse();

    match run(args).await {
        Ok(report) => {
            print_summary(&report);

            if report.all_success() {
                ExitCode::from(0)
            } else if report.is_fatal() {
                ExitCode::from(2)
            } else {
                ExitCode::from(1)
            }
        }
        Err(e) => {
            error!(error = %e, "Critical failure");
            ExitCode::from(2)
        }
    }
}

/// Initializes tracing with environment filter support.
///
/// Sets up the global tracing subscriber with:
/// - Compact log formatting (single-line output)
/// - Log level filtering via `RUST_LOG` env var (defaults to "info")
fn init_tracing() {
    tracing_subscriber::registry()
        .with(fmt::layer().compact().with_target(false))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();
}

/// Main execution logic.
async fn run(args: Args) -> Result<MigrationReport, RunnerError> {
    let file = match &args.config {
        Some(path) => load_config_file(path)?,
        None => ConfigFile::default(),
    };

    let source = SourceRepository::parse(&required("source", args.source, file.source)?)?;
    let target = TargetRepository::parse(&required("target", args.target, file.target)?)?;
    let tracker = required("tracker", args.tracker, file.tracker)?;

    let config = RunnerConfig::new(
        source.clone(),
        target,
        &tracker,
        args.no_mirror || file.no_mirror,
        args.big_file_cleanup || file.big_file_cleanup,
    )?
    .with_workspace_parent(
        args.workspace_parent
            .or(file.workspace_parent)
            .unwrap_or_else(|| PathBuf::from(".")),
    )
    .with_progress(!args.no_progress);

    let region = source
        .region()
        .map(str::to_string)
        .or(args.aws_region)
        .or(file.aws_region)
        .unwrap_or_else(|| DEFAULT_AWS_REGION.to_string());
    let profile = source
        .profile()
        .map(str::to_string)
        .or(args.aws_profile)
        .or(file.aws_profile);

    let aws = AwsCliSource::new()
        .with_region(Some(region))
        .with_profile(profile);
    validate_aws_credentials(&aws).await?;

    let sink: Box<dyn ChangeRequestSink> =
        match args.github_backend.or(file.github_backend).unwrap_or_default() {
            GitHubBackend::Api => {
                let token = resolve_github_token(args.github_token).await?;
                let sink = GitHubApiSink::from_token(token)?;
                validate_github_token(sink.client()).await?;
                Box::new(sink)
            }
            GitHubBackend::GhCli => {
                let sink = GhCliSink::new().with_token(configured_github_token(args.github_token));
                validate_gh_cli(&sink).await?;
                Box::new(sink)
            }
        };

    let delay = args
        .delay_secs
        .or(file.delay_secs)
        .map(FixedDelay::from_secs)
        .unwrap_or_default();

    let mut runner = Runner::new(config, Box::new(aws), sink).with_pacing(Box::new(delay));
    if args.yes {
        runner = runner.with_checkpoint(Box::new(NoCheckpoint));
    }

    Ok(runner.run().await)
}

/// Picks the command-line value, then the config file value.
fn required(
    name: &str,
    arg: Option<String>,
    file: Option<String>,
) -> Result<String, ConfigError> {
    arg.or(file).ok_or_else(|| ConfigError::MissingValue {
        name: name.to_string(),
    })
}

/// Prints the final run summary.
fn print_summary(report: &MigrationReport) {
    println!("\nSummary:");
    println!("  Stage reached: {}", report.stage);
    println!("  Mirror: {:?}", report.mirror);
    if let Some(workspace) = &report.workspace {
        println!("  Workspace: {}", workspace.display());
        if !report.workspace_removed {
            warn!(workspace = %workspace.display(), "Workspace was not removed, delete it manually");
        }
    }
    println!("  Pull requests found: {}", report.change_requests_found);
    println!("  Pull requests created: {}", report.created());
    println!("  Pull requests failed: {}", report.failed());

    for result in &report.results {
        if let MigrationResult::Created { title, url, .. } = result {
            println!("    {title} -> {url}");
        }
    }

    let failures = report.failures();
    if !failures.is_empty() {
        match serde_json::to_string_pretty(&failures) {
            Ok(json) => println!("\nFailed pull requests:\n{json}"),
            Err(e) => error!(error = %e, "Failed to serialize failures"),
        }
    }

    if let Some(fatal) = &report.fatal_error {
        println!("\nMigration aborted: {fatal}");
    }
}
