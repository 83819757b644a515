//! CodeCommit access through the `aws` command-line tool.

use crate::command::run_captured;
use crate::source::{ChangeRequestSource, RawChangeRequest, RepositoryMetadata, SourceError};
use async_trait::async_trait;
use serde::Deserialize;
use tracing::debug;

/// Status filter for open pull requests.
const OPEN_STATUS: &str = "OPEN";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ListPullRequestsOutput {
    #[serde(default)]
    pull_request_ids: Vec<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GetPullRequestOutput {
    pull_request: RawChangeRequest,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GetRepositoryOutput {
    repository_metadata: RepositoryMetadata,
}

#[derive(Debug, Deserialize)]
struct CallerIdentityOutput {
    #[serde(rename = "Arn")]
    arn: String,
}

/// [`ChangeRequestSource`] that shells out to `aws codecommit`.
///
/// Credentials are resolved by the AWS CLI itself (environment, profile,
/// SSO cache). The CLI paginates list calls on its own.
#[derive(Debug, Clone)]
pub struct AwsCliSource {
    program: String,
    region: Option<String>,
    profile: Option<String>,
}

impl Default for AwsCliSource {
    fn default() -> Self {
        Self::new()
    }
}

impl AwsCliSource {
    /// Creates a source using `aws` from `PATH` and the CLI's default region/profile.
    #[must_use]
    pub fn new() -> Self {
        Self {
            program: "aws".to_string(),
            region: None,
            profile: None,
        }
    }

    /// Sets the region passed as `--region`.
    #[must_use]
    pub fn with_region(mut self, region: Option<String>) -> Self {
        self.region = region;
        self
    }

    /// Sets the profile passed as `--profile`.
    #[must_use]
    pub fn with_profile(mut self, profile: Option<String>) -> Self {
        self.profile = profile;
        self
    }

    /// Uses a different executable instead of `aws`.
    #[must_use]
    pub fn with_program(mut self, program: impl Into<String>) -> Self {
        self.program = program.into();
        self
    }

    /// Returns the ARN of the caller (`aws sts get-caller-identity`).
    ///
    /// # Errors
    ///
    /// Returns [`SourceError`] if the credentials are missing or invalid.
    pub async fn caller_identity(&self) -> Result<String, SourceError> {
        let output = run_captured(&self.program, &self.args("sts", "get-caller-identity", &[]))
            .await?;
        parse_caller_identity(&output)
    }

    /// Builds `SERVICE OPERATION ARGS... --output json [--region R] [--profile P]`.
    fn args(&self, service: &str, operation: &str, extra: &[&str]) -> Vec<String> {
        let mut args = vec![service.to_string(), operation.to_string()];
        args.extend(extra.iter().map(|arg| arg.to_string()));
        args.extend(["--output".to_string(), "json".to_string()]);
        if let Some(region) = &self.region {
            args.extend(["--region".to_string(), region.clone()]);
        }
        if let Some(profile) = &self.profile {
            args.extend(["--profile".to_string(), profile.clone()]);
        }
        args
    }

    async fn codecommit(&self, operation: &str, extra: &[&str]) -> Result<String, SourceError> {
        Ok(run_captured(&self.program, &self.args("codecommit", operation, extra)).await?)
    }
}

#[async_trait]
impl ChangeRequestSource for AwsCliSource {
    async fn list_open(&self, repository: &str) -> Result<Vec<String>, SourceError> {
        debug!(repository, "Listing open pull requests");
        let output = self
            .codecommit(
                "list-pull-requests",
                &[
                    "--repository-name",
                    repository,
                    "--pull-request-status",
                    OPEN_STATUS,
                ],
            )
            .await?;
        parse_list_pull_requests(&output)
    }

    async fn get(&self, id: &str) -> Result<RawChangeRequest, SourceError> {
        debug!(pull_request_id = id, "Fetching pull request");
        let output = self
            .codecommit("get-pull-request", &["--pull-request-id", id])
            .await?;
        parse_get_pull_request(&output)
    }

    async fn repository_metadata(
        &self,
        repository: &str,
    ) -> Result<RepositoryMetadata, SourceError> {
        debug!(repository, "Fetching repository metadata");
        let output = self
            .codecommit("get-repository", &["--repository-name", repository])
            .await?;
        parse_get_repository(&output)
    }
}

/// Parses `aws codecommit list-pull-requests` output.
pub fn parse_list_pull_requests(json: &str) -> Result<Vec<String>, SourceError> {
    serde_json::from_str::<ListPullRequestsOutput>(json)
        .map(|output| output.pull_request_ids)
        .map_err(|e| SourceError::Parse {
            what: "list-pull-requests",
            source: e,
        })
}

/// Parses `aws codecommit get-pull-request` output.
pub fn parse_get_pull_request(json: &str) -> Result<RawChangeRequest, SourceError> {
    serde_json::from_str::<GetPullRequestOutput>(json)
        .map(|output| output.pull_request)
        .map_err(|e| SourceError::Parse {
            what: "get-pull-request",
            source: e,
        })
}

/// Parses `aws codecommit get-repository` output.
pub fn parse_get_repository(json: &str) -> Result<RepositoryMetadata, SourceError> {
    serde_json::from_str::<GetRepositoryOutput>(json)
        .map(|output| output.repository_metadata)
        .map_err(|e| SourceError::Parse {
            what: "get-repository",
            source: e,
        })
}

fn parse_caller_identity(json: &str) -> Result<String, SourceError> {
    serde_json::from_str::<CallerIdentityOutput>(json)
        .map(|output| output.arn)
        .map_err(|e| SourceError::Parse {
            what: "get-caller-identity",
            source: e,
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_arguments_with_region_and_profile() {
        let source = AwsCliSource::new()
            .with_region(Some("eu-central-1".to_string()))
            .with_profile(Some("dev".to_string()));

        let args = source.args("codecommit", "get-pull-request", &["--pull-request-id", "42"]);

        assert_eq!(
            args,
            [
                "codecommit",
                "get-pull-request",
                "--pull-request-id",
                "42",
                "--output",
                "json",
                "--region",
                "eu-central-1",
                "--profile",
                "dev"
            ]
        );
    }

    #[test]
    fn builds_arguments_without_optional_flags() {
        let args = AwsCliSource::new().args("sts", "get-caller-identity", &[]);
        assert_eq!(args, ["sts", "get-caller-identity", "--output", "json"]);
    }

    #[test]
    fn parses_list_output() {
        let ids = parse_list_pull_requests(r#"{"pullRequestIds": ["12", "9", "3"]}"#).unwrap();
        assert_eq!(ids, ["12", "9", "3"]);

        let empty = parse_list_pull_requests("{}").unwrap();
        assert!(empty.is_empty());
    }

    #[test]
    fn rejects_malformed_output() {
        let result = parse_get_pull_request("not json");
        assert!(matches!(
            result,
            Err(SourceError::Parse {
                what: "get-pull-request",
                ..
            })
        ));
    }

    #[test]
    fn parses_caller_identity() {
        let arn = parse_caller_identity(
            r#"{"UserId": "AIDA", "Account": "123456789012", "Arn": "arn:aws:iam::123456789012:user/jdoe"}"#,
        )
        .unwrap();
        assert_eq!(arn, "arn:aws:iam::123456789012:user/jdoe");
    }

    #[tokio::test]
    async fn missing_cli_is_a_command_error() {
        let source = AwsCliSource::new().with_program("cgm-no-such-aws-cli");
        let result = source.list_open("billing").await;
        assert!(matches!(result, Err(SourceError::Command(_))));
    }
}
