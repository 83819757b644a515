//! GitHub access through the `gh` command-line tool.

use crate::command::{run_captured_with_env, CommandError};
use crate::config::TargetRepository;
use crate::sink::{ChangeRequestSink, CreatedChangeRequest, SinkError};
use crate::translator::TranslatedChangeRequest;
use async_trait::async_trait;
use tracing::debug;

/// `gh` error text for a missing or inaccessible repository.
const NOT_FOUND_MARKER: &str = "Could not resolve to a Repository";

/// Environment variable `gh` reads its token from.
const GH_TOKEN_ENV: &str = "GH_TOKEN";

/// [`ChangeRequestSink`] that shells out to `gh`.
///
/// Uses the token set with [`GhCliSink::with_token`], otherwise whatever
/// authentication `gh` already has (`gh auth login` or `GH_TOKEN`).
#[derive(Clone)]
pub struct GhCliSink {
    program: String,
    token: Option<String>,
}

impl Default for GhCliSink {
    fn default() -> Self {
        Self::new()
    }
}

impl GhCliSink {
    /// Creates a sink using `gh` from `PATH`.
    #[must_use]
    pub fn new() -> Self {
        Self {
            program: "gh".to_string(),
            token: None,
        }
    }

    /// Passes `token` to every `gh` call as `GH_TOKEN`.
    #[must_use]
    pub fn with_token(mut self, token: Option<String>) -> Self {
        self.token = token;
        self
    }

    /// Uses a different executable instead of `gh`.
    #[must_use]
    pub fn with_program(mut self, program: impl Into<String>) -> Self {
        self.program = program.into();
        self
    }

    /// Returns the login `gh` is authenticated as.
    ///
    /// # Errors
    ///
    /// Returns [`SinkError`] if `gh` is missing, not logged in or the token is rejected.
    pub async fn authenticated_user(&self) -> Result<String, SinkError> {
        let args = [
            "api".to_string(),
            "user".to_string(),
            "--jq".to_string(),
            ".login".to_string(),
        ];
        let stdout = self.gh(&args).await?;
        parse_login(&stdout)
    }

    fn envs(&self) -> Vec<(&'static str, &str)> {
        self.token
            .as_deref()
            .map(|token| vec![(GH_TOKEN_ENV, token)])
            .unwrap_or_default()
    }

    async fn gh(&self, args: &[String]) -> Result<String, CommandError> {
        run_captured_with_env(&self.program, args, &self.envs()).await
    }
}

#[async_trait]
impl ChangeRequestSink for GhCliSink {
    async fn exists(&self, target: &TargetRepository) -> Result<bool, SinkError> {
        debug!(repo = %target.full_name(), "Checking repository");
        let args = [
            "repo".to_string(),
            "view".to_string(),
            target.full_name(),
            "--json".to_string(),
            "name".to_string(),
        ];

        match self.gh(&args).await {
            Ok(_) => Ok(true),
            Err(CommandError::Failed { stderr, .. }) if stderr.contains(NOT_FOUND_MARKER) => {
                Ok(false)
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn create_draft(
        &self,
        target: &TargetRepository,
        request: &TranslatedChangeRequest,
    ) -> Result<CreatedChangeRequest, SinkError> {
        let args = [
            "pr".to_string(),
            "create".to_string(),
            "--repo".to_string(),
            target.full_name(),
            "--draft".to_string(),
            "--title".to_string(),
            request.title.clone(),
            "--body".to_string(),
            request.body.clone(),
            "--base".to_string(),
            request.base.clone(),
            "--head".to_string(),
            request.head.clone(),
        ];

        let stdout = self.gh(&args).await?;
        parse_created_url(&stdout)
    }
}

/// Parses the login printed by `gh api user --jq .login`.
pub fn parse_login(stdout: &str) -> Result<String, SinkError> {
    let login = stdout.trim();
    if login.is_empty() || login.contains(char::is_whitespace) {
        return Err(SinkError::UnexpectedOutput {
            message: format!("no login in gh output: {login}"),
        });
    }
    Ok(login.to_string())
}

/// Parses the pull request URL `gh pr create` prints as its last line.
pub fn parse_created_url(stdout: &str) -> Result<CreatedChangeRequest, SinkError> {
    let url = stdout
        .lines()
        .map(str::trim)
        .rfind(|line| line.starts_with("https://"))
        .ok_or_else(|| SinkError::UnexpectedOutput {
            message: format!("no pull request URL in gh output: {}", stdout.trim()),
        })?;

    let number = url
        .trim_end_matches('/')
        .rsplit('/')
        .next()
        .and_then(|segment| segment.parse::<u64>().ok())
        .ok_or_else(|| SinkError::UnexpectedOutput {
            message: format!("no pull request number in URL: {url}"),
        })?;

    Ok(CreatedChangeRequest {
        number,
        url: url.to_string(),
    })
}
