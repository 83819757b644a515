//! Credential checks run before a migration starts.

mod error;

pub use error::CredentialsError;

use crate::command::run_captured;
use crate::sink::GhCliSink;
use crate::source::AwsCliSource;
use octocrab::Octocrab;
use tracing::{debug, info};

/// Environment variable read for the GitHub token.
pub const GITHUB_TOKEN_ENV: &str = "GITHUB_TOKEN";

/// Confirms the AWS CLI has working credentials and returns the caller ARN.
///
/// # Errors
///
/// Returns [`CredentialsError::Aws`] if `aws sts get-caller-identity` fails.
pub async fn validate_aws_credentials(source: &AwsCliSource) -> Result<String, CredentialsError> {
    let arn = source
        .caller_identity()
        .await
        .map_err(CredentialsError::Aws)?;
    info!(arn = %arn, "AWS credentials are valid");
    Ok(arn)
}

/// Returns the GitHub token to use.
///
/// Order: `explicit`, then `GITHUB_TOKEN`, then `gh auth token`.
///
/// # Errors
///
/// Returns [`CredentialsError::MissingGitHubToken`] if none of them yields a token.
pub async fn resolve_github_token(explicit: Option<String>) -> Result<String, CredentialsError> {
    if let Some(token) = configured_github_token(explicit) {
        return Ok(token);
    }

    debug!("No GitHub token configured, asking gh");
    let output = run_captured("gh", &["auth".to_string(), "token".to_string()])
        .await
        .map_err(|e| CredentialsError::MissingGitHubToken { source: Some(e) })?;

    non_empty(output).ok_or(CredentialsError::MissingGitHubToken { source: None })
}

/// Confirms the token works and returns the authenticated login.
///
/// # Errors
///
/// Returns [`CredentialsError::GitHub`] if the authenticated user cannot be fetched.
pub async fn validate_github_token(octocrab: &Octocrab) -> Result<String, CredentialsError> {
    let user = octocrab
        .current()
        .user()
        .await
        .map_err(CredentialsError::GitHub)?;
    info!(login = %user.login, "GitHub token is valid");
    Ok(user.login)
}

/// Confirms `gh` can reach GitHub and returns the authenticated login.
///
/// # Errors
///
/// Returns [`CredentialsError::GhCli`] if `gh api user` fails.
pub async fn validate_gh_cli(sink: &GhCliSink) -> Result<String, CredentialsError> {
    let login = sink
        .authenticated_user()
        .await
        .map_err(CredentialsError::GhCli)?;
    info!(login = %login, "gh is authenticated");
    Ok(login)
}

/// Returns the explicit token or `GITHUB_TOKEN`, ignoring blank values.
pub fn configured_github_token(explicit: Option<String>) -> Option<String> {
    explicit
        .and_then(non_empty)
        .or_else(|| std::env::var(GITHUB_TOKEN_ENV).ok().and_then(non_empty))
}

fn non_empty(token: String) -> Option<String> {
    let token = token.trim();
    (!token.is_empty()).then(|| token.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn gh_cli_validation_reports_missing_tool() {
        let sink = GhCliSink::new().with_program("cgm-no-such-gh");
        let result = validate_gh_cli(&sink).await;
        assert!(matches!(result, Err(CredentialsError::GhCli(_))));
    }

    #[test]
    fn explicit_token_wins() {
        temp_env::with_var(GITHUB_TOKEN_ENV, Some("from-env"), || {
            assert_eq!(
                configured_github_token(Some("explicit".to_string())).as_deref(),
                Some("explicit")
            );
        });
    }

    #[test]
    fn falls_back_to_environment() {
        temp_env::with_var(GITHUB_TOKEN_ENV, Some(" from-env\n"), || {
            assert_eq!(configured_github_token(None).as_deref(), Some("from-env"));
        });
    }

    #[test]
    fn blank_values_are_ignored() {
        temp_env::with_var(GITHUB_TOKEN_ENV, Some("  "), || {
            assert_eq!(configured_github_token(Some(String::new())), None);
        });
        temp_env::with_var_unset(GITHUB_TOKEN_ENV, || {
            assert_eq!(configured_github_token(None), None);
        });
    }
}
