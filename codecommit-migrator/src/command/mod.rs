//! Running external tools.
//!
//! Two flavours exist: [`ToolRunner`] runs a tool with the terminal's
//! streams inherited so the operator sees raw progress (`git`, `bfg`), and
//! [`run_captured`] collects stdout for tools whose output is parsed
//! (`aws`, `gh`).

mod error;

pub use error::CommandError;

use async_trait::async_trait;
use std::path::Path;
use std::process::Stdio;
use tokio::process::Command;
use tracing::debug;

/// Runs external tools in an explicit working directory.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ToolRunner: Send + Sync {
    /// Runs `program` with `args` inside `dir`, inheriting stdin, stdout and stderr.
    ///
    /// # Errors
    ///
    /// Returns [`CommandError`] if the tool cannot be started or exits unsuccessfully.
    async fn run(&self, dir: &Path, program: &str, args: &[String]) -> Result<(), CommandError>;
}

/// [`ToolRunner`] backed by real processes.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemToolRunner;

#[async_trait]
impl ToolRunner for SystemToolRunner {
    async fn run(&self, dir: &Path, program: &str, args: &[String]) -> Result<(), CommandError> {
        let command = display_command(program, args);
        debug!(dir = %dir.display(), command = %command, "Running tool");

        let status = Command::new(program)
            .args(args)
            .current_dir(dir)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()
            .await
            .map_err(|e| CommandError::Spawn {
                program: program.to_string(),
                source: e,
            })?;

        if !status.success() {
            return Err(CommandError::Failed {
                command,
                status: status.to_string(),
                stderr: String::new(),
            });
        }

        Ok(())
    }
}

/// Runs `program` with `args` and returns its stdout.
///
/// # Errors
///
/// Returns [`CommandError`] if the tool cannot be started or exits unsuccessfully.
pub async fn run_captured(program: &str, args: &[String]) -> Result<String, CommandError> {
    run_captured_with_env(program, args, &[]).await
}

/// Like [`run_captured`], with extra environment variables for the tool.
///
/// Values are never logged.
///
/// # Errors
///
/// Returns [`CommandError`] if the tool cannot be started or exits unsuccessfully.
pub async fn run_captured_with_env(
    program: &str,
    args: &[String],
    envs: &[(&str, &str)],
) -> Result<String, CommandError> {
    let command = display_command(program, args);
    debug!(command = %command, "Running tool");

    let output = Command::new(program)
        .args(args)
        .envs(envs.iter().copied())
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .output()
        .await
        .map_err(|e| CommandError::Spawn {
            program: program.to_string(),
            source: e,
        })?;

    if !output.status.success() {
        return Err(CommandError::Failed {
            command,
            status: output.status.to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        });
    }

    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}

/// Renders a command line for logs and error messages.
///
/// Long arguments (pull request bodies) are elided.
pub(crate) fn display_command(program: &str, args: &[String]) -> String {
    const MAX_ARG_LEN: usize = 60;

    let mut line = program.to_string();
    for arg in args {
        line.push(' ');
        if arg.chars().count() > MAX_ARG_LEN || arg.contains('\n') {
            line.push_str("<...>");
        } else {
            line.push_str(arg);
        }
    }
    line
}
