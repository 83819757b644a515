//! Operator pause before the mirror push.

use async_trait::async_trait;
use std::io::{self, Write};
use tokio::io::{AsyncBufReadExt, BufReader};

/// A point where the run waits for the operator.
///
/// Typical use: disconnecting from a VPN that can reach CodeCommit but not
/// GitHub between the clone and the push.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Checkpoint: Send + Sync {
    /// Shows `message` and returns once the operator has confirmed.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if confirmation could not be read.
    async fn wait(&self, message: &str) -> io::Result<()>;
}

/// Waits for Enter on stdin.
#[derive(Debug, Clone, Copy, Default)]
pub struct StdinCheckpoint;

#[async_trait]
impl Checkpoint for StdinCheckpoint {
    async fn wait(&self, message: &str) -> io::Result<()> {
        {
            let mut stderr = io::stderr().lock();
            write!(stderr, "{message} ")?;
            stderr.flush()?;
        }

        let mut line = String::new();
        let read = BufReader::new(tokio::io::stdin())
            .read_line(&mut line)
            .await?;

        if read == 0 {
            return Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "stdin closed before the push was confirmed",
            ));
        }
        Ok(())
    }
}

/// Continues immediately; used for unattended runs.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoCheckpoint;

#[async_trait]
impl Checkpoint for NoCheckpoint {
    async fn wait(&self, message: &str) -> io::Result<()> {
        tracing::debug!(message, "Skipping operator checkpoint");
        Ok(())
    }
}
