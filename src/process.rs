//! External process execution
//!
//! The GitHub CLI and flict are both driven through [`ProcessRunner`], so
//! tests can substitute a scripted runner for real processes.

use crate::error::{OutboundError, OutboundResult};
use async_trait::async_trait;
use std::fmt;
use std::io::ErrorKind;
use std::path::PathBuf;
use std::process::Stdio;
use tokio::process::Command;
use tracing::debug;

/// A program invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessCommand {
    /// Program name or path
    pub program: String,
    /// Positional arguments
    pub args: Vec<String>,
    /// Working directory for the child (inherits ours when unset)
    pub working_dir: Option<PathBuf>,
}

impl ProcessCommand {
    /// Create a command with no arguments
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            working_dir: None,
        }
    }

    /// Append arguments
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Run the child in `dir`
    pub fn current_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.working_dir = Some(dir.into());
        self
    }
}

impl fmt::Display for ProcessCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            write!(f, " {}", arg)?;
        }
        Ok(())
    }
}

/// Runs a command to completion and captures its stdout
#[async_trait]
pub trait ProcessRunner: Send + Sync {
    /// Run `command` and return stdout with trailing whitespace removed.
    ///
    /// A non-zero exit status is an error.
    async fn run(&self, command: &ProcessCommand) -> OutboundResult<String>;
}

/// [`ProcessRunner`] that spawns real child processes
#[derive(Debug, Default, Clone, Copy)]
pub struct TokioProcessRunner;

#[async_trait]
impl ProcessRunner for TokioProcessRunner {
    async fn run(&self, command: &ProcessCommand) -> OutboundResult<String> {
        let line = command.to_string();
        debug!("run: {}", line);

        let mut cmd = Command::new(&command.program);
        cmd.args(&command.args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());
        if let Some(ref dir) = command.working_dir {
            cmd.current_dir(dir);
        }

        let output = cmd.output().await.map_err(|e| {
            if e.kind() == ErrorKind::NotFound {
                OutboundError::CliNotFound {
                    name: command.program.clone(),
                    hint: format!("Make sure `{}` is installed and on PATH", command.program),
                }
            } else {
                OutboundError::command_failed(line.clone(), e)
            }
        })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(OutboundError::command_exec(
                line,
                output.status.code().unwrap_or(-1),
                stderr.trim(),
            ));
        }

        let stdout = String::from_utf8_lossy(&output.stdout).trim_end().to_string();
        debug!("run: {} -> {}", line, stdout);
        Ok(stdout)
    }
}
