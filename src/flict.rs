//! Outbound license calculation using flict

use crate::error::{OutboundError, OutboundResult};
use crate::process::{ProcessCommand, ProcessRunner};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::debug;

/// Computes outbound license candidates for a set of inbound licenses
#[async_trait]
pub trait OutboundSolver: Send + Sync {
    /// Return the licenses a work combining all of `licenses` may be released under
    async fn outbound_candidates(&self, licenses: &[String]) -> OutboundResult<Vec<String>>;
}

/// [`OutboundSolver`] backed by `flict outbound-candidate`
pub struct Flict {
    runner: Arc<dyn ProcessRunner>,
    program: String,
    working_dir: PathBuf,
}

impl Flict {
    /// Create a solver that runs `program` from inside `working_dir`
    pub fn new(
        runner: Arc<dyn ProcessRunner>,
        program: impl Into<String>,
        working_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            runner,
            program: program.into(),
            working_dir: working_dir.into(),
        }
    }

    fn outbound_command(&self, licenses: &[String]) -> ProcessCommand {
        ProcessCommand::new(self.program_path())
            .args(["outbound-candidate"])
            .args(expression_args(licenses))
            .current_dir(&self.working_dir)
    }

    /// Relative paths such as `./flict` are anchored at the working directory
    fn program_path(&self) -> String {
        let program = Path::new(&self.program);
        if program.is_relative() && program.components().count() > 1 {
            self.working_dir.join(program).display().to_string()
        } else {
            self.program.clone()
        }
    }
}

#[async_trait]
impl OutboundSolver for Flict {
    async fn outbound_candidates(&self, licenses: &[String]) -> OutboundResult<Vec<String>> {
        let command = self.outbound_command(licenses);
        debug!("Solving outbound licenses: {}", command);

        let stdout = self
            .runner
            .run(&command)
            .await
            .map_err(|e| match e {
                OutboundError::CliNotFound { .. } => e,
                other => OutboundError::SolverInvocation {
                    reason: other.to_string(),
                },
            })?;

        serde_json::from_str(&stdout).map_err(|e| OutboundError::SolverInvocation {
            reason: format!("unexpected flict output: {}", e),
        })
    }
}

/// Build flict's license expression: every license joined with `and`
pub fn expression_args(licenses: &[String]) -> Vec<String> {
    licenses
        .join(" and ")
        .split_whitespace()
        .map(str::to_string)
        .collect()
}
