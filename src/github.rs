//! License metadata lookup using the gh CLI

use crate::error::{OutboundError, OutboundResult};
use crate::license::LicenseResult;
use crate::process::{ProcessCommand, ProcessRunner};
use async_trait::async_trait;
use std::sync::Arc;

/// Fields requested from `gh repo view --json`
const VIEW_FIELDS: &str = "nameWithOwner,url,licenseInfo";

/// Source of per-repository license metadata
#[async_trait]
pub trait LicenseProvider: Send + Sync {
    /// Fetch the license record for `repo` (`owner/name`)
    async fn license_info(&self, repo: &str) -> OutboundResult<LicenseResult>;
}

/// [`LicenseProvider`] backed by `gh repo view`
pub struct GithubCli {
    runner: Arc<dyn ProcessRunner>,
    program: String,
}

impl GithubCli {
    /// Create a provider that runs `gh` from PATH
    pub fn new(runner: Arc<dyn ProcessRunner>) -> Self {
        Self {
            runner,
            program: "gh".to_string(),
        }
    }

    /// Use a different gh executable
    pub fn with_program(mut self, program: impl Into<String>) -> Self {
        self.program = program.into();
        self
    }

    fn view_command(&self, repo: &str) -> ProcessCommand {
        ProcessCommand::new(&self.program).args(["repo", "view", repo, "--json", VIEW_FIELDS])
    }
}

#[async_trait]
impl LicenseProvider for GithubCli {
    async fn license_info(&self, repo: &str) -> OutboundResult<LicenseResult> {
        let stdout = self.runner.run(&self.view_command(repo)).await?;

        LicenseResult::from_json(stdout.as_bytes()).map_err(|e| OutboundError::ProviderLookup {
            repo: repo.to_string(),
            reason: format!("unexpected gh output: {}", e),
        })
    }
}
