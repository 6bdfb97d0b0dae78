//! Run command - resolve licenses from stdin and print outbound candidates

use crate::cli::args::Cli;
use crate::config::{Config, ConfigManager};
use crate::error::OutboundResult;
use crate::flict::Flict;
use crate::github::GithubCli;
use crate::license::ResolveOptions;
use crate::pipeline::Pipeline;
use crate::process::{ProcessRunner, TokioProcessRunner};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tokio::io::BufReader;
use tracing::debug;

/// Settings for one run, after merging flags over the config file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSettings {
    /// License cache file
    pub cache_path: PathBuf,
    /// Resolution behaviour
    pub options: ResolveOptions,
    /// gh executable
    pub gh_program: String,
    /// flict executable
    pub solver_program: String,
    /// Directory flict runs in
    pub solver_dir: PathBuf,
}

impl RunSettings {
    /// Merge command-line flags over configuration values
    pub fn resolve(cli: &Cli, config: &Config) -> Self {
        let cache_path = cli
            .cache
            .clone()
            .or_else(|| config.cache.path.clone())
            .unwrap_or_else(ConfigManager::default_cache_path);

        let interval_secs = cli.interval.unwrap_or(config.cache.interval_secs);

        Self {
            cache_path,
            options: ResolveOptions {
                ignore_cache: cli.ignore_cache,
                interval: Duration::from_secs(interval_secs),
            },
            gh_program: config.github.program.clone(),
            solver_program: config.solver.program.clone(),
            solver_dir: config
                .solver
                .working_dir
                .clone()
                .unwrap_or_else(ConfigManager::tool_dir),
        }
    }
}

/// Execute the run command against stdin and stdout
pub async fn execute(cli: &Cli, config: &Config) -> OutboundResult<()> {
    let settings = RunSettings::resolve(cli, config);
    debug!("Run settings: {:?}", settings);

    let runner: Arc<dyn ProcessRunner> = Arc::new(TokioProcessRunner);
    let gh = GithubCli::new(Arc::clone(&runner)).with_program(settings.gh_program);
    let flict = Flict::new(runner, settings.solver_program, settings.solver_dir);

    let mut pipeline = Pipeline::new(&gh, &flict, settings.cache_path, settings.options);
    let input = BufReader::new(tokio::io::stdin());
    let mut output = tokio::io::stdout();

    pipeline.run(input, &mut output).await?;
    Ok(())
}
