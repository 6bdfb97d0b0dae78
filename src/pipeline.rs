//! Run orchestration
//!
//! A run moves through `Idle -> Resolving -> Flushed -> Solved -> Done`:
//!
//! 1. Load the cache and resolve every input repository.
//! 2. Flush the cache, whatever happened while resolving.
//! 3. Hand the collected flict identifiers to the solver (skipped when empty).
//! 4. Write the solver's answer, one identifier per line.
//!
//! The flush always precedes the solver call, so a solver failure never
//! loses freshly fetched licenses.

use crate::error::{OutboundError, OutboundResult};
use crate::flict::OutboundSolver;
use crate::github::LicenseProvider;
use crate::license::{github_to_flict, resolve_all, CacheGuard, LicenseCache, Resolution, ResolveOptions};
use futures_util::StreamExt;
use std::fmt;
use std::path::PathBuf;
use std::pin::pin;
use tokio::io::{AsyncBufRead, AsyncWrite, AsyncWriteExt};
use tracing::{debug, error, info, warn};

/// Stage of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Idle,
    Resolving,
    Flushed,
    Solved,
    Done,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Idle => "idle",
            Self::Resolving => "resolving",
            Self::Flushed => "flushed",
            Self::Solved => "solved",
            Self::Done => "done",
        };
        write!(f, "{}", name)
    }
}

/// Counters and result of a completed run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Repositories read from the input
    pub total: usize,
    /// Served from the cache
    pub cached: usize,
    /// Fetched from GitHub
    pub fetched: usize,
    /// Lookups that failed
    pub failed: usize,
    /// Repositories left out of the solver input (failed lookups included)
    pub unresolved: usize,
    /// Outbound license candidates, in solver order
    pub outbound: Vec<String>,
}

/// Collects flict identifiers from resolved repositories
#[derive(Debug, Default)]
pub struct Aggregator {
    licenses: Vec<String>,
    summary: RunSummary,
}

impl Aggregator {
    /// Create an empty aggregator
    pub fn new() -> Self {
        Self::default()
    }

    /// Translate one resolution and keep its flict identifier, if any
    pub fn absorb(&mut self, resolution: Resolution) {
        self.summary.total += 1;
        match resolution {
            Resolution::Cached(_) => self.summary.cached += 1,
            Resolution::Fetched(_) => self.summary.fetched += 1,
            Resolution::Failed { .. } => self.summary.failed += 1,
        }

        let license = resolution.into_license();
        let flict = github_to_flict(&license.info.key);
        info!(
            "license: repo={} github={} flict={}",
            license.repo,
            license.info.key,
            flict.unwrap_or("None")
        );

        match flict {
            Some(id) => self.licenses.push(id.to_string()),
            None => {
                error!(
                    "license unknown: repo={} license={}",
                    license.repo, license.info.key
                );
                self.summary.unresolved += 1;
            }
        }
    }

    fn into_parts(self) -> (Vec<String>, RunSummary) {
        (self.licenses, self.summary)
    }
}

/// Drives one run from repository list to outbound licenses
pub struct Pipeline<'a> {
    provider: &'a dyn LicenseProvider,
    solver: &'a dyn OutboundSolver,
    cache_path: PathBuf,
    options: ResolveOptions,
    stage: Stage,
}

impl<'a> Pipeline<'a> {
    /// Create a pipeline using the cache file at `cache_path`
    pub fn new(
        provider: &'a dyn LicenseProvider,
        solver: &'a dyn OutboundSolver,
        cache_path: impl Into<PathBuf>,
        options: ResolveOptions,
    ) -> Self {
        Self {
            provider,
            solver,
            cache_path: cache_path.into(),
            options,
            stage: Stage::Idle,
        }
    }

    /// Current stage; after a failed run, the stage the failure happened in
    pub fn stage(&self) -> Stage {
        self.stage
    }

    /// Read repositories from `input` and write outbound licenses to `output`
    pub async fn run<R, W>(&mut self, input: R, output: &mut W) -> OutboundResult<RunSummary>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        let mut cache = CacheGuard::acquire(&self.cache_path)?;
        self.enter(Stage::Resolving);
        let resolved = self.resolve(input, &mut cache).await;

        let flushed = cache.release();
        if let Err(ref e) = flushed {
            error!("Failed to flush license cache: {}", e);
        }
        self.enter(Stage::Flushed);
        let aggregator = resolved?;
        flushed?;

        let (licenses, mut summary) = aggregator.into_parts();
        let outbound = self.solve(&licenses).await?;
        self.enter(Stage::Solved);

        for id in &outbound {
            output
                .write_all(format!("{}\n", id).as_bytes())
                .await
                .map_err(|e| OutboundError::io("writing outbound licenses", e))?;
        }
        output
            .flush()
            .await
            .map_err(|e| OutboundError::io("writing outbound licenses", e))?;
        self.enter(Stage::Done);

        summary.outbound = outbound;
        info!(
            "Resolved {} repositories: cached={} fetched={} failed={} unresolved={} outbound={}",
            summary.total,
            summary.cached,
            summary.fetched,
            summary.failed,
            summary.unresolved,
            summary.outbound.len()
        );
        Ok(summary)
    }

    async fn resolve<R>(&self, input: R, cache: &mut LicenseCache) -> OutboundResult<Aggregator>
    where
        R: AsyncBufRead + Unpin,
    {
        let mut aggregator = Aggregator::new();
        let mut resolutions = pin!(resolve_all(input, cache, self.provider, self.options));

        while let Some(resolution) = resolutions.next().await {
            aggregator.absorb(resolution?);
        }

        Ok(aggregator)
    }

    async fn solve(&self, licenses: &[String]) -> OutboundResult<Vec<String>> {
        if licenses.is_empty() {
            warn!("Cannot calculate outbound due to no input for flict");
            return Ok(Vec::new());
        }
        self.solver.outbound_candidates(licenses).await
    }

    fn enter(&mut self, stage: Stage) {
        debug!("Run stage: {} -> {}", self.stage, stage);
        self.stage = stage;
    }
}
