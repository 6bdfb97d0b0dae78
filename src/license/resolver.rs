//! Sequential, rate-limited license resolution
//!
//! Repositories are resolved one at a time in input order. Cache hits are
//! returned immediately. Every other lookup waits `interval` first, unless it
//! is the very first repository of the input: the wait is keyed on the
//! position in the input, not on how many lookups actually went out.
//!
//! Every input line yields exactly one item. A failed lookup, or a blank
//! line, yields [`Resolution::Failed`] and the stream moves on. Only a
//! failure to read the input itself ends the stream with an error.

use crate::error::{OutboundError, OutboundResult};
use crate::github::LicenseProvider;
use crate::license::cache::LicenseCache;
use crate::license::record::LicenseResult;
use futures_util::stream::{self, Stream};
use std::time::Duration;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, Lines};
use tracing::{debug, error};

/// Default pause between lookups
pub const DEFAULT_INTERVAL: Duration = Duration::from_secs(3);

/// Resolution settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolveOptions {
    /// Skip cache reads (successful lookups are still written)
    pub ignore_cache: bool,
    /// Pause before each lookup after the first input line
    pub interval: Duration,
}

impl Default for ResolveOptions {
    fn default() -> Self {
        Self {
            ignore_cache: false,
            interval: DEFAULT_INTERVAL,
        }
    }
}

/// Outcome of resolving one repository
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// Served from the cache
    Cached(LicenseResult),
    /// Fetched from the provider and written to the cache
    Fetched(LicenseResult),
    /// The provider lookup failed; nothing was cached
    Failed { repo: String, reason: String },
}

impl Resolution {
    /// Repository this outcome is for
    pub fn repo(&self) -> &str {
        match self {
            Self::Cached(r) | Self::Fetched(r) => &r.repo,
            Self::Failed { repo, .. } => repo,
        }
    }

    /// Check whether the lookup failed
    pub fn is_failed(&self) -> bool {
        matches!(self, Self::Failed { .. })
    }

    /// The resolved record, or an `UNKNOWN` placeholder for failures
    pub fn into_license(self) -> LicenseResult {
        match self {
            Self::Cached(r) | Self::Fetched(r) => r,
            Self::Failed { repo, .. } => LicenseResult::unknown(repo),
        }
    }
}

/// Resolves repositories read line by line from `R`
///
/// Single pass: once exhausted it keeps returning `None`.
pub struct Resolver<'a, R> {
    lines: Lines<R>,
    cache: &'a mut LicenseCache,
    provider: &'a dyn LicenseProvider,
    options: ResolveOptions,
    position: usize,
    done: bool,
}

impl<'a, R> Resolver<'a, R>
where
    R: AsyncBufRead + Unpin,
{
    /// Create a resolver over newline-separated repository identifiers
    pub fn new(
        input: R,
        cache: &'a mut LicenseCache,
        provider: &'a dyn LicenseProvider,
        options: ResolveOptions,
    ) -> Self {
        Self {
            lines: input.lines(),
            cache,
            provider,
            options,
            position: 0,
            done: false,
        }
    }

    /// Resolve the next repository
    ///
    /// Returns `None` at end of input, or `Some(Err(_))` once if reading the
    /// input fails.
    pub async fn next(&mut self) -> Option<OutboundResult<Resolution>> {
        if self.done {
            return None;
        }

        let repo = match self.lines.next_line().await {
            Ok(Some(line)) => line.trim_end().to_string(),
            Ok(None) => {
                self.done = true;
                return None;
            }
            Err(e) => {
                self.done = true;
                return Some(Err(OutboundError::io("reading repository list", e)));
            }
        };

        let position = self.position;
        self.position += 1;
        Some(Ok(self.resolve(position, repo).await))
    }

    async fn resolve(&mut self, position: usize, repo: String) -> Resolution {
        debug!("Get license info: repo={}", repo);

        // `gh repo view ""` would describe the current directory's repository.
        if repo.is_empty() {
            error!("Get license info: position={} err=empty repository name", position);
            return Resolution::Failed {
                repo,
                reason: "empty repository name".to_string(),
            };
        }

        if !self.options.ignore_cache {
            if let Some(cached) = self.cache.get(&repo) {
                debug!("Get license info: repo={} cache hit", repo);
                return Resolution::Cached(cached.clone());
            }
        }

        if position != 0 && !self.options.interval.is_zero() {
            tokio::time::sleep(self.options.interval).await;
        }

        match self.provider.license_info(&repo).await {
            Ok(result) => {
                self.cache.put(result.repo.clone(), result.clone());
                Resolution::Fetched(result)
            }
            Err(e) => {
                error!("Get license info: repo={} err={}", repo, e);
                Resolution::Failed {
                    repo,
                    reason: e.to_string(),
                }
            }
        }
    }

    /// Turn the resolver into a lazy stream
    pub fn into_stream(self) -> impl Stream<Item = OutboundResult<Resolution>> + 'a
    where
        R: 'a,
    {
        stream::unfold(self, |mut resolver| async move {
            let item = resolver.next().await?;
            Some((item, resolver))
        })
    }
}

/// Resolve every repository in `input`, lazily and in order
pub fn resolve_all<'a, R>(
    input: R,
    cache: &'a mut LicenseCache,
    provider: &'a dyn LicenseProvider,
    options: ResolveOptions,
) -> impl Stream<Item = OutboundResult<Resolution>> + 'a
where
    R: AsyncBufRead + Unpin + 'a,
{
    Resolver::new(input, cache, provider, options).into_stream()
}
