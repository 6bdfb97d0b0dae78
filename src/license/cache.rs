//! Persistent license cache
//!
//! One JSON record per line, keyed by each record's own `nameWithOwner`.
//! The whole file is loaded at startup and rewritten in full on flush.
//!
//! Lines that fail to decode are logged and dropped, so a flush after a
//! damaged load leaves a clean file behind.

use crate::error::{OutboundError, OutboundResult};
use crate::license::record::LicenseResult;
use std::collections::BTreeMap;
use std::fs::{self, OpenOptions};
use std::ops::{Deref, DerefMut};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// In-memory view of the cache file
#[derive(Debug)]
pub struct LicenseCache {
    path: PathBuf,
    entries: BTreeMap<String, LicenseResult>,
}

impl LicenseCache {
    /// Load the cache file, creating it (and its directory) if absent
    pub fn load(path: impl Into<PathBuf>) -> OutboundResult<Self> {
        let path = path.into();
        touch(&path)?;

        let content = fs::read(&path)
            .map_err(|e| OutboundError::io(format!("reading cache {}", path.display()), e))?;

        let mut entries = BTreeMap::new();
        for (i, line) in content.split(|b| *b == b'\n').enumerate() {
            let linum = i + 1;
            let line = line.trim_ascii_end();
            if line.is_empty() {
                continue;
            }

            debug!(
                "Load license cache: linum={} line={}",
                linum,
                String::from_utf8_lossy(line)
            );
            match LicenseResult::from_json(line) {
                Ok(result) => {
                    entries.insert(result.repo.clone(), result);
                }
                Err(e) => warn!(
                    "Load license cache: linum={} line={} err={}",
                    linum,
                    String::from_utf8_lossy(line),
                    e
                ),
            }
        }

        debug!("Loaded {} cached license(s) from {}", entries.len(), path.display());
        Ok(Self { path, entries })
    }

    /// Look up a cached result
    pub fn get(&self, repo: &str) -> Option<&LicenseResult> {
        self.entries.get(repo)
    }

    /// Check whether a repository has a cached result
    pub fn contains(&self, repo: &str) -> bool {
        self.entries.contains_key(repo)
    }

    /// Insert or replace the result stored under `repo`
    pub fn put(&mut self, repo: impl Into<String>, result: LicenseResult) {
        self.entries.insert(repo.into(), result);
    }

    /// Number of cached results
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check whether the cache is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Rewrite the backing file with every current entry
    pub fn flush(&self) -> OutboundResult<()> {
        debug!("Flush license cache to {}", self.path.display());

        let mut content = String::new();
        for result in self.entries.values() {
            content.push_str(&result.to_json_line()?);
            content.push('\n');
        }

        fs::write(&self.path, content)
            .map_err(|e| OutboundError::io(format!("writing cache {}", self.path.display()), e))
    }
}

/// Scoped ownership of a [`LicenseCache`]
///
/// The cache is flushed exactly once: by [`CacheGuard::release`], or on drop
/// if the guard goes out of scope first (early return, panic unwinding).
#[derive(Debug)]
pub struct CacheGuard {
    cache: LicenseCache,
    flushed: bool,
}

impl CacheGuard {
    /// Load the cache at `path` and take ownership of it
    pub fn acquire(path: impl Into<PathBuf>) -> OutboundResult<Self> {
        Ok(Self {
            cache: LicenseCache::load(path)?,
            flushed: false,
        })
    }

    /// Flush the cache and give up the guard
    pub fn release(mut self) -> OutboundResult<()> {
        self.flush_once()
    }

    fn flush_once(&mut self) -> OutboundResult<()> {
        if self.flushed {
            return Ok(());
        }
        self.flushed = true;
        self.cache.flush()
    }
}

impl Deref for CacheGuard {
    type Target = LicenseCache;

    fn deref(&self) -> &LicenseCache {
        &self.cache
    }
}

impl DerefMut for CacheGuard {
    fn deref_mut(&mut self) -> &mut LicenseCache {
        &mut self.cache
    }
}

impl Drop for CacheGuard {
    fn drop(&mut self) {
        if let Err(e) = self.flush_once() {
            warn!("Failed to flush license cache: {}", e);
        }
    }
}

fn touch(path: &Path) -> OutboundResult<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| {
            OutboundError::io(format!("creating cache directory {}", parent.display()), e)
        })?;
    }

    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|e| OutboundError::io(format!("creating cache {}", path.display()), e))?;
    Ok(())
}
