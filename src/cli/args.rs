//! CLI argument definitions using clap derive

use clap::Parser;
use std::path::PathBuf;

/// gh-outbound - Suggest outbound licenses
///
/// Read dependency repos (owner/name, one per line) from stdin, suggest
/// outbound licenses.
#[derive(Parser, Debug)]
#[command(name = "gh-outbound")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Without reading cache from --cache (lookups are still cached)
    #[arg(long)]
    pub ignore_cache: bool,

    /// Enable debug logs
    #[arg(long)]
    pub debug: bool,

    /// Cache file
    #[arg(long, env = "GH_OUTBOUND_CACHE")]
    pub cache: Option<PathBuf>,

    /// Seconds to wait between GitHub lookups
    #[arg(long)]
    pub interval: Option<u64>,

    /// Configuration file path
    #[arg(short, long, env = "GH_OUTBOUND_CONFIG")]
    pub config: Option<PathBuf>,
}
