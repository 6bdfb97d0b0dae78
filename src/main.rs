//! gh-outbound - Outbound license suggestions
//!
//! CLI entry point. Repositories come in on stdin, outbound licenses go out
//! on stdout, logs go to stderr.

use clap::Parser;
use console::style;
use gh_outbound::cli::Cli;
use gh_outbound::config::ConfigManager;
use gh_outbound::error::OutboundResult;
use std::process::ExitCode;
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {}", style("Error:").red().bold(), e);
            if let Some(hint) = e.hint() {
                eprintln!("{} {}", style("Hint:").yellow(), hint);
            }
            ExitCode::FAILURE
        }
    }
}

async fn run() -> OutboundResult<()> {
    let cli = Cli::parse();

    // Load configuration
    let config_manager = if let Some(ref path) = cli.config {
        ConfigManager::with_path(path.clone())
    } else {
        ConfigManager::new()
    };
    let config = config_manager.load().await?;

    init_logging(cli.debug, &config.general.log_format);
    debug!("Using config: {}", config_manager.path().display());

    gh_outbound::cli::run(&cli, &config).await
}

/// Log to stderr; stdout carries the result
fn init_logging(debug: bool, format: &str) {
    let filter = if debug {
        EnvFilter::new("gh_outbound=debug")
    } else {
        EnvFilter::new("gh_outbound=info")
    };

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time();

    if format == "json" {
        builder.json().init();
    } else {
        builder.init();
    }
}
