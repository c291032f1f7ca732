//! Library Manager CLI
//!
//! Scans media library folders and prints the resulting catalog.

use clap::Parser;
use libman::cli::{args::Cli, commands::scan};
use libman::models::config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Parse command line arguments
    let cli = Cli::parse();

    // Initialize logging
    init_logging(cli.verbose);

    if cli.paths.is_empty() {
        anyhow::bail!(libman::Error::MissingLibraryPath);
    }

    let mut config = match &cli.config {
        Some(path) => config::load_config_from(path)?,
        None => config::load_config(),
    };
    if cli.unsorted {
        config.sort_entries = false;
    }
    if cli.sequential {
        config.parallel = false;
    }

    scan::scan(&cli.paths, cli.format, cli.output.as_deref(), config).await?;

    Ok(())
}

/// Initialize the logging system.
///
/// Logs go to stderr so the catalog on stdout stays machine-readable.
fn init_logging(verbose: bool) {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter = if verbose {
        EnvFilter::new("libman=debug")
    } else {
        EnvFilter::new("libman=info")
    };

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_target(false)
                .without_time()
                .with_writer(std::io::stderr),
        )
        .with(filter)
        .init();
}
