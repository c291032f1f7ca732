//! Command line argument definitions.

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Library Manager - Catalog your media folders into shows, seasons and episodes
#[derive(Parser, Debug)]
#[command(name = "libman")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Library root to scan (repeat for several libraries)
    #[arg(long = "path", value_name = "DIR")]
    pub paths: Vec<PathBuf>,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
    pub format: OutputFormat,

    /// Write the catalog JSON to this file instead of stdout
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Configuration file (default: <config dir>/libman/config.toml)
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Keep the platform's directory order instead of sorting by name
    #[arg(long)]
    pub unsorted: bool,

    /// Scan library roots one at a time
    #[arg(long)]
    pub sequential: bool,
}

/// How the catalog is printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Catalog JSON
    Json,
    /// Human readable tree
    Tree,
}
