//! Scan command implementation.
//!
//! Scans the library roots, reports roots that failed, and prints or saves
//! the resulting catalog.

use crate::cli::args::OutputFormat;
use crate::core::exporter::{self, Catalog};
use crate::core::library::LibraryScanner;
use crate::models::config::ScanConfig;
use crate::models::library::{Library, Show};
use crate::{Error, Result};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::{Path, PathBuf};

/// Execute the scan command.
pub async fn scan(
    paths: &[PathBuf],
    format: OutputFormat,
    output: Option<&Path>,
    config: ScanConfig,
) -> Result<()> {
    if paths.is_empty() {
        return Err(Error::MissingLibraryPath);
    }

    tracing::info!("Library path set to {:?}", paths);

    let scanner = LibraryScanner::with_config(config);

    let pb = (format == OutputFormat::Tree).then(|| {
        let pb = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.green} {msg}") {
            pb.set_style(style);
        }
        pb.set_message(format!("Scanning {} libraries...", paths.len()));
        pb.enable_steady_tick(std::time::Duration::from_millis(100));
        pb
    });

    let results = if scanner.config().parallel {
        scanner.scan_parallel(paths).await
    } else {
        scanner.scan_all(paths)
    };

    if let Some(pb) = pb {
        pb.finish_and_clear();
    }

    let (libraries, failures) = split_results(paths, results);
    for (path, e) in &failures {
        tracing::warn!("Failed to scan library {}: {}", path.display(), e);
    }

    if libraries.is_empty() {
        return Err(Error::other("No library could be scanned"));
    }

    let catalog = Catalog::new(libraries)?;
    tracing::info!(
        "Scanned {} libraries with {} shows",
        catalog.libraries.len(),
        catalog.libraries.iter().map(|l| l.shows.len()).sum::<usize>()
    );

    match output {
        Some(path) => exporter::save_catalog(&catalog, path)?,
        None if format == OutputFormat::Json => println!("{}", exporter::to_json(&catalog)?),
        None => {}
    }

    if format == OutputFormat::Tree {
        for library in &catalog.libraries {
            print_library(library);
        }
        print_summary(&catalog, &failures);
    }

    Ok(())
}

/// Split per-root results into scanned libraries and failed roots, keeping input order.
pub fn split_results(
    paths: &[PathBuf],
    results: Vec<Result<Library>>,
) -> (Vec<Library>, Vec<(PathBuf, Error)>) {
    let mut libraries = Vec::new();
    let mut failures = Vec::new();

    for (path, result) in paths.iter().zip(results) {
        match result {
            Ok(library) => libraries.push(library),
            Err(e) => failures.push((path.clone(), e)),
        }
    }

    (libraries, failures)
}

fn print_library(library: &Library) {
    println!(
        "{} {}",
        library.name.bold().cyan(),
        format!("({})", library.path.display()).dimmed()
    );

    for show in &library.shows {
        print_show(show);
    }
    println!();
}

fn print_show(show: &Show) {
    let title = if show.title.is_empty() {
        "<untitled>".to_string()
    } else {
        show.title.clone()
    };

    if show.movie {
        println!("  {} {}", "[MOVIE]".yellow(), title.bold());
    } else {
        println!("  {} {}", "[SERIES]".green(), title.bold());
    }
    if !show.tags.is_empty() {
        println!("    {}", show.tags.join(", ").dimmed());
    }

    for season in &show.seasons {
        let label = if season.title.is_empty() {
            format!("Season {}", season.number)
        } else {
            format!("Season {} - {}", season.number, season.title)
        };
        println!("    {} ({} episodes)", label, season.episodes.len());

        for episode in &season.episodes {
            if episode.title.is_empty() {
                println!("      {}", episode.number);
            } else {
                println!("      {} {}", episode.number, episode.title);
            }
        }
    }
}

fn print_summary(catalog: &Catalog, failures: &[(PathBuf, Error)]) {
    let series: usize = catalog.libraries.iter().map(|l| l.series().count()).sum();
    let movies: usize = catalog.libraries.iter().map(|l| l.movies().count()).sum();
    let episodes: usize = catalog.libraries.iter().map(Library::episode_count).sum();

    println!("{}", "Scan Summary".bold().green());
    println!("  {} {}", "Libraries:".bold(), catalog.libraries.len());
    println!("  {} {}", "Series:".bold(), series);
    println!("  {} {}", "Movies:".bold(), movies);
    println!("  {} {}", "Episodes:".bold(), episodes);
    println!("  {} {}", "Digest:".bold(), catalog.digest);

    if !failures.is_empty() {
        println!();
        println!("{}", "Failed Libraries:".bold().yellow());
        for (path, e) in failures {
            println!("  {} - {}", path.display().to_string().red(), e);
        }
    }
}
