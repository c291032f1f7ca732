//! Library scanning.
//!
//! [`LibraryScanner`] walks one or more library roots and builds the catalog.
//! Every direct subdirectory of a root is a show candidate; plain files at the
//! root level are ignored.

use crate::core::tokenizer::{FilenameTokenizer, Token, Tokenizer};
use crate::models::config::ScanConfig;
use crate::models::library::{Library, Show};
use crate::utils::fs::{self, file_name_of, DirListing};
use crate::{Error, Result};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Builds libraries from directory trees.
///
/// The scanner holds no per-scan state, so it can be cloned into worker tasks
/// and reused for any number of scans.
#[derive(Clone)]
pub struct LibraryScanner {
    tokenizer: Arc<dyn Tokenizer>,
    config: ScanConfig,
}

impl std::fmt::Debug for LibraryScanner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LibraryScanner")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl LibraryScanner {
    /// Create a new scanner with the default tokenizer and configuration.
    pub fn new() -> Self {
        Self::with_config(ScanConfig::default())
    }

    /// Create a new scanner with custom configuration.
    pub fn with_config(config: ScanConfig) -> Self {
        Self::with_tokenizer(FilenameTokenizer::new(), config)
    }

    /// Create a new scanner with a custom tokenizer.
    pub fn with_tokenizer<T: Tokenizer + 'static>(tokenizer: T, config: ScanConfig) -> Self {
        Self {
            tokenizer: Arc::new(tokenizer),
            config,
        }
    }

    /// Scanner configuration.
    pub fn config(&self) -> &ScanConfig {
        &self.config
    }

    /// Tokenize the last component of a path.
    pub(crate) fn tokenize(&self, path: &Path) -> Vec<Token> {
        self.tokenizer.tokenize(&file_name_of(path))
    }

    /// List a directory using the configured entry order.
    pub(crate) fn list(&self, path: &Path) -> Result<DirListing> {
        fs::list_children(path, self.config.sort_entries)
    }

    /// Scan a single library root.
    pub fn scan(&self, root: &Path) -> Result<Library> {
        let path = fs::absolute(root)?;
        tracing::debug!("Parsing library located at {}", path.display());

        let listing = self.list(&path)?;
        for file in &listing.files {
            tracing::debug!("Skipping stray file {}", file.display());
        }

        let shows: Vec<Show> = listing
            .dirs
            .iter()
            .flat_map(|dir| self.classify_show(dir))
            .collect();

        tracing::debug!("Library parsed with {} shows in it", shows.len());

        Ok(Library {
            name: file_name_of(&path),
            path,
            shows,
        })
    }

    /// Scan several library roots one after another.
    ///
    /// Results are index-aligned with `roots`; a failing root does not stop
    /// the others.
    pub fn scan_all(&self, roots: &[PathBuf]) -> Vec<Result<Library>> {
        tracing::debug!("Scanning {} library paths...", roots.len());

        roots.iter().map(|root| self.scan(root)).collect()
    }

    /// Scan several library roots on blocking worker threads.
    ///
    /// Results are index-aligned with `roots` regardless of completion order.
    pub async fn scan_parallel(&self, roots: &[PathBuf]) -> Vec<Result<Library>> {
        tracing::debug!("Scanning {} library paths in parallel...", roots.len());

        let handles = roots.iter().cloned().map(|root| {
            let scanner = self.clone();
            tokio::task::spawn_blocking(move || scanner.scan(&root))
        });

        futures::future::join_all(handles)
            .await
            .into_iter()
            .map(|joined| {
                joined.unwrap_or_else(|e| Err(Error::other(format!("Scan task failed: {}", e))))
            })
            .collect()
    }
}

impl Default for LibraryScanner {
    fn default() -> Self {
        Self::new()
    }
}
