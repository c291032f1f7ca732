//! Catalog export and import.
//!
//! The catalog is the machine-readable dump of a scan: the libraries plus a
//! schema version, a timestamp and a digest of the library contents.

use crate::models::library::Library;
use crate::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fs;
use std::path::Path;

/// Catalog schema version.
pub const CATALOG_VERSION: &str = "1.0";

/// A scanned batch of libraries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Catalog {
    /// Schema version.
    pub version: String,
    /// When the scan finished.
    pub scanned_at: DateTime<Utc>,
    /// Hex SHA-256 of the libraries, identical for identical trees.
    pub digest: String,
    /// Scanned libraries, in the order the roots were given.
    pub libraries: Vec<Library>,
}

impl Catalog {
    /// Wrap scanned libraries in a catalog.
    pub fn new(libraries: Vec<Library>) -> Result<Self> {
        Ok(Self {
            version: CATALOG_VERSION.to_string(),
            scanned_at: Utc::now(),
            digest: catalog_digest(&libraries)?,
            libraries,
        })
    }

    /// Whether the stored digest still matches the libraries.
    pub fn verify_digest(&self) -> bool {
        catalog_digest(&self.libraries).is_ok_and(|digest| digest == self.digest)
    }
}

/// Compute the content digest of a set of libraries.
pub fn catalog_digest(libraries: &[Library]) -> Result<String> {
    let bytes = serde_json::to_vec(libraries)?;
    let mut hasher = Sha256::new();
    hasher.update(&bytes);
    Ok(hasher
        .finalize()
        .iter()
        .map(|b| format!("{:02x}", b))
        .collect())
}

/// Encode a catalog as pretty-printed JSON.
pub fn to_json(catalog: &Catalog) -> Result<String> {
    Ok(serde_json::to_string_pretty(catalog)?)
}

/// Save a catalog to a JSON file, creating parent directories as needed.
pub fn save_catalog(catalog: &Catalog, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent)?;
        }
    }

    fs::write(path, to_json(catalog)?)?;
    tracing::info!("Catalog saved to {}", path.display());
    Ok(())
}

/// Load a catalog from a JSON file.
pub fn load_catalog(path: &Path) -> Result<Catalog> {
    if !path.exists() {
        return Err(crate::Error::PathNotFound(path.display().to_string()));
    }

    let content = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn library(name: &str) -> Library {
        Library {
            name: name.to_string(),
            path: PathBuf::from(format!("/media/{}", name)),
            shows: vec![],
        }
    }

    #[test]
    fn test_digest_is_stable() {
        let a = catalog_digest(&[library("anime")]).unwrap();
        let b = catalog_digest(&[library("anime")]).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.len(), 64);
    }

    #[test]
    fn test_digest_changes_with_content() {
        assert_ne!(
            catalog_digest(&[library("anime")]).unwrap(),
            catalog_digest(&[library("movies")]).unwrap()
        );
    }

    #[test]
    fn test_verify_digest() {
        let mut catalog = Catalog::new(vec![library("anime")]).unwrap();
        assert!(catalog.verify_digest());
        assert_eq!(catalog.version, CATALOG_VERSION);

        catalog.libraries.push(library("movies"));
        assert!(!catalog.verify_digest());
    }
}
