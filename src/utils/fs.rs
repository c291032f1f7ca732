//! File system utilities.

use crate::Result;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Direct children of a directory, split by entry kind.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct DirListing {
    /// Regular files.
    pub files: Vec<PathBuf>,
    /// Subdirectories.
    pub dirs: Vec<PathBuf>,
}

/// Check if a path exists and is a directory.
pub fn ensure_directory(path: &Path) -> Result<()> {
    if !path.exists() {
        return Err(crate::Error::PathNotFound(path.display().to_string()));
    }
    if !path.is_dir() {
        return Err(crate::Error::NotADirectory(path.display().to_string()));
    }
    Ok(())
}

/// List the direct children of a directory.
///
/// Symlinks are followed so a linked show folder is classified like a real one.
/// Entries that are neither files nor directories (broken links, sockets) are
/// dropped. With `sorted` the entries come back ordered by file name, otherwise
/// in whatever order the platform returns them.
pub fn list_children(path: &Path, sorted: bool) -> Result<DirListing> {
    ensure_directory(path)?;

    let mut walker = WalkDir::new(path).min_depth(1).max_depth(1).follow_links(true);
    if sorted {
        walker = walker.sort_by_file_name();
    }

    let mut listing = DirListing::default();
    for entry in walker.into_iter() {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                tracing::debug!("Skipping unreadable entry under {}: {}", path.display(), e);
                continue;
            }
        };

        let file_type = entry.file_type();
        if file_type.is_dir() {
            listing.dirs.push(entry.into_path());
        } else if file_type.is_file() {
            listing.files.push(entry.into_path());
        }
    }

    Ok(listing)
}

/// Get the last path component as a string.
///
/// Paths without one (like `/`) fall back to their full display form.
pub fn file_name_of(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string())
}

/// Make a path absolute against the current directory without touching symlinks.
pub fn absolute(path: &Path) -> Result<PathBuf> {
    if path.is_absolute() {
        Ok(path.to_path_buf())
    } else {
        Ok(std::env::current_dir()?.join(path))
    }
}
