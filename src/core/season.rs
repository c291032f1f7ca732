//! Season resolution.
//!
//! A show directory's subdirectories are seasons when their name is a number
//! (`1`, `02`) or carries a season marker (`Season 2`, `S02`). Anything else
//! (extras, openings, credits) is left out of the catalog. A show without
//! season folders becomes a single season built from its own files.

use crate::core::library::LibraryScanner;
use crate::core::tokenizer::{Category, Token};
use crate::models::library::Season;
use crate::utils::fs::file_name_of;
use crate::utils::number::{parse_integer, parse_season};
use crate::Result;
use std::path::{Path, PathBuf};

/// A subdirectory accepted as a season folder.
#[derive(Debug)]
struct SeasonDir {
    path: PathBuf,
    /// Number parsed from a purely numeric folder name.
    numeric: Option<u16>,
    /// Whether the folder name is nothing but a number.
    numeric_name: bool,
    tokens: Vec<Token>,
}

impl LibraryScanner {
    /// Resolve the seasons of a show directory.
    pub fn resolve_seasons(&self, show_dir: &Path) -> Result<Vec<Season>> {
        let listing = self.list(show_dir)?;
        self.seasons_from_dirs(show_dir, listing.dirs)
    }

    /// Resolve seasons from already listed subdirectories of `show_dir`.
    pub(crate) fn seasons_from_dirs(&self, show_dir: &Path, dirs: Vec<PathBuf>) -> Result<Vec<Season>> {
        let season_dirs: Vec<SeasonDir> = dirs
            .into_iter()
            .filter_map(|dir| self.season_dir(dir))
            .collect();

        if season_dirs.is_empty() {
            tracing::debug!(
                "No season folders in {}, treating it as a single season",
                show_dir.display()
            );

            return Ok(vec![Season {
                title: String::new(),
                number: 1,
                episodes: self.resolve_episodes(show_dir)?,
                tags: Vec::new(),
                path: show_dir.to_path_buf(),
            }]);
        }

        tracing::debug!(
            "Found {} season folders in {}",
            season_dirs.len(),
            show_dir.display()
        );

        Ok(season_dirs
            .into_iter()
            .enumerate()
            .map(|(index, dir)| self.build_season(dir, index))
            .collect())
    }

    /// Classify a subdirectory, returning `None` for non-season folders.
    fn season_dir(&self, path: PathBuf) -> Option<SeasonDir> {
        let name = file_name_of(&path);
        let numeric_name = parse_integer(&name).is_some();
        let tokens = self.tokenize(&path);

        let has_season = tokens
            .iter()
            .any(|t| t.category == Category::SeasonNumber);

        if !numeric_name && !has_season {
            tracing::debug!("Skipping non-season folder {}", path.display());
            return None;
        }

        Some(SeasonDir {
            numeric: parse_season(&name),
            numeric_name,
            path,
            tokens,
        })
    }

    fn build_season(&self, dir: SeasonDir, index: usize) -> Season {
        tracing::debug!("Parsing season located at {}", dir.path.display());

        let mut title = String::new();
        let mut season = None;
        let mut tags = Vec::new();

        for token in dir.tokens {
            match &token.category {
                Category::Title => title = token.value,
                Category::SeasonNumber => season = parse_season(&token.value),
                Category::FileName | Category::FileExtension => {}
                // The number of a bare numeric folder is the season itself.
                Category::EpisodeNumber if dir.numeric_name => {}
                Category::EpisodeNumber | Category::EpisodeTitle | Category::Other(_) => {
                    tags.push(token.tag())
                }
            }
        }

        let position = u16::try_from(index + 1).unwrap_or(u16::MAX);
        let number = season.or(dir.numeric).unwrap_or(position);

        let episodes = match self.resolve_episodes(&dir.path) {
            Ok(episodes) => episodes,
            Err(e) => {
                tracing::warn!("Failed to list season {}: {}", dir.path.display(), e);
                Vec::new()
            }
        };

        Season {
            title,
            number,
            episodes,
            tags,
            path: dir.path,
        }
    }
}
