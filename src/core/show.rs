//! Show classification.
//!
//! Decides whether a library entry is a standalone movie or a series folder.
//! A series folder with season subfolders may also hold loose video files;
//! those are catalogued as movies next to the series.

use crate::core::library::LibraryScanner;
use crate::core::tokenizer::{Category, Token};
use crate::models::library::Show;
use crate::utils::fs::file_name_of;
use std::path::{Path, PathBuf};

impl LibraryScanner {
    /// Classify a show candidate into zero, one or more shows.
    ///
    /// Failures are contained here: an entry that cannot be listed yields no
    /// shows instead of aborting the library scan.
    pub fn classify_show(&self, path: &Path) -> Vec<Show> {
        tracing::debug!("Parsing show located at {}", path.display());

        let tokens = self.tokenize(path);
        if is_video(&tokens) {
            let movie = movie_from_tokens(tokens, path.to_path_buf());
            tracing::debug!("Show {} is a movie", movie.title);
            return vec![movie];
        }

        let listing = match self.list(path) {
            Ok(listing) => listing,
            Err(e) if e.is_not_a_directory() => {
                tracing::debug!("Skipping non-video file {}", path.display());
                return Vec::new();
            }
            Err(e) => {
                tracing::warn!("Failed to list show {}: {}", path.display(), e);
                return Vec::new();
            }
        };

        let (title, tags) = title_and_tags(tokens);

        let single_season = match listing.dirs.as_slice() {
            [] => true,
            [only] => self.config().is_extras_name(&file_name_of(only)),
            _ => false,
        };

        let seasons = match self.seasons_from_dirs(path, listing.dirs) {
            Ok(seasons) => seasons,
            Err(e) => {
                tracing::warn!("Failed to resolve seasons of {}: {}", path.display(), e);
                return Vec::new();
            }
        };

        // Loose files only count as movies next to real season folders.
        let has_season_dirs = seasons.iter().any(|s| s.path.as_path() != path);

        let series = Show::series(title, seasons, tags, path.to_path_buf());
        if single_season || !has_season_dirs {
            return vec![series];
        }

        tracing::debug!(
            "Show {} has {} seasons, treating loose files as movies",
            series.title,
            series.seasons.len()
        );

        let movies: Vec<Show> = listing
            .files
            .into_iter()
            .filter_map(|file| {
                let tokens = self.tokenize(&file);
                if !is_video(&tokens) {
                    tracing::debug!("Skipping non-video file {}", file.display());
                    return None;
                }

                tracing::debug!("Parsing movie located at {}", file.display());
                let mut movie = movie_from_tokens(tokens, file);
                if movie.tags.is_empty() {
                    movie.tags = series.tags.clone();
                }
                Some(movie)
            })
            .collect();

        let mut shows = Vec::with_capacity(movies.len() + 1);
        shows.push(series);
        shows.extend(movies);
        shows
    }
}

fn is_video(tokens: &[Token]) -> bool {
    tokens
        .iter()
        .any(|t| t.category == Category::FileExtension)
}

/// Build a movie show from the tokens of its file name.
pub fn movie_from_tokens(tokens: Vec<Token>, path: PathBuf) -> Show {
    let (title, tags) = title_and_tags(tokens);
    Show::movie(title, tags, path)
}

/// Split show tokens into the title and the remaining tags.
fn title_and_tags(tokens: Vec<Token>) -> (String, Vec<String>) {
    let mut title = String::new();
    let mut tags = Vec::new();

    for token in tokens {
        match &token.category {
            Category::Title => title = token.value,
            Category::FileExtension | Category::FileName => {}
            Category::SeasonNumber
            | Category::EpisodeNumber
            | Category::EpisodeTitle
            | Category::Other(_) => tags.push(token.tag()),
        }
    }

    (title, tags)
}
