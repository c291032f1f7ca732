//! Library catalog data model.
//!
//! A library owns shows, a series show owns seasons and a season owns
//! episodes. Movies are shows without seasons.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// A single scanned library root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Library {
    /// Library name (basename of the root directory).
    pub name: String,
    /// Absolute path of the root directory.
    #[serde(with = "lossy_path")]
    pub path: PathBuf,
    /// Shows found under the root, in listing order.
    pub shows: Vec<Show>,
}

impl Library {
    /// Series shows of this library.
    pub fn series(&self) -> impl Iterator<Item = &Show> {
        self.shows.iter().filter(|s| !s.movie)
    }

    /// Movie shows of this library.
    pub fn movies(&self) -> impl Iterator<Item = &Show> {
        self.shows.iter().filter(|s| s.movie)
    }

    /// Total number of episodes over all series.
    pub fn episode_count(&self) -> usize {
        self.shows.iter().map(Show::episode_count).sum()
    }
}

/// A series or a movie.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Show {
    /// Show title.
    pub title: String,
    /// Whether this show is a single movie file.
    pub movie: bool,
    /// Seasons of a series. Always empty for movies.
    pub seasons: Vec<Season>,
    /// Tags like release group, resolution or audio.
    pub tags: Vec<String>,
    /// Directory of a series, or the file of a movie.
    #[serde(with = "lossy_path")]
    pub path: PathBuf,
}

impl Show {
    /// Create a movie show.
    pub fn movie(title: String, tags: Vec<String>, path: PathBuf) -> Self {
        Self {
            title,
            movie: true,
            seasons: Vec::new(),
            tags,
            path,
        }
    }

    /// Create a series show.
    pub fn series(title: String, seasons: Vec<Season>, tags: Vec<String>, path: PathBuf) -> Self {
        Self {
            title,
            movie: false,
            seasons,
            tags,
            path,
        }
    }

    /// Number of episodes over all seasons.
    pub fn episode_count(&self) -> usize {
        self.seasons.iter().map(|s| s.episodes.len()).sum()
    }
}

/// A season of a series.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Season {
    /// Season title, empty when the directory name carries none.
    pub title: String,
    /// Season number, starting at 1.
    pub number: u16,
    /// Episodes, in listing order.
    pub episodes: Vec<Episode>,
    /// Tags like release group, resolution or audio.
    pub tags: Vec<String>,
    /// Season directory.
    #[serde(with = "lossy_path")]
    pub path: PathBuf,
}

/// A single episode file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Episode {
    /// Episode number (a string because of specials and recaps named like `2.5`).
    pub number: String,
    /// Episode title.
    pub title: String,
    /// Tags like release group, resolution or audio.
    pub tags: Vec<String>,
    /// Episode file.
    #[serde(with = "lossy_path")]
    pub path: PathBuf,
}

/// Paths are written as UTF-8 strings, with invalid sequences replaced.
mod lossy_path {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::path::{Path, PathBuf};

    pub fn serialize<S: Serializer>(path: &Path, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&path.to_string_lossy())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<PathBuf, D::Error> {
        String::deserialize(deserializer).map(PathBuf::from)
    }
}
