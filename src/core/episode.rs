//! Episode resolution.
//!
//! Maps the video files of a directory to episodes. Episode numbers come from
//! the filename tokens with this precedence:
//! 1. An explicit episode number.
//! 2. A purely numeric file name (`01.mkv`).
//! 3. A purely numeric title.
//! 4. The file's position among the video files of the directory, in which
//!    case the title token becomes the episode title.

use crate::core::library::LibraryScanner;
use crate::core::tokenizer::{Category, Token};
use crate::models::library::Episode;
use crate::utils::number::parse_integer;
use crate::Result;
use std::path::{Path, PathBuf};

impl LibraryScanner {
    /// Resolve the episodes of a directory, in listing order.
    ///
    /// Subdirectories and files without a video extension are ignored.
    pub fn resolve_episodes(&self, dir: &Path) -> Result<Vec<Episode>> {
        tracing::debug!("Parsing episodes located at {}", dir.display());

        let listing = self.list(dir)?;

        let (episodes, _) = listing.files.into_iter().fold(
            (Vec::new(), 0u32),
            |(mut episodes, accepted), file| {
                let tokens = self.tokenize(&file);
                match episode_from_tokens(tokens, accepted + 1, file) {
                    Some(episode) => {
                        episodes.push(episode);
                        (episodes, accepted + 1)
                    }
                    None => (episodes, accepted),
                }
            },
        );

        Ok(episodes)
    }
}

/// Build an episode from the tokens of a file name.
///
/// `position` is the 1-based index of this file among the accepted video files
/// of its directory. Returns `None` when the file is not a video file.
pub fn episode_from_tokens(tokens: Vec<Token>, position: u32, path: PathBuf) -> Option<Episode> {
    let mut name = String::new();
    let mut anime_title = String::new();
    let mut episode_title = String::new();
    let mut episode = String::new();
    let mut video = false;
    let mut tags = Vec::new();

    for token in tokens {
        match &token.category {
            Category::EpisodeTitle => episode_title = token.value,
            Category::Title => anime_title = token.value,
            Category::EpisodeNumber => episode = token.value,
            Category::FileExtension => video = true,
            Category::FileName => name = token.value,
            Category::SeasonNumber | Category::Other(_) => tags.push(token.tag()),
        }
    }

    if !video {
        tracing::debug!("Skipping non-video file {}", path.display());
        return None;
    }

    let number = Some(episode)
        .filter(|episode| !episode.is_empty())
        .or_else(|| parse_integer(&name).map(|n| n.to_string()))
        .or_else(|| parse_integer(&anime_title).map(|n| n.to_string()));

    let (number, title) = match number {
        Some(number) => (number, episode_title),
        None => (position.to_string(), anime_title),
    };

    Some(Episode {
        number,
        title,
        tags,
        path,
    })
}
