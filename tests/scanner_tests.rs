//! Integration tests for library scanning.
//!
//! Tests cover:
//! - Series folders with and without season folders
//! - Loose movie files next to season folders
//! - Extras folders and non-video files
//! - Season and episode number fallbacks
//! - Stray files and failing roots

use libman::core::library::LibraryScanner;
use libman::models::config::ScanConfig;
use libman::models::library::Library;
use libman::Error;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Create empty files (and their parent folders) under `root`.
fn touch(root: &Path, files: &[&str]) {
    for file in files {
        let path = root.join(file);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, "fake video").unwrap();
    }
}

fn scan(root: &Path) -> Library {
    LibraryScanner::new().scan(root).unwrap()
}

fn episode_numbers(library: &Library, show: usize, season: usize) -> Vec<String> {
    library.shows[show].seasons[season]
        .episodes
        .iter()
        .map(|e| e.number.clone())
        .collect()
}

#[test]
fn test_flat_series_folder() {
    let temp_dir = TempDir::new().unwrap();
    touch(temp_dir.path(), &["ShowA/01.mkv", "ShowA/02.mkv"]);

    let library = scan(temp_dir.path());

    assert_eq!(library.shows.len(), 1);
    let show = &library.shows[0];
    assert_eq!(show.title, "ShowA");
    assert!(!show.movie);
    assert_eq!(show.seasons.len(), 1);
    assert_eq!(show.seasons[0].number, 1);
    assert_eq!(show.seasons[0].title, "");
    assert_eq!(episode_numbers(&library, 0, 0), vec!["1", "2"]);
}

#[test]
fn test_numbered_season_folders() {
    let temp_dir = TempDir::new().unwrap();
    touch(temp_dir.path(), &["ShowB/1/01.mkv", "ShowB/2/01.mkv"]);

    let library = scan(temp_dir.path());

    assert_eq!(library.shows.len(), 1);
    let seasons = &library.shows[0].seasons;
    assert_eq!(seasons.len(), 2);
    assert_eq!(seasons[0].number, 1);
    assert_eq!(seasons[1].number, 2);
    assert_eq!(episode_numbers(&library, 0, 0), vec!["1"]);
    assert_eq!(episode_numbers(&library, 0, 1), vec!["1"]);
}

#[test]
fn test_loose_movie_next_to_seasons() {
    let temp_dir = TempDir::new().unwrap();
    touch(temp_dir.path(), &["ShowB/MovieY.mkv", "ShowB/1/01.mkv"]);

    let library = scan(temp_dir.path());

    assert_eq!(library.shows.len(), 2);
    assert_eq!(library.shows[0].title, "ShowB");
    assert!(!library.shows[0].movie);
    assert_eq!(library.shows[1].title, "MovieY");
    assert!(library.shows[1].movie);
    assert!(library.shows[1].seasons.is_empty());
    assert!(library.shows[1].path.ends_with("ShowB/MovieY.mkv"));
}

#[test]
fn test_loose_movie_inherits_series_tags() {
    let temp_dir = TempDir::new().unwrap();
    touch(
        temp_dir.path(),
        &[
            "[Group] Show [BD]/MovieY.mkv",
            "[Group] Show [BD]/Movie Z [720p].mkv",
            "[Group] Show [BD]/1/01.mkv",
        ],
    );

    let library = scan(temp_dir.path());

    assert_eq!(library.shows.len(), 3);
    let series = &library.shows[0];
    assert_eq!(series.title, "Show");
    assert_eq!(series.tags, vec!["ReleaseGroup=Group", "Source=BD"]);
    // Sorted by name: "Movie Z [720p].mkv" < "MovieY.mkv"
    assert_eq!(library.shows[1].title, "Movie Z");
    assert_eq!(library.shows[1].tags, vec!["VideoResolution=720p"]);
    assert_eq!(library.shows[2].title, "MovieY");
    assert_eq!(library.shows[2].tags, series.tags);
}

#[test]
fn test_stray_file_at_root_is_skipped() {
    let temp_dir = TempDir::new().unwrap();
    touch(temp_dir.path(), &["stray.mkv", "notes.txt", "ShowA/01.mkv"]);

    let library = scan(temp_dir.path());

    assert_eq!(library.shows.len(), 1);
    assert_eq!(library.shows[0].title, "ShowA");
}

#[test]
fn test_single_extras_folder_keeps_one_season() {
    let temp_dir = TempDir::new().unwrap();
    touch(
        temp_dir.path(),
        &["Show/EXTRAS/Making of.mkv", "Show/01.mkv", "Show/02.mkv"],
    );

    let library = scan(temp_dir.path());

    assert_eq!(library.shows.len(), 1);
    let seasons = &library.shows[0].seasons;
    assert_eq!(seasons.len(), 1);
    assert_eq!(seasons[0].number, 1);
    assert_eq!(seasons[0].title, "");
    assert_eq!(episode_numbers(&library, 0, 0), vec!["1", "2"]);
}

#[test]
fn test_folders_without_seasons_keep_one_season() {
    let temp_dir = TempDir::new().unwrap();
    touch(
        temp_dir.path(),
        &["Show/Openings/OP1.mkv", "Show/Endings/ED1.mkv", "Show/01.mkv"],
    );

    let library = scan(temp_dir.path());

    assert_eq!(library.shows.len(), 1);
    assert_eq!(library.shows[0].seasons.len(), 1);
    assert_eq!(library.shows[0].seasons[0].number, 1);
    assert_eq!(episode_numbers(&library, 0, 0), vec!["1"]);
}

#[test]
fn test_extras_folder_next_to_seasons_is_excluded() {
    let temp_dir = TempDir::new().unwrap();
    touch(
        temp_dir.path(),
        &["Show/Season 3/01.mkv", "Show/Extras/Trailer.mkv"],
    );

    let library = scan(temp_dir.path());

    assert_eq!(library.shows.len(), 1);
    let seasons = &library.shows[0].seasons;
    assert_eq!(seasons.len(), 1);
    assert_eq!(seasons[0].number, 3);
    assert!(seasons[0].path.ends_with("Season 3"));
}

#[test]
fn test_season_number_precedence() {
    let temp_dir = TempDir::new().unwrap();
    touch(
        temp_dir.path(),
        &["Show/1/01.mkv", "Show/Season 5/01.mkv", "Show/S07/01.mkv"],
    );

    let library = scan(temp_dir.path());

    // Sorted by name: "1", "S07", "Season 5"
    let numbers: Vec<_> = library.shows[0].seasons.iter().map(|s| s.number).collect();
    assert_eq!(numbers, vec![1, 7, 5]);
}

#[test]
fn test_only_video_extensions_become_episodes() {
    let video = [
        "mkv", "MKV", "mp4", "avi", "mov", "wmv", "m4v", "ts", "m2ts", "webm", "mpg", "rmvb",
    ];
    let other = [
        "srt", "ass", "sub", "idx", "nfo", "txt", "jpg", "png", "part", "mkv~", "",
    ];

    let temp_dir = TempDir::new().unwrap();
    let mut expected = Vec::new();
    for (index, ext) in video.iter().chain(other.iter()).enumerate() {
        let name = if ext.is_empty() {
            format!("{:02}", index + 1)
        } else {
            format!("{:02}.{}", index + 1, ext)
        };
        touch(temp_dir.path(), &[&format!("Show/{}", name)]);
        if index < video.len() {
            expected.push(name);
        }
    }

    let library = scan(temp_dir.path());

    let found: Vec<String> = library.shows[0].seasons[0]
        .episodes
        .iter()
        .map(|e| e.path.file_name().unwrap().to_string_lossy().to_string())
        .collect();
    assert_eq!(found, expected);
}

#[test]
fn test_episode_number_fallbacks() {
    let temp_dir = TempDir::new().unwrap();
    touch(
        temp_dir.path(),
        &[
            "Show/[Group] Show - 05 [1080p].mkv",
            "Show/Ending.mkv",
            "Show/Opening.mkv",
        ],
    );

    let library = scan(temp_dir.path());

    let episodes = &library.shows[0].seasons[0].episodes;
    assert_eq!(episodes.len(), 3);
    // Position among video files, titled after the file
    assert_eq!(episodes[0].number, "1");
    assert_eq!(episodes[0].title, "Ending");
    assert_eq!(episodes[1].number, "2");
    assert_eq!(episodes[1].title, "Opening");
    // Explicit episode number
    assert_eq!(episodes[2].number, "5");
    assert_eq!(episodes[2].title, "");
    assert_eq!(
        episodes[2].tags,
        vec!["ReleaseGroup=Group", "VideoResolution=1080p"]
    );
}

#[test]
fn test_standalone_movie_under_root_directory_entry() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    let show = root.join("Your Name.mkv");
    fs::create_dir(&show).unwrap();
    touch(root, &["Your Name.mkv/video.mkv"]);

    let library = scan(root);

    assert_eq!(library.shows.len(), 1);
    assert!(library.shows[0].movie);
    assert_eq!(library.shows[0].title, "Your Name");
}

#[test]
fn test_scan_is_idempotent() {
    let temp_dir = TempDir::new().unwrap();
    touch(
        temp_dir.path(),
        &[
            "ShowA/01.mkv",
            "ShowA/02.mkv",
            "ShowB/1/01.mkv",
            "ShowB/MovieY.mkv",
            "ShowB/Extras/x.mkv",
        ],
    );

    let scanner = LibraryScanner::new();
    let first = scanner.scan(temp_dir.path()).unwrap();
    let second = scanner.scan(temp_dir.path()).unwrap();

    assert_eq!(first, second);
}

#[test]
fn test_scan_root_that_is_a_file() {
    let temp_dir = TempDir::new().unwrap();
    touch(temp_dir.path(), &["movie.mkv"]);

    let result = LibraryScanner::new().scan(&temp_dir.path().join("movie.mkv"));
    assert!(matches!(result, Err(Error::NotADirectory(_))));
}

#[test]
fn test_scan_all_isolates_failures() {
    let temp_dir = TempDir::new().unwrap();
    touch(temp_dir.path(), &["anime/ShowA/01.mkv"]);

    let roots = vec![
        temp_dir.path().join("anime"),
        temp_dir.path().join("missing"),
    ];
    let results = LibraryScanner::new().scan_all(&roots);

    assert_eq!(results.len(), 2);
    assert_eq!(results[0].as_ref().unwrap().name, "anime");
    assert!(matches!(results[1], Err(Error::PathNotFound(_))));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_scan_parallel_keeps_input_order() {
    let temp_dir = TempDir::new().unwrap();
    touch(
        temp_dir.path(),
        &["c/Show/01.mkv", "a/Show/01.mkv", "b/Show/01.mkv"],
    );

    let roots: Vec<PathBuf> = ["c", "missing", "a", "b"]
        .iter()
        .map(|name| temp_dir.path().join(name))
        .collect();
    let scanner = LibraryScanner::new();

    let parallel = scanner.scan_parallel(&roots).await;
    let sequential = scanner.scan_all(&roots);

    assert_eq!(parallel.len(), 4);
    assert_eq!(parallel[0].as_ref().unwrap().name, "c");
    assert!(parallel[1].is_err());
    assert_eq!(parallel[2].as_ref().unwrap().name, "a");
    assert_eq!(parallel[3].as_ref().unwrap().name, "b");
    assert_eq!(
        parallel[3].as_ref().unwrap(),
        sequential[3].as_ref().unwrap()
    );
}

#[test]
fn test_custom_extras_names() {
    let temp_dir = TempDir::new().unwrap();
    touch(
        temp_dir.path(),
        &["Show/Bonus/Season 2.mkv", "Show/MovieY.mkv", "Show/01.mkv"],
    );

    let config = ScanConfig {
        extras_names: vec!["bonus".to_string()],
        ..ScanConfig::default()
    };
    let library = LibraryScanner::with_config(config)
        .scan(temp_dir.path())
        .unwrap();

    assert_eq!(library.shows.len(), 1);
    assert_eq!(library.shows[0].seasons[0].episodes.len(), 2);
}
