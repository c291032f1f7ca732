//! Filename tokenizer.
//!
//! Splits a media filename into categorized tokens (title, season number,
//! episode number, episode title, extension, and release metadata such as
//! group, resolution or audio). The scanner only depends on the [`Tokenizer`]
//! trait; [`FilenameTokenizer`] is the default implementation.

use crate::utils::number::normalize_number;
use regex::Regex;
use std::ops::Range;
use std::sync::LazyLock;

/// Supported video file extensions.
const VIDEO_EXTENSIONS: &[&str] = &[
    // Common formats
    "mkv", "mp4", "avi", "mov", "wmv", // Additional formats
    "m4v", "ts", "m2ts", "flv", "webm", // Less common but supported
    "mpg", "mpeg", "vob", "ogv", "ogm", "divx", "xvid", "3gp", "3g2", "mts", "rm", "rmvb", "asf",
    "f4v",
];

/// Release metadata keywords (uppercase) and the tag category they produce.
const KEYWORDS: &[(&str, &str)] = &[
    // Resolution
    ("480P", "VideoResolution"),
    ("576P", "VideoResolution"),
    ("720P", "VideoResolution"),
    ("1080P", "VideoResolution"),
    ("1080I", "VideoResolution"),
    ("2160P", "VideoResolution"),
    ("4K", "VideoResolution"),
    ("UHD", "VideoResolution"),
    ("1280X720", "VideoResolution"),
    ("1920X1080", "VideoResolution"),
    ("3840X2160", "VideoResolution"),
    // Video terms
    ("H264", "VideoTerm"),
    ("H265", "VideoTerm"),
    ("X264", "VideoTerm"),
    ("X265", "VideoTerm"),
    ("HEVC", "VideoTerm"),
    ("AVC", "VideoTerm"),
    ("AV1", "VideoTerm"),
    ("XVID", "VideoTerm"),
    ("DIVX", "VideoTerm"),
    ("VP9", "VideoTerm"),
    ("8BIT", "VideoTerm"),
    ("10BIT", "VideoTerm"),
    ("HI10", "VideoTerm"),
    ("HI10P", "VideoTerm"),
    ("HDR", "VideoTerm"),
    ("HDR10", "VideoTerm"),
    ("REMUX", "VideoTerm"),
    // Audio terms
    ("AAC", "AudioTerm"),
    ("AC3", "AudioTerm"),
    ("EAC3", "AudioTerm"),
    ("FLAC", "AudioTerm"),
    ("MP3", "AudioTerm"),
    ("OPUS", "AudioTerm"),
    ("DTS", "AudioTerm"),
    ("DTS-HD", "AudioTerm"),
    ("TRUEHD", "AudioTerm"),
    ("ATMOS", "AudioTerm"),
    ("2CH", "AudioTerm"),
    ("5.1", "AudioTerm"),
    ("5.1CH", "AudioTerm"),
    ("7.1", "AudioTerm"),
    ("DUALAUDIO", "AudioTerm"),
    ("DUAL-AUDIO", "AudioTerm"),
    // Source
    ("BD", "Source"),
    ("BDRIP", "Source"),
    ("BLURAY", "Source"),
    ("BLU-RAY", "Source"),
    ("DVD", "Source"),
    ("DVDRIP", "Source"),
    ("WEB", "Source"),
    ("WEB-DL", "Source"),
    ("WEBRIP", "Source"),
    ("HDTV", "Source"),
    ("TV", "Source"),
    // Language
    ("ENG", "Language"),
    ("ENGLISH", "Language"),
    ("JAP", "Language"),
    ("JPN", "Language"),
    ("ESP", "Language"),
    ("SPANISH", "Language"),
    ("CHS", "Language"),
    ("CHT", "Language"),
    ("MULTI", "Language"),
    // Subtitles
    ("SUB", "Subtitles"),
    ("SUBBED", "Subtitles"),
    ("DUB", "Subtitles"),
    ("DUBBED", "Subtitles"),
    ("HARDSUB", "Subtitles"),
    ("SOFTSUB", "Subtitles"),
    ("MULTISUB", "Subtitles"),
    ("VOSTFR", "Subtitles"),
];

/// Bracketed group: `[...]`, `(...)`, `{...}` or `【...】`.
static BRACKET_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[\[\(\{【]([^\[\]\(\)\{\}【】]*)[\]\)\}】]").expect("Invalid bracket pattern")
});

/// CRC32 checksum, usually the last bracket of a fansub release.
static CHECKSUM_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9A-Fa-f]{8}$").expect("Invalid checksum pattern"));

/// Release year.
static YEAR_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?:19|20)\d{2}$").expect("Invalid year pattern"));

/// Release version: v2, V3.
static VERSION_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[vV](\d)$").expect("Invalid version pattern"));

/// Combined season and episode: S01E02, S1 E2, S01E02v2.
static SEASON_EPISODE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\bS(\d{1,2}) ?E(\d{1,4}(?:\.\d)?)(?:v(\d))?\b")
        .expect("Invalid season episode pattern")
});

/// Season alone: "Season 2", "2nd Season", "S2".
static SEASON_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r"(?i)\b(?:season|saison) ?(\d{1,2})\b",
        r"(?i)\b(\d{1,2})(?:st|nd|rd|th) season\b",
        r"(?i)\bS(\d{1,2})\b",
    ]
    .iter()
    .map(|p| Regex::new(p).expect("Invalid season pattern"))
    .collect()
});

/// Episode alone: "E05", "Ep 05", "Episode 5", "- 05", "#05", or a trailing number.
static EPISODE_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r"(?i)\b(?:episode|ep|e) ?(\d{1,4}(?:\.\d)?)(?:v(\d))?\b",
        r" - +(\d{1,4}(?:\.\d)?)(?:v(\d))?\b",
        r"#(\d{1,4}(?:\.\d)?)(?:v(\d))?\b",
        r"(?:^|\s)(\d{1,4}(?:\.\d)?)(?:v(\d))?\s*$",
    ]
    .iter()
    .map(|p| Regex::new(p).expect("Invalid episode pattern"))
    .collect()
});

static WORD_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\S+").expect("Invalid word pattern"));

/// Token category.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Category {
    Title,
    SeasonNumber,
    EpisodeNumber,
    EpisodeTitle,
    FileExtension,
    FileName,
    /// Any other metadata, named by its category (e.g. `ReleaseGroup`).
    Other(String),
}

impl Category {
    /// Create an `Other` category.
    pub fn other<S: Into<String>>(name: S) -> Self {
        Category::Other(name.into())
    }

    /// Category name as used in tags.
    pub fn name(&self) -> &str {
        match self {
            Category::Title => "Title",
            Category::SeasonNumber => "SeasonNumber",
            Category::EpisodeNumber => "EpisodeNumber",
            Category::EpisodeTitle => "EpisodeTitle",
            Category::FileExtension => "FileExtension",
            Category::FileName => "FileName",
            Category::Other(name) => name,
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// A categorized fragment of a filename.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub category: Category,
    pub value: String,
}

impl Token {
    /// Create a new token.
    pub fn new<S: Into<String>>(category: Category, value: S) -> Self {
        Self {
            category,
            value: value.into(),
        }
    }

    /// Render the token as a `Category=Value` tag.
    pub fn tag(&self) -> String {
        format!("{}={}", self.category, self.value)
    }
}

/// Turns a filename (basename only) into an ordered list of tokens.
///
/// Implementations must be pure and total: the same input always yields the
/// same tokens, and unparseable names yield sparse tokens rather than errors.
pub trait Tokenizer: Send + Sync {
    fn tokenize(&self, filename: &str) -> Vec<Token>;
}

/// Default regex and keyword based tokenizer for anime and scene release names.
#[derive(Debug, Default, Clone, Copy)]
pub struct FilenameTokenizer;

impl FilenameTokenizer {
    /// Create a new tokenizer.
    pub fn new() -> Self {
        Self
    }
}

/// Check if a file extension is a video format.
pub fn is_video_extension(ext: &str) -> bool {
    let ext_lower = ext.to_lowercase();
    VIDEO_EXTENSIONS.contains(&ext_lower.as_str())
}

/// Look up a release keyword.
fn keyword_category(word: &str) -> Option<&'static str> {
    let upper = word.to_uppercase();
    KEYWORDS
        .iter()
        .find(|(keyword, _)| *keyword == upper)
        .map(|(_, category)| *category)
}

/// Split a recognized video extension off a filename.
fn split_extension(filename: &str) -> (&str, Option<&str>) {
    match filename.rsplit_once('.') {
        Some((stem, ext)) if !stem.is_empty() && is_video_extension(ext) => (stem, Some(ext)),
        _ => (filename, None),
    }
}

/// Replace a byte range with spaces, keeping every other offset stable.
fn mask(text: &mut String, range: Range<usize>) {
    let blank = " ".repeat(range.len());
    text.replace_range(range, &blank);
}

/// Turn `.` and `_` separators into spaces. Dots inside numbers like `2.5` stay.
fn normalize_separators(text: &str) -> String {
    let bytes = text.as_bytes();
    text.char_indices()
        .map(|(i, c)| match c {
            '_' => ' ',
            '.' => {
                let digit_at = |j: usize| bytes.get(j).is_some_and(u8::is_ascii_digit);
                let fractional = i > 0 && digit_at(i - 1) && digit_at(i + 1) && !digit_at(i + 2);
                if fractional {
                    '.'
                } else {
                    ' '
                }
            }
            c => c,
        })
        .collect()
}

/// Collapse whitespace and strip dangling separators.
fn clean(text: &str) -> String {
    text.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .trim_matches(|c: char| c == '-' || c == ' ' || c == '~')
        .to_string()
}

impl Tokenizer for FilenameTokenizer {
    fn tokenize(&self, filename: &str) -> Vec<Token> {
        let (stem, extension) = split_extension(filename);

        let mut text = stem.to_string();
        // Metadata found outside the title, with its offset for ordering.
        let mut extra: Vec<(usize, Token)> = Vec::new();
        // Offsets where metadata starts; the title ends at the first of them.
        let mut boundaries: Vec<usize> = Vec::new();

        for (index, caps) in BRACKET_PATTERN.captures_iter(stem).enumerate() {
            let (Some(whole), Some(inner)) = (caps.get(0), caps.get(1)) else {
                continue;
            };
            let content = inner.as_str().trim();

            if content.is_empty() {
                mask(&mut text, whole.range());
            } else if CHECKSUM_PATTERN.is_match(content) {
                extra.push((whole.start(), Token::new(Category::other("FileChecksum"), content)));
                mask(&mut text, whole.range());
                boundaries.push(whole.start());
            } else if YEAR_PATTERN.is_match(content) {
                extra.push((whole.start(), Token::new(Category::other("AnimeYear"), content)));
                mask(&mut text, whole.range());
                boundaries.push(whole.start());
            } else if let Some(keywords) = bracket_keywords(inner.start(), inner.as_str()) {
                extra.extend(keywords);
                mask(&mut text, whole.range());
                boundaries.push(whole.start());
            } else if index == 0 && stem[..whole.start()].trim().is_empty() {
                extra.push((whole.start(), Token::new(Category::other("ReleaseGroup"), content)));
                mask(&mut text, whole.range());
            } else {
                // Unknown bracket: keep its text, drop the brackets.
                let open = whole.start()..inner.start();
                let close = inner.end()..whole.end();
                mask(&mut text, open);
                mask(&mut text, close);
            }
        }

        let mut text = normalize_separators(&text);

        let words: Vec<(Range<usize>, String)> = WORD_PATTERN
            .find_iter(&text)
            .map(|m| (m.range(), m.as_str().to_string()))
            .collect();
        for (range, word) in words {
            let has_text_before = !text[..range.start].trim().is_empty();
            if let Some(category) = keyword_category(&word) {
                extra.push((range.start, Token::new(Category::other(category), word)));
                boundaries.push(range.start);
                mask(&mut text, range);
            } else if let Some(caps) = VERSION_PATTERN.captures(&word) {
                extra.push((range.start, Token::new(Category::other("ReleaseVersion"), &caps[1])));
                mask(&mut text, range);
            } else if YEAR_PATTERN.is_match(&word) && has_text_before {
                extra.push((range.start, Token::new(Category::other("AnimeYear"), word)));
                boundaries.push(range.start);
                mask(&mut text, range);
            }
        }

        let mut season: Option<String> = None;
        let mut episode: Option<(String, Range<usize>)> = None;

        let season_episode = SEASON_EPISODE_PATTERN.captures(&text).and_then(|caps| {
            Some((
                caps.get(0)?.range(),
                caps.get(1)?.as_str().to_string(),
                caps.get(2)?.as_str().to_string(),
                caps.get(3).map(|v| (v.start(), v.as_str().to_string())),
            ))
        });
        if let Some((range, s, e, version)) = season_episode {
            season = Some(normalize_number(&s));
            episode = Some((normalize_number(&e), range.clone()));
            if let Some((offset, version)) = version {
                extra.push((offset, Token::new(Category::other("ReleaseVersion"), version)));
            }
            boundaries.push(range.start);
            mask(&mut text, range);
        }

        if season.is_none() {
            let found = SEASON_PATTERNS.iter().find_map(|re| {
                re.captures(&text)
                    .and_then(|caps| Some((caps.get(0)?.range(), caps.get(1)?.as_str().to_string())))
            });
            if let Some((range, number)) = found {
                season = Some(normalize_number(&number));
                boundaries.push(range.start);
                mask(&mut text, range);
            }
        }

        if episode.is_none() {
            let found = EPISODE_PATTERNS.iter().find_map(|re| {
                re.captures(&text).and_then(|caps| {
                    let version = caps.get(2).map(|v| (v.start(), v.as_str().to_string()));
                    Some((caps.get(0)?.range(), caps.get(1)?.as_str().to_string(), version))
                })
            });
            if let Some((range, number, version)) = found {
                if let Some((offset, version)) = version {
                    extra.push((offset, Token::new(Category::other("ReleaseVersion"), version)));
                }
                episode = Some((normalize_number(&number), range.clone()));
                boundaries.push(range.start);
                mask(&mut text, range);
            }
        }

        boundaries.sort_unstable();

        let mut episode_title = None;
        if let Some((_, range)) = &episode {
            let end = boundaries
                .iter()
                .copied()
                .find(|&b| b >= range.end)
                .unwrap_or(text.len());
            let candidate = clean(&text[range.end..end]);
            if !candidate.is_empty() {
                episode_title = Some(candidate);
                mask(&mut text, range.end..end);
            }
        }

        let title_end = boundaries
            .iter()
            .copied()
            .find(|&b| !text[..b].trim().is_empty())
            .unwrap_or(text.len());
        let title = clean(&text[..title_end]);

        extra.sort_by_key(|(offset, _)| *offset);

        let mut tokens = Vec::new();
        if !title.is_empty() {
            tokens.push(Token::new(Category::Title, title));
        }
        if let Some(season) = season {
            tokens.push(Token::new(Category::SeasonNumber, season));
        }
        if let Some((number, _)) = episode {
            tokens.push(Token::new(Category::EpisodeNumber, number));
        }
        if let Some(episode_title) = episode_title {
            tokens.push(Token::new(Category::EpisodeTitle, episode_title));
        }
        tokens.extend(extra.into_iter().map(|(_, token)| token));
        tokens.push(Token::new(Category::FileName, stem));
        if let Some(ext) = extension {
            tokens.push(Token::new(Category::FileExtension, ext));
        }

        tokens
    }
}

/// Classify bracket content made only of release keywords, like `[1080p HEVC AAC]`.
fn bracket_keywords(offset: usize, content: &str) -> Option<Vec<(usize, Token)>> {
    let mut tokens = Vec::new();
    for word in WORD_PATTERN.find_iter(content) {
        let category = keyword_category(word.as_str())?;
        tokens.push((
            offset + word.start(),
            Token::new(Category::other(category), word.as_str()),
        ));
    }
    if tokens.is_empty() {
        None
    } else {
        Some(tokens)
    }
}
