pub mod config;
pub mod output;
pub mod pipeline;
pub mod records;
pub mod source;
pub mod youtube;

use std::sync::LazyLock;

use eyre::{Result, eyre};
use log::debug;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// `v=` query parameter or `/` path separator followed by an 11-character ID
static VIDEO_ID_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?:v=|/)([0-9A-Za-z_-]{11})").expect("valid video ID pattern"));

/// Video-level metadata, fetched once per URL
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VideoMetadata {
    pub video_id: String,
    pub video_url: String,
    pub title: String,
    pub length: u64,
    pub description: String,
    pub keywords: Vec<String>,
    pub author: String,
}

impl VideoMetadata {
    /// Metadata with only the identifier and URL populated
    pub fn fallback(video_id: &str) -> Self {
        Self {
            video_id: video_id.to_string(),
            video_url: watch_url(video_id),
            ..Self::default()
        }
    }
}

/// A single captioned segment
#[derive(Debug, Clone, PartialEq)]
pub struct CaptionSegment {
    pub start: f64,
    pub duration: f64,
    pub text: String,
}

/// One exported row: a video's metadata joined with one caption segment
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CaptionRecord {
    pub video_id: String,
    pub video_url: String,
    pub video_title: String,
    pub video_length: String,
    pub video_description: String,
    pub video_keywords: Vec<String>,
    pub author: String,
    pub start: String,
    pub duration: String,
    pub text: String,
}

/// A named column of a [`CaptionRecord`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Field {
    VideoId,
    VideoUrl,
    VideoTitle,
    VideoLength,
    VideoDescription,
    VideoKeywords,
    Author,
    Start,
    Duration,
    Text,
}

impl Field {
    /// Serialized key, as it appears in JSON output
    pub fn name(self) -> &'static str {
        match self {
            Field::VideoId => "videoId",
            Field::VideoUrl => "videoUrl",
            Field::VideoTitle => "videoTitle",
            Field::VideoLength => "videoLength",
            Field::VideoDescription => "videoDescription",
            Field::VideoKeywords => "videoKeywords",
            Field::Author => "author",
            Field::Start => "start",
            Field::Duration => "duration",
            Field::Text => "text",
        }
    }
}

impl std::fmt::Display for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl CaptionRecord {
    /// Fields in declaration order
    pub const FIELDS: [Field; 10] = [
        Field::VideoId,
        Field::VideoUrl,
        Field::VideoTitle,
        Field::VideoLength,
        Field::VideoDescription,
        Field::VideoKeywords,
        Field::Author,
        Field::Start,
        Field::Duration,
        Field::Text,
    ];

    /// Fields ordered by serialized name, used for tabular column headers
    pub const COLUMNS: [Field; 10] = [
        Field::Author,
        Field::Duration,
        Field::Start,
        Field::Text,
        Field::VideoDescription,
        Field::VideoId,
        Field::VideoKeywords,
        Field::VideoLength,
        Field::VideoTitle,
        Field::VideoUrl,
    ];

    /// Flat string value of a field; lists are rendered as JSON text
    pub fn cell(&self, field: Field) -> String {
        match field {
            Field::VideoId => self.video_id.clone(),
            Field::VideoUrl => self.video_url.clone(),
            Field::VideoTitle => self.video_title.clone(),
            Field::VideoLength => self.video_length.clone(),
            Field::VideoDescription => self.video_description.clone(),
            Field::VideoKeywords => serde_json::to_string(&self.video_keywords).unwrap_or_default(),
            Field::Author => self.author.clone(),
            Field::Start => self.start.clone(),
            Field::Duration => self.duration.clone(),
            Field::Text => self.text.clone(),
        }
    }
}

/// Outcome of a lookup that never fails: either live data or a substituted default
#[derive(Debug, Clone, PartialEq)]
pub enum Fetched<T> {
    Live(T),
    Fallback(T),
}

impl<T> Fetched<T> {
    pub fn into_inner(self) -> T {
        match self {
            Fetched::Live(v) | Fetched::Fallback(v) => v,
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, Fetched::Fallback(_))
    }
}

impl<T> std::fmt::Display for Fetched<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Fetched::Live(_) => write!(f, "live"),
            Fetched::Fallback(_) => write!(f, "fallback"),
        }
    }
}

/// Canonical watch URL for a video ID
pub fn watch_url(video_id: &str) -> String {
    format!("https://www.youtube.com/watch?v={video_id}")
}

/// Extract the 11-character video ID following `v=` or `/` in a URL
pub fn extract_video_id(url: &str) -> Result<String> {
    let caps = VIDEO_ID_RE
        .captures(url)
        .ok_or_else(|| eyre!("could not extract video ID from URL: {url}"))?;
    let video_id = caps[1].to_string();
    debug!("Extracted video ID {video_id} from {url}");
    Ok(video_id)
}
