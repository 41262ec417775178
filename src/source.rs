use eyre::Result;
use log::{debug, error, warn};

use crate::{CaptionSegment, Fetched, VideoMetadata};

/// Language tried when the requested one has no transcript
pub const FALLBACK_LANGUAGE: &str = "en";

/// What a transcript client found for a video
#[derive(Debug, Clone, PartialEq)]
pub enum Captions {
    Available(Vec<CaptionSegment>),
    /// The video has no caption tracks at all
    Disabled,
    /// Tracks exist, but none in any requested language
    NotFound { requested: Vec<String> },
}

/// Everything a source found for one video; each part can fail on its own
#[derive(Debug)]
pub struct VideoLookup {
    pub metadata: Result<VideoMetadata>,
    pub captions: Result<Captions>,
}

/// Remote source of video metadata and transcripts
#[allow(async_fn_in_trait)]
pub trait VideoSource {
    /// Metadata and captions for one video. An outer error means nothing could be fetched.
    async fn lookup(&self, video_id: &str, languages: &[String]) -> Result<VideoLookup>;
}

/// Requested language followed by the fallback, without duplicates
pub fn caption_languages(language: &str) -> Vec<String> {
    let mut languages = vec![language.to_string()];
    if language != FALLBACK_LANGUAGE {
        languages.push(FALLBACK_LANGUAGE.to_string());
    }
    languages
}

/// Fetch metadata and captions for a video, substituting defaults for anything that failed
pub async fn fetch_video<S: VideoSource>(
    source: &S,
    video_id: &str,
    language: &str,
) -> (Fetched<VideoMetadata>, Fetched<Vec<CaptionSegment>>) {
    let languages = caption_languages(language);
    debug!("Fetching video {video_id} (languages={languages:?})");

    match source.lookup(video_id, &languages).await {
        Ok(lookup) => (
            metadata_or_fallback(video_id, lookup.metadata),
            captions_or_empty(video_id, lookup.captions),
        ),
        Err(e) => {
            warn!("Failed to fetch metadata for {video_id}: {e:#}");
            error!("Error fetching transcript for {video_id}: {e:#}");
            (Fetched::Fallback(VideoMetadata::fallback(video_id)), Fetched::Fallback(Vec::new()))
        }
    }
}

/// Metadata with empty defaults on any client error
pub fn metadata_or_fallback(video_id: &str, result: Result<VideoMetadata>) -> Fetched<VideoMetadata> {
    match result {
        Ok(metadata) => {
            debug!(
                "Fetched metadata for {video_id}: title={:?} author={:?}",
                metadata.title, metadata.author
            );
            Fetched::Live(metadata)
        }
        Err(e) => {
            warn!("Failed to fetch metadata for {video_id}: {e:#}");
            Fetched::Fallback(VideoMetadata::fallback(video_id))
        }
    }
}

/// Caption segments, or an empty list when none can be had
pub fn captions_or_empty(video_id: &str, result: Result<Captions>) -> Fetched<Vec<CaptionSegment>> {
    match result {
        Ok(Captions::Available(segments)) => {
            debug!("Fetched {} caption segments for {video_id}", segments.len());
            Fetched::Live(segments)
        }
        Ok(Captions::Disabled) => {
            warn!("Transcripts disabled for video {video_id}");
            Fetched::Fallback(Vec::new())
        }
        Ok(Captions::NotFound { requested }) => {
            warn!("No transcript found for video {video_id} in {requested:?}");
            Fetched::Fallback(Vec::new())
        }
        Err(e) => {
            error!("Error fetching transcript for {video_id}: {e:#}");
            Fetched::Fallback(Vec::new())
        }
    }
}
