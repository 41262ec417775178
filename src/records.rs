use log::{debug, info};

use crate::{CaptionRecord, CaptionSegment, VideoMetadata};

/// One record per caption segment, video fields repeated on every row
pub fn flatten(metadata: &VideoMetadata, segments: &[CaptionSegment]) -> Vec<CaptionRecord> {
    let records: Vec<CaptionRecord> = segments
        .iter()
        .map(|segment| CaptionRecord {
            video_id: metadata.video_id.clone(),
            video_url: metadata.video_url.clone(),
            video_title: metadata.title.clone(),
            video_length: metadata.length.to_string(),
            video_description: metadata.description.clone(),
            video_keywords: metadata.keywords.clone(),
            author: metadata.author.clone(),
            start: format_seconds(segment.start),
            duration: format_seconds(segment.duration),
            text: segment.text.clone(),
        })
        .collect();

    info!(
        "Extracted {} caption records for video {} ({})",
        records.len(),
        metadata.video_id,
        metadata.title
    );
    records
}

/// Shortest round-trip form, always with a fractional part: `1.0`, `0.21`
pub fn format_seconds(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 {
        format!("{value:.1}")
    } else {
        value.to_string()
    }
}

/// Collapse whitespace runs to a single space and trim
pub fn clean_text(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Clean every record's text, dropping records left empty
pub fn normalize(records: Vec<CaptionRecord>) -> Vec<CaptionRecord> {
    let before = records.len();
    let normalized: Vec<CaptionRecord> = records
        .into_iter()
        .filter_map(|mut record| {
            let cleaned = clean_text(&record.text);
            if cleaned.is_empty() {
                debug!("Dropping empty caption segment at start={}", record.start);
                return None;
            }
            record.text = cleaned;
            Some(record)
        })
        .collect();

    info!("Normalized captions: {before} -> {} records", normalized.len());
    normalized
}
