use std::path::Path;

use eyre::{Result, WrapErr, bail};
use log::{debug, error, info, warn};

use crate::records::{flatten, normalize};
use crate::source::{VideoSource, fetch_video};
use crate::{CaptionRecord, extract_video_id};

/// Read URLs from a text file, one per line, skipping blanks and `#` comments
pub fn read_input_urls(path: &Path) -> Result<Vec<String>> {
    let content = std::fs::read_to_string(path)
        .wrap_err_with(|| format!("could not read input file: {}", path.display()))?;

    let urls: Vec<String> = content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_string)
        .collect();

    if urls.is_empty() {
        bail!("no valid URLs found in input file: {}", path.display());
    }

    debug!("Read {} URLs from {}", urls.len(), path.display());
    Ok(urls)
}

/// Run the full extract/fetch/flatten/normalize chain for one URL
pub async fn process_video<S: VideoSource>(source: &S, url: &str, language: &str) -> Result<Vec<CaptionRecord>> {
    let video_id = extract_video_id(url)?;

    let (metadata, captions) = fetch_video(source, &video_id, language).await;
    debug!("Video {video_id}: metadata={metadata} captions={captions}");

    let records = flatten(&metadata.into_inner(), &captions.into_inner());
    Ok(normalize(records))
}

/// Process every URL in order, skipping (and logging) the ones that fail
pub async fn process_videos<S: VideoSource>(
    source: &S,
    urls: &[String],
    language: &str,
    skip_empty: bool,
) -> Vec<CaptionRecord> {
    let mut all_records = Vec::new();

    for (idx, url) in urls.iter().enumerate() {
        info!("Processing {}/{}: {url}", idx + 1, urls.len());
        match process_video(source, url, language).await {
            Ok(records) => {
                if records.is_empty() && skip_empty {
                    warn!("No captions found for {url}; skipping due to --skip-empty");
                    continue;
                }
                all_records.extend(records);
            }
            Err(e) => error!("Failed to process {url}: {e:#}"),
        }
    }

    all_records
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::{Captions, VideoLookup};
    use crate::{CaptionSegment, VideoMetadata};
    use eyre::bail;
    use std::cell::Cell;
    use std::io::Write;

    /// Serves two segments per video, the first padded with whitespace
    #[derive(Default)]
    struct Canned {
        lookups: Cell<usize>,
    }

    impl VideoSource for Canned {
        async fn lookup(&self, video_id: &str, _languages: &[String]) -> Result<VideoLookup> {
            self.lookups.set(self.lookups.get() + 1);
            let metadata = Ok(VideoMetadata {
                title: format!("Title {video_id}"),
                length: 30,
                ..VideoMetadata::fallback(video_id)
            });
            if video_id == "nocaptions1" {
                return Ok(VideoLookup {
                    metadata,
                    captions: Ok(Captions::Disabled),
                });
            }
            let captions = Ok(Captions::Available(vec![
                CaptionSegment {
                    start: 0.0,
                    duration: 1.5,
                    text: format!("  {video_id}\n one "),
                },
                CaptionSegment {
                    start: 1.5,
                    duration: 1.0,
                    text: " \n ".to_string(),
                },
                CaptionSegment {
                    start: 2.5,
                    duration: 1.0,
                    text: "two".to_string(),
                },
            ]));
            Ok(VideoLookup { metadata, captions })
        }
    }

    struct Offline;

    impl VideoSource for Offline {
        async fn lookup(&self, _video_id: &str, _languages: &[String]) -> Result<VideoLookup> {
            bail!("network unreachable")
        }
    }

    fn urls(list: &[&str]) -> Vec<String> {
        list.iter().map(|u| u.to_string()).collect()
    }

    #[test]
    fn test_read_input_urls_skips_blanks_and_comments() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "# my videos").unwrap();
        writeln!(file, "https://youtu.be/aaaaaaaaaaa").unwrap();
        writeln!(file).unwrap();
        writeln!(file, "   https://www.youtube.com/watch?v=bbbbbbbbbbb  ").unwrap();
        writeln!(file, "   ").unwrap();

        let read = read_input_urls(file.path()).unwrap();
        assert_eq!(
            read,
            urls(&["https://youtu.be/aaaaaaaaaaa", "https://www.youtube.com/watch?v=bbbbbbbbbbb"])
        );
    }

    #[test]
    fn test_read_input_urls_only_comments() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "# nothing here").unwrap();
        let err = read_input_urls(file.path()).unwrap_err();
        assert!(err.to_string().contains("no valid URLs"));
    }

    #[test]
    fn test_read_input_urls_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        assert!(read_input_urls(&dir.path().join("missing.txt")).is_err());
    }

    #[tokio::test]
    async fn test_process_video_normalizes() {
        let records = process_video(&Canned::default(), "https://youtu.be/aaaaaaaaaaa", "en").await.unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].text, "aaaaaaaaaaa one");
        assert_eq!(records[0].video_title, "Title aaaaaaaaaaa");
        assert_eq!(records[1].text, "two");
        assert_eq!(records[1].start, "2.5");
    }

    #[tokio::test]
    async fn test_process_video_bad_url() {
        assert!(process_video(&Canned::default(), "not a url", "en").await.is_err());
    }

    #[tokio::test]
    async fn test_process_videos_skips_failed_url() {
        let input = urls(&[
            "https://youtu.be/aaaaaaaaaaa",
            "https://example.com/watch?v=bad",
            "https://www.youtube.com/watch?v=ccccccccccc",
        ]);
        let records = process_videos(&Canned::default(), &input, "en", false).await;
        let ids: Vec<&str> = records.iter().map(|r| r.video_id.as_str()).collect();
        assert_eq!(ids, vec!["aaaaaaaaaaa", "aaaaaaaaaaa", "ccccccccccc", "ccccccccccc"]);
    }

    #[tokio::test]
    async fn test_process_videos_no_captions_adds_nothing() {
        let input = urls(&["https://youtu.be/aaaaaaaaaaa", "https://youtu.be/nocaptions1"]);
        let with_skip = process_videos(&Canned::default(), &input, "en", true).await;
        let without_skip = process_videos(&Canned::default(), &input, "en", false).await;
        assert_eq!(with_skip.len(), 2);
        assert_eq!(with_skip, without_skip);
    }

    #[tokio::test]
    async fn test_process_videos_one_lookup_per_video() {
        let source = Canned::default();
        let input = urls(&[
            "https://youtu.be/aaaaaaaaaaa",
            "not a url",
            "https://youtu.be/nocaptions1",
        ]);
        process_videos(&source, &input, "de", false).await;
        assert_eq!(source.lookups.get(), 2);
    }

    #[tokio::test]
    async fn test_process_videos_offline_source_yields_nothing() {
        let input = urls(&["https://youtu.be/aaaaaaaaaaa"]);
        assert!(process_videos(&Offline, &input, "en", false).await.is_empty());
    }
}
