//! Per-video fetch-and-merge pipeline and the batch driver that runs it over
//! every category.
//!
//! Each video walks resolve → metadata → transcript → comments → merge.
//! The transcript and comment steps absorb their own designated failure
//! kinds into in-record placeholders; every other error anywhere in the
//! pipeline fails just that one video, which becomes an [`ErrorRecord`]
//! while its siblings keep processing.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

use crate::api::{FetchError, VideoDataSource, join_transcript};
use crate::records::{
    CategoryMap, CategoryRequests, CommentEntry, ErrorRecord, VideoOutcome, VideoRecord,
    VideoRequest,
};
use crate::resolver::resolve_video_id;

/// Placeholder stored as the sole comment entry when the comment call fails.
pub const COMMENTS_UNAVAILABLE_NOTICE: &str = "Comments disabled or error fetching comments";

/// Runs the full pipeline for one video. Never panics and never propagates:
/// any failure is folded into the returned outcome.
pub fn process_video(source: &impl VideoDataSource, request: &VideoRequest) -> VideoOutcome {
    match build_record(source, request) {
        Ok(record) => VideoOutcome::Complete(Box::new(record)),
        Err(err) => VideoOutcome::Failed(ErrorRecord {
            title: request.title.clone(),
            source: request.source.clone(),
            url: request.url.clone(),
            error: err.to_string(),
        }),
    }
}

fn build_record(source: &impl VideoDataSource, request: &VideoRequest) -> Result<VideoRecord> {
    let video_id = resolve_video_id(&request.url)?;

    // Metadata has no local recovery; a missing video fails the whole entry
    // before the transcript or comment services are contacted.
    let metadata = source.video_metadata(&video_id)?;

    let transcript = match source.transcript(&video_id) {
        Ok(entries) => join_transcript(&entries),
        Err(err @ (FetchError::TranscriptsDisabled(_) | FetchError::NoTranscriptFound(_))) => {
            format!("Transcript unavailable: {err}")
        }
        Err(err) => return Err(err.into()),
    };

    let comments = match source.top_comments(&video_id) {
        Ok(list) => list.into_iter().map(CommentEntry::Comment).collect(),
        Err(FetchError::CommentsUnavailable { .. }) => {
            vec![CommentEntry::Notice(COMMENTS_UNAVAILABLE_NOTICE.to_owned())]
        }
        Err(err) => return Err(err.into()),
    };

    Ok(VideoRecord {
        title: request.title.clone(),
        source: request.source.clone(),
        url: request.url.clone(),
        video_id,
        description: metadata.description,
        publish_date: metadata.publish_date,
        thumbnail_urls: metadata.thumbnail_urls,
        statistics: metadata.statistics,
        transcript,
        comments,
    })
}

/// Runs the pipeline for every video in every category, sequentially and in
/// declared order. One video's failure never aborts its siblings or the
/// remaining categories.
pub fn fetch_video_data(
    source: &impl VideoDataSource,
    input: &CategoryRequests,
) -> CategoryMap {
    let mut results = CategoryMap::new();

    for (category, videos) in input.iter() {
        println!("Processing category: {} ({} videos)", category, videos.len());

        let mut outcomes = Vec::with_capacity(videos.len());
        for (index, request) in videos.iter().enumerate() {
            println!("  [{}/{}] {}", index + 1, videos.len(), request.title);

            let outcome = process_video(source, request);
            if let VideoOutcome::Failed(failure) = &outcome {
                eprintln!(
                    "  Warning: failed to process {}: {}",
                    request.url, failure.error
                );
            }
            outcomes.push(outcome);
        }

        results.push(category.clone(), outcomes);
    }

    results
}

/// Serializes the category map as pretty JSON and writes it wholesale,
/// overwriting any previous report. Non-ASCII text stays literal.
pub fn write_report(path: &Path, data: &CategoryMap) -> Result<()> {
    let json = serde_json::to_string_pretty(data).context("serializing report")?;
    fs::write(path, json).with_context(|| format!("writing {}", path.display()))?;
    Ok(())
}
