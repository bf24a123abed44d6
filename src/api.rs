//! Clients for the two remote collaborators: the YouTube Data API v3
//! (video metadata and comment threads) and the transcript sidecar service.
//!
//! Every call blocks until the server answers; the batch is strictly
//! sequential and carries no timeout, so the pipeline sees either a typed
//! success or a typed [`FetchError`]. Which error kinds are recovered, and
//! where, is the pipeline's business; this module only classifies them.

use serde::Deserialize;
use thiserror::Error;

use crate::config::FetcherConfig;
use crate::records::{Comment, Statistics, ThumbnailSet};

/// Failure kinds surfaced by the remote calls.
///
/// `TranscriptsDisabled`/`NoTranscriptFound` and `CommentsUnavailable` are
/// the only kinds the pipeline absorbs locally; everything else fails the
/// whole video.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    #[error("Video not found: {0}")]
    NotFound(String),
    #[error("Subtitles are disabled for video {0}")]
    TranscriptsDisabled(String),
    #[error("No transcript was found for video {0}")]
    NoTranscriptFound(String),
    #[error("Comment threads request failed for video {video_id} (status {status})")]
    CommentsUnavailable { video_id: String, status: u16 },
    #[error("API request failed (status {status}): {message}")]
    Api { status: u16, message: String },
    #[error("Network error: {0}")]
    Transport(String),
    #[error("Invalid response payload: {0}")]
    Payload(String),
}

/// Snippet and statistics fields extracted for a single video.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VideoMetadata {
    pub description: String,
    pub publish_date: String,
    pub thumbnail_urls: ThumbnailSet,
    pub statistics: Statistics,
}

/// One timed caption line returned by the transcript service.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct TranscriptEntry {
    pub text: String,
    #[serde(default)]
    pub start: f64,
    #[serde(default)]
    pub duration: f64,
}

/// The three remote fetches a video needs. The pipeline works against this
/// trait so tests can substitute canned responses for the live services.
pub trait VideoDataSource {
    fn video_metadata(&self, video_id: &str) -> Result<VideoMetadata, FetchError>;
    fn transcript(&self, video_id: &str) -> Result<Vec<TranscriptEntry>, FetchError>;
    fn top_comments(&self, video_id: &str) -> Result<Vec<Comment>, FetchError>;
}

/// Maximum number of top-level comment threads requested per video. Only the
/// first page is ever fetched.
pub const MAX_COMMENTS: usize = 10;

// --- Wire payloads (Data API v3 field names) ---

#[derive(Debug, Deserialize)]
struct VideoListResponse {
    #[serde(default)]
    items: Vec<VideoItem>,
}

#[derive(Debug, Deserialize)]
struct VideoItem {
    snippet: VideoSnippet,
    #[serde(default)]
    statistics: RawStatistics,
}

#[derive(Debug, Deserialize)]
struct VideoSnippet {
    #[serde(default)]
    description: String,
    #[serde(rename = "publishedAt", default)]
    published_at: String,
    thumbnails: RawThumbnails,
}

#[derive(Debug, Deserialize)]
struct RawThumbnails {
    default: RawThumbnail,
    medium: RawThumbnail,
    high: RawThumbnail,
}

#[derive(Debug, Deserialize)]
struct RawThumbnail {
    url: String,
}

/// Counters arrive as numeric strings and may vanish individually, e.g.
/// `commentCount` disappears when comments are disabled.
#[derive(Debug, Deserialize)]
struct RawStatistics {
    #[serde(rename = "viewCount", default = "zero_count")]
    view_count: String,
    #[serde(rename = "likeCount", default = "zero_count")]
    like_count: String,
    #[serde(rename = "commentCount", default = "zero_count")]
    comment_count: String,
}

impl Default for RawStatistics {
    fn default() -> Self {
        Self {
            view_count: zero_count(),
            like_count: zero_count(),
            comment_count: zero_count(),
        }
    }
}

fn zero_count() -> String {
    "0".to_owned()
}

#[derive(Debug, Deserialize)]
struct CommentThreadsResponse {
    #[serde(default)]
    items: Vec<CommentThread>,
}

#[derive(Debug, Deserialize)]
struct CommentThread {
    snippet: CommentThreadSnippet,
}

#[derive(Debug, Deserialize)]
struct CommentThreadSnippet {
    #[serde(rename = "topLevelComment")]
    top_level_comment: TopLevelComment,
}

#[derive(Debug, Deserialize)]
struct TopLevelComment {
    snippet: CommentSnippet,
}

#[derive(Debug, Deserialize)]
struct CommentSnippet {
    #[serde(rename = "authorDisplayName", default)]
    author_display_name: String,
    #[serde(rename = "textDisplay", default)]
    text_display: String,
    #[serde(rename = "likeCount", default)]
    like_count: u64,
    #[serde(rename = "publishedAt", default)]
    published_at: String,
}

fn metadata_from_response(
    video_id: &str,
    response: VideoListResponse,
) -> Result<VideoMetadata, FetchError> {
    let item = response
        .items
        .into_iter()
        .next()
        .ok_or_else(|| FetchError::NotFound(video_id.to_owned()))?;

    Ok(VideoMetadata {
        description: item.snippet.description,
        publish_date: item.snippet.published_at,
        thumbnail_urls: ThumbnailSet {
            default: item.snippet.thumbnails.default.url,
            medium: item.snippet.thumbnails.medium.url,
            high: item.snippet.thumbnails.high.url,
        },
        statistics: Statistics {
            views: item.statistics.view_count,
            likes: item.statistics.like_count,
            comments: item.statistics.comment_count,
        },
    })
}

fn comments_from_response(response: CommentThreadsResponse) -> Vec<Comment> {
    response
        .items
        .into_iter()
        .take(MAX_COMMENTS)
        .map(|thread| {
            let snippet = thread.snippet.top_level_comment.snippet;
            Comment {
                author: snippet.author_display_name,
                text: snippet.text_display,
                likes: snippet.like_count,
                published_at: snippet.published_at,
            }
        })
        .collect()
}

/// Joins transcript lines into one string, single-space separated, keeping
/// the service's order.
pub fn join_transcript(entries: &[TranscriptEntry]) -> String {
    entries
        .iter()
        .map(|entry| entry.text.as_str())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Blocking client backed by `ureq`, covering both remote services.
#[derive(Debug)]
pub struct YoutubeDataClient {
    agent: ureq::Agent,
    api_key: String,
    api_base_url: String,
    transcript_api_url: String,
}

impl YoutubeDataClient {
    pub fn new(config: &FetcherConfig) -> Self {
        Self {
            agent: ureq::agent(),
            api_key: config.api_key.clone(),
            api_base_url: config.api_base_url.trim_end_matches('/').to_owned(),
            transcript_api_url: config.transcript_api_url.trim_end_matches('/').to_owned(),
        }
    }
}

impl VideoDataSource for YoutubeDataClient {
    fn video_metadata(&self, video_id: &str) -> Result<VideoMetadata, FetchError> {
        let response = self
            .agent
            .get(&format!("{}/videos", self.api_base_url))
            .query("part", "snippet,statistics")
            .query("id", video_id)
            .query("key", &self.api_key)
            .call()
            .map_err(generic_api_error)?;

        let payload: VideoListResponse = response
            .into_json()
            .map_err(|err| FetchError::Payload(err.to_string()))?;

        metadata_from_response(video_id, payload)
    }

    fn transcript(&self, video_id: &str) -> Result<Vec<TranscriptEntry>, FetchError> {
        let result = self
            .agent
            .get(&format!("{}/api/transcript", self.transcript_api_url))
            .query("videoId", video_id)
            .call();

        let response = match result {
            Ok(response) => response,
            Err(ureq::Error::Status(403, _)) => {
                return Err(FetchError::TranscriptsDisabled(video_id.to_owned()));
            }
            Err(ureq::Error::Status(404, _)) => {
                return Err(FetchError::NoTranscriptFound(video_id.to_owned()));
            }
            Err(err) => return Err(generic_api_error(err)),
        };

        response
            .into_json()
            .map_err(|err| FetchError::Payload(err.to_string()))
    }

    fn top_comments(&self, video_id: &str) -> Result<Vec<Comment>, FetchError> {
        let result = self
            .agent
            .get(&format!("{}/commentThreads", self.api_base_url))
            .query("part", "snippet")
            .query("videoId", video_id)
            .query("maxResults", &MAX_COMMENTS.to_string())
            .query("textFormat", "plainText")
            .query("key", &self.api_key)
            .call();

        let response = match result {
            Ok(response) => response,
            // Any HTTP-level rejection here (403 comments disabled, quota,
            // etc.) is the comment-specific service fault the pipeline
            // replaces with its placeholder. Transport faults still fail
            // the whole video.
            Err(ureq::Error::Status(status, _)) => {
                return Err(FetchError::CommentsUnavailable {
                    video_id: video_id.to_owned(),
                    status,
                });
            }
            Err(ureq::Error::Transport(transport)) => {
                return Err(FetchError::Transport(transport.to_string()));
            }
        };

        let payload: CommentThreadsResponse = response
            .into_json()
            .map_err(|err| FetchError::Payload(err.to_string()))?;

        Ok(comments_from_response(payload))
    }
}

fn generic_api_error(err: ureq::Error) -> FetchError {
    match err {
        ureq::Error::Status(status, response) => FetchError::Api {
            status,
            message: response.into_string().unwrap_or_default(),
        },
        ureq::Error::Transport(transport) => FetchError::Transport(transport.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn video_list(value: serde_json::Value) -> VideoListResponse {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn metadata_maps_snippet_and_statistics() {
        let response = video_list(json!({
            "items": [{
                "snippet": {
                    "description": "Winning numbers",
                    "publishedAt": "2024-12-17T03:05:00Z",
                    "thumbnails": {
                        "default": {"url": "https://i.ytimg.com/vi/x/default.jpg"},
                        "medium": {"url": "https://i.ytimg.com/vi/x/mqdefault.jpg"},
                        "high": {"url": "https://i.ytimg.com/vi/x/hqdefault.jpg"}
                    }
                },
                "statistics": {
                    "viewCount": "1000",
                    "likeCount": "20",
                    "commentCount": "5"
                }
            }]
        }));

        let metadata = metadata_from_response("x", response).unwrap();
        assert_eq!(metadata.description, "Winning numbers");
        assert_eq!(metadata.publish_date, "2024-12-17T03:05:00Z");
        assert_eq!(
            metadata.thumbnail_urls.medium,
            "https://i.ytimg.com/vi/x/mqdefault.jpg"
        );
        assert_eq!(metadata.statistics.views, "1000");
    }

    #[test]
    fn empty_items_is_not_found() {
        let response = video_list(json!({"items": []}));
        let err = metadata_from_response("duAeRtYeC0E", response).unwrap_err();
        assert_eq!(err, FetchError::NotFound("duAeRtYeC0E".into()));
        assert_eq!(err.to_string(), "Video not found: duAeRtYeC0E");
    }

    #[test]
    fn missing_comment_count_defaults_to_zero() {
        let response = video_list(json!({
            "items": [{
                "snippet": {
                    "description": "",
                    "publishedAt": "2024-01-01T00:00:00Z",
                    "thumbnails": {
                        "default": {"url": "d"},
                        "medium": {"url": "m"},
                        "high": {"url": "h"}
                    }
                },
                "statistics": {"viewCount": "7", "likeCount": "1"}
            }]
        }));

        let metadata = metadata_from_response("x", response).unwrap();
        assert_eq!(metadata.statistics.comments, "0");
        assert_eq!(metadata.statistics.views, "7");
    }

    #[test]
    fn missing_statistics_block_defaults_everything() {
        let response = video_list(json!({
            "items": [{
                "snippet": {
                    "description": "",
                    "publishedAt": "",
                    "thumbnails": {
                        "default": {"url": "d"},
                        "medium": {"url": "m"},
                        "high": {"url": "h"}
                    }
                }
            }]
        }));

        let metadata = metadata_from_response("x", response).unwrap();
        assert_eq!(
            metadata.statistics,
            Statistics {
                views: "0".into(),
                likes: "0".into(),
                comments: "0".into()
            }
        );
    }

    #[test]
    fn comments_are_capped_and_ordered() {
        let items: Vec<serde_json::Value> = (0..12)
            .map(|i| {
                json!({
                    "snippet": {
                        "topLevelComment": {
                            "snippet": {
                                "authorDisplayName": format!("author{i}"),
                                "textDisplay": format!("text{i}"),
                                "likeCount": i,
                                "publishedAt": "2024-01-01T00:00:00Z"
                            }
                        }
                    }
                })
            })
            .collect();
        let response: CommentThreadsResponse =
            serde_json::from_value(json!({ "items": items })).unwrap();

        let comments = comments_from_response(response);
        assert_eq!(comments.len(), MAX_COMMENTS);
        assert_eq!(comments[0].author, "author0");
        assert_eq!(comments[9].text, "text9");
    }

    #[test]
    fn comment_like_count_defaults_when_absent() {
        let response: CommentThreadsResponse = serde_json::from_value(json!({
            "items": [{
                "snippet": {
                    "topLevelComment": {
                        "snippet": {
                            "authorDisplayName": "a",
                            "textDisplay": "t",
                            "publishedAt": "2024-01-01T00:00:00Z"
                        }
                    }
                }
            }]
        }))
        .unwrap();

        assert_eq!(comments_from_response(response)[0].likes, 0);
    }

    #[test]
    fn transcript_lines_join_with_single_spaces() {
        let entries = vec![
            TranscriptEntry {
                text: "tonight's".into(),
                start: 0.0,
                duration: 1.2,
            },
            TranscriptEntry {
                text: "winning".into(),
                start: 1.2,
                duration: 0.8,
            },
            TranscriptEntry {
                text: "numbers".into(),
                start: 2.0,
                duration: 1.0,
            },
        ];
        assert_eq!(join_transcript(&entries), "tonight's winning numbers");
        assert_eq!(join_transcript(&[]), "");
    }

    #[test]
    fn transcript_entries_parse_without_timing() {
        let entries: Vec<TranscriptEntry> =
            serde_json::from_value(json!([{"text": "hello"}])).unwrap();
        assert_eq!(entries[0].text, "hello");
        assert_eq!(entries[0].start, 0.0);
    }
}
