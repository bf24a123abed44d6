//! Record types shared by the fetch pipeline and the report file.
//!
//! All structs in this module mirror how the aggregated data is serialized to
//! the JSON report. Input documents keep the capitalized `Title`/`Source`/`URL`
//! keys that older request files use, so both spellings deserialize.

use std::fmt;
use std::slice::Iter;

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// One video the caller wants fetched. Immutable input; every field is copied
/// verbatim into the output record.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct VideoRequest {
    #[serde(alias = "Title")]
    pub title: String,
    #[serde(alias = "Source")]
    pub source: String,
    #[serde(alias = "URL")]
    pub url: String,
}

impl VideoRequest {
    pub fn new(
        title: impl Into<String>,
        source: impl Into<String>,
        url: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            source: source.into(),
            url: url.into(),
        }
    }
}

/// The three thumbnail sizes the Data API reports for every video.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ThumbnailSet {
    pub default: String,
    pub medium: String,
    pub high: String,
}

/// View/like/comment counters, kept as numeric strings exactly as the Data
/// API returns them. Missing counters (e.g. comments disabled) become `"0"`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Statistics {
    pub views: String,
    pub likes: String,
    pub comments: String,
}

/// A single top-level comment extracted from a comment thread.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Comment {
    pub author: String,
    pub text: String,
    pub likes: u64,
    pub published_at: String,
}

/// Element of the `comments` field. The field is heterogeneous by contract:
/// when the comment call fails it degrades to a single placeholder string.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum CommentEntry {
    Comment(Comment),
    Notice(String),
}

/// Fully merged per-video result.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct VideoRecord {
    pub title: String,
    pub source: String,
    pub url: String,
    pub video_id: String,
    pub description: String,
    pub publish_date: String,
    pub thumbnail_urls: ThumbnailSet,
    pub statistics: Statistics,
    pub transcript: String,
    pub comments: Vec<CommentEntry>,
}

/// Result for a video whose pipeline failed. Carries the original request
/// fields plus a human-readable reason.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ErrorRecord {
    pub title: String,
    pub source: String,
    pub url: String,
    pub error: String,
}

/// Outcome of one per-video pipeline run. Serializes untagged, so complete
/// and failed entries sit side by side in the same category list.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum VideoOutcome {
    Complete(Box<VideoRecord>),
    Failed(ErrorRecord),
}

impl VideoOutcome {
    pub fn is_complete(&self) -> bool {
        matches!(self, VideoOutcome::Complete(_))
    }

    pub fn as_record(&self) -> Option<&VideoRecord> {
        match self {
            VideoOutcome::Complete(record) => Some(record),
            VideoOutcome::Failed(_) => None,
        }
    }

    pub fn as_error(&self) -> Option<&ErrorRecord> {
        match self {
            VideoOutcome::Complete(_) => None,
            VideoOutcome::Failed(error) => Some(error),
        }
    }
}

/// The input shape: category name mapped to the videos requested under it.
/// Backed by a vector so categories keep their document order; a plain
/// `HashMap`/`BTreeMap` would reorder them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CategoryRequests(Vec<(String, Vec<VideoRequest>)>);

impl CategoryRequests {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, category: impl Into<String>, videos: Vec<VideoRequest>) {
        self.0.push((category.into(), videos));
    }

    pub fn iter(&self) -> Iter<'_, (String, Vec<VideoRequest>)> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Total number of videos across all categories.
    pub fn video_count(&self) -> usize {
        self.0.iter().map(|(_, videos)| videos.len()).sum()
    }
}

impl<'de> Deserialize<'de> for CategoryRequests {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct RequestsVisitor;

        impl<'de> Visitor<'de> for RequestsVisitor {
            type Value = CategoryRequests;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a map of category name to a list of video requests")
            }

            fn visit_map<A>(self, mut access: A) -> Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut entries = Vec::with_capacity(access.size_hint().unwrap_or(0));
                while let Some((category, videos)) =
                    access.next_entry::<String, Vec<VideoRequest>>()?
                {
                    entries.push((category, videos));
                }
                Ok(CategoryRequests(entries))
            }
        }

        deserializer.deserialize_map(RequestsVisitor)
    }
}

/// The final output artifact: category name mapped to per-video outcomes, in
/// the same order the categories were supplied.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CategoryMap(Vec<(String, Vec<VideoOutcome>)>);

impl CategoryMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, category: impl Into<String>, outcomes: Vec<VideoOutcome>) {
        self.0.push((category.into(), outcomes));
    }

    pub fn get(&self, category: &str) -> Option<&[VideoOutcome]> {
        self.0
            .iter()
            .find(|(name, _)| name == category)
            .map(|(_, outcomes)| outcomes.as_slice())
    }

    pub fn iter(&self) -> Iter<'_, (String, Vec<VideoOutcome>)> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Serialize for CategoryMap {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (category, outcomes) in &self.0 {
            map.serialize_entry(category, outcomes)?;
        }
        map.end()
    }
}
