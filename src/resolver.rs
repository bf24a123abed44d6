//! Extraction of canonical video ids from user-supplied YouTube URLs.

use thiserror::Error;
use url::Url;

/// Failure to turn a URL into a video id. Both variants feed the per-video
/// failure path; they only differ in the message attached to the record.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolveError {
    #[error("Invalid YouTube URL: {0}")]
    UnrecognizedUrl(String),
    #[error("Watch URL has no 'v' parameter: {0}")]
    MissingVideoParameter(String),
}

/// Resolves a URL to its canonical video id. Two shapes are recognized:
/// short links (`https://youtu.be/<id>`), where the id is the path, and
/// watch URLs (`https://www.youtube.com/watch?v=<id>`), where the id is the
/// first `v` query value. Every other host/path combination is rejected.
pub fn resolve_video_id(raw_url: &str) -> Result<String, ResolveError> {
    let parsed =
        Url::parse(raw_url).map_err(|_| ResolveError::UnrecognizedUrl(raw_url.to_owned()))?;

    match parsed.host_str() {
        Some("youtu.be") => {
            let id = parsed.path().trim_start_matches('/');
            if id.is_empty() {
                Err(ResolveError::UnrecognizedUrl(raw_url.to_owned()))
            } else {
                Ok(id.to_owned())
            }
        }
        Some("www.youtube.com") | Some("youtube.com") if parsed.path() == "/watch" => parsed
            .query_pairs()
            .find(|(key, _)| key == "v")
            .map(|(_, value)| value.into_owned())
            .ok_or_else(|| ResolveError::MissingVideoParameter(raw_url.to_owned())),
        _ => Err(ResolveError::UnrecognizedUrl(raw_url.to_owned())),
    }
}
