#![forbid(unsafe_code)]

//! Batch fetcher for categorized YouTube video data.
//!
//! Given categories of video requests, the pipeline resolves each URL to a
//! video id, pulls metadata, transcript, and top comments from the remote
//! services, and merges everything into one JSON report. The modules here
//! are shared by the `fetch_videos` binary.

pub mod api;
pub mod config;
pub mod pipeline;
pub mod records;
pub mod resolver;
