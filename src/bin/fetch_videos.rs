#![forbid(unsafe_code)]

//! Command-line entry point: loads the API credential, runs the batch
//! pipeline over a category → video-request map, and writes the aggregated
//! JSON report.
//!
//! Without `--input` the built-in reference request set (the December 2024
//! lottery coverage list) is fetched, which makes a bare invocation a useful
//! smoke test of the whole pipeline.

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use tubefetch::api::YoutubeDataClient;
use tubefetch::config::{self, FetcherConfig};
use tubefetch::pipeline::{fetch_video_data, write_report};
use tubefetch::records::{CategoryRequests, VideoRequest};

#[derive(Debug, Parser)]
#[command(
    name = "fetch_videos",
    about = "Fetch metadata, transcripts, and comments for categorized YouTube videos"
)]
struct Args {
    /// KEY=VALUE env file holding YOUTUBE_API_KEY and optional endpoint
    /// overrides. Defaults to /etc/tubefetch-env, then the process
    /// environment.
    #[arg(long)]
    config: Option<PathBuf>,

    /// JSON file mapping category names to video request lists. Falls back
    /// to the built-in reference set.
    #[arg(long)]
    input: Option<PathBuf>,

    /// Destination for the aggregated JSON report.
    #[arg(long, default_value = "youtube_data.json")]
    output: PathBuf,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let config = load_config(&args)?;
    let requests = match &args.input {
        Some(path) => read_requests(path)?,
        None => sample_requests(),
    };

    println!("===================================");
    println!("YouTube Data Fetcher");
    println!("===================================");
    println!(
        "Categories: {}  Videos: {}",
        requests.len(),
        requests.video_count()
    );
    println!("Output: {}", args.output.display());
    println!();

    let client = YoutubeDataClient::new(&config);
    let results = fetch_video_data(&client, &requests);

    write_report(&args.output, &results)?;

    println!();
    println!(
        "Data successfully fetched and saved to {}",
        args.output.display()
    );

    Ok(())
}

fn load_config(args: &Args) -> Result<FetcherConfig> {
    match &args.config {
        Some(path) => config::load_config_from(path),
        None => config::load_config(),
    }
}

/// Reads a category → request-list document, keeping category order exactly
/// as it appears in the file.
fn read_requests(path: &Path) -> Result<CategoryRequests> {
    let file = File::open(path).with_context(|| format!("opening {}", path.display()))?;
    serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("parsing {}", path.display()))
}

/// Reference request set used when no input file is given.
fn sample_requests() -> CategoryRequests {
    let lottery = vec![
        VideoRequest::new(
            "Powerball 12-16-24",
            "WITN-TV",
            "https://www.youtube.com/watch?v=duAeRtYeC0E",
        ),
        VideoRequest::new(
            "Powerball: December 16, 2024",
            "News 19 WLTX",
            "https://www.youtube.com/watch?v=pZfZRybbCTA",
        ),
        VideoRequest::new(
            "Powerball 12-14-24",
            "WITN-TV",
            "https://www.youtube.com/watch?v=Dvx_L3_2Bkc",
        ),
        VideoRequest::new(
            "No big winner: Mega Millions jackpot grows to $825 million",
            "KTSM 9 NEWS",
            "https://www.youtube.com/watch?v=SUUaR2cpAOI",
        ),
        VideoRequest::new(
            "Mega Million Jackpot climbs to $825 million",
            "PAHomepage.com",
            "https://www.youtube.com/watch?v=zlmdubztPLU",
        ),
        VideoRequest::new(
            "Mega Millions reaches $825 million",
            "KCENNews",
            "https://www.youtube.com/watch?v=S8DQTx1bRzs",
        ),
        VideoRequest::new(
            "Mega Millions Jackpot jumps to $825 million",
            "WUSA9",
            "https://www.youtube.com/watch?v=t9qGo-6I-SA",
        ),
        VideoRequest::new(
            "Mega Millions jackpot grows to $825M",
            "Atlanta News First",
            "https://www.youtube.com/watch?v=D2Y8EfwXyho",
        ),
        VideoRequest::new(
            "Mega Millions jackpot rises to $825M",
            "WCNC",
            "https://www.youtube.com/watch?v=DunhkRLJl0w",
        ),
        VideoRequest::new(
            "Mega Millions draws rare consecutive numbers but no winner",
            "TODAY",
            "https://www.youtube.com/watch?v=u3JXD2fE3Is",
        ),
        VideoRequest::new(
            "Numbers drawn in Tuesday's Mega Millions jackpot",
            "Eyewitness News ABC7NY",
            "https://www.youtube.com/watch?v=cu9xSZ5PAe0",
        ),
        VideoRequest::new(
            "Mega Millions 12-17-24",
            "WITN-TV",
            "https://www.youtube.com/watch?v=MlTKxrYu2EQ",
        ),
        VideoRequest::new(
            "Lottery fever grows at the jackpot increases",
            "WFAA",
            "https://www.youtube.com/watch?v=LNpjln4H0Ok",
        ),
        VideoRequest::new(
            "Mega Millions jackpot swells to $825M",
            "NBC10 Philadelphia",
            "https://www.youtube.com/watch?v=FV7oPEAskVo",
        ),
        VideoRequest::new(
            "MegaMillions: December 17, 2024",
            "News 19 WLTX",
            "https://www.youtube.com/watch?v=oKgV2FQxBps",
        ),
    ];

    let mut requests = CategoryRequests::new();
    requests.push("Lottery", lottery);
    requests
}
