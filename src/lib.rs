//! YouTube Transcriber - batch transcript fetching through the Supadata API
//!
//! This library reads `(video_id, url, description)` rows from a CSV file,
//! requests a plain-text transcript for every URL not yet settled in the
//! completed or failed ledger, and writes one text artifact per video.
//! Ledger files are append-only, so reruns only process what is left.

pub mod cli;
pub mod config;
pub mod input;
pub mod ledger;
pub mod output;
pub mod pipeline;
pub mod supadata;
pub mod utils;

pub use cli::Cli;
pub use config::Settings;
pub use input::UrlRecord;
pub use ledger::Ledger;
pub use pipeline::{BatchRunner, RunSummary};
pub use supadata::{SupadataClient, SupadataError, Transcript, TranscriptSource};

/// Result type used throughout the library
pub type Result<T> = anyhow::Result<T>;
