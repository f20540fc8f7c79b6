//! Sequential driver over the pending set.
//!
//! One record at a time, in CSV file order: fetch, write the artifact,
//! settle the URL into exactly one ledger, pause, continue. A failing
//! record never aborts the batch; only resource-level problems do.

use anyhow::Result;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;
use tracing::{error, info};

use crate::config::Settings;
use crate::input::{self, UrlRecord};
use crate::ledger::Ledger;
use crate::output;
use crate::supadata::{SupadataError, TranscriptSource};

/// Why one record failed. `Display` is the exact reason string written to
/// the failed ledger.
#[derive(Error, Debug)]
pub enum FetchFailure {
    #[error("Supadata API error: {0}")]
    Api(String),

    #[error("Transcript fetch error: {0}")]
    Fetch(String),

    #[error("File save error: {0}")]
    Save(String),
}

/// Counters reported at the end of a run.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub total: usize,
    pub already_completed: usize,
    pub previously_failed: usize,
    pub processed: usize,
    pub succeeded: usize,
    pub failed: usize,
}

/// Drives one batch run end to end.
pub struct BatchRunner {
    settings: Settings,
    ledger: Ledger,
    source: Box<dyn TranscriptSource>,
}

impl BatchRunner {
    pub fn new(settings: Settings, source: Box<dyn TranscriptSource>) -> Self {
        let ledger = Ledger::new(
            &settings.ledger.completed_file,
            &settings.ledger.failed_file,
        );
        Self {
            settings,
            ledger,
            source,
        }
    }

    /// Process every pending CSV record in file order.
    ///
    /// Pending means the URL appears in neither ledger at the start of the
    /// run. Per processed record exactly one ledger gains exactly one line.
    pub async fn run(&self, language: &str) -> Result<RunSummary> {
        let transcripts_dir = output::ensure_transcripts_dir(
            &self.settings.output.transcripts_dir,
            &self.settings.output.fallback_dir,
        )?;

        let records = input::read_records(&self.settings.input.csv_path);
        let completed = self.ledger.load_completed();
        let failed = self.ledger.load_failed();

        let mut summary = RunSummary {
            total: records.len(),
            already_completed: completed.len(),
            previously_failed: failed.len(),
            ..RunSummary::default()
        };

        if records.is_empty() {
            println!("No URLs found in CSV file");
            return Ok(summary);
        }

        let pending: Vec<&UrlRecord> = records
            .iter()
            .filter(|r| !completed.contains(&r.url) && !failed.contains(&r.url))
            .collect();

        if pending.is_empty() {
            println!("All URLs have already been processed (completed or failed)!");
            return Ok(summary);
        }

        info!(
            "Found {} URLs to process (out of {} total)",
            pending.len(),
            records.len()
        );

        let progress = ProgressBar::new(pending.len() as u64);
        progress.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
                .unwrap(),
        );

        for (index, record) in pending.iter().enumerate() {
            progress.set_message(record.description.clone());
            info!(
                "Processing {}/{}: {}",
                index + 1,
                pending.len(),
                record.description
            );

            summary.processed += 1;
            match self.process_one(record, language, &transcripts_dir).await {
                Ok(path) => {
                    summary.succeeded += 1;
                    info!("Transcript saved to: {}", path.display());
                }
                Err(failure) => {
                    summary.failed += 1;
                    error!("{}: {}", record.url, failure);
                }
            }
            progress.inc(1);

            // Crude self-imposed rate limit: pause after every item except
            // the last.
            let delay = self.settings.fetch.request_delay_secs;
            if delay > 0 && index + 1 < pending.len() {
                info!("Pausing for {} seconds before next URL...", delay);
                tokio::time::sleep(Duration::from_secs(delay)).await;
            }
        }
        progress.finish_and_clear();

        print_summary(&summary);
        Ok(summary)
    }

    /// Fetch one transcript and settle it into exactly one ledger.
    async fn process_one(
        &self,
        record: &UrlRecord,
        language: &str,
        transcripts_dir: &Path,
    ) -> std::result::Result<PathBuf, FetchFailure> {
        let result = self.fetch_and_write(record, language, transcripts_dir).await;
        match &result {
            Ok(_) => self.ledger.record_completed(&record.url),
            Err(failure) => self.ledger.record_failed(&record.url, &failure.to_string()),
        }
        result
    }

    async fn fetch_and_write(
        &self,
        record: &UrlRecord,
        language: &str,
        transcripts_dir: &Path,
    ) -> std::result::Result<PathBuf, FetchFailure> {
        let transcript = self
            .source
            .plain_transcript(&record.url, language)
            .await
            .map_err(|e| match e {
                SupadataError::Api { .. } => FetchFailure::Api(e.to_string()),
                SupadataError::Transport(inner) => FetchFailure::Fetch(inner.to_string()),
            })?;

        output::write_transcript(transcripts_dir, record, language, &transcript.plain_text())
            .map_err(|e| FetchFailure::Save(e.to_string()))
    }
}

fn print_summary(summary: &RunSummary) {
    let rule = "=".repeat(60);
    println!("\n{rule}");
    println!("{}", style("PROCESSING COMPLETE").bold());
    println!("{rule}");
    println!("Total URLs in CSV: {}", summary.total);
    println!("Already completed: {}", summary.already_completed);
    println!("Previously failed: {}", summary.previously_failed);
    println!("Processed this run: {}", summary.processed);
    println!("Successful: {}", summary.succeeded);
    println!("Failed: {}", summary.failed);
}
