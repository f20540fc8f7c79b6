use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use crate::input::UrlRecord;

const HEADER_SEPARATOR_LEN: usize = 50;

/// Ensure the transcripts directory exists before any fetch starts.
///
/// If the primary directory cannot be created the fallback is tried once;
/// if that also fails the run cannot proceed.
pub fn ensure_transcripts_dir(primary: &Path, fallback: &Path) -> Result<PathBuf> {
    match fs_err::create_dir_all(primary) {
        Ok(()) => {
            info!("Using transcripts folder: {}", primary.display());
            Ok(primary.to_path_buf())
        }
        Err(e) => {
            warn!(
                "Could not create transcripts folder {}: {}",
                primary.display(),
                e
            );
            fs_err::create_dir_all(fallback)
                .map(|()| {
                    info!("Created fallback folder: {}", fallback.display());
                    fallback.to_path_buf()
                })
                .with_context(|| {
                    format!(
                        "Could not create transcripts folder {} or fallback {}",
                        primary.display(),
                        fallback.display()
                    )
                })
        }
    }
}

/// Compose and write one transcript artifact, returning its path.
pub fn write_transcript(
    dir: &Path,
    record: &UrlRecord,
    language: &str,
    body: &str,
) -> Result<PathBuf> {
    let path = dir.join(format!("{}.txt", record.video_id));
    fs_err::write(&path, render(record, language, body))?;
    Ok(path)
}

fn render(record: &UrlRecord, language: &str, body: &str) -> String {
    format!(
        "Video ID: {}\nURL: {}\nDescription: {}\nLanguage: {}\n{}\n\n{}",
        record.video_id,
        record.url,
        record.description,
        language,
        "-".repeat(HEADER_SEPARATOR_LEN),
        body,
    )
}
