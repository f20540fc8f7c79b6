use std::collections::HashSet;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Append-only progress ledger backed by two text files.
///
/// The completed file holds one URL per line; the failed file holds
/// `url<TAB>reason` per line. Entries are only ever appended - deleting a
/// line from the failed file is how a URL gets retried on a later run.
#[derive(Debug, Clone)]
pub struct Ledger {
    completed_path: PathBuf,
    failed_path: PathBuf,
}

impl Ledger {
    pub fn new(completed_path: impl Into<PathBuf>, failed_path: impl Into<PathBuf>) -> Self {
        Self {
            completed_path: completed_path.into(),
            failed_path: failed_path.into(),
        }
    }

    /// URLs already fetched successfully. A missing file is an empty set.
    pub fn load_completed(&self) -> HashSet<String> {
        self.load(&self.completed_path, "completed", |line| {
            Some(line.to_string())
        })
    }

    /// URLs that failed on an earlier run, taken from the first
    /// tab-delimited field of each line.
    pub fn load_failed(&self) -> HashSet<String> {
        self.load(&self.failed_path, "failed", |line| {
            line.split('\t').next().map(str::to_string)
        })
    }

    fn load(
        &self,
        path: &Path,
        kind: &str,
        parse: impl Fn(&str) -> Option<String>,
    ) -> HashSet<String> {
        if !path.exists() {
            return HashSet::new();
        }

        let content = match fs_err::read_to_string(path) {
            Ok(content) => content,
            Err(e) => {
                warn!("Could not load {} URLs: {}", kind, e);
                return HashSet::new();
            }
        };

        let urls: HashSet<String> = content
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .filter_map(&parse)
            .filter(|url| !url.is_empty())
            .collect();

        info!("Loaded {} {} URLs from {}", urls.len(), kind, path.display());
        urls
    }

    /// Append a URL to the completed file. Append errors are logged and
    /// swallowed so a ledger problem never aborts the batch.
    pub fn record_completed(&self, url: &str) {
        match append_line(&self.completed_path, url) {
            Ok(()) => info!("Saved completed URL: {}", url),
            Err(e) => warn!("Could not save completed URL: {}", e),
        }
    }

    /// Append a URL and failure reason to the failed file.
    pub fn record_failed(&self, url: &str, reason: &str) {
        let line = format!("{url}\t{reason}");
        match append_line(&self.failed_path, &line) {
            Ok(()) => info!("Saved failed URL: {} - Reason: {}", url, reason),
            Err(e) => warn!("Could not save failed URL: {}", e),
        }
    }
}

fn append_line(path: &Path, line: &str) -> std::io::Result<()> {
    let mut file = fs_err::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)?;
    writeln!(file, "{line}")
}
