use csv::ReaderBuilder;
use std::path::Path;
use tracing::{info, warn};

/// One row of the input CSV.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrlRecord {
    pub video_id: String,
    pub url: String,
    pub description: String,
}

/// Read `(video_id, url, description)` records from a CSV file, in file
/// order.
///
/// Rows with fewer than two columns are skipped with a warning naming the
/// row number; surrounding double quotes are stripped from each field. A
/// missing file yields an empty list - the caller decides whether that is
/// fatal.
pub fn read_records(path: &Path) -> Vec<UrlRecord> {
    if !path.exists() {
        warn!("CSV file '{}' not found", path.display());
        return Vec::new();
    }

    let mut reader = match ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)
    {
        Ok(reader) => reader,
        Err(e) => {
            warn!("Error reading CSV file '{}': {}", path.display(), e);
            return Vec::new();
        }
    };

    let mut records = Vec::new();
    for (index, row) in reader.records().enumerate() {
        let row_num = index + 1;
        let row = match row {
            Ok(row) => row,
            Err(e) => {
                warn!("Row {} is unreadable: {}", row_num, e);
                continue;
            }
        };

        if row.len() < 2 {
            warn!(
                "Row {} has insufficient columns: {:?}",
                row_num,
                row.iter().collect::<Vec<_>>()
            );
            continue;
        }

        let video_id = strip_quotes(&row[0]);
        let url = strip_quotes(&row[1]);
        let description = row.get(2).map(strip_quotes).unwrap_or_default();

        if video_id.is_empty() || url.is_empty() {
            warn!("Row {} is missing a video id or URL", row_num);
            continue;
        }

        records.push(UrlRecord {
            video_id,
            url,
            description,
        });
    }

    info!("Loaded {} URLs from {}", records.len(), path.display());
    records
}

fn strip_quotes(field: &str) -> String {
    field.trim_matches('"').to_string()
}
