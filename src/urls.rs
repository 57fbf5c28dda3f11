use crate::models::UrlRecord;
use anyhow::{Context, Result};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Reads a newline-delimited URL list. Blank lines are kept so that every
/// record's index matches its line number.
pub fn read_url_list(path: &Path) -> Result<Vec<UrlRecord>> {
    let file = File::open(path)
        .with_context(|| format!("Failed to open URL file {}", path.display()))?;
    let reader = BufReader::new(file);

    let mut records = Vec::new();

    for (idx, line) in reader.lines().enumerate() {
        let line = line.context("Failed to read line")?;
        records.push(UrlRecord::new(idx, line.trim_end()));
    }

    Ok(records)
}
