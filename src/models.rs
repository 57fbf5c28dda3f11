use std::path::PathBuf;
use std::time::Duration;

/// One line of the URL list, with its zero-based position in the file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrlRecord {
    pub index: usize,
    pub url: String,
}

impl UrlRecord {
    pub fn new(index: usize, url: impl Into<String>) -> Self {
        Self {
            index,
            url: url.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunMode {
    Sequential,
    Concurrent { workers: usize },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskOutcome {
    /// Downloaded, decoded, and kept at this path.
    Saved(PathBuf),
    /// URL does not end in a recognized image extension.
    Rejected,
    /// Transport, timeout, or write failure.
    Failed(String),
    /// Downloaded bytes were not a decodable image and were discarded.
    Invalid,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub attempted: usize,
    pub rejected: usize,
    pub failed: usize,
    pub invalid: usize,
    pub succeeded: usize,
    pub elapsed: Duration,
}

impl RunSummary {
    pub fn record(&mut self, outcome: &TaskOutcome) {
        self.attempted += 1;
        match outcome {
            TaskOutcome::Saved(_) => self.succeeded += 1,
            TaskOutcome::Rejected => self.rejected += 1,
            TaskOutcome::Failed(_) => self.failed += 1,
            TaskOutcome::Invalid => self.invalid += 1,
        }
    }
}
