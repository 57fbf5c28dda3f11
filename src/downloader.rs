use crate::cli::RunConfig;
use crate::fetcher::{Fetcher, ReqwestFetcher};
use crate::models::{RunMode, RunSummary, TaskOutcome, UrlRecord};
use crate::persist::{persist_image, Persisted};
use crate::resolver::resolve_path;
use anyhow::Result;
use futures::future::join_all;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::Semaphore;
use tokio::task;
use tracing::{info, warn};

#[derive(Clone)]
pub struct Downloader {
    fetcher: Arc<dyn Fetcher>,
    output_dir: PathBuf,
    progress: bool,
}

impl Downloader {
    pub fn new(config: &RunConfig) -> Result<Self> {
        let fetcher = ReqwestFetcher::new(&config.fetch)?;
        Ok(Self::with_fetcher(Arc::new(fetcher), &config.output).with_progress(config.progress))
    }

    pub fn with_fetcher(fetcher: Arc<dyn Fetcher>, output_dir: impl AsRef<Path>) -> Self {
        Self {
            fetcher,
            output_dir: output_dir.as_ref().to_path_buf(),
            progress: false,
        }
    }

    pub fn with_progress(mut self, progress: bool) -> Self {
        self.progress = progress;
        self
    }

    /// Runs one task and logs its outcome.
    pub async fn process(&self, record: &UrlRecord) -> TaskOutcome {
        let outcome = self.execute(record).await;
        report(record, &outcome);
        outcome
    }

    async fn execute(&self, record: &UrlRecord) -> TaskOutcome {
        let Some(path) = resolve_path(&self.output_dir, &record.url, record.index) else {
            return TaskOutcome::Rejected;
        };

        let bytes = match self.fetcher.fetch(&record.url).await {
            Ok(bytes) => bytes,
            Err(e) => return TaskOutcome::Failed(e.to_string()),
        };

        // Disk write and decode are blocking work.
        match task::spawn_blocking(move || persist_image(&bytes, &path)).await {
            Ok(Ok(Persisted::Saved(path))) => TaskOutcome::Saved(path),
            Ok(Ok(Persisted::Invalid)) => TaskOutcome::Invalid,
            Ok(Err(e)) => TaskOutcome::Failed(e.to_string()),
            Err(e) => TaskOutcome::Failed(format!("write task error: {}", e)),
        }
    }

    pub async fn run(&self, records: Vec<UrlRecord>, mode: RunMode) -> RunSummary {
        let summary = match mode {
            RunMode::Sequential => {
                info!("Running single-threaded...");
                self.run_sequential(records).await
            }
            RunMode::Concurrent { workers } => {
                let cpus = std::thread::available_parallelism().map_or(1, |n| n.get());
                info!(
                    "Running concurrently across {} workers ({} processing units available)...",
                    workers, cpus
                );
                self.run_concurrent(records, workers).await
            }
        };

        info!(
            "Done: {} attempted, {} succeeded, {} rejected, {} invalid, {} failed",
            summary.attempted, summary.succeeded, summary.rejected, summary.invalid, summary.failed
        );
        info!("Elapsed: {:.3}s", summary.elapsed.as_secs_f64());

        summary
    }

    pub async fn run_sequential(&self, records: Vec<UrlRecord>) -> RunSummary {
        let start = Instant::now();
        let pb = self.overall_bar(records.len());
        let mut summary = RunSummary::default();

        for record in &records {
            let outcome = self.execute(record).await;
            pb.suspend(|| report(record, &outcome));
            pb.inc(1);
            summary.record(&outcome);
        }

        pb.finish_and_clear();
        summary.elapsed = start.elapsed();
        summary
    }

    pub async fn run_concurrent(&self, records: Vec<UrlRecord>, workers: usize) -> RunSummary {
        let start = Instant::now();
        let pb = self.overall_bar(records.len());

        // Semaphore to limit concurrent downloads
        let semaphore = Arc::new(Semaphore::new(workers.max(1)));

        let mut handles = Vec::with_capacity(records.len());

        for record in records {
            let semaphore = Arc::clone(&semaphore);
            let pb = pb.clone();
            let downloader = self.clone();

            let handle = task::spawn(async move {
                let Ok(_permit) = semaphore.acquire_owned().await else {
                    return TaskOutcome::Failed("worker pool closed".to_string());
                };

                let outcome = downloader.execute(&record).await;
                pb.suspend(|| report(&record, &outcome));
                pb.inc(1);
                outcome
            });

            handles.push(handle);
        }

        let mut summary = RunSummary::default();
        for result in join_all(handles).await {
            let outcome = result.unwrap_or_else(|e| {
                warn!("Task error: {}", e);
                TaskOutcome::Failed(format!("task error: {}", e))
            });
            summary.record(&outcome);
        }

        pb.finish_and_clear();
        summary.elapsed = start.elapsed();
        summary
    }

    fn overall_bar(&self, len: usize) -> ProgressBar {
        if !self.progress {
            return ProgressBar::hidden();
        }

        let pb = ProgressBar::new(len as u64);
        let style = ProgressStyle::default_bar()
            .template("{msg} {bar:40} {pos}/{len}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("=>-");
        pb.set_style(style);
        pb.set_message("Overall");
        pb
    }
}

fn report(record: &UrlRecord, outcome: &TaskOutcome) {
    let (index, url) = (record.index, record.url.as_str());
    match outcome {
        TaskOutcome::Saved(path) => info!(index, "Wrote image {}", path.display()),
        TaskOutcome::Rejected => info!(index, url, "Image is not a valid filetype, skipping"),
        TaskOutcome::Failed(reason) => info!(index, url, %reason, "Unable to download image"),
        TaskOutcome::Invalid => info!(index, url, "Image is not valid, removed"),
    }
}
