use crate::fetcher::FetchSettings;
use crate::models::RunMode;
use anyhow::{anyhow, Result};
use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Parser, Debug)]
#[command(name = "img-dl")]
#[command(author, version, about = "Download and validate images from a URL list", long_about = None)]
pub struct Args {
    /// Path to file containing URLs to download, one per line
    #[arg(short, long)]
    pub urls: PathBuf,

    /// Existing directory to download images to
    #[arg(short, long)]
    pub output: PathBuf,

    /// Run single-threaded, in input order
    #[arg(short, long)]
    pub single: bool,

    /// Number of parallel downloads
    #[arg(short, long, default_value = "32")]
    pub workers: usize,

    /// Per-request timeout in seconds (0 disables)
    #[arg(long, default_value = "30")]
    pub timeout: u64,

    /// HTTP proxy (e.g., http://127.0.0.1:7890)
    #[arg(long)]
    pub proxy: Option<String>,

    /// Hide the overall progress bar
    #[arg(long)]
    pub no_progress: bool,
}

#[derive(Debug, Clone)]
pub struct RunConfig {
    pub urls: PathBuf,
    pub output: PathBuf,
    pub mode: RunMode,
    pub fetch: FetchSettings,
    pub progress: bool,
}

impl Args {
    /// Checks the startup invariants and turns the raw flags into a [`RunConfig`].
    pub fn into_config(self) -> Result<RunConfig> {
        if !self.output.is_dir() {
            return Err(anyhow!(
                "Output directory not found: {}",
                self.output.display()
            ));
        }

        let mode = if self.single {
            RunMode::Sequential
        } else {
            if self.workers == 0 {
                return Err(anyhow!("--workers must be at least 1"));
            }
            RunMode::Concurrent {
                workers: self.workers,
            }
        };

        let timeout = (self.timeout > 0).then(|| Duration::from_secs(self.timeout));

        Ok(RunConfig {
            urls: self.urls,
            output: self.output,
            mode,
            fetch: FetchSettings {
                timeout,
                proxy: self.proxy,
            },
            progress: !self.no_progress,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(dir: &std::path::Path, extra: &[&str]) -> Args {
        let mut argv = vec![
            "img-dl".to_string(),
            "-u".to_string(),
            "urls.txt".to_string(),
            "-o".to_string(),
            dir.display().to_string(),
        ];
        argv.extend(extra.iter().map(|s| s.to_string()));
        Args::try_parse_from(argv).unwrap()
    }

    #[test]
    fn defaults_to_concurrent_mode() {
        let dir = tempfile::tempdir().unwrap();
        let config = parse(dir.path(), &[]).into_config().unwrap();
        assert_eq!(config.mode, RunMode::Concurrent { workers: 32 });
        assert_eq!(config.fetch.timeout, Some(Duration::from_secs(30)));
        assert!(config.progress);
    }

    #[test]
    fn single_flag_selects_sequential() {
        let dir = tempfile::tempdir().unwrap();
        let config = parse(dir.path(), &["-s"]).into_config().unwrap();
        assert_eq!(config.mode, RunMode::Sequential);
    }

    #[test]
    fn zero_timeout_disables_it() {
        let dir = tempfile::tempdir().unwrap();
        let config = parse(dir.path(), &["--timeout", "0"]).into_config().unwrap();
        assert_eq!(config.fetch.timeout, None);
    }

    #[test]
    fn rejects_zero_workers() {
        let dir = tempfile::tempdir().unwrap();
        assert!(parse(dir.path(), &["-w", "0"]).into_config().is_err());
    }

    #[test]
    fn rejects_missing_output_dir() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope");
        assert!(parse(&missing, &[]).into_config().is_err());
    }

    #[test]
    fn urls_and_output_are_required() {
        assert!(Args::try_parse_from(["img-dl", "-u", "urls.txt"]).is_err());
        assert!(Args::try_parse_from(["img-dl", "-o", "out"]).is_err());
    }
}
