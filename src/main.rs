use anyhow::Result;
use clap::Parser;
use img_dl::cli::Args;
use img_dl::{logging, urls, Downloader};
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    logging::init_logging();

    let config = Args::parse().into_config()?;
    let records = urls::read_url_list(&config.urls)?;

    info!("Loaded {} URLs from {}", records.len(), config.urls.display());

    let downloader = Downloader::new(&config)?;
    downloader.run(records, config.mode).await;

    Ok(())
}
