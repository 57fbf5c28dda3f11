//! Batch image downloader: fetches a list of URLs, keeps only the responses
//! that decode as images, and names them by their position in the list.

pub mod cli;
pub mod downloader;
pub mod error;
pub mod fetcher;
pub mod logging;
pub mod models;
pub mod persist;
pub mod resolver;
pub mod urls;
pub mod validate;

pub use downloader::Downloader;
pub use error::{FetchError, PersistError};
pub use fetcher::{FetchSettings, Fetcher, ReqwestFetcher};
pub use models::{RunMode, RunSummary, TaskOutcome, UrlRecord};
