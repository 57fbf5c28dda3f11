//! Output filename resolution.
//!
//! A URL is accepted only when the last segment of its path ends in one of
//! the [`ImageExtension`] suffixes. The produced name is the record index,
//! zero-padded to eight digits, followed by the extension exactly as the URL
//! spelled it.

use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageExtension {
    Jpeg,
    Png,
    Jpg,
}

impl ImageExtension {
    pub const ALL: [ImageExtension; 3] = [Self::Jpeg, Self::Png, Self::Jpg];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Jpeg => "jpeg",
            Self::Png => "png",
            Self::Jpg => "jpg",
        }
    }

    /// Matches an extension without its leading dot, ignoring ASCII case.
    pub fn from_suffix(suffix: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|ext| ext.as_str().eq_ignore_ascii_case(suffix))
    }
}

/// Returns `{index:08}.{ext}` for a URL with a recognized image extension,
/// or `None` if the URL should be skipped.
pub fn resolve_filename(url: &str, index: usize) -> Option<String> {
    let path = url.split(['?', '#']).next()?;
    let segment = path.rsplit('/').next()?;
    let (_, suffix) = segment.rsplit_once('.')?;
    ImageExtension::from_suffix(suffix)?;

    Some(format!("{index:08}.{suffix}"))
}

pub fn resolve_path(output_dir: &Path, url: &str, index: usize) -> Option<PathBuf> {
    resolve_filename(url, index).map(|name| output_dir.join(name))
}
