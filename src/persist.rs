use crate::error::PersistError;
use crate::validate::is_decodable;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Persisted {
    Saved(PathBuf),
    Invalid,
}

/// Writes `bytes` to `target` only if they decode as an image.
///
/// The bytes go to a temp file next to `target` first. It is validated in
/// place and renamed over `target` on success; on any other path the temp
/// file is dropped, which removes it.
pub fn persist_image(bytes: &[u8], target: &Path) -> Result<Persisted, PersistError> {
    let dir = target
        .parent()
        .ok_or_else(|| PersistError::NoParent(target.display().to_string()))?;

    let mut tmp = tempfile::Builder::new()
        .prefix(".img-dl-")
        .suffix(".part")
        .tempfile_in(dir)?;
    write_all_synced(&mut tmp, bytes)?;

    if !is_decodable(tmp.path()) {
        return Ok(Persisted::Invalid);
    }

    tmp.persist(target).map_err(|e| PersistError::Io(e.error))?;
    Ok(Persisted::Saved(target.to_path_buf()))
}

fn write_all_synced(tmp: &mut NamedTempFile, bytes: &[u8]) -> Result<(), PersistError> {
    tmp.write_all(bytes)?;
    tmp.flush()?;
    tmp.as_file_mut().sync_all()?;
    Ok(())
}
