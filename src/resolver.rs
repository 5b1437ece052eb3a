//! Texture source resolver (spec §4.3, component C3): given a path key found
//! during Stage A, fetches the actual texture bytes either from a loose file
//! or by extracting from whichever archive indexed it first in load order,
//! per the index built in [`crate::index`].

use std::fs;

use crate::archive::{Archive, Bsa};
use crate::error::ArchiveError;
use crate::index::TextureSource;

#[derive(Debug, thiserror::Error)]
pub enum ResolveError {
    #[error("failed to read loose file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to extract archive entry: {0}")]
    Archive(#[from] ArchiveError),
}

/// Fetch the raw bytes for a resolved texture source (spec §4.3 "resolve
/// (path_key) -> bytes, by following the index's pointer").
pub fn resolve(source: &TextureSource, archives: &[Bsa]) -> Result<Vec<u8>, ResolveError> {
    match source {
        TextureSource::LooseFile { absolute_path } => Ok(fs::read(absolute_path)?),
        TextureSource::ArchiveBlob {
            archive_index,
            name,
        } => {
            let archive = &archives[*archive_index];
            Ok(archive.extract(name)?)
        }
    }
}
