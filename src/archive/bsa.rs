//! Concrete archive container, grounded on the same fixed-layout-plus-table
//! approach `xc3_lib`'s `msrd` streaming format and `dbpf` use for game
//! archives: a magic/version header, a flat file table (each entry carrying
//! its own name, offset and sizes), and `binrw` doing the field-by-field
//! reads. Stands in for the real BSA container (out of scope per spec §1's
//! "Archive reader" collaborator).
//!
//! Wire layout (little-endian):
//! ```text
//! magic: [u8; 4] = b"TBSA"
//! version: u32
//! entry_count: u32
//! entries[entry_count]: {
//!     name_len: u32
//!     name: [u8; name_len]   (utf8, stored as the archive's internal path)
//!     offset: u32
//!     compressed_size: u32
//!     uncompressed_size: u32
//! }
//! <raw entry bytes, back to back, each stored size == uncompressed_size
//!  (this stand-in container never compresses individual entries)>
//! ```

use std::collections::HashMap;
use std::fs;
use std::io::{Cursor, Read};
use std::path::{Path, PathBuf};

use binrw::BinReaderExt;

use super::Archive;
use crate::error::ArchiveError;
use crate::pathkey::PathKey;

const MAGIC: &[u8; 4] = b"TBSA";

struct Entry {
    offset: u32,
    compressed_size: u32,
    uncompressed_size: u32,
}

/// An opened archive, fully indexed in memory (entry table only — bytes are
/// read lazily per `extract` call, matching spec §6's "extract(name) -> bytes"
/// being a distinct step from `open`/`list`).
pub struct Bsa {
    path: PathBuf,
    data: Vec<u8>,
    names: Vec<String>,
    index: HashMap<PathKey, Entry>,
}

impl Bsa {
    pub fn open(path: &Path) -> Result<Bsa, ArchiveError> {
        let data = fs::read(path).map_err(|e| ArchiveError::Open {
            path: path.to_path_buf(),
            source: e,
        })?;

        let mut cursor = Cursor::new(&data);
        let mut magic = [0u8; 4];
        cursor
            .read_exact(&mut magic)
            .map_err(|e| ArchiveError::Open {
                path: path.to_path_buf(),
                source: e,
            })?;
        if &magic != MAGIC {
            return Err(ArchiveError::Malformed(format!(
                "{path:?}: unrecognized archive signature"
            )));
        }

        let _version: u32 = cursor.read_le()?;
        let entry_count: u32 = cursor.read_le()?;

        let mut names = Vec::with_capacity(entry_count as usize);
        let mut index = HashMap::with_capacity(entry_count as usize);
        for _ in 0..entry_count {
            let name_len: u32 = cursor.read_le()?;
            let mut name_buf = vec![0u8; name_len as usize];
            cursor
                .read_exact(&mut name_buf)
                .map_err(|e| ArchiveError::Malformed(e.to_string()))?;
            let name = String::from_utf8_lossy(&name_buf).into_owned();

            let offset: u32 = cursor.read_le()?;
            let compressed_size: u32 = cursor.read_le()?;
            let uncompressed_size: u32 = cursor.read_le()?;

            let key = PathKey::new(&name);
            index.insert(
                key,
                Entry {
                    offset,
                    compressed_size,
                    uncompressed_size,
                },
            );
            names.push(name);
        }

        Ok(Bsa {
            path: path.to_path_buf(),
            data,
            names,
            index,
        })
    }
}

impl Archive for Bsa {
    fn list(&self) -> Box<dyn Iterator<Item = &str> + '_> {
        Box::new(self.names.iter().map(|s| s.as_str()))
    }

    fn find(&self, name: &str) -> Option<()> {
        self.index.get(&PathKey::new(name)).map(|_| ())
    }

    fn extract(&self, name: &str) -> Result<Vec<u8>, ArchiveError> {
        let key = PathKey::new(name);
        let entry = self
            .index
            .get(&key)
            .ok_or_else(|| ArchiveError::EntryNotFound(name.to_string()))?;

        let start = entry.offset as usize;
        let end = start + entry.compressed_size as usize;
        if end > self.data.len() {
            return Err(ArchiveError::Malformed(format!(
                "{:?}: entry {name:?} extends past end of file",
                self.path
            )));
        }

        let raw = &self.data[start..end];
        // This stand-in container never shrinks an entry on disk, so
        // compressed_size == uncompressed_size always holds; a real BSA's
        // zlib-compressed entries would be inflated here instead.
        if entry.compressed_size != entry.uncompressed_size {
            return Err(ArchiveError::Malformed(format!(
                "{:?}: entry {name:?} claims compression, which this reader does not support",
                self.path
            )));
        }

        Ok(raw.to_vec())
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;

    pub fn build_archive(entries: &[(&str, &[u8])]) -> Vec<u8> {
        let mut table = Vec::new();
        let mut blob = Vec::new();
        for (name, bytes) in entries {
            let name_len = name.len() as u32;
            table.extend_from_slice(&name_len.to_le_bytes());
            table.extend_from_slice(name.as_bytes());
            table.extend_from_slice(&(blob.len() as u32).to_le_bytes());
            table.extend_from_slice(&(bytes.len() as u32).to_le_bytes());
            table.extend_from_slice(&(bytes.len() as u32).to_le_bytes());
            blob.extend_from_slice(bytes);
        }

        let mut out = Vec::new();
        out.extend_from_slice(MAGIC);
        out.extend_from_slice(&1u32.to_le_bytes());
        out.extend_from_slice(&(entries.len() as u32).to_le_bytes());
        out.extend_from_slice(&table);
        out.extend_from_slice(&blob);
        out
    }
}
