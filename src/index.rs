//! Source index (spec §4.1, component C1): enumerates every mesh and texture
//! reachable through the configured archives (in load order) and the loose
//! data folder, folding both into one `PathKey`-addressed view where loose
//! files always win over archive entries (spec §3 "Override policy").

use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::archive::{Archive, Bsa};
use crate::pathkey::PathKey;

/// Where a path-keyed entry's bytes actually live. Resolution (spec §4.3,
/// component C3) reads this to decide whether to `extract` from an archive
/// or `fs::read` a loose file.
#[derive(Debug, Clone)]
pub enum TextureSource {
    LooseFile { absolute_path: PathBuf },
    ArchiveBlob { archive_index: usize, name: String },
}

#[derive(Debug, Clone)]
pub enum MeshSource {
    LooseFile { absolute_path: PathBuf },
    ArchiveBlob { archive_index: usize, name: String },
}

/// The merged view over all discovered meshes and textures, keyed by
/// normalized path, with loose files taking precedence over archive entries
/// (spec §3 "Override policy": "a loose file at the same path key always
/// overrides the same path key found in any archive").
#[derive(Debug, Default)]
pub struct SourceIndex {
    meshes: std::collections::HashMap<PathKey, MeshSource>,
    textures: std::collections::HashMap<PathKey, TextureSource>,
}

impl SourceIndex {
    pub fn meshes(&self) -> impl Iterator<Item = (&PathKey, &MeshSource)> {
        self.meshes.iter()
    }

    pub fn texture(&self, key: &PathKey) -> Option<&TextureSource> {
        self.textures.get(key)
    }

    pub fn mesh_count(&self) -> usize {
        self.meshes.len()
    }

    pub fn texture_count(&self) -> usize {
        self.textures.len()
    }

    /// Archives are inserted in load order and each entry unconditionally
    /// overwrites whatever the same key held before (spec Glossary "Load
    /// order": "later entries override earlier ones"; spec §8 scenario E3:
    /// two archives both containing `meshes\a.nif`, the later one wins).
    /// Only the subsequent loose-file pass is allowed to beat that — never
    /// an earlier archive beating a later one.
    fn insert_from_archive(&mut self, archive_index: usize, archive: &Bsa) {
        for name in archive.list() {
            let key = PathKey::new(name);
            if key.is_in_scope_mesh() {
                self.meshes.insert(
                    key,
                    MeshSource::ArchiveBlob {
                        archive_index,
                        name: name.to_string(),
                    },
                );
            } else if key.ends_with(".dds") && key.is_in_scope_texture() {
                self.textures.insert(
                    key,
                    TextureSource::ArchiveBlob {
                        archive_index,
                        name: name.to_string(),
                    },
                );
            }
        }
    }

    /// Loose files always override whatever an archive already inserted,
    /// since this is called after every `insert_from_archive` in load order
    /// (spec §3 "Override policy").
    fn insert_loose(&mut self, data_root: &Path, path: &Path) {
        let relative = match path.strip_prefix(data_root) {
            Ok(r) => r,
            Err(_) => return,
        };
        let key = PathKey::new(relative.to_string_lossy());
        if key.is_in_scope_mesh() {
            self.meshes.insert(
                key,
                MeshSource::LooseFile {
                    absolute_path: path.to_path_buf(),
                },
            );
        } else if key.ends_with(".dds") && key.is_in_scope_texture() {
            self.textures.insert(
                key,
                TextureSource::LooseFile {
                    absolute_path: path.to_path_buf(),
                },
            );
        }
    }
}

/// Build the merged index (spec §4.1): archives first, in load order, then
/// the loose data folder walked last so loose files win ties.
pub fn build(data_root: &Path, archives: &[Bsa]) -> SourceIndex {
    let mut index = SourceIndex::default();

    for (i, archive) in archives.iter().enumerate() {
        index.insert_from_archive(i, archive);
    }

    for entry in WalkDir::new(data_root)
        .into_iter()
        .filter_map(Result::ok)
        .filter(|e| e.file_type().is_file())
    {
        index.insert_loose(data_root, entry.path());
    }

    index
}

/// A queued unit of Stage-A work (spec §3 "MeshEntry"): a path key plus its
/// fully materialized bytes, ready to hand off to a worker queue. Extracting
/// eagerly here (rather than queueing a lazy handle) keeps archive file
/// handles from having to stay open across the whole Stage-A run.
pub struct MeshEntry {
    pub internal_path: PathKey,
    pub payload: Vec<u8>,
}

/// Materialize every indexed mesh into an owned `MeshEntry`, reading loose
/// files and extracting archive entries. A source that fails to read is
/// logged and dropped (spec §4.1 "a directory-iterator error is logged and
/// iteration continues past that entry").
pub fn materialize_mesh_entries(index: &SourceIndex, archives: &[Bsa]) -> Vec<MeshEntry> {
    let mut entries = Vec::with_capacity(index.mesh_count());
    for (key, source) in index.meshes() {
        let payload = match source {
            MeshSource::LooseFile { absolute_path } => match std::fs::read(absolute_path) {
                Ok(bytes) => bytes,
                Err(e) => {
                    eprintln!("skipping mesh {key}: failed to read {absolute_path:?}: {e}");
                    continue;
                }
            },
            MeshSource::ArchiveBlob {
                archive_index,
                name,
            } => match archives[*archive_index].extract(name) {
                Ok(bytes) => bytes,
                Err(e) => {
                    eprintln!("skipping mesh {key}: failed to extract {name}: {e}");
                    continue;
                }
            },
        };
        if payload.is_empty() {
            eprintln!("skipping mesh {key}: empty payload");
            continue;
        }
        entries.push(MeshEntry {
            internal_path: key.clone(),
            payload,
        });
    }
    entries
}
