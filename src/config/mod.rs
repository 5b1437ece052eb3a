//! Game-config discovery (spec §6, "Archive list discovery"): locates the
//! user's `Skyrim.ini` and `loadorder.txt` and turns them into an ordered
//! list of `.bsa` paths under `<cwd>\data\`. Kept SSE-specific per spec §9's
//! explicit open question — generalizing across game versions is out of
//! scope.

pub mod ini;
pub mod loadorder;

use std::path::{Path, PathBuf};

use crate::error::ConfigError;

/// The two known-folder roots this discovery step needs, resolved once up
/// front so the rest of config discovery is pure path arithmetic.
pub struct KnownFolders {
    pub documents: PathBuf,
    pub local_app_data: PathBuf,
}

impl KnownFolders {
    /// Resolve via the `dirs` crate (spec §9 treats "missing known folder" as
    /// a fatal configuration error — see [`ConfigError::MissingFolder`]).
    pub fn discover() -> Result<KnownFolders, ConfigError> {
        let documents = dirs::document_dir().ok_or(ConfigError::MissingFolder {
            what: "Documents",
            path: PathBuf::new(),
        })?;
        let local_app_data = dirs::data_local_dir().ok_or(ConfigError::MissingFolder {
            what: "LOCALAPPDATA",
            path: PathBuf::new(),
        })?;
        Ok(KnownFolders {
            documents,
            local_app_data,
        })
    }
}

/// Build the final, ordered list of archive paths (spec §6): ini-listed
/// archives first (in the order their tokens appear), then loadorder-derived
/// `.bsa` files that actually exist on disk, appended after.
pub fn discover_archives(
    folders: &KnownFolders,
    data_root: &Path,
) -> Result<Vec<PathBuf>, ConfigError> {
    let ini_path = folders
        .documents
        .join("My Games")
        .join("Skyrim Special Edition")
        .join("Skyrim.ini");
    let ini_contents = std::fs::read_to_string(&ini_path).map_err(|e| ConfigError::Read {
        path: ini_path.clone(),
        source: e,
    })?;

    let mut archives = Vec::new();
    for name in ini::parse_archive_list(&ini_contents) {
        let path = data_root.join(&name);
        if !path.exists() {
            return Err(ConfigError::MissingArchive {
                source: "Skyrim.ini",
                path,
            });
        }
        archives.push(path);
    }

    let loadorder_path = folders
        .local_app_data
        .join("Skyrim Special Edition")
        .join("loadorder.txt");
    if let Ok(contents) = std::fs::read_to_string(&loadorder_path) {
        for plugin in loadorder::parse_load_order(&contents) {
            let candidate = data_root.join(format!("{plugin}.bsa"));
            if candidate.exists() {
                archives.push(candidate);
            }
        }
    }

    Ok(archives)
}
