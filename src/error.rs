use std::path::PathBuf;

use thiserror::Error;

/// Fatal configuration problems. These abort the whole run (spec §7: "Configuration
/// errors ... fatal at startup; exit 1"). Everything else is caught per-item inside
/// a worker loop and logged instead of propagated.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("required folder not found: {what} (looked for {path:?})")]
    MissingFolder { what: &'static str, path: PathBuf },

    #[error("archive listed in {source} does not exist: {path:?}")]
    MissingArchive { source: &'static str, path: PathBuf },

    #[error("failed to read {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to open archive: {0}")]
    Archive(#[from] ArchiveError),
}

/// Mesh-parser collaborator errors (spec §6 `load(bytes) -> Mesh | ErrorCode`).
#[derive(Debug, Error)]
pub enum MeshError {
    #[error("truncated mesh binary: expected at least {expected} bytes, got {got}")]
    Truncated { expected: usize, got: usize },

    #[error("unrecognized mesh signature")]
    BadSignature,

    #[error("malformed block table: {0}")]
    Malformed(String),

    #[error("binary parse error: {0}")]
    Parse(#[from] binrw::Error),
}

/// Archive reader collaborator errors (spec §6 archive `open`/`extract`).
#[derive(Debug, Error)]
pub enum ArchiveError {
    #[error("failed to open archive {path:?}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("entry not found in archive: {0}")]
    EntryNotFound(String),

    #[error("corrupt archive container: {0}")]
    Malformed(String),

    #[error("binary parse error: {0}")]
    Parse(#[from] binrw::Error),
}

/// Texture codec collaborator errors (spec §6 `load_dds_bytes`/`save_dds`/etc.).
#[derive(Debug, Error)]
pub enum CodecError {
    #[error("failed to decode DDS: {0}")]
    Decode(String),

    #[error("failed to encode DDS: {0}")]
    Encode(String),

    #[error("unsupported pixel format for this pipeline: {0:?}")]
    UnsupportedFormat(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
