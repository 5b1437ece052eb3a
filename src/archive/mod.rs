//! Archive reader collaborator (spec §6: `open`/`list`/`extract`/`find`/`close`).
//! Stands in for the real BSA container format (out of scope per spec §1).

pub mod bsa;

use crate::error::ArchiveError;

pub use bsa::Bsa;

/// The archive collaborator's contract, independent of container format.
pub trait Archive {
    /// All entry names stored in the archive, in container order.
    fn list(&self) -> Box<dyn Iterator<Item = &str> + '_>;

    /// Look up an entry by case-folded internal name without extracting it.
    fn find(&self, name: &str) -> Option<()>;

    /// Extract an entry's bytes by case-folded internal name.
    fn extract(&self, name: &str) -> Result<Vec<u8>, ArchiveError>;
}

/// Open an archive file from disk (spec §6 `open(path) -> Archive | Error`).
pub fn open(path: &std::path::Path) -> Result<Bsa, ArchiveError> {
    Bsa::open(path)
}
