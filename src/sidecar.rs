use std::fs;
use std::path::{Path, PathBuf};

/// Sidecar suffix (spec §3/§4.5): `<output>.info.mohidden`, content
/// `"<hex_digest>:<decimal target_size>"`.
pub const SIDECAR_SUFFIX: &str = ".info.mohidden";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SidecarRecord {
    pub hash: String,
    pub target_size: u64,
}

pub fn sidecar_path(output_path: &Path) -> PathBuf {
    let mut s = output_path.as_os_str().to_os_string();
    s.push(SIDECAR_SUFFIX);
    PathBuf::from(s)
}

/// Read and parse a sidecar file. A missing file or one with no `:` separator
/// is a miss (spec §4.5: "a malformed file (no colon) is treated as a miss").
pub fn read_sidecar(output_path: &Path) -> Option<SidecarRecord> {
    let path = sidecar_path(output_path);
    let contents = fs::read_to_string(path).ok()?;
    parse_sidecar(contents.trim())
}

fn parse_sidecar(contents: &str) -> Option<SidecarRecord> {
    let (hash, size) = contents.split_once(':')?;
    let target_size: u64 = size.trim().parse().ok()?;
    Some(SidecarRecord {
        hash: hash.trim().to_string(),
        target_size,
    })
}

/// Write a fresh sidecar after a successful encode+save (spec §4.4 step 5,
/// §4.5: "written only on successful encode+save").
pub fn write_sidecar(output_path: &Path, hash: &str, target_size: u64) -> std::io::Result<()> {
    let path = sidecar_path(output_path);
    fs::write(path, format!("{hash}:{target_size}"))
}

/// Whether the cache probe (spec §4.4 step 2) says this texture can be skipped.
pub fn should_skip(record: &Option<SidecarRecord>, hash: &str, target_size: u64) -> bool {
    matches!(record, Some(r) if r.hash == hash && r.target_size == target_size)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn malformed_sidecar_is_a_miss() {
        assert_eq!(parse_sidecar("no-colon-here"), None);
    }

    #[test]
    fn tolerates_trailing_whitespace() {
        let r = parse_sidecar("abcd1234:512\n").unwrap();
        assert_eq!(r.hash, "abcd1234");
        assert_eq!(r.target_size, 512);
    }

    #[test]
    fn skip_requires_exact_hash_and_size_match() {
        let record = Some(SidecarRecord {
            hash: "deadbeef".into(),
            target_size: 256,
        });
        assert!(should_skip(&record, "deadbeef", 256));
        assert!(!should_skip(&record, "deadbeef", 128));
        assert!(!should_skip(&record, "cafebabe", 256));
        assert!(!should_skip(&None, "deadbeef", 256));
    }
}
