/// Streaming 256-bit content digest (spec §6 "Digest collaborator").
///
/// The original tool hashes with SHA-512/256; this pipeline substitutes
/// `blake3`, which the teacher (`Luka12-dev-AI-VISTA/rust_optimizer`) already
/// depends on for exactly this purpose — a fast, streaming, 256-bit digest.
/// Spec §3/§5 treat the digest as an interchangeable collaborator, so this is
/// a like-for-like swap (see DESIGN.md).
pub struct Digest(blake3::Hasher);

impl Digest {
    pub fn new() -> Self {
        Digest(blake3::Hasher::new())
    }

    pub fn update(&mut self, bytes: &[u8]) -> &mut Self {
        self.0.update(bytes);
        self
    }

    pub fn hex_digest(&self) -> String {
        self.0.finalize().to_hex().to_string()
    }
}

impl Default for Digest {
    fn default() -> Self {
        Self::new()
    }
}

/// Convenience one-shot digest of a full buffer.
pub fn hash_bytes(bytes: &[u8]) -> String {
    let mut d = Digest::new();
    d.update(bytes);
    d.hex_digest()
}
