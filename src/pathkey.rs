use std::fmt;

/// Internal path identity used throughout the pipeline: ASCII-lowercased,
/// backslash-separated, matching game-archive path conventions (spec §3
/// "Path key"). Constructing one is the only place normalization happens, so
/// nothing downstream can accidentally compare an un-normalized path.
#[derive(Clone, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct PathKey(String);

impl PathKey {
    pub fn new(raw: impl AsRef<str>) -> Self {
        let mut s = raw.as_ref().replace('/', "\\");
        s.make_ascii_lowercase();
        PathKey(s)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn ends_with(&self, suffix: &str) -> bool {
        self.0.ends_with(suffix)
    }

    pub fn contains(&self, needle: &str) -> bool {
        self.0.contains(needle)
    }

    /// `.nif` path is in scope iff it ends with `.nif` and has no `\lod\` component.
    pub fn is_in_scope_mesh(&self) -> bool {
        self.ends_with(".nif") && !self.contains("\\lod\\")
    }

    /// Texture path is in scope for sizing iff it isn't an effects gradient or lod texture.
    pub fn is_in_scope_texture(&self) -> bool {
        !self.contains("textures\\effects\\gradients\\") && !self.contains("textures\\lod\\")
    }

    /// Normal maps get a quartered target size (spec §4.4 step 1).
    pub fn is_normal_map(&self) -> bool {
        self.ends_with("_n.dds")
    }
}

impl fmt::Debug for PathKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PathKey({:?})", self.0)
    }
}

impl fmt::Display for PathKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PathKey {
    fn from(s: &str) -> Self {
        PathKey::new(s)
    }
}

impl From<String> for PathKey {
    fn from(s: String) -> Self {
        PathKey::new(s)
    }
}
