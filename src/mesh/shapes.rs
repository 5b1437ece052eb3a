/// A bounding sphere as reported by the mesh parser (spec §6:
/// `shape.bounds() -> BoundingSphere { center, radius: f32 }`).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingSphere {
    pub center: [f32; 3],
    pub radius: f32,
}

/// One of up to 20 indexed texture references a shader holds (spec §3
/// "Texture slot").
#[derive(Debug, Clone, Default)]
pub struct Shader {
    pub(super) texture_slots: Vec<String>,
}

impl Shader {
    /// Read texture slot `index` (0..20); returns an empty string if unset,
    /// matching spec §6's `mesh.texture_slot(shader, index) -> String`.
    pub fn texture_slot(&self, index: usize) -> &str {
        self.texture_slots
            .get(index)
            .map(|s| s.as_str())
            .unwrap_or("")
    }
}

/// A single shape (sub-mesh) within a parsed mesh.
#[derive(Debug, Clone)]
pub struct Shape {
    bounds: BoundingSphere,
    shader_index: Option<usize>,
}

impl Shape {
    pub(super) fn new(bounds: BoundingSphere, shader_index: Option<usize>) -> Self {
        Shape {
            bounds,
            shader_index,
        }
    }

    pub fn bounds(&self) -> BoundingSphere {
        self.bounds
    }

    pub(super) fn shader_index(&self) -> Option<usize> {
        self.shader_index
    }
}
