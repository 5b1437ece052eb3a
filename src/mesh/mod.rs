//! Mesh parser collaborator (spec §6). Stands in for the real NIF scene-graph
//! format (out of scope per spec §1); implements the documented contract
//! (`load`, `shapes`, `shader_of`, `texture_slot`, bounding sphere) over a
//! small chunked binary layout, parsed with `binrw` — the same crate the
//! pack's `xc3_lib`/`dbpf` repos use for fixed-layout game binary formats.
//!
//! Wire layout (little-endian):
//! ```text
//! magic: [u8; 4] = b"MESH"
//! shape_count: u32
//! shapes[shape_count]: { center: [f32;3], radius: f32, shader_index: i32 }  (-1 = none)
//! shader_count: u32
//! shaders[shader_count]: {
//!     slot_count: u32 (<= MAX_TEXTURE_SLOTS)
//!     slots[slot_count]: { len: u32, bytes: [u8; len] (utf8) }
//! }
//! ```

pub mod shapes;

use std::io::{Cursor, Read};

use binrw::BinReaderExt;

pub use shapes::{BoundingSphere, Shader, Shape};

use crate::error::MeshError;

const MAGIC: &[u8; 4] = b"MESH";
/// Texture slots are indexed 0..20 (spec §3 "Texture slot", §4.2 "for texture
/// slots 0..19").
pub const MAX_TEXTURE_SLOTS: usize = 20;

#[derive(Debug, Clone)]
pub struct Mesh {
    shapes: Vec<Shape>,
    shaders: Vec<Shader>,
}

impl Mesh {
    pub fn shapes(&self) -> impl Iterator<Item = &Shape> {
        self.shapes.iter()
    }

    pub fn shader_of(&self, shape: &Shape) -> Option<&Shader> {
        shape.shader_index().and_then(|i| self.shaders.get(i))
    }

    pub fn texture_slot(&self, shader: &Shader, index: usize) -> &str {
        shader.texture_slot(index)
    }
}

/// Parse mesh bytes (spec §6 `load(bytes) -> Mesh | ErrorCode`). A mesh whose
/// parser rejects the bytes is the caller's job to log-and-skip (spec §4.2
/// "Error semantics") — this function just reports why.
pub fn load(bytes: &[u8]) -> Result<Mesh, MeshError> {
    if bytes.len() < 8 {
        return Err(MeshError::Truncated {
            expected: 8,
            got: bytes.len(),
        });
    }

    let mut cursor = Cursor::new(bytes);
    let mut magic = [0u8; 4];
    cursor
        .read_exact(&mut magic)
        .map_err(|_| MeshError::Truncated {
            expected: 8,
            got: bytes.len(),
        })?;
    if &magic != MAGIC {
        return Err(MeshError::BadSignature);
    }

    let shape_count: u32 = cursor.read_le()?;
    let mut raw_shapes: Vec<(BoundingSphere, i32)> = Vec::with_capacity(shape_count as usize);
    for _ in 0..shape_count {
        let cx: f32 = cursor.read_le()?;
        let cy: f32 = cursor.read_le()?;
        let cz: f32 = cursor.read_le()?;
        let radius: f32 = cursor.read_le()?;
        let shader_index: i32 = cursor.read_le()?;
        raw_shapes.push((
            BoundingSphere {
                center: [cx, cy, cz],
                radius,
            },
            shader_index,
        ));
    }

    let shader_count: u32 = cursor.read_le()?;
    let mut shaders = Vec::with_capacity(shader_count as usize);
    for _ in 0..shader_count {
        let slot_count: u32 = cursor.read_le()?;
        if slot_count as usize > MAX_TEXTURE_SLOTS {
            return Err(MeshError::Malformed(format!(
                "shader declares {slot_count} texture slots, max is {MAX_TEXTURE_SLOTS}"
            )));
        }
        let mut slots = Vec::with_capacity(slot_count as usize);
        for _ in 0..slot_count {
            let len: u32 = cursor.read_le()?;
            let mut buf = vec![0u8; len as usize];
            cursor
                .read_exact(&mut buf)
                .map_err(|e| MeshError::Malformed(e.to_string()))?;
            slots.push(String::from_utf8_lossy(&buf).into_owned());
        }
        shaders.push(Shader {
            texture_slots: slots,
        });
    }

    let shapes = raw_shapes
        .into_iter()
        .map(|(bounds, shader_index)| {
            let idx = (shader_index >= 0).then_some(shader_index as usize);
            Shape::new(bounds, idx)
        })
        .collect();

    Ok(Mesh { shapes, shaders })
}
