//! Stage-A aggregator (spec §4.2, component C2): folds every mesh's shapes
//! into a `PathKey -> max radius` map, keeping the max across every shape in
//! every mesh that references a given texture slot — directly mirroring
//! `processor.cpp`'s
//! `if (sphere.radius > sizes[texture].size) sizes[texture] = {radius, meshPath}`.

use std::collections::HashMap;

use crate::mesh::Mesh;
use crate::pathkey::PathKey;

/// The largest bounding-sphere radius seen referencing a given texture, plus
/// which mesh contributed it (spec §4.2: "retain ... the path of the mesh
/// that contributed it, for diagnostics").
#[derive(Debug, Clone, PartialEq)]
pub struct SizeRecord {
    pub radius: f32,
    pub contributing_mesh: PathKey,
}

/// One worker's partial view (spec §5 "sharded per worker, merged by
/// taking the max per key across shards" — see spec §9 "Aggregation:
/// shard-per-worker, not a single locked map").
#[derive(Debug, Default)]
pub struct Shard {
    records: HashMap<PathKey, SizeRecord>,
}

impl Shard {
    pub fn new() -> Self {
        Shard::default()
    }

    /// Fold one parsed mesh's shapes into this shard.
    pub fn absorb(&mut self, mesh_path: &PathKey, mesh: &Mesh) {
        for shape in mesh.shapes() {
            let Some(shader) = mesh.shader_of(shape) else {
                continue;
            };
            let radius = shape.bounds().radius;
            for slot in 0..crate::mesh::MAX_TEXTURE_SLOTS {
                let texture = mesh.texture_slot(shader, slot);
                if texture.is_empty() {
                    continue;
                }
                let key = PathKey::new(texture);
                if !key.is_in_scope_texture() {
                    continue;
                }
                self.records
                    .entry(key)
                    .and_modify(|existing| {
                        if radius > existing.radius {
                            existing.radius = radius;
                            existing.contributing_mesh = mesh_path.clone();
                        }
                    })
                    .or_insert_with(|| SizeRecord {
                        radius,
                        contributing_mesh: mesh_path.clone(),
                    });
            }
        }
    }
}

/// The fully merged Stage-A result (spec §4.2 step "merge shards: per key,
/// keep the entry with the larger radius").
#[derive(Debug, Default)]
pub struct Aggregate {
    records: HashMap<PathKey, SizeRecord>,
}

impl Aggregate {
    pub fn get(&self, key: &PathKey) -> Option<&SizeRecord> {
        self.records.get(key)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&PathKey, &SizeRecord)> {
        self.records.iter()
    }

    /// Merge all per-worker shards (deterministic: order of shards does not
    /// affect the result because ties are broken by strict `>` comparison,
    /// so equal radii keep whichever shard inserted first — spec invariant 1
    /// "max-radius correctness" only constrains the winning radius, not which
    /// mesh is recorded when two contribute the identical maximum).
    pub fn merge(shards: Vec<Shard>) -> Aggregate {
        let mut records: HashMap<PathKey, SizeRecord> = HashMap::new();
        for shard in shards {
            for (key, record) in shard.records {
                records
                    .entry(key)
                    .and_modify(|existing| {
                        if record.radius > existing.radius {
                            *existing = record.clone();
                        }
                    })
                    .or_insert(record);
            }
        }
        Aggregate { records }
    }
}
