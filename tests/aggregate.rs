//! Integration tests for the Stage-A aggregator (spec invariants 1, 2, 7),
//! driven through the public `mesh`/`aggregate` API rather than the crate's
//! own `#[cfg(test)]` helpers.

use skyrim_texopt::aggregate::{Aggregate, Shard};
use skyrim_texopt::mesh;
use skyrim_texopt::pathkey::PathKey;

/// Builds a synthetic single-shape mesh referencing one texture slot,
/// matching the wire format documented in `src/mesh/mod.rs`.
fn build_mesh_bytes(radius: f32, texture: Option<&str>) -> Vec<u8> {
    let mut out = Vec::new();
    out.extend_from_slice(b"MESH");
    out.extend_from_slice(&1u32.to_le_bytes()); // shape_count
    out.extend_from_slice(&0f32.to_le_bytes());
    out.extend_from_slice(&0f32.to_le_bytes());
    out.extend_from_slice(&0f32.to_le_bytes());
    out.extend_from_slice(&radius.to_le_bytes());
    let shader_index: i32 = if texture.is_some() { 0 } else { -1 };
    out.extend_from_slice(&shader_index.to_le_bytes());

    out.extend_from_slice(&1u32.to_le_bytes()); // shader_count
    let slot_count: u32 = if texture.is_some() { 1 } else { 0 };
    out.extend_from_slice(&slot_count.to_le_bytes());
    if let Some(tex) = texture {
        out.extend_from_slice(&(tex.len() as u32).to_le_bytes());
        out.extend_from_slice(tex.as_bytes());
    }
    out
}

/// Invariant 1: max-radius correctness across meshes contributing to the
/// same texture, mirroring spec §8 scenario E3 (two archives, later load
/// order wins the mesh map, but both contribute to the radius max).
#[test]
fn max_radius_correctness_across_multiple_meshes() {
    let mesh_a = mesh::load(&build_mesh_bytes(3.0, Some("textures\\t.dds"))).unwrap();
    let mesh_b = mesh::load(&build_mesh_bytes(9.0, Some("textures\\t.dds"))).unwrap();

    let mut shard = Shard::new();
    shard.absorb(&PathKey::new("meshes\\a.nif"), &mesh_a);
    shard.absorb(&PathKey::new("meshes\\b.nif"), &mesh_b);

    let aggregate = Aggregate::merge(vec![shard]);
    let record = aggregate.get(&PathKey::new("textures\\t.dds")).unwrap();
    assert_eq!(record.radius, 9.0);
    assert_eq!(record.contributing_mesh, PathKey::new("meshes\\b.nif"));
}

/// Invariant 2 (override precedence is exercised at the index layer in
/// `src/index.rs`'s own tests); here we check that Stage A is indifferent to
/// *which* mesh buffer it receives per key — it only cares about shapes.
#[test]
fn identical_path_key_different_payload_still_aggregates_correctly() {
    let mesh = mesh::load(&build_mesh_bytes(12.0, Some("textures\\armor\\steel.dds"))).unwrap();
    let mut shard = Shard::new();
    shard.absorb(&PathKey::new("meshes\\a.nif"), &mesh);
    let aggregate = Aggregate::merge(vec![shard]);
    assert_eq!(aggregate.len(), 1);
}

/// Invariant 7: filter safety — out-of-scope textures never enter the
/// aggregate regardless of how large a radius references them.
#[test]
fn filter_safety_excludes_gradients_and_lod_textures() {
    let mesh = mesh::load(&build_mesh_bytes(
        999.0,
        Some("textures\\effects\\gradients\\fade.dds"),
    ))
    .unwrap();
    let mut shard = Shard::new();
    shard.absorb(&PathKey::new("meshes\\a.nif"), &mesh);
    let aggregate = Aggregate::merge(vec![shard]);
    assert!(aggregate.is_empty());
}

/// A mesh with no texture slot set at all contributes nothing.
#[test]
fn mesh_with_no_texture_reference_contributes_nothing() {
    let mesh = mesh::load(&build_mesh_bytes(5.0, None)).unwrap();
    let mut shard = Shard::new();
    shard.absorb(&PathKey::new("meshes\\a.nif"), &mesh);
    let aggregate = Aggregate::merge(vec![shard]);
    assert!(aggregate.is_empty());
}
