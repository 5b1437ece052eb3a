//! DDS/BC7 implementation of the texture codec collaborator, grounded on
//! `image_dds` (confirmed real, used by the pack's `xc3_lib`/`korangar`/
//! `siege-render` repos for the same DDS+BCn round trip) for the container
//! and block compression, and `image` for RGBA8 resizing.
//!
//! The original DirectXTex pipeline (`textures.cpp`) uses a Fant filter with
//! separate-alpha handling; `image` has no Fant filter, so resizing here uses
//! `FilterType::Triangle` instead (spec §9 "Open question — filter
//! substitution", resolved: accept the closest available filter and note the
//! approximation rather than hand-rolling Fant).

use std::path::Path;

use image::{imageops::FilterType, ImageBuffer, Rgba, RgbaImage};
use image_dds::{ddsfile::Dds, ImageFormat, Mipmaps, Quality as DdsQuality};

use super::Quality;
use crate::error::CodecError;

#[derive(Debug, Clone)]
pub struct DecodedTexture {
    pub image: RgbaImage,
}

impl DecodedTexture {
    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }
}

/// `1 + floor(log2(max(width, height)))`, matching `textures.cpp`'s
/// `calculateOptimalMipMapsNumber`.
pub fn optimal_mip_count(width: u32, height: u32) -> u32 {
    let largest = width.max(height).max(1);
    1 + (31 - largest.leading_zeros())
}

fn to_dds_quality(quality: Quality) -> DdsQuality {
    match quality {
        Quality::Fast => DdsQuality::Fast,
        Quality::High => DdsQuality::Slow,
    }
}

#[derive(Debug, Default)]
pub struct DdsCodec;

impl DdsCodec {
    pub fn new() -> Self {
        DdsCodec
    }
}

impl super::TextureCodec for DdsCodec {
    fn load_dds_bytes(&self, bytes: &[u8]) -> Result<DecodedTexture, CodecError> {
        let dds = Dds::read(bytes).map_err(|e| CodecError::Decode(e.to_string()))?;
        // Typeless formats are treated as their UNORM variant, matching
        // `textures.cpp`'s explicit typeless-to-UNORM override before decode.
        let image = image_dds::image_from_dds(&dds, 0).map_err(|e| CodecError::Decode(e.to_string()))?;
        Ok(DecodedTexture { image })
    }

    fn resize(&self, texture: &DecodedTexture, edge: u32) -> DecodedTexture {
        if texture.width() == edge && texture.height() == edge {
            return texture.clone();
        }
        let resized = image::imageops::resize(&texture.image, edge, edge, FilterType::Triangle);
        DecodedTexture { image: resized }
    }

    /// Only `mips.len()` ever reaches the saved artifact: `compress` hands
    /// `image_dds` the base level plus this count, and `image_dds` regenerates
    /// the whole chain itself via `Mipmaps::GeneratedExact` (there's no public
    /// entry point to hand it an already-downsampled chain instead). Actually
    /// resizing every level's pixels here would be thrown away before it ever
    /// reaches the encoder, so these placeholders carry the right per-level
    /// dimensions without paying for the downsample.
    fn generate_mipmaps(&self, texture: &DecodedTexture) -> Vec<DecodedTexture> {
        let count = optimal_mip_count(texture.width(), texture.height());
        let mut mips = Vec::with_capacity(count as usize);
        mips.push(texture.clone());
        let mut width = texture.width();
        let mut height = texture.height();
        for _ in 1..count {
            width = (width / 2).max(1);
            height = (height / 2).max(1);
            mips.push(DecodedTexture {
                image: ImageBuffer::new(width, height),
            });
        }
        mips
    }

    /// Encodes from `mips[0]` (the base level) and `mips.len()` (the mip
    /// count); `image_dds` regenerates the intermediate levels itself.
    fn compress(&self, mips: &[DecodedTexture], quality: Quality) -> Result<Vec<u8>, CodecError> {
        let base = mips
            .first()
            .ok_or_else(|| CodecError::Encode("no mip levels to compress".to_string()))?;

        let dds = image_dds::dds_from_image(
            &base.image,
            ImageFormat::BC7RgbaUnorm,
            to_dds_quality(quality),
            Mipmaps::GeneratedExact(mips.len() as u32),
        )
        .map_err(|e| CodecError::Encode(e.to_string()))?;

        let mut out = Vec::new();
        dds.write(&mut out)
            .map_err(|e| CodecError::Encode(e.to_string()))?;
        Ok(out)
    }

    fn save_dds(&self, dds_bytes: &[u8], path: &Path) -> Result<(), CodecError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, dds_bytes)?;
        Ok(())
    }
}

/// Minimal uniform-color RGBA8 buffer, used by tests that only need a
/// decodable, resizable image rather than a real compressed texture.
pub fn solid_rgba(width: u32, height: u32, rgba: [u8; 4]) -> RgbaImage {
    ImageBuffer::from_fn(width, height, |_, _| Rgba(rgba))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mip_count_matches_original_formula() {
        assert_eq!(optimal_mip_count(1, 1), 1);
        assert_eq!(optimal_mip_count(128, 128), 8);
        assert_eq!(optimal_mip_count(1024, 512), 11);
    }

    #[test]
    fn mip_chain_halves_until_one_by_one() {
        let codec = DdsCodec::new();
        let texture = DecodedTexture {
            image: solid_rgba(128, 128, [255, 0, 0, 255]),
        };
        let chain = super::super::TextureCodec::generate_mipmaps(&codec, &texture);
        assert_eq!(chain.len(), 8);
        assert_eq!(chain[0].width(), 128);
        assert_eq!(chain.last().unwrap().width(), 1);
        assert_eq!(chain.last().unwrap().height(), 1);
    }

    #[test]
    fn resize_is_a_no_op_at_identical_size() {
        let codec = DdsCodec::new();
        let texture = DecodedTexture {
            image: solid_rgba(64, 64, [0, 255, 0, 255]),
        };
        let resized = super::super::TextureCodec::resize(&codec, &texture, 64);
        assert_eq!(resized.width(), 64);
        assert_eq!(resized.height(), 64);
    }
}
