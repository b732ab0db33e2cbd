//! DDS output container support.
//!
//! BA2 texture archives store raw mip data only; the DDS magic, header,
//! and pixel-format sub-structure are synthesized from each entry's
//! directory metadata when a texture is extracted. This module owns the
//! container constants, the 124-byte header model, and the synthesis
//! logic that maps a DXGI format code to the exact header bytes.

mod format;
mod header;

pub use format::{DxgiFormat, TILE_MODE_LINEAR};
pub use header::{DdsHeader, DdsPixelFormat};

/// DDS file magic, equal to `four_cc(b"DDS ")`.
pub const DDS_MAGIC: u32 = 0x20534444;

/// Size of the DDS header (everything after the magic).
pub const DDS_HEADER_SIZE: u32 = 124;

/// Size of the `DDS_PIXELFORMAT` sub-structure.
pub const DDS_PIXELFORMAT_SIZE: u32 = 32;

/// Total bytes preceding the texture payload: magic plus header.
pub const DDS_FILE_HEADER_SIZE: u32 = 4 + DDS_HEADER_SIZE;

/// Pixel format contains uncompressed RGB data.
pub const DDS_RGB: u32 = 0x00000040;

/// Pixel format contains uncompressed RGBA data.
pub const DDS_RGBA: u32 = 0x00000041;

/// Pixel format is identified by its `FourCC` code.
pub const DDS_FOURCC: u32 = 0x00000004;

/// Required header flags for any texture (caps, size, dims, pixel format).
pub const DDS_HEADER_FLAGS_TEXTURE: u32 = 0x00001007;

/// Header flag: the pitch field holds the linear size of the top mip.
pub const DDS_HEADER_FLAGS_LINEARSIZE: u32 = 0x00080000;

/// Header flag: the texture carries a mipmap count.
pub const DDS_HEADER_FLAGS_MIPMAP: u32 = 0x00020000;

/// Surface caps for a plain texture.
pub const DDS_SURFACE_FLAGS_TEXTURE: u32 = 0x00001000;

/// Surface caps for a mipmapped texture (complex + mipmap).
pub const DDS_SURFACE_FLAGS_MIPMAP: u32 = 0x00400008;

/// Cubemap capability bit (`DDSCAPS2`).
pub const DDS_CAPS2_CUBEMAP: u32 = 0x200;

/// All six cubemap face bits ORed together.
pub const DDS_CAPS2_CUBEMAP_ALLFACES: u32 = 0xFC00;

/// Build a `FourCC` code from a 4-byte ASCII tag.
#[must_use]
pub const fn four_cc(tag: &[u8; 4]) -> u32 {
    u32::from_le_bytes(*tag)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn magic_matches_dds_tag() {
        assert_eq!(four_cc(b"DDS "), DDS_MAGIC);
    }

    #[test]
    fn file_header_is_128_bytes() {
        assert_eq!(DDS_FILE_HEADER_SIZE, 128);
    }
}
