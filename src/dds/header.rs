//! DDS header synthesis.
//!
//! SPDX-FileCopyrightText: 2025 CyberDeco
//!
//! SPDX-License-Identifier: MIT

use byteorder::{LittleEndian, WriteBytesExt};
use std::io::Write;

use super::format::{DxgiFormat, TILE_MODE_LINEAR};
use super::{
    DDS_CAPS2_CUBEMAP, DDS_CAPS2_CUBEMAP_ALLFACES, DDS_FOURCC, DDS_HEADER_FLAGS_LINEARSIZE,
    DDS_HEADER_FLAGS_MIPMAP, DDS_HEADER_FLAGS_TEXTURE, DDS_HEADER_SIZE, DDS_MAGIC,
    DDS_PIXELFORMAT_SIZE, DDS_RGB, DDS_RGBA, DDS_SURFACE_FLAGS_MIPMAP, DDS_SURFACE_FLAGS_TEXTURE,
    four_cc,
};

/// The `DDS_PIXELFORMAT` sub-structure (32 bytes on disk).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DdsPixelFormat {
    pub size: u32,
    pub flags: u32,
    pub four_cc: u32,
    pub rgb_bit_count: u32,
    pub r_bit_mask: u32,
    pub g_bit_mask: u32,
    pub b_bit_mask: u32,
    pub a_bit_mask: u32,
}

/// The DDS header (124 bytes on disk, preceded by the 4-byte magic).
///
/// Reserved words are always written as zero and are not modeled.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DdsHeader {
    pub size: u32,
    pub flags: u32,
    pub height: u32,
    pub width: u32,
    pub pitch_or_linear_size: u32,
    pub depth: u32,
    pub mipmap_count: u32,
    pub pixel_format: DdsPixelFormat,
    pub surface_flags: u32,
    pub cubemap_flags: u32,
}

impl DdsHeader {
    /// Synthesize the header for one archived texture.
    ///
    /// Pure: the same inputs always produce the same header. The pitch
    /// field holds the linear size of the top mip level, computed from
    /// the format's bits per pixel.
    #[must_use]
    pub fn for_texture(
        format: DxgiFormat,
        width: u16,
        height: u16,
        mipmap_count: u8,
        is_cubemap: bool,
        tile_mode: u8,
    ) -> Self {
        let w = u32::from(width);
        let h = u32::from(height);

        let mut header = Self {
            size: DDS_HEADER_SIZE,
            flags: DDS_HEADER_FLAGS_TEXTURE | DDS_HEADER_FLAGS_LINEARSIZE | DDS_HEADER_FLAGS_MIPMAP,
            height: h,
            width: w,
            pitch_or_linear_size: 0,
            depth: 0,
            mipmap_count: u32::from(mipmap_count),
            pixel_format: DdsPixelFormat {
                size: DDS_PIXELFORMAT_SIZE,
                ..DdsPixelFormat::default()
            },
            surface_flags: DDS_SURFACE_FLAGS_TEXTURE | DDS_SURFACE_FLAGS_MIPMAP,
            cubemap_flags: if is_cubemap {
                DDS_CAPS2_CUBEMAP | DDS_CAPS2_CUBEMAP_ALLFACES
            } else {
                0
            },
        };

        match format {
            DxgiFormat::Bc1Unorm => {
                header.pixel_format.flags = DDS_FOURCC;
                header.pixel_format.four_cc = four_cc(b"DXT1");
                header.pitch_or_linear_size = w * h / 2; // 4bpp
            }
            DxgiFormat::Bc2Unorm => {
                header.pixel_format.flags = DDS_FOURCC;
                header.pixel_format.four_cc = four_cc(b"DXT3");
                header.pitch_or_linear_size = w * h; // 8bpp
            }
            DxgiFormat::Bc3Unorm => {
                header.pixel_format.flags = DDS_FOURCC;
                header.pixel_format.four_cc = four_cc(b"DXT5");
                header.pitch_or_linear_size = w * h; // 8bpp
            }
            DxgiFormat::Bc5Unorm => {
                header.pixel_format.flags = DDS_FOURCC;
                // Legacy tag: shipped archives mark BC5 as DXT5, not ATI2
                header.pixel_format.four_cc = four_cc(b"DXT5");
                header.pitch_or_linear_size = w * h; // 8bpp
            }
            DxgiFormat::Bc1UnormSrgb => {
                header.pixel_format.flags = DDS_FOURCC;
                header.pixel_format.four_cc = four_cc(b"DX10");
                header.pitch_or_linear_size = w * h / 2; // 4bpp
            }
            DxgiFormat::Bc3UnormSrgb
            | DxgiFormat::Bc4Unorm
            | DxgiFormat::Bc5Snorm
            | DxgiFormat::Bc6hUf16
            | DxgiFormat::Bc7Unorm
            | DxgiFormat::Bc7UnormSrgb => {
                header.pixel_format.flags = DDS_FOURCC;
                header.pixel_format.four_cc = four_cc(b"BC7\0");
                header.pitch_or_linear_size = w * h; // 8bpp
            }
            DxgiFormat::R8G8B8A8Unorm | DxgiFormat::R8G8B8A8UnormSrgb => {
                header.pixel_format.flags = DDS_RGBA;
                header.pixel_format.rgb_bit_count = 32;
                header.pixel_format.r_bit_mask = 0x000000FF;
                header.pixel_format.g_bit_mask = 0x0000FF00;
                header.pixel_format.b_bit_mask = 0x00FF0000;
                header.pixel_format.a_bit_mask = 0xFF000000;
                header.pitch_or_linear_size = w * h * 4; // 32bpp
            }
            DxgiFormat::B5G6R5Unorm => {
                header.pixel_format.flags = DDS_RGB;
                header.pixel_format.rgb_bit_count = 16;
                header.pixel_format.r_bit_mask = 0x0000F800;
                header.pixel_format.g_bit_mask = 0x000007E0;
                header.pixel_format.b_bit_mask = 0x0000001F;
                header.pitch_or_linear_size = w * h * 2; // 16bpp
            }
            DxgiFormat::B8G8R8A8Unorm | DxgiFormat::B8G8R8X8Unorm => {
                header.pixel_format.flags = DDS_RGBA;
                header.pixel_format.rgb_bit_count = 32;
                header.pixel_format.r_bit_mask = 0x00FF0000;
                header.pixel_format.g_bit_mask = 0x0000FF00;
                header.pixel_format.b_bit_mask = 0x000000FF;
                header.pixel_format.a_bit_mask = 0xFF000000;
                header.pitch_or_linear_size = w * h * 4; // 32bpp
            }
            DxgiFormat::R8Unorm => {
                header.pixel_format.flags = DDS_RGB;
                header.pixel_format.rgb_bit_count = 8;
                header.pixel_format.r_bit_mask = 0xFF;
                header.pitch_or_linear_size = w * h; // 8bpp
            }
        }

        // Console-tiled block textures carry a marker tag instead of
        // their normal FourCC
        if tile_mode != TILE_MODE_LINEAR && format.is_block_compressed() {
            header.pixel_format.four_cc = four_cc(b"XBOX");
        }

        header
    }

    /// Write the 4-byte magic followed by the full 124-byte header.
    ///
    /// # Errors
    /// Returns an error if writing to the destination fails.
    pub fn write_to<W: Write>(&self, writer: &mut W) -> std::io::Result<()> {
        writer.write_u32::<LittleEndian>(DDS_MAGIC)?;
        writer.write_u32::<LittleEndian>(self.size)?;
        writer.write_u32::<LittleEndian>(self.flags)?;
        writer.write_u32::<LittleEndian>(self.height)?;
        writer.write_u32::<LittleEndian>(self.width)?;
        writer.write_u32::<LittleEndian>(self.pitch_or_linear_size)?;
        writer.write_u32::<LittleEndian>(self.depth)?;
        writer.write_u32::<LittleEndian>(self.mipmap_count)?;
        for _ in 0..11 {
            writer.write_u32::<LittleEndian>(0)?;
        }
        writer.write_u32::<LittleEndian>(self.pixel_format.size)?;
        writer.write_u32::<LittleEndian>(self.pixel_format.flags)?;
        writer.write_u32::<LittleEndian>(self.pixel_format.four_cc)?;
        writer.write_u32::<LittleEndian>(self.pixel_format.rgb_bit_count)?;
        writer.write_u32::<LittleEndian>(self.pixel_format.r_bit_mask)?;
        writer.write_u32::<LittleEndian>(self.pixel_format.g_bit_mask)?;
        writer.write_u32::<LittleEndian>(self.pixel_format.b_bit_mask)?;
        writer.write_u32::<LittleEndian>(self.pixel_format.a_bit_mask)?;
        writer.write_u32::<LittleEndian>(self.surface_flags)?;
        writer.write_u32::<LittleEndian>(self.cubemap_flags)?;
        for _ in 0..3 {
            writer.write_u32::<LittleEndian>(0)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dds::DDS_FILE_HEADER_SIZE;
    use pretty_assertions::assert_eq;

    fn header_bytes(header: &DdsHeader) -> Vec<u8> {
        let mut bytes = Vec::new();
        header.write_to(&mut bytes).expect("write to vec");
        bytes
    }

    #[test]
    fn written_header_is_always_128_bytes() {
        for code in [28u8, 61, 71, 77, 85, 88, 99] {
            let format = DxgiFormat::from_code(code).expect("known code");
            let header = DdsHeader::for_texture(format, 512, 256, 10, false, TILE_MODE_LINEAR);
            assert_eq!(header_bytes(&header).len(), DDS_FILE_HEADER_SIZE as usize);
        }
    }

    #[test]
    fn bc1_256x256_flat() {
        let header =
            DdsHeader::for_texture(DxgiFormat::Bc1Unorm, 256, 256, 9, false, TILE_MODE_LINEAR);

        assert_eq!(header.pitch_or_linear_size, 256 * 256 / 2);
        assert_eq!(header.pixel_format.four_cc, four_cc(b"DXT1"));
        assert_eq!(header.pixel_format.flags, DDS_FOURCC);
        assert_eq!(header.cubemap_flags, 0);
        assert_eq!(header.mipmap_count, 9);
    }

    #[test]
    fn rgba_64x64_cubemap() {
        let header = DdsHeader::for_texture(
            DxgiFormat::R8G8B8A8Unorm,
            64,
            64,
            1,
            true,
            TILE_MODE_LINEAR,
        );

        assert_eq!(header.pitch_or_linear_size, 64 * 64 * 4);
        assert_eq!(header.pixel_format.flags, DDS_RGBA);
        assert_eq!(header.pixel_format.r_bit_mask, 0x000000FF);
        assert_eq!(header.pixel_format.a_bit_mask, 0xFF000000);
        assert_eq!(
            header.cubemap_flags,
            DDS_CAPS2_CUBEMAP | DDS_CAPS2_CUBEMAP_ALLFACES
        );
    }

    #[test]
    fn bc5_keeps_legacy_dxt5_tag() {
        let header =
            DdsHeader::for_texture(DxgiFormat::Bc5Unorm, 128, 128, 8, false, TILE_MODE_LINEAR);
        assert_eq!(header.pixel_format.four_cc, four_cc(b"DXT5"));
    }

    #[test]
    fn tiled_block_formats_get_marker_tag() {
        let tiled = DdsHeader::for_texture(DxgiFormat::Bc3Unorm, 128, 128, 8, false, 0x2);
        assert_eq!(tiled.pixel_format.four_cc, four_cc(b"XBOX"));

        // Uncompressed formats keep their bitmask layout regardless of tile mode
        let uncompressed = DdsHeader::for_texture(DxgiFormat::R8G8B8A8Unorm, 128, 128, 8, false, 0x2);
        assert_eq!(uncompressed.pixel_format.four_cc, 0);
        assert_eq!(uncompressed.pixel_format.flags, DDS_RGBA);
    }

    #[test]
    fn synthesis_is_deterministic() {
        let a = DdsHeader::for_texture(DxgiFormat::Bc7Unorm, 1024, 512, 11, true, TILE_MODE_LINEAR);
        let b = DdsHeader::for_texture(DxgiFormat::Bc7Unorm, 1024, 512, 11, true, TILE_MODE_LINEAR);
        assert_eq!(a, b);
        assert_eq!(header_bytes(&a), header_bytes(&b));
    }

    #[test]
    fn r8_grey_uses_single_channel_mask() {
        let header =
            DdsHeader::for_texture(DxgiFormat::R8Unorm, 32, 32, 1, false, TILE_MODE_LINEAR);
        assert_eq!(header.pixel_format.flags, DDS_RGB);
        assert_eq!(header.pixel_format.rgb_bit_count, 8);
        assert_eq!(header.pixel_format.r_bit_mask, 0xFF);
        assert_eq!(header.pixel_format.g_bit_mask, 0);
        assert_eq!(header.pitch_or_linear_size, 32 * 32);
    }
}
