//! Types for the BTDX container layout
//!
//! SPDX-FileCopyrightText: 2025 CyberDeco
//!
//! SPDX-License-Identifier: MIT

use crate::dds::DDS_FILE_HEADER_SIZE;

/// Magic bytes at the start of every BA2 archive.
pub const MAGIC: [u8; 4] = *b"BTDX";

/// Size of the fixed archive header; the entry directory starts here.
pub const HEADER_SIZE: u64 = 24;

/// Kind tag for general-purpose archives.
pub const KIND_GENERAL: [u8; 4] = *b"GNRL";

/// Kind tag for texture archives.
pub const KIND_TEXTURE: [u8; 4] = *b"DX10";

/// Archive versions with the directory layout this crate understands.
pub const SUPPORTED_VERSIONS: [u32; 3] = [1, 7, 8];

/// The kind of payload a BA2 archive holds.
///
/// Only [`ArchiveKind::Texture`] archives can be extracted here;
/// general archives use a different entry layout and are refused
/// explicitly at load time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArchiveKind {
    /// General-purpose file archive (`GNRL`).
    General,
    /// Texture archive with chunked DDS payloads (`DX10`).
    Texture,
}

impl ArchiveKind {
    /// Parse the kind from the header's 4-byte tag.
    #[must_use]
    pub fn from_tag(tag: [u8; 4]) -> Option<Self> {
        match tag {
            KIND_GENERAL => Some(ArchiveKind::General),
            KIND_TEXTURE => Some(ArchiveKind::Texture),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            ArchiveKind::General => "general (GNRL)",
            ArchiveKind::Texture => "texture (DX10)",
        }
    }
}

/// Header of a BA2 archive.
#[derive(Debug, Clone, Copy)]
pub struct Ba2Header {
    /// Magic bytes (validated during parsing, retained for completeness).
    pub magic: [u8; 4],
    /// Version number.
    pub version: u32,
    /// Payload kind.
    pub kind: ArchiveKind,
    /// Number of files in the archive.
    pub file_count: u32,
    /// Absolute offset of the name table.
    pub name_table_offset: u64,
}

/// Directory record for one packed texture.
///
/// Entries are index-stable: `entry.index` equals the entry's position
/// in the archive directory, which is also its index in the name table.
#[derive(Debug, Clone)]
pub struct TextureFileEntry {
    /// 0-based position in the archive directory.
    pub index: usize,
    /// Hash of the file name (preserved, not interpreted).
    pub name_hash: u32,
    /// Extension tag, e.g. `b"dds\0"`.
    pub extension: [u8; 4],
    /// Hash of the directory path (preserved, not interpreted).
    pub dir_hash: u32,
    /// Reserved byte (preserved, not interpreted).
    pub reserved: u8,
    /// Declared size of each chunk header record.
    pub chunk_header_size: u16,
    /// Texture height in pixels.
    pub height: u16,
    /// Texture width in pixels.
    pub width: u16,
    /// Number of mip levels.
    pub mipmap_count: u8,
    /// DXGI pixel-format code.
    pub format: u8,
    /// Non-zero when the texture is a cubemap.
    pub cubemap_flag: u8,
    /// Tile mode byte; `0x8` is the default linear layout.
    pub tile_mode: u8,
    /// Compressed chunks in mip order: chunk 0 covers the top mips.
    pub chunks: Vec<TextureChunk>,
}

impl TextureFileEntry {
    /// The extension tag as a trimmed string.
    #[must_use]
    pub fn extension_str(&self) -> String {
        String::from_utf8_lossy(&self.extension)
            .trim_end_matches('\0')
            .to_string()
    }

    /// Whether the cubemap flag is set.
    #[must_use]
    pub fn is_cubemap(&self) -> bool {
        self.cubemap_flag != 0
    }

    /// Total bytes the extracted file will hold: the DDS file header
    /// plus every chunk's unpacked length.
    #[must_use]
    pub fn total_size(&self) -> u64 {
        u64::from(DDS_FILE_HEADER_SIZE)
            + self
                .chunks
                .iter()
                .map(|c| u64::from(c.unpacked_length))
                .sum::<u64>()
    }

    /// Build the listing record for this entry.
    #[must_use]
    pub fn info(&self, path: impl Into<String>) -> EntryInfo {
        EntryInfo {
            index: self.index,
            path: path.into(),
            extension: self.extension_str(),
            width: self.width,
            height: self.height,
            mipmap_count: self.mipmap_count,
            format: self.format,
            is_cubemap: self.is_cubemap(),
            size: self.total_size(),
        }
    }
}

/// One independently compressed slice of a texture's mip chain.
#[derive(Debug, Clone, Copy)]
pub struct TextureChunk {
    /// Absolute offset of the compressed payload in the archive.
    pub offset: u64,
    /// Compressed length in bytes, including the 2-byte stream header.
    pub packed_length: u32,
    /// Exact decompressed length in bytes.
    pub unpacked_length: u32,
    /// First mip level covered by this chunk.
    pub start_mip: u16,
    /// Last mip level covered by this chunk.
    pub end_mip: u16,
    /// Reserved field (preserved, not interpreted).
    pub reserved: u32,
}

/// Listing record for one archive entry.
#[derive(Debug, Clone)]
pub struct EntryInfo {
    /// 0-based entry index.
    pub index: usize,
    /// Path of the file within the archive.
    pub path: String,
    /// Extension tag, trimmed.
    pub extension: String,
    /// Texture width in pixels.
    pub width: u16,
    /// Texture height in pixels.
    pub height: u16,
    /// Number of mip levels.
    pub mipmap_count: u8,
    /// DXGI pixel-format code.
    pub format: u8,
    /// Whether the texture is a cubemap.
    pub is_cubemap: bool,
    /// Size of the extracted file in bytes.
    pub size: u64,
}

/// Progress information during extraction.
#[derive(Debug, Clone)]
pub struct ExtractProgress {
    /// Current operation phase.
    pub phase: ExtractPhase,
    /// Number of files finished so far.
    pub current: usize,
    /// Total number of files in this operation.
    pub total: usize,
    /// File most recently written (if applicable).
    pub current_file: Option<String>,
}

impl ExtractProgress {
    /// Create a new progress update.
    #[must_use]
    pub fn new(phase: ExtractPhase, current: usize, total: usize) -> Self {
        Self {
            phase,
            current,
            total,
            current_file: None,
        }
    }

    /// Create a progress update with a file name.
    #[must_use]
    pub fn with_file(
        phase: ExtractPhase,
        current: usize,
        total: usize,
        file: impl Into<String>,
    ) -> Self {
        Self {
            phase,
            current,
            total,
            current_file: Some(file.into()),
        }
    }

    /// Get the progress percentage (0.0 - 1.0).
    #[must_use]
    pub fn percentage(&self) -> f32 {
        if self.total == 0 {
            1.0
        } else {
            self.current as f32 / self.total as f32
        }
    }
}

/// Phase of an extraction operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtractPhase {
    /// Decompressing and writing textures.
    Extracting,
    /// Operation complete.
    Complete,
}

impl ExtractPhase {
    /// Get a human-readable description of this phase.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Extracting => "Extracting textures",
            Self::Complete => "Complete",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry_with_chunks(unpacked: &[u32]) -> TextureFileEntry {
        TextureFileEntry {
            index: 0,
            name_hash: 0,
            extension: *b"dds\0",
            dir_hash: 0,
            reserved: 0,
            chunk_header_size: 24,
            height: 64,
            width: 64,
            mipmap_count: 7,
            format: 71,
            cubemap_flag: 0,
            tile_mode: 0x8,
            chunks: unpacked
                .iter()
                .map(|&unpacked_length| TextureChunk {
                    offset: 0,
                    packed_length: 0,
                    unpacked_length,
                    start_mip: 0,
                    end_mip: 0,
                    reserved: 0,
                })
                .collect(),
        }
    }

    #[test]
    fn total_size_counts_header_and_chunks() {
        let entry = entry_with_chunks(&[2048, 512, 16]);
        assert_eq!(entry.total_size(), 128 + 2048 + 512 + 16);
    }

    #[test]
    fn extension_trims_padding() {
        let entry = entry_with_chunks(&[]);
        assert_eq!(entry.extension_str(), "dds");
    }

    #[test]
    fn kind_tags() {
        assert_eq!(ArchiveKind::from_tag(*b"GNRL"), Some(ArchiveKind::General));
        assert_eq!(ArchiveKind::from_tag(*b"DX10"), Some(ArchiveKind::Texture));
        assert_eq!(ArchiveKind::from_tag(*b"XXXX"), None);
    }
}
