//! SPDX-FileCopyrightText: 2025 CyberDeco
//!
//! SPDX-License-Identifier: MIT
//!
//! BTDX directory reader: header, entry table, and name table.

use std::io::{BufReader, Read, Seek, SeekFrom};

use byteorder::{LittleEndian, ReadBytesExt};

use super::{
    ArchiveKind, Ba2Header, HEADER_SIZE, MAGIC, SUPPORTED_VERSIONS, TextureChunk,
    TextureFileEntry,
};
use crate::error::{Error, Result};

/// BTDX container reader.
///
/// Parses the fixed header, then the entry directory (one fixed record
/// plus its chunk table per file), then the name table. Parsing only
/// populates the in-memory model; nothing is written anywhere.
pub struct BtdxReader<R: Read + Seek> {
    reader: BufReader<R>,
    header: Option<Ba2Header>,
    entries: Vec<TextureFileEntry>,
    names: Vec<String>,
}

impl<R: Read + Seek> BtdxReader<R> {
    /// Create a new reader from a Read + Seek source.
    pub fn new(reader: R) -> Self {
        Self {
            reader: BufReader::new(reader),
            header: None,
            entries: Vec::new(),
            names: Vec::new(),
        }
    }

    /// Read and parse the archive header.
    ///
    /// # Errors
    /// Returns an error if reading fails, the magic or kind tag is
    /// unknown, or the version is unsupported.
    pub fn read_header(&mut self) -> Result<&Ba2Header> {
        self.reader.seek(SeekFrom::Start(0))?;

        let mut magic = [0u8; 4];
        self.reader.read_exact(&mut magic)?;
        if magic != MAGIC {
            return Err(Error::InvalidMagic(magic));
        }

        let version = self.reader.read_u32::<LittleEndian>()?;
        if !SUPPORTED_VERSIONS.contains(&version) {
            return Err(Error::UnsupportedVersion { version });
        }

        let mut tag = [0u8; 4];
        self.reader.read_exact(&mut tag)?;
        let kind = ArchiveKind::from_tag(tag).ok_or(Error::UnknownArchiveKind { tag })?;

        let file_count = self.reader.read_u32::<LittleEndian>()?;
        let name_table_offset = self.reader.read_u64::<LittleEndian>()?;

        tracing::debug!(version, ?kind, file_count, "parsed BA2 header");

        self.header = Some(Ba2Header {
            magic,
            version,
            kind,
            file_count,
            name_table_offset,
        });

        Ok(self.header.as_ref().unwrap())
    }

    /// Read the entry directory.
    ///
    /// Produces exactly `file_count` entries in archive order, each
    /// with its full chunk table.
    ///
    /// # Errors
    /// Returns [`Error::NotATextureArchive`] for non-`DX10` archives and
    /// [`Error::TruncatedDirectory`] if the stream ends before the
    /// declared counts are satisfied.
    pub fn read_directory(&mut self) -> Result<&[TextureFileEntry]> {
        if self.header.is_none() {
            self.read_header()?;
        }
        let header = self.header.as_ref().unwrap();

        if header.kind != ArchiveKind::Texture {
            return Err(Error::NotATextureArchive {
                kind: header.kind.as_str(),
            });
        }

        let file_count = header.file_count as usize;
        self.reader.seek(SeekFrom::Start(HEADER_SIZE))?;

        self.entries.clear();
        self.entries.reserve(file_count);

        for index in 0..file_count {
            let entry = read_entry(&mut self.reader, index)
                .map_err(|e| truncated_at(e, index, true))?;
            self.entries.push(entry);
        }

        tracing::debug!(entries = self.entries.len(), "parsed texture directory");

        Ok(&self.entries)
    }

    /// Read the name table.
    ///
    /// Names are stored in archive order, so the entry index is also
    /// the name index.
    ///
    /// # Errors
    /// Returns [`Error::TruncatedNameTable`] if the stream ends before
    /// `file_count` names have been read.
    pub fn read_names(&mut self) -> Result<&[String]> {
        if self.header.is_none() {
            self.read_header()?;
        }
        let header = self.header.as_ref().unwrap();
        let file_count = header.file_count as usize;

        self.reader.seek(SeekFrom::Start(header.name_table_offset))?;

        self.names.clear();
        self.names.reserve(file_count);

        for index in 0..file_count {
            let name =
                read_name(&mut self.reader).map_err(|e| truncated_at(e, index, false))?;
            self.names.push(name);
        }

        Ok(&self.names)
    }

    /// Consume the reader and return the underlying stream.
    pub fn into_stream(self) -> BufReader<R> {
        self.reader
    }
}

/// Map an unexpected end of stream to the structural error for the
/// record being read; other IO errors pass through.
fn truncated_at(err: std::io::Error, index: usize, directory: bool) -> Error {
    if err.kind() == std::io::ErrorKind::UnexpectedEof {
        if directory {
            Error::TruncatedDirectory { index }
        } else {
            Error::TruncatedNameTable { index }
        }
    } else {
        Error::Io(err)
    }
}

/// Read one fixed entry record and its chunk table.
fn read_entry<R: Read>(reader: &mut R, index: usize) -> std::io::Result<TextureFileEntry> {
    let name_hash = reader.read_u32::<LittleEndian>()?;
    let mut extension = [0u8; 4];
    reader.read_exact(&mut extension)?;
    let dir_hash = reader.read_u32::<LittleEndian>()?;
    let reserved = reader.read_u8()?;
    let chunk_count = reader.read_u8()?;
    let chunk_header_size = reader.read_u16::<LittleEndian>()?;
    let height = reader.read_u16::<LittleEndian>()?;
    let width = reader.read_u16::<LittleEndian>()?;
    let mipmap_count = reader.read_u8()?;
    let format = reader.read_u8()?;
    let cubemap_flag = reader.read_u8()?;
    let tile_mode = reader.read_u8()?;

    let mut chunks = Vec::with_capacity(chunk_count as usize);
    for _ in 0..chunk_count {
        chunks.push(read_chunk(reader)?);
    }

    Ok(TextureFileEntry {
        index,
        name_hash,
        extension,
        dir_hash,
        reserved,
        chunk_header_size,
        height,
        width,
        mipmap_count,
        format,
        cubemap_flag,
        tile_mode,
        chunks,
    })
}

/// Read one fixed chunk record.
fn read_chunk<R: Read>(reader: &mut R) -> std::io::Result<TextureChunk> {
    Ok(TextureChunk {
        offset: reader.read_u64::<LittleEndian>()?,
        packed_length: reader.read_u32::<LittleEndian>()?,
        unpacked_length: reader.read_u32::<LittleEndian>()?,
        start_mip: reader.read_u16::<LittleEndian>()?,
        end_mip: reader.read_u16::<LittleEndian>()?,
        reserved: reader.read_u32::<LittleEndian>()?,
    })
}

/// Read one length-prefixed name table string.
fn read_name<R: Read>(reader: &mut R) -> std::io::Result<String> {
    let length = reader.read_u16::<LittleEndian>()?;
    let mut bytes = vec![0u8; length as usize];
    reader.read_exact(&mut bytes)?;
    // Lossy conversion: archive paths are ASCII in practice
    Ok(String::from_utf8_lossy(&bytes).to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use byteorder::WriteBytesExt;
    use std::io::{Cursor, Write};

    /// Serialize a minimal texture archive directory for parser tests.
    fn directory_bytes(entry_count: u32) -> Vec<u8> {
        let mut bytes = Vec::new();
        bytes.write_all(&MAGIC).unwrap();
        bytes.write_u32::<LittleEndian>(1).unwrap();
        bytes.write_all(b"DX10").unwrap();
        bytes.write_u32::<LittleEndian>(entry_count).unwrap();
        let name_offset_pos = bytes.len();
        bytes.write_u64::<LittleEndian>(0).unwrap();

        for i in 0..entry_count {
            bytes.write_u32::<LittleEndian>(0xAABB_0000 + i).unwrap();
            bytes.write_all(b"dds\0").unwrap();
            bytes.write_u32::<LittleEndian>(0xCCDD_0000 + i).unwrap();
            bytes.write_u8(0).unwrap();
            bytes.write_u8(1).unwrap(); // one chunk
            bytes.write_u16::<LittleEndian>(24).unwrap();
            bytes.write_u16::<LittleEndian>(256).unwrap();
            bytes.write_u16::<LittleEndian>(512).unwrap();
            bytes.write_u8(9).unwrap();
            bytes.write_u8(71).unwrap();
            bytes.write_u8(0).unwrap();
            bytes.write_u8(0x8).unwrap();

            bytes.write_u64::<LittleEndian>(4096).unwrap();
            bytes.write_u32::<LittleEndian>(100).unwrap();
            bytes.write_u32::<LittleEndian>(32768).unwrap();
            bytes.write_u16::<LittleEndian>(0).unwrap();
            bytes.write_u16::<LittleEndian>(8).unwrap();
            bytes.write_u32::<LittleEndian>(0xBAAD_F00D).unwrap();
        }

        let name_offset = bytes.len() as u64;
        for i in 0..entry_count {
            let name = format!("textures\\test\\tex_{i}.dds");
            bytes.write_u16::<LittleEndian>(name.len() as u16).unwrap();
            bytes.write_all(name.as_bytes()).unwrap();
        }
        bytes[name_offset_pos..name_offset_pos + 8].copy_from_slice(&name_offset.to_le_bytes());

        bytes
    }

    #[test]
    fn parses_header_directory_and_names() {
        let mut reader = BtdxReader::new(Cursor::new(directory_bytes(3)));

        let header = reader.read_header().expect("header");
        assert_eq!(header.version, 1);
        assert_eq!(header.kind, ArchiveKind::Texture);
        assert_eq!(header.file_count, 3);

        let entries = reader.read_directory().expect("directory");
        assert_eq!(entries.len(), 3);
        for (i, entry) in entries.iter().enumerate() {
            assert_eq!(entry.index, i);
            assert_eq!(entry.width, 512);
            assert_eq!(entry.height, 256);
            assert_eq!(entry.chunks.len(), 1);
            assert_eq!(entry.chunks[0].unpacked_length, 32768);
            assert_eq!(entry.chunks[0].end_mip, 8);
        }

        let names = reader.read_names().expect("names");
        assert_eq!(names.len(), 3);
        assert_eq!(names[1], "textures\\test\\tex_1.dds");
    }

    #[test]
    fn rejects_bad_magic() {
        let mut bytes = directory_bytes(1);
        bytes[0..4].copy_from_slice(b"LSPK");
        let mut reader = BtdxReader::new(Cursor::new(bytes));
        assert!(matches!(
            reader.read_header(),
            Err(Error::InvalidMagic(_))
        ));
    }

    #[test]
    fn rejects_unsupported_version() {
        let mut bytes = directory_bytes(1);
        bytes[4..8].copy_from_slice(&2u32.to_le_bytes());
        let mut reader = BtdxReader::new(Cursor::new(bytes));
        assert!(matches!(
            reader.read_header(),
            Err(Error::UnsupportedVersion { version: 2 })
        ));
    }

    #[test]
    fn refuses_general_archives() {
        let mut bytes = directory_bytes(1);
        bytes[8..12].copy_from_slice(b"GNRL");
        let mut reader = BtdxReader::new(Cursor::new(bytes));
        assert!(matches!(
            reader.read_directory(),
            Err(Error::NotATextureArchive { .. })
        ));
    }

    #[test]
    fn truncated_directory_reports_failing_entry() {
        let bytes = directory_bytes(2);
        // Cut the stream in the middle of the second entry
        let truncated = bytes[..HEADER_SIZE as usize + 48 + 30].to_vec();
        let mut reader = BtdxReader::new(Cursor::new(truncated));
        assert!(matches!(
            reader.read_directory(),
            Err(Error::TruncatedDirectory { index: 1 })
        ));
    }

    #[test]
    fn truncated_name_table_reports_failing_entry() {
        let bytes = directory_bytes(2);
        let truncated = bytes[..bytes.len() - 4].to_vec();
        let mut reader = BtdxReader::new(Cursor::new(truncated));
        reader.read_directory().expect("directory parses");
        assert!(matches!(
            reader.read_names(),
            Err(Error::TruncatedNameTable { index: 1 })
        ));
    }
}
