//! BTDX container layout: header, entry directory, and name table.

mod reader;
mod types;

pub use reader::BtdxReader;
pub use types::{
    ArchiveKind, Ba2Header, EntryInfo, ExtractPhase, ExtractProgress, HEADER_SIZE, KIND_GENERAL,
    KIND_TEXTURE, MAGIC, SUPPORTED_VERSIONS, TextureChunk, TextureFileEntry,
};
