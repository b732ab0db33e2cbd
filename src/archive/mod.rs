//! BA2 texture archive operations module

pub mod btdx;
mod cancel;
mod decompression;
mod extraction_options;
mod texture;

// Primary public API
pub use cancel::CancelToken;
pub use extraction_options::ExtractionOptions;
pub use texture::{ProgressCallback, TextureArchive};

// Re-export container types for convenience
pub use btdx::{
    ArchiveKind, Ba2Header, EntryInfo, ExtractPhase, ExtractProgress, TextureChunk,
    TextureFileEntry,
};
