//! # ba2tex
//!
//! A pure-Rust library for Bethesda BA2 texture archives (`BTDX`/`DX10`).
//!
//! Texture archives store each texture pre-split into mipmap chunks,
//! each independently DEFLATE-compressed, with no DDS header on disk.
//! This crate parses the archive directory, decompresses the chunks,
//! and reassembles standalone `.dds` files with a correctly
//! synthesized header for every supported pixel format.
//!
//! ## Quick Start
//!
//! ```no_run
//! use ba2tex::archive::{ExtractionOptions, TextureArchive};
//!
//! // Open an archive and list its contents
//! let archive = TextureArchive::open("Fallout4 - Textures1.ba2")?;
//! println!("{} textures", archive.file_count());
//!
//! // Extract everything
//! archive.extract_all("output/", &ExtractionOptions::new())?;
//!
//! // Extract a single texture into memory
//! let mut dds = Vec::new();
//! archive.extract_to_stream_by_name("textures\\test\\tex.dds", &mut dds)?;
//! # Ok::<(), ba2tex::Error>(())
//! ```
//!
//! ## Progress and cancellation
//!
//! Batch extraction reports progress roughly every 1% of the batch and
//! checks a [`CancelToken`](archive::CancelToken) at the same
//! boundaries:
//!
//! ```no_run
//! use ba2tex::archive::{CancelToken, ExtractionOptions, TextureArchive};
//!
//! let archive = TextureArchive::open("Fallout4 - Textures1.ba2")?;
//! let cancel = CancelToken::new();
//! let progress = |p: &ba2tex::archive::ExtractProgress| {
//!     println!("{}/{}", p.current, p.total);
//! };
//! archive.extract_all_with_progress(
//!     "output/",
//!     &ExtractionOptions::new().with_multithreaded(true),
//!     Some(&progress),
//!     Some(&cancel),
//! )?;
//! # Ok::<(), ba2tex::Error>(())
//! ```
//!
//! ## Feature Flags
//!
//! - `cli` - Enables the `ba2tex` command-line binary

pub mod archive;
pub mod dds;
pub mod error;

// Re-exports for convenience
pub use error::{Error, Result};

/// Prelude module for common imports
pub mod prelude {
    pub use crate::archive::{
        ArchiveKind, CancelToken, EntryInfo, ExtractPhase, ExtractProgress, ExtractionOptions,
        TextureArchive, TextureChunk, TextureFileEntry,
    };
    pub use crate::dds::{DdsHeader, DdsPixelFormat, DxgiFormat};
    pub use crate::error::{Error, Result};
}

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// CLI module (feature-gated)
#[cfg(feature = "cli")]
pub mod cli;
