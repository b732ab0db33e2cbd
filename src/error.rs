//! Error types for `ba2tex`

use std::path::PathBuf;

use thiserror::Error;

/// The error type for `ba2tex` operations.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum Error {
    // ==================== IO Errors ====================
    /// IO error from file operations.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // ==================== Container Errors ====================
    /// The file is not a valid BA2 archive (missing BTDX magic).
    #[error("invalid BA2 magic: expected BTDX, found {0:?}")]
    InvalidMagic([u8; 4]),

    /// The BA2 version is not supported.
    #[error("unsupported BA2 version: {version} (supported: 1, 7, 8)")]
    UnsupportedVersion {
        /// The version number found in the header.
        version: u32,
    },

    /// The archive kind tag is not a known BA2 kind.
    #[error("unknown BA2 archive kind tag: {tag:?}")]
    UnknownArchiveKind {
        /// The 4-byte kind tag found in the header.
        tag: [u8; 4],
    },

    /// The archive is a valid BA2 but does not hold textures.
    #[error("archive is a {kind} BA2, not a texture (DX10) archive")]
    NotATextureArchive {
        /// Human-readable name of the archive kind.
        kind: &'static str,
    },

    /// The archive ended before the declared entry count was satisfied.
    #[error("archive directory truncated at entry {index}")]
    TruncatedDirectory {
        /// Index of the entry being read when the stream ended.
        index: usize,
    },

    /// The archive ended before the declared name count was satisfied.
    #[error("archive name table truncated at entry {index}")]
    TruncatedNameTable {
        /// Index of the name being read when the stream ended.
        index: usize,
    },

    // ==================== Texture Format Errors ====================
    /// The entry's pixel-format code is not in the known format table.
    #[error("unsupported texture format code: {code}")]
    UnsupportedTextureFormat {
        /// The DXGI format code from the entry.
        code: u8,
    },

    // ==================== Extraction Errors ====================
    /// The requested file name was not found in the archive.
    #[error("file not found in archive: {0}")]
    FileNotFound(String),

    /// The requested entry index is out of range.
    #[error("entry index {index} out of range (archive holds {total} files)")]
    IndexOutOfRange {
        /// The requested index.
        index: usize,
        /// Number of entries in the archive.
        total: usize,
    },

    /// The destination path is empty or otherwise unusable.
    #[error("invalid destination: {0}")]
    InvalidDestination(String),

    /// The destination file exists and overwriting was not permitted.
    #[error("overwrite not permitted: {path}")]
    OverwriteDenied {
        /// The conflicting destination path.
        path: PathBuf,
    },

    // ==================== Decompression Errors ====================
    /// DEFLATE decompression of a texture chunk failed.
    #[error("chunk {chunk} decompression failed: {message}")]
    ChunkDecompressionFailed {
        /// Index of the chunk within its entry.
        chunk: usize,
        /// The decoder error message.
        message: String,
    },

    /// A chunk decompressed to fewer bytes than the directory declared.
    #[error("chunk {chunk} size mismatch: expected {expected} bytes, got {actual}")]
    ChunkSizeMismatch {
        /// Index of the chunk within its entry.
        chunk: usize,
        /// Unpacked length declared in the chunk record.
        expected: u32,
        /// Bytes actually produced by the decoder.
        actual: u32,
    },

    // ==================== Cancellation ====================
    /// The operation was cancelled through its cancellation token.
    ///
    /// Not a failure: files written before the cancellation check are
    /// kept on disk.
    #[error("extraction cancelled")]
    Cancelled,
}

/// A specialized Result type for `ba2tex` operations.
pub type Result<T> = std::result::Result<T, Error>;
