//! DEFLATE decompression of texture chunks.

use std::io::{Read, Seek, SeekFrom};

use flate2::read::DeflateDecoder;

use super::btdx::TextureChunk;
use crate::error::{Error, Result};

/// Every chunk payload starts with a 2-byte zlib stream header that
/// must be skipped, not fed to the raw-DEFLATE decoder.
const ZLIB_HEADER_SIZE: u64 = 2;

/// Decompress one chunk from the archive stream.
///
/// Seeks to the chunk's payload, skips the stream header, and inflates
/// exactly `unpacked_length` bytes. The directory-declared length is
/// authoritative: producing fewer bytes is a hard
/// [`Error::ChunkSizeMismatch`] rather than a silently short buffer.
///
/// The caller must hold exclusive access to the stream for the
/// duration of the call; seek and read are one stateful sequence.
pub(crate) fn decompress_chunk<R: Read + Seek>(
    reader: &mut R,
    chunk: &TextureChunk,
    chunk_index: usize,
) -> Result<Vec<u8>> {
    reader.seek(SeekFrom::Start(chunk.offset + ZLIB_HEADER_SIZE))?;

    let compressed_len = u64::from(chunk.packed_length).saturating_sub(ZLIB_HEADER_SIZE);
    let mut decoder = DeflateDecoder::new(reader.by_ref().take(compressed_len));

    let mut data = vec![0u8; chunk.unpacked_length as usize];
    let mut filled = 0;
    while filled < data.len() {
        match decoder.read(&mut data[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) => {
                return Err(Error::ChunkDecompressionFailed {
                    chunk: chunk_index,
                    message: e.to_string(),
                });
            }
        }
    }

    if filled != data.len() {
        return Err(Error::ChunkSizeMismatch {
            chunk: chunk_index,
            expected: chunk.unpacked_length,
            actual: filled as u32,
        });
    }

    Ok(data)
}
