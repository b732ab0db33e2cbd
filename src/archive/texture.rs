//! Texture archive handle and extraction pipeline.

use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Seek, Write};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard, PoisonError, mpsc};
use std::thread;

use super::btdx::{
    Ba2Header, BtdxReader, EntryInfo, ExtractPhase, ExtractProgress, TextureFileEntry,
};
use super::cancel::CancelToken;
use super::decompression::decompress_chunk;
use super::extraction_options::ExtractionOptions;
use crate::dds::{DdsHeader, DxgiFormat};
use crate::error::{Error, Result};

/// Progress callback type
pub type ProgressCallback<'a> = &'a dyn Fn(&ExtractProgress);

/// An open texture archive.
///
/// The directory and name table are parsed once at load time and are
/// immutable afterwards. The underlying stream is a single shared
/// cursor: every operation that reads archive bytes takes an exclusive
/// lock for its whole seek+read sequence, so at most one extraction
/// proceeds at a time per archive. Dropping the archive closes the
/// stream.
#[derive(Debug)]
pub struct TextureArchive<R: Read + Seek> {
    stream: Mutex<BufReader<R>>,
    header: Ba2Header,
    entries: Vec<TextureFileEntry>,
    names: Vec<String>,
}

impl TextureArchive<File> {
    /// Open a texture archive file and parse its directory.
    ///
    /// # Errors
    /// Returns an error if the file cannot be opened, is not a texture
    /// (`DX10`) BA2, or its directory is malformed.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        tracing::debug!(path = %path.display(), "opening texture archive");
        Self::load(File::open(path)?)
    }
}

impl<R: Read + Seek> TextureArchive<R> {
    /// Parse an archive from a Read + Seek source.
    ///
    /// # Errors
    /// Returns an error if the header, directory, or name table cannot
    /// be parsed, or if the archive is not a texture archive.
    pub fn load(reader: R) -> Result<Self> {
        let mut reader = BtdxReader::new(reader);
        let header = *reader.read_header()?;
        let entries = reader.read_directory()?.to_vec();
        let names = reader.read_names()?.to_vec();

        Ok(Self {
            stream: Mutex::new(reader.into_stream()),
            header,
            entries,
            names,
        })
    }

    /// The parsed archive header.
    pub fn header(&self) -> &Ba2Header {
        &self.header
    }

    /// Number of textures in the archive.
    pub fn file_count(&self) -> usize {
        self.entries.len()
    }

    /// All directory entries, in archive order.
    pub fn entries(&self) -> &[TextureFileEntry] {
        &self.entries
    }

    /// Get one entry by index.
    pub fn entry(&self, index: usize) -> Option<&TextureFileEntry> {
        self.entries.get(index)
    }

    /// All archive paths, in entry order.
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// The archive path of the entry at `index`.
    pub fn name_of(&self, index: usize) -> Option<&str> {
        self.names.get(index).map(String::as_str)
    }

    /// Resolve an archive path to its entry index.
    ///
    /// Matching is case-insensitive and accepts `/` in place of the
    /// archive's `\` separators.
    pub fn index_of(&self, name: &str) -> Option<usize> {
        let wanted = normalize_name(name);
        self.names.iter().position(|n| normalize_name(n) == wanted)
    }

    /// Size of the extracted file for the entry at `index`: the DDS
    /// file header plus the sum of its unpacked chunk lengths.
    pub fn file_size(&self, index: usize) -> Option<u64> {
        self.entries.get(index).map(TextureFileEntry::total_size)
    }

    /// Listing records for every entry, in archive order.
    pub fn entry_infos(&self) -> Vec<EntryInfo> {
        self.entries
            .iter()
            .zip(&self.names)
            .map(|(entry, name)| entry.info(name.clone()))
            .collect()
    }

    /// Extract one texture to a writer: the synthesized DDS header
    /// followed by each chunk's decompressed bytes in chunk order.
    ///
    /// # Errors
    /// Returns [`Error::IndexOutOfRange`] for a bad index,
    /// [`Error::UnsupportedTextureFormat`] before anything is written
    /// if the format code is unknown, and decompression or IO errors
    /// from the chunk pipeline.
    pub fn extract_to_stream<W: Write>(&self, index: usize, destination: &mut W) -> Result<()> {
        let entry = self.entry_checked(index)?;
        let mut stream = self.lock_stream();
        write_texture(&mut stream, entry, destination)
    }

    /// Extract one texture by archive path to a writer.
    ///
    /// # Errors
    /// Returns [`Error::FileNotFound`] if the name does not resolve.
    pub fn extract_to_stream_by_name<W: Write>(
        &self,
        name: &str,
        destination: &mut W,
    ) -> Result<()> {
        let index = self
            .index_of(name)
            .ok_or_else(|| Error::FileNotFound(name.to_string()))?;
        self.extract_to_stream(index, destination)
    }

    /// Extract one texture to a destination directory, creating parent
    /// directories as needed. Returns the path written.
    ///
    /// # Errors
    /// Returns [`Error::OverwriteDenied`] if the target exists and
    /// `overwrite` is false, plus the errors of
    /// [`extract_to_stream`](Self::extract_to_stream).
    pub fn extract_file(
        &self,
        index: usize,
        destination: impl AsRef<Path>,
        overwrite: bool,
    ) -> Result<PathBuf> {
        let destination = destination.as_ref();
        check_destination(destination)?;
        let entry = self.entry_checked(index)?;

        let path = destination.join(archive_relative_path(&self.names[index]));
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        if !overwrite && path.exists() {
            return Err(Error::OverwriteDenied { path });
        }

        let mut writer = BufWriter::new(File::create(&path)?);
        {
            let mut stream = self.lock_stream();
            write_texture(&mut stream, entry, &mut writer)?;
        }
        writer.flush()?;

        Ok(path)
    }

    /// Extract one texture by archive path to a destination directory.
    ///
    /// # Errors
    /// Returns [`Error::FileNotFound`] if the name does not resolve,
    /// plus the errors of [`extract_file`](Self::extract_file).
    pub fn extract_file_by_name(
        &self,
        name: &str,
        destination: impl AsRef<Path>,
        overwrite: bool,
    ) -> Result<PathBuf> {
        let index = self
            .index_of(name)
            .ok_or_else(|| Error::FileNotFound(name.to_string()))?;
        self.extract_file(index, destination, overwrite)
    }

    /// Extract every texture to a destination directory.
    ///
    /// # Errors
    /// See [`extract_all_with_progress`](Self::extract_all_with_progress).
    pub fn extract_all(
        &self,
        destination: impl AsRef<Path>,
        options: &ExtractionOptions,
    ) -> Result<()> {
        self.extract_all_with_progress(destination, options, None, None)
    }

    /// Extract every texture with progress reporting and cooperative
    /// cancellation.
    ///
    /// Progress is reported roughly every 1% of the batch (every file
    /// for small batches); the cancellation token is checked at the
    /// same boundaries. On cancellation, files already written stay on
    /// disk and [`Error::Cancelled`] is returned.
    ///
    /// # Errors
    /// The batch aborts on the first failing entry; the error
    /// identifies it.
    pub fn extract_all_with_progress(
        &self,
        destination: impl AsRef<Path>,
        options: &ExtractionOptions,
        progress: Option<ProgressCallback>,
        cancel: Option<&CancelToken>,
    ) -> Result<()> {
        let indexes: Vec<usize> = (0..self.entries.len()).collect();
        self.extract_batch(&indexes, destination.as_ref(), options, progress, cancel)
    }

    /// Extract the named textures to a destination directory.
    ///
    /// # Errors
    /// See [`extract_files_with_progress`](Self::extract_files_with_progress).
    pub fn extract_files<S: AsRef<str>>(
        &self,
        names: &[S],
        destination: impl AsRef<Path>,
        options: &ExtractionOptions,
    ) -> Result<()> {
        self.extract_files_with_progress(names, destination, options, None, None)
    }

    /// Extract the named textures with progress and cancellation.
    ///
    /// # Errors
    /// Every name is resolved before any I/O happens; an unknown name
    /// fails the whole call immediately with [`Error::FileNotFound`].
    pub fn extract_files_with_progress<S: AsRef<str>>(
        &self,
        names: &[S],
        destination: impl AsRef<Path>,
        options: &ExtractionOptions,
        progress: Option<ProgressCallback>,
        cancel: Option<&CancelToken>,
    ) -> Result<()> {
        let indexes = names
            .iter()
            .map(|name| {
                self.index_of(name.as_ref())
                    .ok_or_else(|| Error::FileNotFound(name.as_ref().to_string()))
            })
            .collect::<Result<Vec<_>>>()?;
        self.extract_batch(&indexes, destination.as_ref(), options, progress, cancel)
    }

    /// Extract the textures at the given indexes to a destination
    /// directory.
    ///
    /// # Errors
    /// See [`extract_indexes_with_progress`](Self::extract_indexes_with_progress).
    pub fn extract_indexes(
        &self,
        indexes: &[usize],
        destination: impl AsRef<Path>,
        options: &ExtractionOptions,
    ) -> Result<()> {
        self.extract_indexes_with_progress(indexes, destination, options, None, None)
    }

    /// Extract the textures at the given indexes with progress and
    /// cancellation.
    ///
    /// # Errors
    /// Every index is validated before any I/O happens; an
    /// out-of-range index fails the whole call immediately.
    pub fn extract_indexes_with_progress(
        &self,
        indexes: &[usize],
        destination: impl AsRef<Path>,
        options: &ExtractionOptions,
        progress: Option<ProgressCallback>,
        cancel: Option<&CancelToken>,
    ) -> Result<()> {
        for &index in indexes {
            self.entry_checked(index)?;
        }
        self.extract_batch(indexes, destination.as_ref(), options, progress, cancel)
    }

    /// The batch pipeline: a directory-preparation producer hands
    /// ready destination paths through a bounded channel to the
    /// writer, which consumes them strictly in request order. With
    /// `options.multithreaded` the producer runs on its own thread so
    /// file-system metadata work overlaps decompression; output order
    /// is identical either way.
    fn extract_batch(
        &self,
        indexes: &[usize],
        destination: &Path,
        options: &ExtractionOptions,
        progress: Option<ProgressCallback>,
        cancel: Option<&CancelToken>,
    ) -> Result<()> {
        check_destination(destination)?;
        let total = indexes.len();
        if total == 0 {
            return Ok(());
        }

        let paths: Vec<PathBuf> = indexes
            .iter()
            .map(|&i| destination.join(archive_relative_path(&self.names[i])))
            .collect();

        tracing::debug!(total, destination = %destination.display(), "starting batch extraction");

        let overwrite = options.overwrite;
        let update_frequency = (total / 100).max(1);

        // Channel capacity covers the whole batch, so the producer can
        // always run ahead without blocking
        let (ready, next) = mpsc::sync_channel::<PathBuf>(total);
        let prepare = move || prepare_directories(paths, overwrite, &ready);

        let mut stream = self.lock_stream();

        let write_files = |stream: &mut BufReader<R>| -> Result<()> {
            let mut counter = 0usize;
            let mut next_update = update_frequency;
            for &index in indexes {
                let Ok(path) = next.recv() else {
                    // Producer stopped early; its error surfaces below
                    break;
                };
                let entry = &self.entries[index];
                let mut writer = BufWriter::new(File::create(&path)?);
                write_texture(stream, entry, &mut writer)?;
                writer.flush()?;

                counter += 1;
                if counter >= next_update {
                    if cancel.is_some_and(CancelToken::is_cancelled) {
                        tracing::debug!(written = counter, "batch extraction cancelled");
                        return Err(Error::Cancelled);
                    }
                    if let Some(report) = progress {
                        report(&ExtractProgress::with_file(
                            ExtractPhase::Extracting,
                            counter,
                            total,
                            self.names[index].clone(),
                        ));
                    }
                    next_update += update_frequency;
                }
            }
            if counter == total
                && let Some(report) = progress
            {
                report(&ExtractProgress::new(ExtractPhase::Complete, counter, total));
            }
            Ok(())
        };

        let result = if options.multithreaded {
            thread::scope(|scope| {
                let producer = scope.spawn(prepare);
                let consumed = write_files(&mut *stream);
                let produced = producer
                    .join()
                    .expect("directory preparation thread panicked");
                produced.and(consumed)
            })
        } else {
            // All directories are prepared before the first write, so a
            // conflict aborts the batch with nothing written
            prepare()?;
            write_files(&mut *stream)
        };

        if result.is_ok() {
            tracing::debug!(total, "batch extraction finished");
        }
        result
    }

    fn entry_checked(&self, index: usize) -> Result<&TextureFileEntry> {
        self.entries.get(index).ok_or(Error::IndexOutOfRange {
            index,
            total: self.entries.len(),
        })
    }

    fn lock_stream(&self) -> MutexGuard<'_, BufReader<R>> {
        // A poisoned lock only means an extraction panicked mid-read;
        // the next operation re-seeks, so the stream stays usable
        self.stream.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Synthesize the DDS header and stream every chunk, in chunk order,
/// into the destination. One chunk is buffered at a time.
///
/// The caller must hold the archive stream lock.
fn write_texture<R: Read + Seek, W: Write>(
    stream: &mut BufReader<R>,
    entry: &TextureFileEntry,
    destination: &mut W,
) -> Result<()> {
    // Resolve the format first so an unknown code fails before any
    // bytes reach the destination
    let format = DxgiFormat::from_code(entry.format)
        .ok_or(Error::UnsupportedTextureFormat { code: entry.format })?;

    let header = DdsHeader::for_texture(
        format,
        entry.width,
        entry.height,
        entry.mipmap_count,
        entry.is_cubemap(),
        entry.tile_mode,
    );
    header.write_to(destination)?;

    for (chunk_index, chunk) in entry.chunks.iter().enumerate() {
        let data = decompress_chunk(stream, chunk, chunk_index)?;
        destination.write_all(&data)?;
    }

    Ok(())
}

/// Create each destination's parent directory, enforce the overwrite
/// rule, and hand the finished path to the writer.
fn prepare_directories(
    paths: Vec<PathBuf>,
    overwrite: bool,
    ready: &mpsc::SyncSender<PathBuf>,
) -> Result<()> {
    for path in paths {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        if !overwrite && path.exists() {
            return Err(Error::OverwriteDenied { path });
        }
        if ready.send(path).is_err() {
            // Writer went away; nothing left to prepare for
            break;
        }
    }
    Ok(())
}

/// Turn an archive path (backslash-separated) into a relative
/// filesystem path, keeping it inside the destination.
fn archive_relative_path(name: &str) -> PathBuf {
    name.split(['\\', '/'])
        .filter(|part| !part.is_empty() && *part != "." && *part != "..")
        .collect()
}

fn normalize_name(name: &str) -> String {
    name.to_lowercase().replace('/', "\\")
}

fn check_destination(destination: &Path) -> Result<()> {
    if destination.as_os_str().is_empty() {
        return Err(Error::InvalidDestination(
            "destination path is empty".to_string(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn relative_paths_stay_inside_the_destination() {
        assert_eq!(
            archive_relative_path("textures\\actors\\hat_d.dds"),
            PathBuf::from("textures").join("actors").join("hat_d.dds")
        );
        assert_eq!(
            archive_relative_path("..\\..\\escape.dds"),
            PathBuf::from("escape.dds")
        );
    }

    #[test]
    fn name_normalization_is_case_and_separator_insensitive() {
        assert_eq!(
            normalize_name("Textures/Actors/Hat_d.DDS"),
            normalize_name("textures\\actors\\hat_d.dds")
        );
    }
}
