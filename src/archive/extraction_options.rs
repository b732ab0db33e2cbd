//! Options for batch texture extraction.

/// Options controlling batch extraction behavior.
///
/// # Example
///
/// ```
/// use ba2tex::archive::ExtractionOptions;
///
/// let options = ExtractionOptions::new()
///     .with_overwrite(true)
///     .with_multithreaded(false);
/// assert!(options.overwrite);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct ExtractionOptions {
    /// Overwrite files that already exist in the destination.
    /// Default: false (a conflict is an error).
    pub overwrite: bool,

    /// Run destination directory creation on a separate thread, ahead
    /// of the writer. The writer still consumes paths in request
    /// order; only file-system metadata work is overlapped.
    /// Default: false.
    pub multithreaded: bool,
}

impl ExtractionOptions {
    /// Create options with the defaults.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set whether existing destination files may be overwritten.
    #[must_use]
    pub fn with_overwrite(mut self, overwrite: bool) -> Self {
        self.overwrite = overwrite;
        self
    }

    /// Set whether directory preparation runs on its own thread.
    #[must_use]
    pub fn with_multithreaded(mut self, multithreaded: bool) -> Self {
        self.multithreaded = multithreaded;
        self
    }
}
