//! Options for bookmark operations.

use std::path::PathBuf;

use crate::model::Metadata;
use crate::outline::CountMode;

/// Options for adding bookmarks to a document.
#[derive(Debug, Clone, Default)]
pub struct BookmarkOptions {
    /// Added to every page number read from the bookmark text
    pub page_offset: i64,

    /// Output path (defaults to `<stem>_bookmark_added.pdf` next to the input)
    pub output: Option<PathBuf>,

    /// How outline `Count` values are computed
    pub count_mode: CountMode,

    /// Metadata to attach to the trailer, replacing the existing `/Info`
    pub metadata: Option<Metadata>,
}

impl BookmarkOptions {
    /// Create new options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the page offset.
    pub fn with_page_offset(mut self, offset: i64) -> Self {
        self.page_offset = offset;
        self
    }

    /// Set the output path.
    pub fn with_output(mut self, path: impl Into<PathBuf>) -> Self {
        self.output = Some(path.into());
        self
    }

    /// Set the count mode.
    pub fn with_count_mode(mut self, mode: CountMode) -> Self {
        self.count_mode = mode;
        self
    }

    /// Set trailer metadata.
    pub fn with_metadata(mut self, metadata: Metadata) -> Self {
        self.metadata = Some(metadata);
        self
    }
}
