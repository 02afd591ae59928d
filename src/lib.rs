//! # pdfmark
//!
//! Build PDF bookmark outlines from indented text and merge them into
//! documents.
//!
//! Bookmarks are described one per line: a title followed by a 1-based page
//! number. Leading whitespace encodes nesting, and each line becomes a child
//! of the closest earlier line with less indentation.
//!
//! ```text
//! Preface 1
//! Getting Started 3
//!   Installation 3
//!   First Steps 5
//!     Hello World 6
//! Reference 10
//! ```
//!
//! ## Quick Start
//!
//! ```no_run
//! use pdfmark::Bookmarker;
//!
//! fn main() -> pdfmark::Result<()> {
//!     let report = Bookmarker::new()
//!         .with_page_offset(12)
//!         .add("book.pdf", "toc.txt")?;
//!     println!("{}", report);
//!     Ok(())
//! }
//! ```
//!
//! ## Programmatic outlines
//!
//! ```no_run
//! use pdfmark::{DocumentModel, OutlineAssembler, PdfDocument};
//!
//! fn main() -> pdfmark::Result<()> {
//!     let mut doc = PdfDocument::open("book.pdf")?;
//!     let mut outline = OutlineAssembler::new();
//!     let first = doc.page_handle(0).expect("document has pages");
//!     let intro = outline.add_bookmark("Introduction", first, None)?;
//!     outline.add_bookmark("Motivation", first, Some(intro))?;
//!
//!     doc.set_outline(outline.assemble().as_ref())?;
//!     doc.save("book_with_outline.pdf")
//! }
//! ```
//!
//! ## Limitations
//!
//! - By default `Count` holds the number of direct children of each group
//!   rather than the recursive open count; see [`CountMode`].
//! - Indentation is measured in raw whitespace characters. A tab counts the
//!   same as one space.

pub mod document;
pub mod error;
pub mod model;
pub mod ops;
pub mod outline;

// Re-export commonly used types
pub use document::{DocumentModel, PageId, PdfDocument};
pub use error::{Error, Result};
pub use model::{Metadata, Outline, OutlineItem};
pub use ops::{
    add_bookmarks, normalize_indents, read_outline, remove_bookmarks, BookmarkOptions, Operation,
    Report,
};
pub use outline::{
    build_outline, classify_line, BookmarkRecord, CountMode, HierarchyResolver, IndentNormalizer,
    NodeHandle, OutlineAssembler, OutlineEntry, OutlineGraph,
};

use std::path::{Path, PathBuf};

/// Builder for bookmark operations.
///
/// # Example
///
/// ```no_run
/// use pdfmark::{Bookmarker, CountMode, Metadata};
///
/// let report = Bookmarker::new()
///     .with_page_offset(-1)
///     .with_count_mode(CountMode::Descendants)
///     .with_metadata(Metadata::new().with("Title", "Field Guide"))
///     .with_output("guide_outlined.pdf")
///     .add("guide.pdf", "guide_toc.txt")?;
/// # Ok::<(), pdfmark::Error>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct Bookmarker {
    options: BookmarkOptions,
}

impl Bookmarker {
    /// Create a new builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Shift every page number in the bookmark text.
    pub fn with_page_offset(mut self, offset: i64) -> Self {
        self.options = self.options.with_page_offset(offset);
        self
    }

    /// Set how outline `Count` values are computed.
    pub fn with_count_mode(mut self, mode: CountMode) -> Self {
        self.options = self.options.with_count_mode(mode);
        self
    }

    /// Attach metadata to the output document.
    pub fn with_metadata(mut self, metadata: Metadata) -> Self {
        self.options = self.options.with_metadata(metadata);
        self
    }

    /// Write to `path` instead of the default derived name.
    pub fn with_output(mut self, path: impl Into<PathBuf>) -> Self {
        self.options = self.options.with_output(path);
        self
    }

    /// Add bookmarks from a text file to a PDF.
    pub fn add<P: AsRef<Path>, Q: AsRef<Path>>(&self, pdf: P, bookmarks: Q) -> Result<Report> {
        add_bookmarks(pdf.as_ref(), bookmarks.as_ref(), &self.options)
    }

    /// Remove all bookmarks from a PDF.
    pub fn remove<P: AsRef<Path>>(&self, pdf: P) -> Result<Report> {
        remove_bookmarks(pdf.as_ref(), self.options.output.as_deref())
    }

    /// Add indentation to a numbered bookmark text file.
    pub fn normalize<P: AsRef<Path>>(&self, bookmarks: P) -> Result<Report> {
        normalize_indents(bookmarks.as_ref(), self.options.output.as_deref())
    }

    /// The options this builder will use.
    pub fn options(&self) -> &BookmarkOptions {
        &self.options
    }
}
