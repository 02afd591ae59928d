//! Document access layer.
//!
//! Outline construction only needs to know how many pages a document has
//! and how to address each of them. [`DocumentModel`] captures exactly that,
//! isolating the concrete PDF library (lopdf) from the outline logic.
//! [`PdfDocument`] is the lopdf-backed implementation that also owns all
//! reading and writing of files.

mod pdf;

pub use pdf::PdfDocument;

/// Page identifier: (object number, generation number).
pub type PageId = (u32, u16);

/// The view of a paginated document that outline construction relies on.
pub trait DocumentModel {
    /// Total number of pages.
    fn page_count(&self) -> u32;

    /// Handle of the page at a zero-based index, if it exists.
    fn page_handle(&self, index: u32) -> Option<PageId>;
}
