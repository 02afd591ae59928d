//! Value types exchanged with documents.
//!
//! [`Metadata`] is what gets attached to a document's trailer, and
//! [`Outline`] is what an existing document's bookmarks look like when read
//! back. Both serialize with serde.

mod metadata;
mod outline;

pub use metadata::{format_pdf_date, Metadata};
pub use outline::{Outline, OutlineItem};
