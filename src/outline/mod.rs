//! Bookmark outline construction.
//!
//! Text flows through four stages, each consuming the previous one's output:
//!
//! 1. [`IndentNormalizer`] (optional) adds indentation to numbered lines.
//! 2. [`classify_line`] turns a line into a [`BookmarkRecord`].
//! 3. [`HierarchyResolver`] picks each record's parent from its indentation.
//! 4. [`OutlineAssembler`] links the tree into an [`OutlineGraph`].
//!
//! [`build_outline`] runs stages 2-4 over a whole text. It either returns a
//! complete assembler or an error; there is no partial result.

mod assemble;
mod classify;
mod normalize;
mod resolve;

pub use assemble::{CountMode, NodeHandle, OutlineAssembler, OutlineEntry, OutlineGraph};
pub use classify::{classify_line, indent_width, BookmarkRecord};
pub use normalize::IndentNormalizer;
pub use resolve::HierarchyResolver;

use crate::document::DocumentModel;
use crate::error::Result;

/// Build a bookmark tree from indented text.
///
/// Every line is classified and resolved in order against `doc`. The first
/// invalid page number or out-of-range target aborts the whole batch.
pub fn build_outline<D: DocumentModel + ?Sized>(
    text: &str,
    doc: &D,
    page_offset: i64,
    count_mode: CountMode,
) -> Result<OutlineAssembler> {
    let mut assembler = OutlineAssembler::new().with_count_mode(count_mode);
    let mut resolver = HierarchyResolver::new(page_offset);

    for (i, line) in text.lines().enumerate() {
        match classify_line(line, i + 1)? {
            Some(record) => {
                resolver.resolve(record, doc, &mut assembler)?;
            }
            None => log::debug!("skipping line {}: no title/page pair", i + 1),
        }
    }

    Ok(assembler)
}
