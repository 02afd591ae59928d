//! Hierarchy resolution: indentation into parent/child relationships.
//!
//! A record's parent is the most recent earlier record whose indent width is
//! strictly smaller. Records with indent zero are always roots. Widths are raw
//! character counts, so a tab and a space weigh the same and mixed
//! indentation is compared literally.

use crate::document::DocumentModel;
use crate::error::{Error, Result};

use super::assemble::{NodeHandle, OutlineAssembler};
use super::classify::BookmarkRecord;

/// Assigns parents to bookmark records in arrival order.
#[derive(Debug)]
pub struct HierarchyResolver {
    history: Vec<(usize, NodeHandle)>,
    page_offset: i64,
}

impl HierarchyResolver {
    /// Create a resolver that shifts every record's page by `page_offset`.
    pub fn new(page_offset: i64) -> Self {
        Self {
            history: Vec::new(),
            page_offset,
        }
    }

    /// Page offset applied to every record.
    pub fn page_offset(&self) -> i64 {
        self.page_offset
    }

    /// Find the parent for a record with the given indent width.
    pub fn parent_for(&self, indent: usize) -> Option<NodeHandle> {
        if indent == 0 {
            return None;
        }
        self.history
            .iter()
            .rev()
            .find(|(width, _)| *width < indent)
            .map(|(_, handle)| *handle)
    }

    /// Validate `record` against `doc` and add it to `assembler` under its
    /// resolved parent.
    pub fn resolve<D: DocumentModel + ?Sized>(
        &mut self,
        record: BookmarkRecord,
        doc: &D,
        assembler: &mut OutlineAssembler,
    ) -> Result<NodeHandle> {
        let page_count = doc.page_count();
        let index = record
            .page
            .checked_add(self.page_offset)
            .ok_or(Error::PageOutOfRange {
                index: record.page,
                page_count,
            })?;
        if index < 0 || index >= i64::from(page_count) {
            return Err(Error::PageOutOfRange { index, page_count });
        }
        let page = doc
            .page_handle(index as u32)
            .ok_or_else(|| Error::PageOutOfRange { index, page_count })?;

        let parent = self.parent_for(record.indent);
        let handle = assembler.add_bookmark(record.title, page, parent)?;
        self.history.push((record.indent, handle));

        log::debug!(
            "bookmark at page {} (indent {}) -> parent {:?}",
            index + 1,
            record.indent,
            parent
        );
        Ok(handle)
    }
}
