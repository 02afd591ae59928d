//! Outline assembly: bookmark tree into a linked outline graph.
//!
//! Bookmarks live in an arena owned by [`OutlineAssembler`]. Each node owns
//! the ordered list of its children's handles; nothing points back up. The
//! parent/prev/next links that the PDF outline format requires are only
//! produced in [`OutlineGraph`], where every link is an index into a flat
//! entry table.
//!
//! # Count semantics
//!
//! With the default [`CountMode::Siblings`], the `Count` of the outline root
//! and of every entry with children is the number of *direct* children in
//! that group, not the number of visible descendants the PDF reference
//! describes. This is a deliberate scope limitation kept for compatibility
//! with existing output. Viewers that rely on the open count to size their
//! tree should use [`CountMode::Descendants`].

use std::fmt;
use std::sync::atomic::{AtomicU32, Ordering};

use serde::{Deserialize, Serialize};

use crate::document::PageId;
use crate::error::{Error, Result};
use crate::model::Metadata;

static NEXT_ASSEMBLER: AtomicU32 = AtomicU32::new(1);

/// Opaque handle to a bookmark created by [`OutlineAssembler::add_bookmark`].
///
/// Handles are only valid for the assembler that returned them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeHandle {
    owner: u32,
    index: u32,
}

impl fmt::Display for NodeHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "bookmark #{} (assembler {})", self.index, self.owner)
    }
}

/// How `Count` values are computed for the outline graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CountMode {
    /// Number of direct children in each group
    #[default]
    Siblings,
    /// Number of descendants at any depth (every entry open)
    Descendants,
}

#[derive(Debug, Clone)]
struct BookmarkNode {
    title: String,
    page: PageId,
    children: Vec<NodeHandle>,
}

/// Builds bookmark trees and assembles them into an [`OutlineGraph`].
#[derive(Debug)]
pub struct OutlineAssembler {
    id: u32,
    nodes: Vec<BookmarkNode>,
    roots: Vec<NodeHandle>,
    metadata: Option<Metadata>,
    count_mode: CountMode,
}

impl OutlineAssembler {
    /// Create an empty assembler.
    pub fn new() -> Self {
        Self {
            id: NEXT_ASSEMBLER.fetch_add(1, Ordering::Relaxed),
            nodes: Vec::new(),
            roots: Vec::new(),
            metadata: None,
            count_mode: CountMode::default(),
        }
    }

    /// Set how `Count` values are computed.
    pub fn with_count_mode(mut self, mode: CountMode) -> Self {
        self.count_mode = mode;
        self
    }

    /// Add a bookmark pointing at `page`.
    ///
    /// Without a parent the bookmark becomes a root. A parent must be a handle
    /// previously returned by this assembler.
    pub fn add_bookmark(
        &mut self,
        title: impl Into<String>,
        page: PageId,
        parent: Option<NodeHandle>,
    ) -> Result<NodeHandle> {
        if let Some(parent) = parent {
            if !self.contains(parent) {
                return Err(Error::DanglingParent(parent));
            }
        }

        let handle = NodeHandle {
            owner: self.id,
            index: self.nodes.len() as u32,
        };
        self.nodes.push(BookmarkNode {
            title: title.into(),
            page,
            children: Vec::new(),
        });

        match parent {
            Some(parent) => self.nodes[parent.index as usize].children.push(handle),
            None => self.roots.push(handle),
        }

        Ok(handle)
    }

    /// Store document metadata for the trailer. Replaces any earlier value.
    pub fn set_metadata(&mut self, metadata: Metadata) {
        self.metadata = Some(metadata);
    }

    /// Metadata set with [`set_metadata`](Self::set_metadata), if any.
    pub fn metadata(&self) -> Option<&Metadata> {
        self.metadata.as_ref()
    }

    /// Total number of bookmarks added.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Check if no bookmarks were added.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Check whether `handle` was issued by this assembler.
    pub fn contains(&self, handle: NodeHandle) -> bool {
        handle.owner == self.id && (handle.index as usize) < self.nodes.len()
    }

    /// Title of a bookmark.
    pub fn title(&self, handle: NodeHandle) -> Option<&str> {
        self.node(handle).map(|n| n.title.as_str())
    }

    /// Children of a bookmark, in insertion order.
    pub fn children(&self, handle: NodeHandle) -> Option<&[NodeHandle]> {
        self.node(handle).map(|n| n.children.as_slice())
    }

    /// Root bookmarks, in insertion order.
    pub fn roots(&self) -> &[NodeHandle] {
        &self.roots
    }

    fn node(&self, handle: NodeHandle) -> Option<&BookmarkNode> {
        if self.contains(handle) {
            self.nodes.get(handle.index as usize)
        } else {
            None
        }
    }

    /// Build the linked outline graph. Returns `None` without bookmarks.
    ///
    /// The walk uses an explicit stack so nesting depth is not limited by
    /// the call stack. Calling this repeatedly without adding bookmarks
    /// yields equal graphs.
    pub fn assemble(&self) -> Option<OutlineGraph> {
        if self.roots.is_empty() {
            return None;
        }

        let descendants = self.descendant_counts();
        let mut entries: Vec<OutlineEntry> = Vec::with_capacity(self.nodes.len());

        let root_ids = self.emit_group(&mut entries, None, &self.roots);
        let count = match self.count_mode {
            CountMode::Siblings => self.roots.len(),
            CountMode::Descendants => self.nodes.len(),
        };
        let first = root_ids[0];
        let last = root_ids[root_ids.len() - 1];

        let mut stack: Vec<(usize, NodeHandle)> = root_ids
            .into_iter()
            .zip(self.roots.iter().copied())
            .rev()
            .collect();

        while let Some((entry_id, handle)) = stack.pop() {
            let children = &self.nodes[handle.index as usize].children;
            if children.is_empty() {
                continue;
            }

            let child_ids = self.emit_group(&mut entries, Some(entry_id), children);
            let entry = &mut entries[entry_id];
            entry.first = child_ids.first().copied();
            entry.last = child_ids.last().copied();
            entry.count = Some(match self.count_mode {
                CountMode::Siblings => children.len(),
                CountMode::Descendants => descendants[handle.index as usize],
            });

            stack.extend(
                child_ids
                    .into_iter()
                    .zip(children.iter().copied())
                    .rev(),
            );
        }

        Some(OutlineGraph {
            first,
            last,
            count,
            entries,
        })
    }

    /// Append one sibling group to `entries`, linking prev/next within it.
    fn emit_group(
        &self,
        entries: &mut Vec<OutlineEntry>,
        parent: Option<usize>,
        group: &[NodeHandle],
    ) -> Vec<usize> {
        let mut ids: Vec<usize> = Vec::with_capacity(group.len());
        for handle in group {
            let node = &self.nodes[handle.index as usize];
            let id = entries.len();
            let prev = ids.last().copied();
            if let Some(prev) = prev {
                entries[prev].next = Some(id);
            }
            entries.push(OutlineEntry {
                title: node.title.clone(),
                page: node.page,
                parent,
                prev,
                next: None,
                first: None,
                last: None,
                count: None,
            });
            ids.push(id);
        }
        ids
    }

    /// Number of descendants below each node, indexed like `nodes`.
    fn descendant_counts(&self) -> Vec<usize> {
        // Children are always created after their parent, so a reverse
        // sweep sees every child before its parent.
        let mut counts = vec![0usize; self.nodes.len()];
        for index in (0..self.nodes.len()).rev() {
            counts[index] = self.nodes[index]
                .children
                .iter()
                .map(|child| 1 + counts[child.index as usize])
                .sum();
        }
        counts
    }
}

impl Default for OutlineAssembler {
    fn default() -> Self {
        Self::new()
    }
}

/// A fully linked outline, ready to be written under the catalog's `/Outlines`.
///
/// Entry links are indices into [`entries`](Self::entries). An entry whose
/// `parent` is `None` belongs to the outline root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutlineGraph {
    /// First top-level entry
    pub first: usize,

    /// Last top-level entry
    pub last: usize,

    /// `Count` of the outline root
    pub count: usize,

    /// All entries; each sibling group is contiguous and in input order
    pub entries: Vec<OutlineEntry>,
}

impl OutlineGraph {
    /// Get an entry by index.
    pub fn entry(&self, id: usize) -> Option<&OutlineEntry> {
        self.entries.get(id)
    }

    /// Indices of the top-level entries, in order.
    pub fn top_level(&self) -> Vec<usize> {
        self.siblings_from(Some(self.first))
    }

    /// Indices of the children of `id`, in order.
    pub fn children(&self, id: usize) -> Vec<usize> {
        self.siblings_from(self.entries.get(id).and_then(|e| e.first))
    }

    /// Size of the sibling group `id` belongs to.
    pub fn sibling_count(&self, id: usize) -> usize {
        match self.entries.get(id) {
            Some(entry) => match entry.parent {
                Some(parent) => self.children(parent).len(),
                None => self.top_level().len(),
            },
            None => 0,
        }
    }

    fn siblings_from(&self, start: Option<usize>) -> Vec<usize> {
        let mut ids = Vec::new();
        let mut cursor = start;
        while let Some(id) = cursor {
            ids.push(id);
            cursor = self.entries.get(id).and_then(|e| e.next);
        }
        ids
    }
}

/// One outline item with its links.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutlineEntry {
    /// Item title
    pub title: String,

    /// Destination page handle (shown with fit-to-page)
    pub page: PageId,

    /// Enclosing entry; `None` means the outline root
    pub parent: Option<usize>,

    /// Previous sibling
    pub prev: Option<usize>,

    /// Next sibling
    pub next: Option<usize>,

    /// First child
    pub first: Option<usize>,

    /// Last child
    pub last: Option<usize>,

    /// Child count, present only for entries with children
    pub count: Option<usize>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page(n: u32) -> PageId {
        (n + 10, 0)
    }

    #[test]
    fn test_empty_assembles_to_none() {
        let assembler = OutlineAssembler::new();
        assert!(assembler.is_empty());
        assert!(assembler.assemble().is_none());
    }

    #[test]
    fn test_flat_roots_are_linked() {
        let mut a = OutlineAssembler::new();
        for (i, title) in ["Intro", "Body", "End"].iter().enumerate() {
            a.add_bookmark(*title, page(i as u32), None).unwrap();
        }

        let graph = a.assemble().unwrap();
        assert_eq!(graph.count, 3);
        assert_eq!(graph.top_level(), vec![0, 1, 2]);
        assert_eq!(graph.first, 0);
        assert_eq!(graph.last, 2);

        let body = graph.entry(1).unwrap();
        assert_eq!(body.title, "Body");
        assert_eq!(body.prev, Some(0));
        assert_eq!(body.next, Some(2));
        assert_eq!(body.parent, None);
        assert_eq!(body.count, None);
        assert!((0..3).all(|id| graph.sibling_count(id) == 3));
        assert_eq!(graph.entry(0).unwrap().prev, None);
        assert_eq!(graph.entry(2).unwrap().next, None);
    }

    #[test]
    fn test_nested_links_and_sibling_counts() {
        let mut a = OutlineAssembler::new();
        let ch1 = a.add_bookmark("Chapter 1", page(0), None).unwrap();
        let s11 = a.add_bookmark("1.1", page(1), Some(ch1)).unwrap();
        a.add_bookmark("1.1.1", page(2), Some(s11)).unwrap();
        a.add_bookmark("1.2", page(3), Some(ch1)).unwrap();
        a.add_bookmark("Chapter 2", page(4), None).unwrap();

        let graph = a.assemble().unwrap();
        assert_eq!(graph.count, 2);

        let top = graph.top_level();
        assert_eq!(top.len(), 2);
        let chapter = graph.entry(top[0]).unwrap();
        assert_eq!(chapter.title, "Chapter 1");
        assert_eq!(chapter.count, Some(2));

        let kids = graph.children(top[0]);
        let titles: Vec<&str> = kids
            .iter()
            .map(|&id| graph.entry(id).unwrap().title.as_str())
            .collect();
        assert_eq!(titles, vec!["1.1", "1.2"]);
        assert_eq!(chapter.first, Some(kids[0]));
        assert_eq!(chapter.last, Some(kids[1]));
        for &id in &kids {
            assert_eq!(graph.entry(id).unwrap().parent, Some(top[0]));
        }

        let grandkids = graph.children(kids[0]);
        assert_eq!(grandkids.len(), 1);
        assert_eq!(graph.entry(grandkids[0]).unwrap().parent, Some(kids[0]));
        assert_eq!(graph.entry(kids[0]).unwrap().count, Some(1));
        assert!(graph.children(top[1]).is_empty());
    }

    #[test]
    fn test_descendant_counts() {
        let mut a = OutlineAssembler::new().with_count_mode(CountMode::Descendants);
        let ch1 = a.add_bookmark("Chapter 1", page(0), None).unwrap();
        let s11 = a.add_bookmark("1.1", page(1), Some(ch1)).unwrap();
        a.add_bookmark("1.1.1", page(2), Some(s11)).unwrap();
        a.add_bookmark("1.1.2", page(2), Some(s11)).unwrap();
        a.add_bookmark("Chapter 2", page(4), None).unwrap();

        let graph = a.assemble().unwrap();
        assert_eq!(graph.count, 5);
        assert_eq!(graph.entry(graph.first).unwrap().count, Some(3));
        let s11_id = graph.children(graph.first)[0];
        assert_eq!(graph.entry(s11_id).unwrap().count, Some(2));
    }

    #[test]
    fn test_dangling_parent_rejected() {
        let mut other = OutlineAssembler::new();
        let foreign = other.add_bookmark("Elsewhere", page(0), None).unwrap();

        let mut a = OutlineAssembler::new();
        let err = a.add_bookmark("Orphan", page(0), Some(foreign)).unwrap_err();
        assert!(matches!(err, Error::DanglingParent(h) if h == foreign));
        assert!(a.is_empty());
    }

    #[test]
    fn test_assemble_is_idempotent() {
        let mut a = OutlineAssembler::new();
        let root = a.add_bookmark("Root", page(0), None).unwrap();
        a.add_bookmark("Leaf A", page(1), Some(root)).unwrap();
        a.add_bookmark("Leaf B", page(2), Some(root)).unwrap();

        assert_eq!(a.assemble(), a.assemble());
    }

    #[test]
    fn test_metadata_last_write_wins() {
        let mut a = OutlineAssembler::new();
        a.set_metadata(Metadata::new().with("Title", "Draft"));
        a.set_metadata(Metadata::new().with("Title", "Final"));
        assert_eq!(a.metadata().unwrap().get("Title"), Some("Final"));
    }

    #[test]
    fn test_deep_nesting_does_not_recurse() {
        let mut a = OutlineAssembler::new();
        let mut parent = None;
        for depth in 0..50_000 {
            parent = Some(a.add_bookmark(format!("Level {depth}"), page(0), parent).unwrap());
        }
        let graph = a.assemble().unwrap();
        assert_eq!(graph.entries.len(), 50_000);
        assert_eq!(graph.entries[49_999].parent, Some(49_998));
    }
}
