//! Outline as read back from a document.

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Document outline (bookmarks).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Outline {
    /// Top-level outline items
    pub items: Vec<OutlineItem>,
}

impl Outline {
    /// Create a new empty outline.
    pub fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Add an item to the outline.
    pub fn add_item(&mut self, item: OutlineItem) {
        self.items.push(item);
    }

    /// Check if the outline is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Get the total number of items (including nested).
    pub fn total_items(&self) -> usize {
        self.walk().count()
    }

    /// Iterate over all items depth-first, in document order.
    pub fn walk(&self) -> impl Iterator<Item = &OutlineItem> {
        let mut stack: Vec<&OutlineItem> = self.items.iter().rev().collect();
        std::iter::from_fn(move || {
            let item = stack.pop()?;
            stack.extend(item.children.iter().rev());
            Some(item)
        })
    }

    /// Render the outline in the bookmark text format: two spaces per level,
    /// then the title and the 1-based page number.
    ///
    /// Items without a resolvable page are written with page 1.
    pub fn to_bookmark_text(&self) -> String {
        let mut text = String::new();
        for item in self.walk() {
            text.push_str(&"  ".repeat(item.level as usize));
            text.push_str(&item.title);
            text.push(' ');
            text.push_str(&item.page.unwrap_or(1).to_string());
            text.push('\n');
        }
        text
    }

    /// Serialize the outline as pretty-printed JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// A single outline item (bookmark).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutlineItem {
    /// Item title
    pub title: String,

    /// Target page number (1-indexed)
    pub page: Option<u32>,

    /// Nesting level (0 = top level)
    pub level: u32,

    /// `Count` as stored in the document
    pub count: Option<i64>,

    /// Child items
    pub children: Vec<OutlineItem>,
}

impl OutlineItem {
    /// Create a new outline item.
    pub fn new(title: impl Into<String>, page: Option<u32>, level: u32) -> Self {
        Self {
            title: title.into(),
            page,
            level,
            count: None,
            children: Vec::new(),
        }
    }

    /// Add a child item.
    pub fn add_child(&mut self, child: OutlineItem) {
        self.children.push(child);
    }
}
