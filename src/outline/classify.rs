//! Line classification: one raw text line into a bookmark record.

use crate::error::{Error, Result};

/// A single bookmark read from the text description.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookmarkRecord {
    /// Title text (all tokens except the last, joined by single spaces)
    pub title: String,

    /// Target page, zero-based, before the page offset is applied
    pub page: i64,

    /// Number of leading whitespace characters on the raw line
    pub indent: usize,
}

impl BookmarkRecord {
    /// Create a new record.
    pub fn new(title: impl Into<String>, page: i64, indent: usize) -> Self {
        Self {
            title: title.into(),
            page,
            indent,
        }
    }
}

/// Classify one raw line.
///
/// Returns `Ok(None)` for lines with fewer than two whitespace-separated
/// tokens, which are skipped silently. A last token that is not an integer
/// is an error, since skipping it would misplace every bookmark after it.
///
/// `line_no` is 1-based and only used for error reporting.
pub fn classify_line(line: &str, line_no: usize) -> Result<Option<BookmarkRecord>> {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    let Some((last, title_tokens)) = tokens.split_last() else {
        return Ok(None);
    };
    if title_tokens.is_empty() {
        return Ok(None);
    }

    let invalid = || Error::InvalidPageNumber {
        line: line_no,
        token: (*last).to_string(),
    };
    let number: i64 = last.parse().map_err(|_| invalid())?;
    let page = number.checked_sub(1).ok_or_else(invalid)?;

    Ok(Some(BookmarkRecord {
        title: title_tokens.join(" "),
        page,
        indent: indent_width(line),
    }))
}

/// Count leading whitespace characters. Tabs and spaces count as one each.
pub fn indent_width(line: &str) -> usize {
    line.chars().take_while(|c| c.is_whitespace()).count()
}
