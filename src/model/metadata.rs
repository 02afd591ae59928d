//! Document information dictionary.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Document metadata written to the trailer's `/Info` dictionary.
///
/// Keys are not validated. Standard keys are `Title`, `Author`, `Subject`,
/// `Keywords`, `Creator`, `Producer`, `CreationDate` and `ModDate`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Metadata {
    entries: BTreeMap<String, String>,
}

impl Metadata {
    /// Create empty metadata.
    pub fn new() -> Self {
        Self::default()
    }

    /// Minimal metadata for a freshly rewritten document.
    ///
    /// No `Author` is written since the tool cannot know one.
    pub fn fresh(title: impl Into<String>) -> Self {
        let producer = format!("pdfmark {}", env!("CARGO_PKG_VERSION"));
        Self::new()
            .with("Title", title)
            .with("Creator", "pdfmark")
            .with("Producer", producer)
            .with("CreationDate", format_pdf_date(&Utc::now()))
    }

    /// Builder-style insert.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(key, value);
        self
    }

    /// Insert or replace a value.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.entries.insert(key.into(), value.into());
    }

    /// Get a value by key.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    /// Iterate over entries in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if there are no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Metadata {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut metadata = Metadata::new();
        for (k, v) in iter {
            metadata.set(k, v);
        }
        metadata
    }
}

/// Format a timestamp as a PDF date string (`D:YYYYMMDDHHmmSSZ`).
pub fn format_pdf_date(date: &DateTime<Utc>) -> String {
    date.format("D:%Y%m%d%H%M%SZ").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_set_replaces() {
        let mut metadata = Metadata::new().with("Author", "A");
        metadata.set("Author", "B");
        assert_eq!(metadata.get("Author"), Some("B"));
        assert_eq!(metadata.len(), 1);
    }

    #[test]
    fn test_fresh_has_standard_keys() {
        let metadata = Metadata::fresh("report");
        assert_eq!(metadata.get("Title"), Some("report"));
        assert_eq!(metadata.get("Creator"), Some("pdfmark"));
        assert!(metadata.get("Producer").unwrap().starts_with("pdfmark "));
        assert!(metadata.get("CreationDate").unwrap().starts_with("D:"));
        assert_eq!(metadata.get("Author"), None);
    }

    #[test]
    fn test_from_iter() {
        let metadata: Metadata = [("Title", "T"), ("Keywords", "a, b")].into_iter().collect();
        let keys: Vec<&str> = metadata.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["Keywords", "Title"]);
    }

    #[test]
    fn test_format_pdf_date() {
        let date = Utc.with_ymd_and_hms(2024, 1, 15, 10, 30, 45).unwrap();
        assert_eq!(format_pdf_date(&date), "D:20240115103045Z");
    }
}
