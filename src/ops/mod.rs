//! File-level bookmark operations.
//!
//! Each operation checks its inputs, does all of its work in memory, and
//! writes exactly one output file at the end. A failure at any point leaves
//! no output behind.

mod options;

pub use options::BookmarkOptions;

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use crate::document::PdfDocument;
use crate::error::{Error, Result};
use crate::model::{Metadata, Outline};
use crate::outline::{build_outline, IndentNormalizer};

/// Which operation produced a [`Report`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    /// Bookmarks were added to a document
    AddBookmarks,
    /// Bookmarks were stripped from a document
    RemoveBookmarks,
    /// Indentation was added to a bookmark text file
    NormalizeIndents,
}

/// Outcome of a successful operation. Displays as a status line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    /// The operation performed
    pub operation: Operation,

    /// The file written
    pub output: PathBuf,

    /// Bookmarks written, or lines written for indent normalization
    pub entries: usize,
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let path = self.output.display();
        match self.operation {
            Operation::AddBookmarks => write!(f, "The bookmarks have been added to {}", path),
            Operation::RemoveBookmarks => {
                write!(f, "The bookmarks have been removed in {}", path)
            }
            Operation::NormalizeIndents => write!(f, "The indents have been added to {}", path),
        }
    }
}

/// Add bookmarks described by a text file to a PDF.
///
/// Any outline the document already has is replaced.
pub fn add_bookmarks(pdf: &Path, bookmarks: &Path, options: &BookmarkOptions) -> Result<Report> {
    ensure_exists(pdf)?;
    ensure_exists(bookmarks)?;

    let text = read_text(bookmarks)?;
    let mut doc = PdfDocument::open(pdf)?;

    let mut assembler = build_outline(&text, &doc, options.page_offset, options.count_mode)?;
    if let Some(ref metadata) = options.metadata {
        assembler.set_metadata(metadata.clone());
    }

    let graph = assembler.assemble();
    doc.set_outline(graph.as_ref())?;
    if let Some(metadata) = assembler.metadata() {
        doc.set_metadata(metadata);
    }

    let output = options
        .output
        .clone()
        .unwrap_or_else(|| derived_path(pdf, "_bookmark_added", "pdf"));
    doc.save(&output)?;

    log::info!(
        "added {} bookmarks to {}",
        assembler.len(),
        output.display()
    );
    Ok(Report {
        operation: Operation::AddBookmarks,
        output,
        entries: assembler.len(),
    })
}

/// Strip all bookmarks from a PDF and give it fresh minimal metadata.
pub fn remove_bookmarks(pdf: &Path, output: Option<&Path>) -> Result<Report> {
    ensure_exists(pdf)?;

    let mut doc = PdfDocument::open(pdf)?;
    let removed = doc.outline()?.total_items();
    doc.remove_outline()?;

    let title = pdf
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    doc.set_metadata(&Metadata::fresh(title));

    let output = output
        .map(Path::to_path_buf)
        .unwrap_or_else(|| derived_path(pdf, "_bookmark_removed", "pdf"));
    doc.save(&output)?;

    log::info!("removed {} bookmarks into {}", removed, output.display());
    Ok(Report {
        operation: Operation::RemoveBookmarks,
        output,
        entries: removed,
    })
}

/// Add indentation to numbered lines of a bookmark text file.
pub fn normalize_indents(bookmarks: &Path, output: Option<&Path>) -> Result<Report> {
    ensure_exists(bookmarks)?;

    let text = read_text(bookmarks)?;
    let normalized = IndentNormalizer::new().normalize(&text);
    let lines = normalized.lines().count();

    let output = output
        .map(Path::to_path_buf)
        .unwrap_or_else(|| derived_path(bookmarks, "_indents_added", "txt"));
    fs::write(&output, normalized)?;

    log::info!("normalized {} lines into {}", lines, output.display());
    Ok(Report {
        operation: Operation::NormalizeIndents,
        output,
        entries: lines,
    })
}

/// Read the outline of an existing PDF.
pub fn read_outline(pdf: &Path) -> Result<Outline> {
    ensure_exists(pdf)?;
    PdfDocument::open(pdf)?.outline()
}

fn ensure_exists(path: &Path) -> Result<()> {
    if path.exists() {
        Ok(())
    } else {
        Err(Error::MissingInput(path.to_path_buf()))
    }
}

/// Read a UTF-8 text file, dropping a leading byte order mark.
fn read_text(path: &Path) -> Result<String> {
    let text = fs::read_to_string(path)?;
    Ok(match text.strip_prefix('\u{feff}') {
        Some(stripped) => stripped.to_string(),
        None => text,
    })
}

/// `dir/name.ext` into `dir/name<suffix>.<extension>`.
fn derived_path(input: &Path, suffix: &str, extension: &str) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    input.with_file_name(format!("{}{}.{}", stem, suffix, extension))
}
