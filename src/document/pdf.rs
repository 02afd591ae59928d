//! lopdf-backed document: loading, outline/metadata rewriting, saving.

use std::collections::{HashMap, HashSet};
use std::fs;
use std::io::Read;
use std::path::Path;

use lopdf::{dictionary, Dictionary, Document as LopdfDocument, Object, ObjectId, StringFormat};

use crate::error::{Error, Result};
use crate::model::{Metadata, Outline, OutlineItem};
use crate::outline::OutlineGraph;

use super::{DocumentModel, PageId};

/// PDF magic bytes: %PDF-
const PDF_MAGIC: &[u8] = b"%PDF-";

/// The header may be preceded by junk, but must start within this window.
const HEADER_WINDOW: usize = 1024;

/// A PDF document whose outline and metadata can be rewritten.
pub struct PdfDocument {
    doc: LopdfDocument,
    pages: Vec<ObjectId>,
}

impl PdfDocument {
    /// Load from a file path.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(Error::MissingInput(path.to_path_buf()));
        }
        let data = fs::read(path)?;
        Self::from_bytes(&data)
    }

    /// Load from an in-memory byte slice.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        check_header(data)?;
        let doc = LopdfDocument::load_mem(data)?;
        if doc.is_encrypted() {
            return Err(Error::Encrypted);
        }
        Ok(Self::from_document(doc))
    }

    /// Load from a reader.
    pub fn from_reader<R: Read>(mut reader: R) -> Result<Self> {
        let mut data = Vec::new();
        reader.read_to_end(&mut data)?;
        Self::from_bytes(&data)
    }

    /// Wrap an already loaded `lopdf::Document`.
    pub fn from_document(doc: LopdfDocument) -> Self {
        let pages = doc.get_pages().into_values().collect();
        Self { doc, pages }
    }

    /// Direct access to the underlying `lopdf::Document`.
    pub fn raw_doc(&self) -> &LopdfDocument {
        &self.doc
    }

    /// Get PDF version string.
    pub fn version(&self) -> String {
        self.doc.version.to_string()
    }

    /// Replace the document outline.
    ///
    /// `None` removes the outline. Objects of a replaced outline are pruned.
    pub fn set_outline(&mut self, graph: Option<&OutlineGraph>) -> Result<()> {
        let previous = self.catalog_mut()?.remove(b"Outlines");

        if let Some(graph) = graph {
            let root_id = self.write_outline(graph);
            self.catalog_mut()?.set("Outlines", root_id);
            log::debug!(
                "wrote outline root {:?} with {} entries",
                root_id,
                graph.entries.len()
            );
        }

        if previous.is_some() {
            self.doc.prune_objects();
        }
        Ok(())
    }

    /// Strip the outline, along with a page mode that would open the now
    /// empty bookmarks panel.
    pub fn remove_outline(&mut self) -> Result<()> {
        let catalog = self.catalog_mut()?;
        let shows_outlines = matches!(
            catalog.get(b"PageMode").and_then(Object::as_name),
            Ok(mode) if mode == b"UseOutlines"
        );
        if shows_outlines {
            catalog.remove(b"PageMode");
        }
        self.set_outline(None)
    }

    /// Replace the trailer's `/Info` dictionary.
    pub fn set_metadata(&mut self, metadata: &Metadata) {
        let mut info = Dictionary::new();
        for (key, value) in metadata.iter() {
            info.set(key, text_string(value));
        }
        let had_info = self.doc.trailer.has(b"Info");
        let info_id = self.doc.add_object(info);
        self.doc.trailer.set("Info", info_id);
        if had_info {
            self.doc.prune_objects();
        }
    }

    /// Read the trailer's `/Info` dictionary. Non-string values are ignored.
    pub fn metadata(&self) -> Metadata {
        let mut metadata = Metadata::new();
        let info = self
            .doc
            .trailer
            .get(b"Info")
            .ok()
            .and_then(|obj| self.deref(obj))
            .and_then(|obj| obj.as_dict().ok());

        if let Some(info) = info {
            for (key, value) in info.iter() {
                if let Object::String(bytes, _) = value {
                    metadata.set(String::from_utf8_lossy(key), decode_text_string(bytes));
                }
            }
        }
        metadata
    }

    /// Read the document outline.
    ///
    /// Sibling chains are followed through `Next`, children through `First`.
    /// An entry reached twice ends that chain.
    pub fn outline(&self) -> Result<Outline> {
        let mut outline = Outline::new();
        let Some(first) = self.outline_first() else {
            return Ok(outline);
        };

        let page_numbers: HashMap<ObjectId, u32> = self
            .pages
            .iter()
            .enumerate()
            .map(|(i, id)| (*id, i as u32 + 1))
            .collect();

        let mut flat = Vec::new();
        let mut visited = HashSet::new();
        let mut stack = vec![(first, 0u32)];

        while let Some((id, level)) = stack.pop() {
            if !visited.insert(id) {
                log::warn!("outline entry {:?} is linked more than once", id);
                continue;
            }
            let dict = self.doc.get_dictionary(id)?;

            let title = dict
                .get(b"Title")
                .ok()
                .and_then(|obj| self.deref(obj))
                .and_then(|obj| match obj {
                    Object::String(bytes, _) => Some(decode_text_string(bytes)),
                    _ => None,
                })
                .unwrap_or_default();
            let page = self.destination_page(dict, &page_numbers);
            if page.is_none() {
                log::warn!("outline entry {:?} ({}) has no page destination", id, title);
            }

            let mut item = OutlineItem::new(title, page, level);
            item.count = dict.get(b"Count").ok().and_then(|c| c.as_i64().ok());
            flat.push(item);

            // Children are pushed last so they are visited before the next sibling
            if let Some(next) = reference(dict, b"Next") {
                stack.push((next, level));
            }
            if let Some(child) = reference(dict, b"First") {
                stack.push((child, level + 1));
            }
        }

        outline.items = nest(flat);
        Ok(outline)
    }

    /// Serialize the document.
    pub fn to_bytes(&mut self) -> Result<Vec<u8>> {
        let mut buffer = Vec::new();
        self.doc.save_to(&mut buffer)?;
        Ok(buffer)
    }

    /// Serialize and write the document to `path`.
    ///
    /// The file is only created once serialization has succeeded.
    pub fn save<P: AsRef<Path>>(&mut self, path: P) -> Result<()> {
        let bytes = self.to_bytes()?;
        fs::write(path, bytes)?;
        Ok(())
    }

    fn catalog_mut(&mut self) -> Result<&mut Dictionary> {
        let root = self.doc.trailer.get(b"Root")?.as_reference()?;
        self.doc
            .get_object_mut(root)?
            .as_dict_mut()
            .map_err(Error::from)
    }

    /// Allocate and insert one object per entry plus the outline root.
    fn write_outline(&mut self, graph: &OutlineGraph) -> ObjectId {
        let root_id = self.doc.new_object_id();
        let ids: Vec<ObjectId> = graph
            .entries
            .iter()
            .map(|_| self.doc.new_object_id())
            .collect();

        for (entry, &id) in graph.entries.iter().zip(&ids) {
            let mut dict = dictionary! {
                "Title" => text_string(&entry.title),
                "Parent" => entry.parent.map_or(root_id, |p| ids[p]),
                "A" => dictionary! {
                    "S" => "GoTo",
                    "D" => vec![Object::Reference(entry.page), "Fit".into()],
                },
            };
            let links = [
                ("Prev", entry.prev),
                ("Next", entry.next),
                ("First", entry.first),
                ("Last", entry.last),
            ];
            for (key, link) in links {
                if let Some(target) = link {
                    dict.set(key, ids[target]);
                }
            }
            if let Some(count) = entry.count {
                dict.set("Count", count as i64);
            }
            self.doc.objects.insert(id, Object::Dictionary(dict));
        }

        let root = dictionary! {
            "Type" => "Outlines",
            "First" => ids[graph.first],
            "Last" => ids[graph.last],
            "Count" => graph.count as i64,
        };
        self.doc.objects.insert(root_id, Object::Dictionary(root));
        root_id
    }

    fn outline_first(&self) -> Option<ObjectId> {
        let catalog = self.doc.catalog().ok()?;
        let outlines = self.deref(catalog.get(b"Outlines").ok()?)?.as_dict().ok()?;
        reference(outlines, b"First")
    }

    /// Page number (1-based) an outline entry jumps to, via `/Dest` or a
    /// GoTo action. Named destinations are not resolved.
    fn destination_page(
        &self,
        dict: &Dictionary,
        page_numbers: &HashMap<ObjectId, u32>,
    ) -> Option<u32> {
        let dest = match dict.get(b"Dest") {
            Ok(dest) => dest,
            Err(_) => {
                let action = self.deref(dict.get(b"A").ok()?)?.as_dict().ok()?;
                action.get(b"D").ok()?
            }
        };

        match self.deref(dest)?.as_array().ok()?.first()? {
            Object::Reference(id) => page_numbers.get(id).copied(),
            // Remote-style destinations carry a zero-based page index
            Object::Integer(index) => u32::try_from(*index).ok().map(|i| i + 1),
            _ => None,
        }
    }

    fn deref<'a>(&'a self, obj: &'a Object) -> Option<&'a Object> {
        match obj {
            Object::Reference(id) => self.doc.get_object(*id).ok(),
            other => Some(other),
        }
    }
}

impl DocumentModel for PdfDocument {
    fn page_count(&self) -> u32 {
        self.pages.len() as u32
    }

    fn page_handle(&self, index: u32) -> Option<PageId> {
        self.pages.get(index as usize).copied()
    }
}

fn check_header(data: &[u8]) -> Result<()> {
    let window = &data[..data.len().min(HEADER_WINDOW)];
    if window.windows(PDF_MAGIC.len()).any(|w| w == PDF_MAGIC) {
        Ok(())
    } else {
        Err(Error::UnknownFormat)
    }
}

fn reference(dict: &Dictionary, key: &[u8]) -> Option<ObjectId> {
    dict.get(key).ok()?.as_reference().ok()
}

/// Turn a preorder list of items with levels back into a tree.
fn nest(flat: Vec<OutlineItem>) -> Vec<OutlineItem> {
    fn attach(item: OutlineItem, open: &mut [OutlineItem], roots: &mut Vec<OutlineItem>) {
        match open.last_mut() {
            Some(parent) => parent.add_child(item),
            None => roots.push(item),
        }
    }

    let mut roots = Vec::new();
    let mut open: Vec<OutlineItem> = Vec::new();
    for item in flat {
        while open.last().is_some_and(|top| top.level >= item.level) {
            if let Some(done) = open.pop() {
                attach(done, &mut open, &mut roots);
            }
        }
        open.push(item);
    }
    while let Some(done) = open.pop() {
        attach(done, &mut open, &mut roots);
    }
    roots
}

/// Encode a PDF text string: literal when ASCII, UTF-16BE with BOM otherwise.
fn text_string(text: &str) -> Object {
    if text.is_ascii() {
        return Object::String(text.as_bytes().to_vec(), StringFormat::Literal);
    }
    let mut bytes = vec![0xFE, 0xFF];
    for unit in text.encode_utf16() {
        bytes.extend_from_slice(&unit.to_be_bytes());
    }
    Object::String(bytes, StringFormat::Hexadecimal)
}

/// Decode a PDF text string (UTF-16BE with BOM, UTF-8, or Latin-1).
fn decode_text_string(bytes: &[u8]) -> String {
    if let Some(utf16) = bytes.strip_prefix(&[0xFE, 0xFF]) {
        let units: Vec<u16> = utf16
            .chunks_exact(2)
            .map(|c| u16::from_be_bytes([c[0], c[1]]))
            .collect();
        return String::from_utf16_lossy(&units);
    }
    match std::str::from_utf8(bytes) {
        Ok(s) => s.to_string(),
        Err(_) => bytes.iter().map(|&b| b as char).collect(),
    }
}
