//! Page copying between lopdf documents
//!
//! Every document this crate writes (cover, body, merged volume) is built the
//! same way: pages are picked from one or more loaded documents, objects are
//! renumbered so the sources cannot collide, and a fresh page tree is built
//! over the selection.

use std::collections::{BTreeMap, HashSet};
use std::path::Path;
use lopdf::{Dictionary, Document, Object, ObjectId};
use tracing::debug;
use crate::error::{Error, Result};

/// Page attributes a page may inherit from its ancestors in the page tree
const INHERITABLE_ATTRIBUTES: [&[u8]; 4] = [b"MediaBox", b"CropBox", b"Resources", b"Rotate"];

/// Pages taken from one loaded document, in the order they should appear
pub struct PageSource {
    document: Document,
    /// 1-based page numbers, as keyed by `Document::get_pages`
    page_numbers: Vec<u32>,
}

impl PageSource {
    /// Select every page of the document in its original order
    pub fn all(document: Document) -> Self {
        let page_numbers = document.get_pages().keys().copied().collect();
        Self { document, page_numbers }
    }

    /// Select a single page by zero-based index
    ///
    /// Returns `None` when the document has no page at that index.
    pub fn single(document: Document, index: usize) -> Option<Self> {
        let page_number = document.get_pages().keys().nth(index).copied()?;
        Some(Self {
            document,
            page_numbers: vec![page_number],
        })
    }

    /// Number of selected pages
    pub fn len(&self) -> usize {
        self.page_numbers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.page_numbers.is_empty()
    }
}

/// Load a PDF from disk, reporting an absent file by name
pub fn load_document(path: &Path) -> Result<Document> {
    if !path.exists() {
        return Err(Error::MissingInput(path.to_path_buf()));
    }

    let doc = Document::load(path)?;
    debug!(path = %path.display(), pages = doc.get_pages().len(), "loaded PDF");
    Ok(doc)
}

/// Build a new document containing the selected pages of every source, in order
///
/// Based on the lopdf merge example: each source is renumbered past the
/// previous one, then a single Pages node adopts all selected pages.
pub fn build_document(sources: Vec<PageSource>) -> Result<Document> {
    let mut max_id = 1;
    let mut page_ids: Vec<ObjectId> = Vec::new();
    let mut objects: BTreeMap<ObjectId, Object> = BTreeMap::new();

    for source in sources {
        let PageSource { mut document, page_numbers } = source;

        // Re-parenting drops whatever the old page tree supplied, so copy it
        // onto the pages first
        let pages = document.get_pages();
        for number in &page_numbers {
            let page_id = *pages
                .get(number)
                .ok_or_else(|| Error::General(format!("Page {} not found", number)))?;
            flatten_inherited_attributes(&mut document, page_id)?;
        }

        document.renumber_objects_with(max_id);
        max_id = document.max_id + 1;

        // Renumbering keeps the page tree shape, so page numbers still resolve
        let pages = document.get_pages();
        for number in &page_numbers {
            let page_id = *pages
                .get(number)
                .ok_or_else(|| Error::General(format!("Page {} not found", number)))?;
            page_ids.push(page_id);
        }

        objects.extend(document.objects);
    }

    let mut doc = Document::with_version("1.5");
    doc.objects.extend(objects);

    // new_object_id() must hand out IDs above everything we just added
    doc.max_id = max_id - 1;

    let pages_id = doc.new_object_id();

    let kids: Vec<Object> = page_ids.iter().map(|&id| Object::Reference(id)).collect();

    let mut pages_object = Dictionary::new();
    pages_object.set("Type", Object::Name(b"Pages".to_vec()));
    pages_object.set("Count", Object::Integer(page_ids.len() as i64));
    pages_object.set("Kids", Object::Array(kids));

    let catalog_id = doc.new_object_id();
    let mut catalog = Dictionary::new();
    catalog.set("Type", Object::Name(b"Catalog".to_vec()));
    catalog.set("Pages", Object::Reference(pages_id));

    doc.objects.insert(catalog_id, Object::Dictionary(catalog));
    doc.objects.insert(pages_id, Object::Dictionary(pages_object));
    doc.trailer.set("Root", Object::Reference(catalog_id));

    for &page_id in &page_ids {
        if let Ok(Object::Dictionary(dict)) = doc.get_object_mut(page_id) {
            dict.set("Parent", Object::Reference(pages_id));
        }
    }

    // Old catalogs, page trees and unselected pages are unreachable now
    let pruned = doc.prune_objects();
    debug!(pages = page_ids.len(), pruned = pruned.len(), "built document");

    Ok(doc)
}

/// Compress and write a document
pub fn save_document(doc: &mut Document, path: &Path) -> Result<()> {
    doc.compress();
    doc.save(path)?;
    Ok(())
}

/// Look up a page attribute, walking up the page tree if the page lacks it
pub fn inherited_attribute(doc: &Document, page_id: ObjectId, key: &[u8]) -> Option<Object> {
    let mut visited = HashSet::new();
    let mut node_id = page_id;

    while visited.insert(node_id) {
        let node = doc.get_dictionary(node_id).ok()?;
        if let Ok(value) = node.get(key) {
            return Some(value.clone());
        }
        node_id = node.get(b"Parent").and_then(Object::as_reference).ok()?;
    }

    None
}

/// Copy inheritable attributes from the page's ancestors onto the page itself
fn flatten_inherited_attributes(doc: &mut Document, page_id: ObjectId) -> Result<()> {
    let inherited: Vec<(&[u8], Object)> = {
        let page = doc.get_dictionary(page_id)?;
        INHERITABLE_ATTRIBUTES
            .iter()
            .filter(|key| !page.has(key))
            .filter_map(|key| inherited_attribute(doc, page_id, key).map(|value| (*key, value)))
            .collect()
    };

    if inherited.is_empty() {
        return Ok(());
    }

    let page = doc.get_dictionary_mut(page_id)?;
    for (key, value) in inherited {
        page.set(key, value);
    }

    Ok(())
}
