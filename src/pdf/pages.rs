//! Page range selection and inherited page attributes

use std::collections::HashSet;
use std::ops::Range;
use lopdf::{Document, Object, ObjectId};
use crate::error::{Error, Result};
use crate::layout::BoundingBox;

/// Page attributes that a page may inherit from its ancestors in the page tree
pub const INHERITABLE_KEYS: [&[u8]; 4] = [b"Resources", b"MediaBox", b"CropBox", b"Rotate"];

/// A page selected from the source document
///
/// This is a plain value: it names the page by object id and carries the
/// resolved MediaBox, while the page content stays owned by the `Document`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SourcePage {
    /// Zero-based index of the page in the source document
    pub index: u32,
    /// Object id of the page dictionary
    pub id: ObjectId,
    /// Resolved (possibly inherited) MediaBox
    pub media_box: BoundingBox,
}

/// Select the pages with zero-based indices in `range`, in order
///
/// Every index is checked against the page count before anything is
/// returned, so an out-of-range request fails without partial results.
pub fn select_pages(doc: &Document, range: Range<u32>) -> Result<Vec<SourcePage>> {
    if range.start >= range.end {
        return Err(Error::InvalidOptions(format!(
            "Empty page range {}..{}",
            range.start, range.end
        )));
    }

    // get_pages() is keyed by 1-based page number
    let pages = doc.get_pages();
    let page_count = pages.len();

    let mut selected = Vec::with_capacity(range.len());
    for index in range {
        let id = *pages
            .get(&(index + 1))
            .ok_or(Error::PageOutOfBounds { index, page_count })?;

        selected.push(SourcePage {
            index,
            id,
            media_box: media_box(doc, id)?,
        });
    }

    Ok(selected)
}

/// Resolve the MediaBox of a page, walking up the page tree if needed
pub fn media_box(doc: &Document, page_id: ObjectId) -> Result<BoundingBox> {
    let raw = inherited_attribute(doc, page_id, b"MediaBox")?
        .ok_or(Error::MissingMediaBox(page_id))?;

    BoundingBox::from_object(resolve(doc, raw)?).ok_or(Error::MissingMediaBox(page_id))
}

/// Look up `key` on the page or the nearest ancestor that defines it
///
/// The value is returned as stored, without dereferencing.
pub(crate) fn inherited_attribute<'a>(
    doc: &'a Document,
    page_id: ObjectId,
    key: &[u8],
) -> Result<Option<&'a Object>> {
    let mut current = page_id;
    let mut visited = HashSet::new();

    // Guard against malformed trees where Parent points back down
    while visited.insert(current) {
        let dict = doc.get_dictionary(current)?;

        if let Ok(value) = dict.get(key) {
            return Ok(Some(value));
        }

        match dict.get(b"Parent") {
            Ok(Object::Reference(parent)) => current = *parent,
            _ => break,
        }
    }

    Ok(None)
}

/// Follow indirect references until a direct object is reached
pub(crate) fn resolve<'a>(doc: &'a Document, object: &'a Object) -> Result<&'a Object> {
    let mut current = object;
    let mut visited = HashSet::new();

    while let Object::Reference(id) = current {
        if !visited.insert(*id) {
            return Err(Error::General(format!("Reference cycle at {:?}", id)));
        }
        current = doc.get_object(*id)?;
    }

    Ok(current)
}
