//! PDF metadata extraction

use std::path::Path;
use lopdf::{Dictionary, Document, Object};
use crate::error::{Error, Result};
use super::pages::resolve;

/// PDF metadata
#[derive(Debug, Clone)]
pub struct PdfMetadata {
    /// Number of pages in the PDF
    pub page_count: usize,
    /// Document title (if present)
    pub title: Option<String>,
    /// Document author (if present)
    pub author: Option<String>,
}

/// Read the Count field of the root Pages dictionary
fn count_pages_from_catalog(doc: &Document) -> Result<usize> {
    let catalog = doc.catalog()?;

    let pages = catalog
        .get(b"Pages")
        .map_err(|_| Error::General("No Pages in catalog".to_string()))?;

    let pages_dict = match resolve(doc, pages)? {
        Object::Dictionary(dict) => dict,
        _ => return Err(Error::General("Pages is not a dictionary".to_string())),
    };

    let count = pages_dict
        .get(b"Count")
        .map_err(|_| Error::General("No Count in Pages".to_string()))?;

    match resolve(doc, count)? {
        Object::Integer(n) if *n >= 0 => Ok(*n as usize),
        _ => Err(Error::General("Count is not a non-negative integer".to_string())),
    }
}

/// Read a text entry from the Info dictionary
fn info_string(doc: &Document, info: &Dictionary, key: &[u8]) -> Option<String> {
    let value = resolve(doc, info.get(key).ok()?).ok()?;
    let bytes = value.as_str().ok()?;
    String::from_utf8(bytes.to_vec()).ok()
}

/// Load a document, failing on missing files and page-less documents
fn load_with_pages(path: &Path) -> Result<(Document, usize)> {
    if !path.exists() {
        return Err(Error::FileNotFound(path.to_path_buf()));
    }

    let doc = Document::load(path)?;
    let page_count = count_pages_from_catalog(&doc)?;

    if page_count == 0 {
        return Err(Error::EmptyPdf(path.to_path_buf()));
    }

    Ok((doc, page_count))
}

/// Extract metadata from a PDF file
pub fn extract_metadata(path: &Path) -> Result<PdfMetadata> {
    let (doc, page_count) = load_with_pages(path)?;

    let info = doc
        .trailer
        .get(b"Info")
        .ok()
        .and_then(|info| resolve(&doc, info).ok())
        .and_then(|info| info.as_dict().ok());

    let (title, author) = match info {
        Some(info) => (
            info_string(&doc, info, b"Title"),
            info_string(&doc, info, b"Author"),
        ),
        None => (None, None),
    };

    Ok(PdfMetadata {
        page_count,
        title,
        author,
    })
}

/// Count the number of pages in a PDF file
///
/// Useful for picking a page range before splitting.
pub fn count_pages(path: &Path) -> Result<usize> {
    let (_, page_count) = load_with_pages(path)?;
    Ok(page_count)
}
