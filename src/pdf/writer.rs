//! Writing cards to their own single-page PDF files

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use log::{debug, warn};
use lopdf::{Dictionary, Document, Object, ObjectId};
use crate::error::{Error, Result};
use crate::layout::BoundingBox;
use super::cards::Card;
use super::pages::{inherited_attribute, resolve, INHERITABLE_KEYS};

/// Placeholder replaced by the card number in output file names
pub const NUMBER_PLACEHOLDER: &str = "{n}";

/// Page keys not carried over to the card page
///
/// `Parent` is re-pointed at the card's own page tree. Annotations and
/// article beads point back into the source document's page tree, which
/// would drag the entire source document along with them.
const SKIPPED_PAGE_KEYS: [&[u8]; 3] = [b"Parent", b"Annots", b"B"];

/// Writes cards to numbered files
///
/// The writer owns the card counter. The counter starts at `first_number`
/// and goes up by one after each successful write, so one writer used for
/// a whole run numbers every card in that run.
#[derive(Debug, Clone)]
pub struct CardWriter {
    output_dir: PathBuf,
    template: String,
    next_number: usize,
}

impl CardWriter {
    /// Create a writer; `template` must contain `{n}`
    pub fn new(
        output_dir: impl Into<PathBuf>,
        template: impl Into<String>,
        first_number: usize,
    ) -> Result<Self> {
        let template = template.into();
        if !template.contains(NUMBER_PLACEHOLDER) {
            return Err(Error::InvalidOptions(format!(
                "Output template {:?} has no {} placeholder",
                template, NUMBER_PLACEHOLDER
            )));
        }

        Ok(Self {
            output_dir: output_dir.into(),
            template,
            next_number: first_number,
        })
    }

    /// Number the next written card will get
    pub fn next_number(&self) -> usize {
        self.next_number
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Output path for card `number`
    pub fn path_for(&self, number: usize) -> PathBuf {
        self.output_dir
            .join(self.template.replace(NUMBER_PLACEHOLDER, &number.to_string()))
    }

    /// Write `card` from `source` to the next numbered file
    ///
    /// An existing file at that path is overwritten. The counter only moves
    /// once the file has been saved.
    pub fn write(&mut self, source: &Document, card: &Card) -> Result<PathBuf> {
        let mut doc = card_document(source, card)?;
        let path = self.path_for(self.next_number);

        doc.compress();
        doc.save(&path)?;

        debug!(
            "Wrote card {} (page {}, band {}) to {}",
            self.next_number,
            card.page_index,
            card.band,
            path.display()
        );

        self.next_number += 1;
        Ok(path)
    }
}

/// Build a one-page document holding a copy of the card's source page
///
/// The page dictionary and everything it references are copied with fresh
/// object ids. Inherited attributes are set directly on the copied page,
/// and its MediaBox is replaced by the card's box.
pub fn card_document(source: &Document, card: &Card) -> Result<Document> {
    let mut doc = Document::with_version(source.version.clone());
    let pages_id = doc.new_object_id();
    let page_id = doc.new_object_id();

    let source_page = source.get_dictionary(card.page_id)?;
    let dropped = dropped_page_keys(source_page);
    if !dropped.is_empty() {
        warn!(
            "Dropping {} from page {} (band {})",
            dropped.join(", "),
            card.page_index,
            card.band
        );
    }

    let mut page = {
        let mut importer = ObjectImporter::new(source, &mut doc);
        // Anything pointing back at the source page now points at the card page
        importer.id_map.insert(card.page_id, page_id);

        let mut page = Dictionary::new();
        for (key, value) in source_page.iter() {
            if SKIPPED_PAGE_KEYS.contains(&key.as_slice()) {
                continue;
            }
            page.set(key.clone(), importer.import(value)?);
        }

        for key in INHERITABLE_KEYS {
            if page.has(key) {
                continue;
            }
            if let Some(value) = inherited_attribute(source, card.page_id, key)? {
                page.set(key.to_vec(), importer.import(value)?);
            }
        }

        page
    };

    page.set("Parent", Object::Reference(pages_id));
    page.set("MediaBox", card.media_box.to_object());

    if let Some(raw) = inherited_attribute(source, card.page_id, b"CropBox")? {
        let crop = BoundingBox::from_object(resolve(source, raw)?)
            .and_then(|crop| crop.intersect(&card.media_box))
            .unwrap_or(card.media_box);
        page.set("CropBox", crop.to_object());
    }

    doc.objects.insert(page_id, Object::Dictionary(page));

    let mut pages_object = Dictionary::new();
    pages_object.set("Type", Object::Name(b"Pages".to_vec()));
    pages_object.set("Count", Object::Integer(1));
    pages_object.set("Kids", Object::Array(vec![Object::Reference(page_id)]));
    doc.objects.insert(pages_id, Object::Dictionary(pages_object));

    let catalog_id = doc.new_object_id();
    let mut catalog = Dictionary::new();
    catalog.set("Type", Object::Name(b"Catalog".to_vec()));
    catalog.set("Pages", Object::Reference(pages_id));
    doc.objects.insert(catalog_id, Object::Dictionary(catalog));

    doc.trailer.set("Root", Object::Reference(catalog_id));

    Ok(doc)
}

/// Names of source page entries that are left off the card page
fn dropped_page_keys(page: &Dictionary) -> Vec<&'static str> {
    let mut dropped = Vec::new();
    if page.has(b"Annots") {
        dropped.push("annotations");
    }
    if page.has(b"B") {
        dropped.push("article beads");
    }
    dropped
}

/// Copies objects from one document into another, renumbering references
struct ObjectImporter<'a> {
    source: &'a Document,
    target: &'a mut Document,
    id_map: HashMap<ObjectId, ObjectId>,
}

impl<'a> ObjectImporter<'a> {
    fn new(source: &'a Document, target: &'a mut Document) -> Self {
        Self {
            source,
            target,
            id_map: HashMap::new(),
        }
    }

    fn import(&mut self, object: &Object) -> Result<Object> {
        Ok(match object {
            Object::Reference(id) => Object::Reference(self.import_reference(*id)?),
            Object::Array(arr) => Object::Array(
                arr.iter()
                    .map(|obj| self.import(obj))
                    .collect::<Result<Vec<_>>>()?,
            ),
            Object::Dictionary(dict) => Object::Dictionary(self.import_dictionary(dict)?),
            Object::Stream(stream) => {
                let mut copy = stream.clone();
                copy.dict = self.import_dictionary(&stream.dict)?;
                Object::Stream(copy)
            }
            _ => object.clone(),
        })
    }

    fn import_dictionary(&mut self, dict: &Dictionary) -> Result<Dictionary> {
        let mut new_dict = Dictionary::new();
        for (key, value) in dict.iter() {
            new_dict.set(key.clone(), self.import(value)?);
        }
        Ok(new_dict)
    }

    fn import_reference(&mut self, id: ObjectId) -> Result<ObjectId> {
        if let Some(new_id) = self.id_map.get(&id) {
            return Ok(*new_id);
        }

        // Register before recursing so cycles terminate
        let new_id = self.target.new_object_id();
        self.id_map.insert(id, new_id);

        // A reference to a missing object is the null object
        let imported = match self.source.get_object(id) {
            Ok(object) => self.import(object)?,
            Err(_) => Object::Null,
        };
        self.target.objects.insert(new_id, imported);

        Ok(new_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lopdf::{dictionary, Stream};
    use tempfile::TempDir;

    /// Single page with a content stream, a shared font and an inherited CropBox
    fn source_doc() -> (Document, ObjectId) {
        let mut doc = Document::with_version("1.5");
        let pages_id = doc.new_object_id();

        let font_id = doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => "Helvetica",
        });
        let content_id = doc.add_object(Stream::new(
            Dictionary::new(),
            b"BT /F1 12 Tf 72 72 Td (card) Tj ET".to_vec(),
        ));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "MediaBox" => vec![0.into(), 0.into(), 600.into(), 900.into()],
            "Contents" => content_id,
        });

        doc.objects.insert(
            pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => vec![page_id.into()],
                "Count" => 1,
                "Resources" => dictionary! {
                    "Font" => dictionary! { "F1" => font_id },
                },
                "CropBox" => vec![10.into(), 10.into(), 590.into(), 890.into()],
            }),
        );
        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        doc.trailer.set("Root", catalog_id);

        (doc, page_id)
    }

    fn card(page_id: ObjectId, band: usize, lly: f64, ury: f64) -> Card {
        Card {
            page_id,
            page_index: 0,
            band,
            media_box: BoundingBox::new(0.0, lly, 600.0, ury),
        }
    }

    #[test]
    fn test_template_requires_placeholder() {
        let result = CardWriter::new(".", "card.pdf", 0);
        assert!(matches!(result, Err(Error::InvalidOptions(_))));
    }

    #[test]
    fn test_path_for() {
        let writer = CardWriter::new("out", "card_num-{n}.pdf", 0).unwrap();
        assert_eq!(writer.path_for(7), Path::new("out").join("card_num-7.pdf"));
    }

    #[test]
    fn test_card_document_copies_inherited_attributes() {
        let (source, page_id) = source_doc();
        let doc = card_document(&source, &card(page_id, 1, 300.0, 600.0)).unwrap();

        let pages = doc.get_pages();
        assert_eq!(pages.len(), 1);
        let page = doc.get_dictionary(pages[&1]).unwrap();

        let media_box = BoundingBox::from_object(page.get(b"MediaBox").unwrap()).unwrap();
        assert_eq!(media_box, BoundingBox::new(0.0, 300.0, 600.0, 600.0));

        let crop_box = BoundingBox::from_object(page.get(b"CropBox").unwrap()).unwrap();
        assert_eq!(crop_box, BoundingBox::new(10.0, 300.0, 590.0, 600.0));

        // Resources were inherited from the Pages node in the source
        let resources = page.get(b"Resources").unwrap().as_dict().unwrap();
        let fonts = resources.get(b"Font").unwrap().as_dict().unwrap();
        let font_id = fonts.get(b"F1").unwrap().as_reference().unwrap();
        let font = doc.get_dictionary(font_id).unwrap();
        assert_eq!(font.get(b"BaseFont").unwrap().as_name().unwrap(), b"Helvetica");

        let content_id = page.get(b"Contents").unwrap().as_reference().unwrap();
        match doc.get_object(content_id).unwrap() {
            Object::Stream(stream) => assert!(stream.content.starts_with(b"BT")),
            other => panic!("expected content stream, got {:?}", other),
        }
    }

    #[test]
    fn test_card_document_leaves_source_untouched() {
        let (source, page_id) = source_doc();
        let before = source.objects.len();

        card_document(&source, &card(page_id, 0, 0.0, 300.0)).unwrap();

        assert_eq!(source.objects.len(), before);
        let page = source.get_dictionary(page_id).unwrap();
        let media_box = BoundingBox::from_object(page.get(b"MediaBox").unwrap()).unwrap();
        assert_eq!(media_box, BoundingBox::new(0.0, 0.0, 600.0, 900.0));
    }

    #[test]
    fn test_annotations_and_beads_are_dropped() {
        let (mut source, page_id) = source_doc();
        let annot_id = source.add_object(dictionary! {
            "Type" => "Annot",
            "Subtype" => "Text",
            "P" => page_id,
        });
        let bead_id = source.add_object(dictionary! {
            "Type" => "Bead",
            "P" => page_id,
        });
        if let Ok(Object::Dictionary(page)) = source.get_object_mut(page_id) {
            page.set("Annots", vec![Object::Reference(annot_id)]);
            page.set("B", vec![Object::Reference(bead_id)]);
        }

        let page = source.get_dictionary(page_id).unwrap();
        assert_eq!(dropped_page_keys(page), vec!["annotations", "article beads"]);

        let doc = card_document(&source, &card(page_id, 0, 0.0, 300.0)).unwrap();
        let card_page = doc.get_dictionary(doc.get_pages()[&1]).unwrap();
        assert!(!card_page.has(b"Annots"));
        assert!(!card_page.has(b"B"));
    }

    #[test]
    fn test_nothing_dropped_from_plain_page() {
        let (source, page_id) = source_doc();
        let page = source.get_dictionary(page_id).unwrap();
        assert!(dropped_page_keys(page).is_empty());
    }

    #[test]
    fn test_write_increments_counter_and_overwrites() {
        let (source, page_id) = source_doc();
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let mut writer = CardWriter::new(temp_dir.path(), "card_num-{n}.pdf", 0).unwrap();

        let first = writer.write(&source, &card(page_id, 0, 0.0, 300.0)).unwrap();
        assert_eq!(first, temp_dir.path().join("card_num-0.pdf"));
        assert_eq!(writer.next_number(), 1);

        // A fresh writer starts from 0 again and replaces the existing file
        let mut rerun = CardWriter::new(temp_dir.path(), "card_num-{n}.pdf", 0).unwrap();
        let again = rerun.write(&source, &card(page_id, 2, 600.0, 900.0)).unwrap();
        assert_eq!(again, first);

        let written = Document::load(&again).unwrap();
        let page = written.get_dictionary(written.get_pages()[&1]).unwrap();
        let media_box = BoundingBox::from_object(page.get(b"MediaBox").unwrap()).unwrap();
        assert_eq!(media_box.lly, 600.0);
    }

    #[test]
    fn test_failed_write_keeps_counter() {
        let (source, page_id) = source_doc();
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let missing = temp_dir.path().join("does-not-exist");
        let mut writer = CardWriter::new(&missing, "card_num-{n}.pdf", 5).unwrap();

        let result = writer.write(&source, &card(page_id, 0, 0.0, 300.0));
        assert!(result.is_err());
        assert_eq!(writer.next_number(), 5);
    }
}
