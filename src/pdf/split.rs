//! Splitting a page range of a rulebook into card files

use std::path::{Path, PathBuf};
use log::info;
use lopdf::Document;
use crate::error::{Error, Result};
use super::cards::extract_cards;
use super::pages::{select_pages, SourcePage};
use super::writer::CardWriter;

/// Options for splitting pages into cards
///
/// `Default` matches the card section of the Paranoia rulebook: zero-based
/// pages 293 up to (not including) 332, three cards per page.
#[derive(Debug, Clone)]
pub struct SplitOptions {
    /// First page to split (zero-based, inclusive)
    pub page_start: u32,
    /// End of the page range (zero-based, exclusive)
    pub page_end: u32,
    /// Number of equal horizontal bands per page
    pub bands_per_page: usize,
    /// Output file name; `{n}` is replaced by the card number
    pub output_template: String,
    /// Directory the card files are written to
    pub output_dir: PathBuf,
    /// Number given to the first card written
    pub first_number: usize,
}

impl Default for SplitOptions {
    fn default() -> Self {
        Self {
            page_start: 293,
            page_end: 332,
            bands_per_page: 3,
            output_template: "card_num-{n}.pdf".to_string(),
            output_dir: PathBuf::from("."),
            first_number: 0,
        }
    }
}

impl SplitOptions {
    /// Check the options before any file is touched
    pub fn validate(&self) -> Result<()> {
        if self.page_start >= self.page_end {
            return Err(Error::InvalidOptions(format!(
                "Page range {}..{} is empty",
                self.page_start, self.page_end
            )));
        }

        if self.bands_per_page == 0 {
            return Err(Error::InvalidOptions(
                "bands_per_page must be at least 1".to_string(),
            ));
        }

        Ok(())
    }

    /// A writer numbering cards from `first_number` into `output_dir`
    pub fn writer(&self) -> Result<CardWriter> {
        CardWriter::new(
            self.output_dir.clone(),
            self.output_template.clone(),
            self.first_number,
        )
    }
}

/// Split the configured page range of a PDF file into card files
///
/// Returns the selected source pages. Cards are numbered across the whole
/// run, so with the default options page 293 yields cards 0-2, page 294
/// yields cards 3-5 and so on.
///
/// # Example
///
/// ```no_run
/// use pdf_cards::pdf::{split_cards, SplitOptions};
/// use std::path::Path;
///
/// let pages = split_cards(Path::new("paranoia.pdf"), &SplitOptions::default())
///     .expect("Failed to split cards");
/// println!("Split {} pages", pages.len());
/// ```
pub fn split_cards(path: &Path, options: &SplitOptions) -> Result<Vec<SourcePage>> {
    if !path.exists() {
        return Err(Error::FileNotFound(path.to_path_buf()));
    }
    options.validate()?;

    let doc = Document::load(path)?;
    let mut writer = options.writer()?;

    split_document(&doc, options, &mut writer)
}

/// Split pages of an already loaded document using `writer`
///
/// The whole page range is selected before the first card is written, so a
/// range past the end of the document fails without writing anything.
pub fn split_document(
    doc: &Document,
    options: &SplitOptions,
    writer: &mut CardWriter,
) -> Result<Vec<SourcePage>> {
    options.validate()?;

    let pages = select_pages(doc, options.page_start..options.page_end)?;

    for page in &pages {
        info!(
            "Splitting page {} into {} cards starting at card {}",
            page.index,
            options.bands_per_page,
            writer.next_number()
        );

        for card in extract_cards(page, options.bands_per_page) {
            writer.write(doc, &card)?;
        }
    }

    info!(
        "Wrote {} cards from {} pages to {}",
        pages.len() * options.bands_per_page,
        pages.len(),
        writer.output_dir().display()
    );

    Ok(pages)
}
