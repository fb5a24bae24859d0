//! Card extraction: dividing a page into horizontal bands

use lopdf::ObjectId;
use crate::layout::BoundingBox;
use super::pages::SourcePage;

/// One band of a source page
///
/// A card does not own or copy page content. It refers to the source page by
/// object id and carries its own box, so changing a card's box never affects
/// the source page or its sibling cards.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Card {
    /// Object id of the source page in the source document
    pub page_id: ObjectId,
    /// Zero-based index of the source page
    pub page_index: u32,
    /// Band index, 0 is the bottom of the page
    pub band: usize,
    /// Visible region of the card
    pub media_box: BoundingBox,
}

/// Split a page into `bands` cards of equal height, bottom to top
///
/// Bands cover `0..ury` of the page box and span `0..urx` horizontally.
pub fn extract_cards(page: &SourcePage, bands: usize) -> Vec<Card> {
    page.media_box
        .bands(bands)
        .into_iter()
        .enumerate()
        .map(|(band, media_box)| Card {
            page_id: page.id,
            page_index: page.index,
            band,
            media_box,
        })
        .collect()
}
