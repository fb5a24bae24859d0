//! PDF card splitting module

pub mod pages;
pub mod cards;
pub mod writer;
pub mod split;
pub mod metadata;

// Re-export commonly used items
pub use pages::{select_pages, media_box, SourcePage};
pub use cards::{extract_cards, Card};
pub use writer::{card_document, CardWriter};
pub use split::{split_cards, split_document, SplitOptions};
pub use metadata::{count_pages, extract_metadata, PdfMetadata};
