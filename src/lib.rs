//! PDF Cards Library
//!
//! Splits pages of a rulebook PDF into horizontal bands ("cards") and writes
//! each card to its own single-page PDF. This library provides functionality to:
//! - Select a range of pages from a PDF
//! - Divide each page into equal horizontal bands
//! - Write each band as a numbered single-page PDF
//! - Read basic metadata (page counts, title, author)
//!
//! A card only narrows the visible region of its page. The page content is
//! copied as-is, so content outside the band is still present in the file,
//! just not displayed.
//!
//! # Example
//!
//! ```no_run
//! use pdf_cards::pdf::{split_cards, SplitOptions};
//! use std::path::{Path, PathBuf};
//!
//! let options = SplitOptions {
//!     output_dir: PathBuf::from("cards"),
//!     ..SplitOptions::default()
//! };
//!
//! split_cards(Path::new("paranoia.pdf"), &options).expect("Failed to split cards");
//! ```

pub mod error;
pub mod layout;
pub mod pdf;

// Re-export commonly used items
pub use error::{Error, Result};
