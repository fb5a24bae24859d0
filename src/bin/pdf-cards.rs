//! PDF Cards CLI tool
//!
//! A command-line tool for splitting rulebook pages into card PDFs.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process;

use pdf_cards::pdf::{extract_metadata, split_cards, SplitOptions};

/// PDF Cards - Split rulebook pages into one PDF per card
#[derive(Parser)]
#[command(name = "pdf-cards")]
#[command(author, version, about, long_about = None)]
#[command(after_help = "EXAMPLES:
    # Split the card pages of the Paranoia rulebook into the current directory
    pdf-cards split paranoia.pdf

    # Split pages 10-11 (zero-based) into quarters, numbering from 100
    pdf-cards split rules.pdf --start 10 --end 12 --bands 4 --first-number 100 -o cards

    # Show the page count before picking a range
    pdf-cards info rules.pdf")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Split a page range into card PDFs
    Split {
        /// Input PDF file
        input: PathBuf,

        /// First page to split (zero-based, inclusive)
        #[arg(long, default_value_t = 293)]
        start: u32,

        /// End of the page range (zero-based, exclusive)
        #[arg(long, default_value_t = 332)]
        end: u32,

        /// Number of cards per page, stacked vertically
        #[arg(long, default_value_t = 3)]
        bands: usize,

        /// Output file name template; {n} is replaced by the card number
        #[arg(long, default_value = "card_num-{n}.pdf")]
        template: String,

        /// Directory to write cards into
        #[arg(short, long, default_value = ".")]
        output_dir: PathBuf,

        /// Number of the first card written
        #[arg(long, default_value_t = 0)]
        first_number: usize,
    },

    /// Show information about a PDF file
    Info {
        /// PDF file to inspect
        input: PathBuf,
    },
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Split {
            input, start, end, bands, template, output_dir, first_number,
        } => {
            let options = SplitOptions {
                page_start: start,
                page_end: end,
                bands_per_page: bands,
                output_template: template,
                output_dir,
                first_number,
            };
            cmd_split(input, options)
        }
        Commands::Info { input } => {
            cmd_info(input)
        }
    };

    if let Err(e) = result {
        eprintln!("Error: {:#}", e);
        process::exit(1);
    }
}

/// Split pages into cards
fn cmd_split(input: PathBuf, options: SplitOptions) -> Result<()> {
    let pages = split_cards(&input, &options)
        .with_context(|| format!("Failed to split {}", input.display()))?;

    eprintln!(
        "Wrote {} cards from {} pages to {}",
        pages.len() * options.bands_per_page,
        pages.len(),
        options.output_dir.display()
    );

    Ok(())
}

/// Show information about a PDF
fn cmd_info(input: PathBuf) -> Result<()> {
    let metadata = extract_metadata(&input)
        .with_context(|| format!("Failed to read {}", input.display()))?;

    println!("File: {}", input.display());
    println!("Pages: {}", metadata.page_count);

    if let Some(title) = metadata.title {
        println!("Title: {}", title);
    }
    if let Some(author) = metadata.author {
        println!("Author: {}", author);
    }

    Ok(())
}
