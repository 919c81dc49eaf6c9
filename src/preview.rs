//! Dry-run pagination of a single manuscript.
//!
//! Useful for tuning the page budget: prints one line per page without touching any book
//! directory.

use crate::pagination::{Page, Paginator};
use anyhow::{Context, Result};
use std::path::Path;

/// Longest first-line excerpt shown per page, in characters.
const EXCERPT_CHARS: usize = 48;

/// One summary line for the page at a 1-based index.
pub fn summarize(index: usize, page: &Page) -> String {
    let first_line = page
        .paragraphs()
        .first()
        .and_then(|p| p.text().lines().next())
        .unwrap_or_default();
    let mut excerpt: String = first_line.chars().take(EXCERPT_CHARS).collect();
    if first_line.chars().count() > EXCERPT_CHARS {
        excerpt.push('…');
    }

    format!(
        "{:>5}  {:>3} ¶  {:>6} chars  {}",
        index,
        page.paragraphs().len(),
        page.length(),
        excerpt
    )
}

pub fn run(manuscript: &Path, paginator: &Paginator) -> Result<()> {
    let text = std::fs::read_to_string(manuscript)
        .with_context(|| format!("Failed to read {}", manuscript.display()))?
        .replace("\r\n", "\n");

    let pages = paginator.paginate(&text);
    for (i, page) in pages.iter().enumerate() {
        println!("{}", summarize(i + 1, page));
    }

    let config = paginator.config();
    println!();
    println!(
        "{} pages (target {} chars, minimum {} chars before a heading)",
        console::style(pages.len()).bold(),
        config.target_chars,
        config.min_chars
    );
    Ok(())
}
