//! The book driver.
//!
//! Walks the books root, paginates each book's manuscript into `pages/pageN.html`, and collects
//! every book's metadata into the catalog. Failures are scoped to the book they happen in: a book
//! with broken metadata is reported and left out, the rest of the run carries on.

mod config;
mod meta;
mod ordering;

pub use config::*;
pub use meta::*;
pub use ordering::*;

use crate::pagination::Paginator;
use crate::rendering::{page_file_name, render_page};
use anyhow::{anyhow, Context, Result};
use indicatif::ProgressBar;
use std::path::Path;

/// Outcome of a full build, used for user feedback.
#[derive(Debug, Default)]
pub struct BuildStats {
    /// Books written to the catalog
    pub book_count: usize,
    /// Pages written across all books
    pub page_count: usize,
    /// Book directories left out of the catalog
    pub skipped_count: usize,
}

/// Find every book directory under `root` that has usable metadata, in catalog order.
///
/// Directories without a `meta.json` and directories whose metadata can't be read are reported
/// and skipped; the second value counts them.
pub fn discover_books(root: &Path) -> Result<(Vec<Book>, usize)> {
    if !root.is_dir() {
        return Err(anyhow!("No '{}' folder found", root.display()));
    }

    let mut books = Vec::new();
    let mut skipped = 0;

    let entries = std::fs::read_dir(root)
        .with_context(|| format!("Failed to list books in {}", root.display()))?;
    for entry in entries {
        let entry =
            entry.with_context(|| format!("Failed to list books in {}", root.display()))?;
        let dir = entry.path();
        if !dir.is_dir() {
            continue;
        }
        let name = entry.file_name().to_string_lossy().to_string();

        let meta_path = dir.join("meta.json");
        if !meta_path.exists() {
            log::warn!("No meta.json in {}, skipping this book", dir.display());
            skipped += 1;
            continue;
        }
        match BookMeta::load(&meta_path) {
            Ok(meta) => books.push(Book { name, dir, meta }),
            Err(e) => {
                log::warn!("Skipping book {name}: {e:#}");
                skipped += 1;
            }
        }
    }

    sort_books(&mut books);
    Ok((books, skipped))
}

/// Paginate one book and write its pages. Returns the number of pages written.
///
/// A book without a manuscript gets an (empty) pages directory and zero pages.
pub fn build_book(book: &Book, paginator: &Paginator, clean_stale_pages: bool) -> Result<usize> {
    let pages_dir = book.pages_dir();
    std::fs::create_dir_all(&pages_dir)
        .with_context(|| format!("Failed to create {}", pages_dir.display()))?;

    let manuscript_path = book.manuscript_path();
    if !manuscript_path.exists() {
        log::warn!(
            "No manuscript.txt in {}, skipping pages",
            book.dir.display()
        );
        return Ok(0);
    }

    let text = std::fs::read_to_string(&manuscript_path)
        .with_context(|| format!("Failed to read {}", manuscript_path.display()))?
        .replace("\r\n", "\n");

    let pages = paginator.paginate(&text);
    for (i, page) in pages.iter().enumerate() {
        let path = pages_dir.join(page_file_name(i + 1));
        log::debug!(
            "{}: {} paragraphs, {} characters",
            path.display(),
            page.paragraphs().len(),
            page.length()
        );
        std::fs::write(&path, render_page(page))
            .with_context(|| format!("Failed to write {}", path.display()))?;
    }

    if clean_stale_pages {
        remove_stale_pages(&pages_dir, pages.len())?;
    }

    Ok(pages.len())
}

/// Delete `pageN.html` files with `N` beyond the current page count.
fn remove_stale_pages(pages_dir: &Path, page_count: usize) -> Result<()> {
    let entries = std::fs::read_dir(pages_dir)
        .with_context(|| format!("Failed to list {}", pages_dir.display()))?;
    for entry in entries {
        let entry = entry.with_context(|| format!("Failed to list {}", pages_dir.display()))?;
        let file_name = entry.file_name();
        let Some(index) = file_name
            .to_str()
            .and_then(|name| name.strip_prefix("page"))
            .and_then(|name| name.strip_suffix(".html"))
            .filter(|index| !index.is_empty() && index.bytes().all(|b| b.is_ascii_digit()))
            .and_then(|index| index.parse::<usize>().ok())
        else {
            continue;
        };

        if index > page_count {
            let path = entry.path();
            log::debug!("removing stale page {}", path.display());
            std::fs::remove_file(&path)
                .with_context(|| format!("Failed to remove stale page {}", path.display()))?;
        }
    }
    Ok(())
}

/// Build every book under the configured root and write the catalog.
pub fn build_all(
    config: &BooksConfig,
    paginator: &Paginator,
    progress: &ProgressBar,
) -> Result<BuildStats> {
    let (books, skipped_count) = discover_books(&config.root)?;
    let display_root = config.display_root();

    progress.set_length(books.len() as u64);

    let mut stats = BuildStats {
        skipped_count,
        ..BuildStats::default()
    };
    let mut catalog = Vec::with_capacity(books.len());

    for book in &books {
        progress.set_message(format!("Processing book: {}", book.name));
        match build_book(book, paginator, config.clean_stale_pages) {
            Ok(page_count) => {
                progress.println(format!(
                    "  {} Generated {} pages in {}",
                    console::style("✓").green(),
                    page_count,
                    book.pages_dir().display()
                ));
                stats.page_count += page_count;
                catalog.push(CatalogEntry::new(book, &display_root, page_count));
            }
            Err(e) => {
                log::warn!("Failed to build book {}: {e:#}", book.name);
                stats.skipped_count += 1;
            }
        }
        progress.inc(1);
    }

    write_catalog(&config.catalog, &catalog)?;
    stats.book_count = catalog.len();

    progress.finish_and_clear();
    Ok(stats)
}

/// Write the catalog as pretty-printed JSON.
pub fn write_catalog(path: &Path, catalog: &[CatalogEntry]) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    let json =
        serde_json::to_string_pretty(catalog).with_context(|| "Failed to serialize catalog")?;
    std::fs::write(path, json).with_context(|| format!("Failed to write {}", path.display()))
}
