//! Codex cross-reference index.
//!
//! Rendered pages may contain shortcodes of the form `[[codex:ID|Label]]`. This module scans every
//! book's generated pages for them and writes a JSON index mapping each codex id to the pages it
//! appears on, so the codex can show "appears in" links. It only reads files the book driver has
//! already written and never touches pagination.

use crate::books::{discover_books, Book};
use anyhow::{Context, Result};
use globset::{Glob, GlobMatcher};
use regex_lite::Regex;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

/// Matches `[[codex:some-id|Visible Text]]`
static CODEX_SHORTCODE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[\[codex:([^|\]]+)\|([^\]]+)\]\]").unwrap());

/// Reference index output configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReferencesConfig {
    /// Output path of the reference index.
    pub output: PathBuf,
}

impl Default for ReferencesConfig {
    fn default() -> Self {
        Self {
            output: PathBuf::from("Codex").join("references.json"),
        }
    }
}

/// One place a codex id appears.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Occurrence {
    pub book_id: String,
    pub book_title: String,
    pub page: usize,
}

/// Codex id to every page it appears on.
pub type ReferenceIndex = BTreeMap<String, Vec<Occurrence>>;

/// Extract the page number from a page file name such as `page1.html`, `page-1.html`, or
/// `1.html`: the first run of digits in the file stem.
pub fn page_number(path: &Path) -> Option<usize> {
    let stem = path.file_stem()?.to_str()?;
    let start = stem.find(|c: char| c.is_ascii_digit())?;
    let digits = &stem[start..];
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    digits[..end].parse().ok()
}

/// Codex ids of every shortcode in `text`, in order of appearance.
pub fn shortcode_ids(text: &str) -> impl Iterator<Item = &str> {
    CODEX_SHORTCODE_RE
        .captures_iter(text)
        .filter_map(|caps| caps.get(1))
        .map(|id| id.as_str().trim())
        .filter(|id| !id.is_empty())
}

/// Add every occurrence found in one book's pages to `index`.
pub fn scan_book(book: &Book, index: &mut ReferenceIndex) -> Result<()> {
    let pages_dir = book.pages_dir();
    let book_id = book.id();
    if !pages_dir.is_dir() {
        log::info!("No pages/ directory for book {book_id}, skipping.");
        return Ok(());
    }

    let html: GlobMatcher = Glob::new("*.html")
        .with_context(|| "Failed to build page glob")?
        .compile_matcher();
    let book_title = book.title();

    let mut page_files: Vec<PathBuf> = std::fs::read_dir(&pages_dir)
        .with_context(|| format!("Failed to list {}", pages_dir.display()))?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| path.is_file())
        .filter(|path| path.file_name().is_some_and(|name| html.is_match(name)))
        .collect();
    page_files.sort();

    for page_file in page_files {
        let Some(page) = page_number(&page_file) else {
            continue;
        };

        let bytes = match std::fs::read(&page_file) {
            Ok(bytes) => bytes,
            Err(e) => {
                log::warn!("Failed to read {}: {e}", page_file.display());
                continue;
            }
        };
        let text = String::from_utf8_lossy(&bytes);

        for id in shortcode_ids(&text) {
            index.entry(id.to_string()).or_default().push(Occurrence {
                book_id: book_id.clone(),
                book_title: book_title.clone(),
                page,
            });
        }
    }

    Ok(())
}

/// Sort each id's occurrences by book title (case-insensitively) then page, keeping only the
/// first occurrence of each `(book, page)` pair.
pub fn normalize(index: &mut ReferenceIndex) {
    for occurrences in index.values_mut() {
        occurrences.sort_by(|a, b| {
            a.book_title
                .to_lowercase()
                .cmp(&b.book_title.to_lowercase())
                .then(a.page.cmp(&b.page))
        });
        let mut seen: HashSet<(String, usize)> = HashSet::new();
        occurrences.retain(|o| seen.insert((o.book_id.clone(), o.page)));
    }
}

/// Scan every book under `books_root`.
pub fn build_index(books_root: &Path) -> Result<ReferenceIndex> {
    let (books, _) = discover_books(books_root)?;
    let mut index = ReferenceIndex::new();
    for book in &books {
        if let Err(e) = scan_book(book, &mut index) {
            log::warn!("Failed to scan book {}: {e:#}", book.name);
        }
    }
    normalize(&mut index);
    Ok(index)
}

/// Write the index as pretty-printed JSON, creating the output directory if needed.
pub fn write_index(path: &Path, index: &ReferenceIndex) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    let json = serde_json::to_string_pretty(index)
        .with_context(|| "Failed to serialize reference index")?;
    std::fs::write(path, json).with_context(|| format!("Failed to write {}", path.display()))
}
