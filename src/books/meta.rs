//! Book metadata and catalog entries.
//!
//! `meta.json` is free-form: whatever keys the author puts there are carried through to the
//! catalog untouched. Only `id`, `title`, and `order` mean anything to this tool.

use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};

/// Contents of a book's `meta.json`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BookMeta(Map<String, Value>);

impl BookMeta {
    pub fn load(path: &Path) -> Result<BookMeta> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let value: Value = serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse {}", path.display()))?;
        match value {
            Value::Object(map) => Ok(BookMeta(map)),
            _ => Err(anyhow!("{} is not a JSON object", path.display())),
        }
    }

    /// The explicit book id, if the metadata names a usable one.
    pub fn id(&self) -> Option<String> {
        match self.0.get("id") {
            Some(Value::String(id)) if !id.is_empty() => Some(id.clone()),
            Some(Value::Number(id)) => Some(id.to_string()),
            _ => None,
        }
    }

    pub fn title(&self) -> Option<&str> {
        self.0
            .get("title")
            .and_then(Value::as_str)
            .filter(|title| !title.is_empty())
    }

    /// Explicit position of the book in the catalog.
    pub fn order(&self) -> Option<i64> {
        self.0.get("order").and_then(Value::as_i64)
    }
}

#[cfg(test)]
impl From<Value> for BookMeta {
    fn from(value: Value) -> Self {
        match value {
            Value::Object(map) => BookMeta(map),
            _ => BookMeta::default(),
        }
    }
}

/// A discovered book directory together with its metadata.
#[derive(Debug, Clone)]
pub struct Book {
    /// Directory name, unique within the books root.
    pub name: String,
    pub dir: PathBuf,
    pub meta: BookMeta,
}

impl Book {
    /// The book's identifier: the metadata id or, failing that, the directory name.
    pub fn id(&self) -> String {
        self.meta.id().unwrap_or_else(|| self.name.clone())
    }

    /// The book's display title: the metadata title or, failing that, the id.
    pub fn title(&self) -> String {
        self.meta
            .title()
            .map(ToString::to_string)
            .unwrap_or_else(|| self.id())
    }

    pub fn manuscript_path(&self) -> PathBuf {
        self.dir.join("manuscript.txt")
    }

    pub fn pages_dir(&self) -> PathBuf {
        self.dir.join("pages")
    }
}

/// One book in the aggregate catalog: its metadata plus the computed fields.
///
/// Keys keep the order they have in `meta.json`. A computed field the author already set is
/// overwritten in place; the others are appended.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct CatalogEntry(Map<String, Value>);

impl CatalogEntry {
    /// Builds the catalog entry for a book under `display_root`.
    pub fn new(book: &Book, display_root: &str, total_pages: usize) -> CatalogEntry {
        let mut fields = book.meta.0.clone();
        fields
            .entry("id")
            .or_insert_with(|| Value::String(book.name.clone()));
        fields.insert(
            "path".to_string(),
            Value::String(format!("{display_root}/{}/index.html", book.name)),
        );
        fields.insert("totalPages".to_string(), Value::from(total_pages));
        CatalogEntry(fields)
    }
}

#[cfg(test)]
impl CatalogEntry {
    pub fn id(&self) -> Option<&Value> {
        self.0.get("id")
    }

    pub fn path(&self) -> Option<&str> {
        self.0.get("path").and_then(Value::as_str)
    }
}
