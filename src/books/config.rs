//! Book tree configuration.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Where books live and where the catalog is written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BooksConfig {
    /// Directory holding one sub-directory per book, each with a `meta.json` and a
    /// `manuscript.txt`.
    pub root: PathBuf,
    /// Output path of the aggregate book catalog.
    pub catalog: PathBuf,
    /// Delete `pageN.html` files left over from an earlier, longer build of the same book.
    pub clean_stale_pages: bool,
}

impl Default for BooksConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("Books"),
            catalog: PathBuf::from("books.json"),
            clean_stale_pages: true,
        }
    }
}

impl BooksConfig {
    /// The root as it appears in catalog paths, always `/`-separated and without a trailing
    /// slash.
    pub fn display_root(&self) -> String {
        let root = self.root.to_string_lossy().replace('\\', "/");
        root.trim_end_matches('/').to_string()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn display_root_strips_trailing_slash() {
        let config = BooksConfig {
            root: PathBuf::from("library/Books/"),
            ..BooksConfig::default()
        };
        assert_eq!(config.display_root(), "library/Books");
        assert_eq!(BooksConfig::default().display_root(), "Books");
    }

    #[test]
    fn can_roundtrip_books_config() {
        let config = BooksConfig::default();
        let toml_str = toml::to_string(&config).expect("can serialize");
        let deserialized: BooksConfig = toml::from_str(&toml_str).expect("can deserialize");
        assert_eq!(config, deserialized);
    }
}
