//! Pagination tuning.
//!
//! Page size is approximated by character count rather than measured layout, so these three
//! values are all the engine needs. They are threaded into [`Paginator`](super::Paginator) at
//! construction so tests can probe the boundaries with small numbers instead of kilobyte-sized
//! fixtures.

use derive_builder::Builder;
use serde::{Deserialize, Serialize};

/// Size budget and break token used when packing paragraphs into pages.
#[derive(Builder, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[builder(setter(into), default)]
#[serde(default)]
pub struct PaginationConfig {
    /// Soft cap on the number of characters per page. A page only exceeds it when a single
    /// paragraph is already larger than the budget.
    pub target_chars: usize,
    /// A page finalized just before a heading with fewer characters than this is merged into the
    /// page before it.
    pub min_chars: usize,
    /// A manuscript line consisting of exactly this token (ignoring surrounding whitespace)
    /// forces a page break.
    pub page_break: String,
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self {
            target_chars: 1000,
            min_chars: 450,
            page_break: "===PAGE===".to_string(),
        }
    }
}
