//! HTML rendering for paginated pages.
//!
//! Every non-blank line of a page becomes its own block element: heading lines turn into chapter
//! titles and everything else into paragraphs. The fragment is wrapped in the fixed page column
//! container the reader UI pages through.

mod inline;

pub use inline::format_inline;

use crate::pagination::{Page, HEADING_MARKER};

/// Render raw page text into block-level HTML, one element per non-blank line.
pub fn render_blocks(text: &str) -> String {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(|line| match line.strip_prefix(HEADING_MARKER) {
            Some(title) => format!(
                r#"<h2 class="chapter-title">{}</h2>"#,
                format_inline(title.trim())
            ),
            None => format!("<p>{}</p>", format_inline(line)),
        })
        .collect::<Vec<String>>()
        .join("\n")
}

/// Render a page into its standalone document.
pub fn render_page(page: &Page) -> String {
    format!(
        "<article class=\"page-column\">\n{}\n</article>\n",
        render_blocks(&page.content())
    )
}

/// File name of the page at a 1-based index.
pub fn page_file_name(index: usize) -> String {
    format!("page{index}.html")
}
