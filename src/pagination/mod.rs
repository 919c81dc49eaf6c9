//! Manuscript pagination.
//!
//! A manuscript is turned into pages in three steps:
//! - the splitter breaks raw text into paragraphs and forced page breaks
//! - the packer greedily fills pages up to a character budget, starting a fresh page at every
//!   heading and folding short tails into the page before them
//! - the repair pass merges heading-only pages into the page that follows them
//!
//! Every step is total over its input: any text, including the empty string, paginates without
//! error (empty input simply yields no pages).

mod config;
mod packer;
mod repair;
mod splitter;

pub use config::*;

use std::fmt;

/// Separator placed between paragraphs when a page is serialized.
pub const PARAGRAPH_SEPARATOR: &str = "\n\n";

/// Marker that turns a paragraph into a heading.
pub const HEADING_MARKER: &str = "# ";

/// A maximal run of non-blank manuscript lines, trimmed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Paragraph(String);

impl Paragraph {
    pub fn new<S: AsRef<str>>(text: S) -> Paragraph {
        Paragraph(text.as_ref().trim().to_string())
    }

    pub fn text(&self) -> &str {
        &self.0
    }

    /// Length in characters, which is what the page budget is measured in.
    pub fn len(&self) -> usize {
        self.0.chars().count()
    }

    pub fn is_heading(&self) -> bool {
        self.0.trim_start().starts_with(HEADING_MARKER)
    }
}

impl fmt::Display for Paragraph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One element of the splitter's output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block {
    Paragraph(Paragraph),
    /// An explicit page break written by the author.
    ForcedBreak,
}

/// An ordered, non-empty run of paragraphs rendered as one reader page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Page {
    paragraphs: Vec<Paragraph>,
    length: usize,
}

impl Page {
    pub fn paragraphs(&self) -> &[Paragraph] {
        &self.paragraphs
    }

    /// Sum of the paragraph lengths, not counting separators.
    pub fn length(&self) -> usize {
        self.length
    }

    pub fn is_empty(&self) -> bool {
        self.paragraphs.is_empty()
    }

    /// A page whose only content is a single heading.
    pub fn is_heading_only(&self) -> bool {
        matches!(self.paragraphs.as_slice(), [only] if only.is_heading())
    }

    /// The page's raw text, paragraphs joined by a blank line.
    pub fn content(&self) -> String {
        self.paragraphs
            .iter()
            .map(Paragraph::text)
            .collect::<Vec<&str>>()
            .join(PARAGRAPH_SEPARATOR)
    }

    fn push(&mut self, paragraph: Paragraph) {
        self.length += paragraph.len();
        self.paragraphs.push(paragraph);
    }

    /// Appends another page's paragraphs after this page's.
    fn append(&mut self, other: Page) {
        self.length += other.length;
        self.paragraphs.extend(other.paragraphs);
    }
}

impl FromIterator<Paragraph> for Page {
    fn from_iter<I: IntoIterator<Item = Paragraph>>(iter: I) -> Self {
        let mut page = Page::default();
        for paragraph in iter {
            page.push(paragraph);
        }
        page
    }
}

/// Runs the full split, pack, and repair pipeline with a fixed configuration.
#[derive(Debug, Clone, Default)]
pub struct Paginator {
    config: PaginationConfig,
}

impl Paginator {
    pub fn new(config: PaginationConfig) -> Paginator {
        Paginator { config }
    }

    pub fn config(&self) -> &PaginationConfig {
        &self.config
    }

    /// Splits newline-normalized manuscript text into paragraphs and forced breaks.
    pub fn split(&self, text: &str) -> Vec<Block> {
        splitter::split(text, &self.config.page_break)
    }

    /// Packs blocks into pages without the heading repair pass.
    pub fn pack<I: IntoIterator<Item = Block>>(&self, blocks: I) -> Vec<Page> {
        packer::Packer::new(&self.config).pack(blocks)
    }

    /// Merges heading-only pages into their successors.
    pub fn repair(&self, pages: Vec<Page>) -> Vec<Page> {
        repair::merge_heading_only_pages(pages)
    }

    /// Paginates a whole manuscript.
    pub fn paginate(&self, text: &str) -> Vec<Page> {
        let blocks = self.split(text);
        let pages = self.pack(blocks);
        self.repair(pages)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn small_paginator() -> Paginator {
        Paginator::new(
            PaginationConfigBuilder::default()
                .target_chars(40usize)
                .min_chars(15usize)
                .build()
                .expect("can build pagination config"),
        )
    }

    fn texts(pages: &[Page]) -> Vec<String> {
        pages.iter().map(Page::content).collect()
    }

    #[test]
    fn paragraph_is_trimmed() {
        let paragraph = Paragraph::new("  \n hello\nworld \n");
        assert_eq!(paragraph.text(), "hello\nworld");
        assert_eq!(paragraph.len(), 11);
    }

    #[test]
    fn paragraph_length_counts_characters() {
        assert_eq!(Paragraph::new("héllo wörld").len(), 11);
    }

    #[test]
    fn heading_needs_marker_and_space() {
        assert!(Paragraph::new("# Chapter One").is_heading());
        assert!(!Paragraph::new("#Chapter One").is_heading());
        assert!(!Paragraph::new("## Chapter One").is_heading());
        assert!(!Paragraph::new("Chapter # One").is_heading());
    }

    #[test]
    fn page_content_joins_with_blank_line() {
        let page: Page = ["a", "b c"].into_iter().map(Paragraph::new).collect();
        assert_eq!(page.content(), "a\n\nb c");
        assert_eq!(page.length(), 4);
    }

    #[test]
    fn empty_manuscript_has_no_pages() {
        assert!(Paginator::default().paginate("").is_empty());
        assert!(Paginator::default().paginate("\n\n   \n").is_empty());
    }

    #[test]
    fn only_break_markers_have_no_pages() {
        assert!(Paginator::default()
            .paginate("===PAGE===\n===PAGE===")
            .is_empty());
    }

    #[test]
    fn short_first_chapter_stays_on_its_own() {
        let pages = small_paginator().paginate("# One\n\nShort.\n\n# Two\n\nMore text.");
        assert_eq!(
            texts(&pages),
            vec!["# One\n\nShort.".to_string(), "# Two\n\nMore text.".to_string()]
        );
    }

    #[test]
    fn short_tail_before_heading_joins_previous_page() {
        // "Tail." overflows the budget onto its own page, then folds back before "# Two".
        let filler = "A".repeat(31);
        let text = format!("# One\n\n{filler}\n\nTail.\n\n# Two\n\nBody.");
        let pages = small_paginator().paginate(&text);
        assert_eq!(
            texts(&pages),
            vec![
                format!("# One\n\n{filler}\n\nTail."),
                "# Two\n\nBody.".to_string(),
            ]
        );
    }

    #[test]
    fn consecutive_headings_collapse_onto_one_page() {
        let pages = small_paginator().paginate("# Part One\n\n# Chapter One\n\nIt begins.");
        assert_eq!(
            texts(&pages),
            vec!["# Part One\n\n# Chapter One\n\nIt begins.".to_string()]
        );
    }

    #[test]
    fn crlf_lines_are_accepted() {
        let pages = small_paginator().paginate("# One\r\n\r\nBody.\r\n");
        assert_eq!(texts(&pages), vec!["# One\n\nBody.".to_string()]);
    }

    fn manuscript() -> impl Strategy<Value = String> {
        let line = prop_oneof![
            3 => "[a-z]{1,30}( [a-z]{1,12}){0,4}",
            1 => "# [A-Z][a-z]{0,10}",
            1 => Just("===PAGE===".to_string()),
            2 => Just(String::new()),
            1 => Just("   ".to_string()),
        ];
        prop::collection::vec(line, 0..60).prop_map(|lines| lines.join("\n"))
    }

    fn paragraphs_of(blocks: Vec<Block>) -> Vec<Paragraph> {
        blocks
            .into_iter()
            .filter_map(|block| match block {
                Block::Paragraph(paragraph) => Some(paragraph),
                Block::ForcedBreak => None,
            })
            .collect()
    }

    proptest! {
        #[test]
        fn prop_pages_are_never_empty(text in manuscript()) {
            let paginator = small_paginator();
            let packed = paginator.pack(paginator.split(&text));
            prop_assert!(packed.iter().all(|page| !page.is_empty()));
            let repaired = paginator.repair(packed);
            prop_assert!(repaired.iter().all(|page| !page.is_empty()));
        }

        #[test]
        fn prop_only_last_page_may_be_heading_only(text in manuscript()) {
            let pages = small_paginator().paginate(&text);
            if let Some((_, init)) = pages.split_last() {
                prop_assert!(init.iter().all(|page| !page.is_heading_only()));
            }
        }

        #[test]
        fn prop_paragraphs_survive_pagination(text in manuscript()) {
            let paginator = small_paginator();
            let expected = paragraphs_of(paginator.split(&text));
            let actual: Vec<Paragraph> = paginator
                .paginate(&text)
                .into_iter()
                .flat_map(|page| page.paragraphs)
                .collect();
            prop_assert_eq!(expected, actual);
        }

        #[test]
        fn prop_page_length_is_sum_of_paragraphs(text in manuscript()) {
            for page in small_paginator().paginate(&text) {
                let sum: usize = page.paragraphs().iter().map(Paragraph::len).sum();
                prop_assert_eq!(page.length(), sum);
            }
        }
    }
}
