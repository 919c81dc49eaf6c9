//! Greedy page packing.
//!
//! Paragraphs are appended to the page under construction until the next one would push it over
//! the character budget. Headings always open a fresh page, and forced breaks close the current
//! page regardless of its size. When a heading closes a page that is shorter than the orphan
//! threshold, that sliver is folded into the previous completed page instead of standing alone.
//! The first page of a book has no predecessor and is therefore never folded.

use super::{Block, Page, PaginationConfig, Paragraph};

pub(super) struct Packer<'c> {
    config: &'c PaginationConfig,
    pages: Vec<Page>,
    current: Page,
}

impl<'c> Packer<'c> {
    pub fn new(config: &'c PaginationConfig) -> Packer<'c> {
        Packer {
            config,
            pages: Vec::new(),
            current: Page::default(),
        }
    }

    pub fn pack<I: IntoIterator<Item = Block>>(mut self, blocks: I) -> Vec<Page> {
        for block in blocks {
            match block {
                Block::ForcedBreak => self.finish_page(),
                Block::Paragraph(paragraph) if paragraph.is_heading() => {
                    self.start_heading(paragraph)
                }
                Block::Paragraph(paragraph) => self.add_paragraph(paragraph),
            }
        }
        self.finish_page();
        self.pages
    }

    /// Closes the current page, if it has any content.
    fn finish_page(&mut self) {
        if !self.current.is_empty() {
            let page = std::mem::take(&mut self.current);
            log::trace!("closing page of {} characters", page.length());
            self.pages.push(page);
        }
    }

    fn start_heading(&mut self, heading: Paragraph) {
        let orphan = !self.current.is_empty() && self.current.length() < self.config.min_chars;
        match self.pages.last_mut() {
            Some(previous) if orphan => {
                let tail = std::mem::take(&mut self.current);
                log::trace!(
                    "folding {} character tail into previous page before {:?}",
                    tail.length(),
                    heading.text()
                );
                previous.append(tail);
            }
            _ => self.finish_page(),
        }
        self.current.push(heading);
    }

    fn add_paragraph(&mut self, paragraph: Paragraph) {
        if !self.current.is_empty()
            && self.current.length() + paragraph.len() > self.config.target_chars
        {
            self.finish_page();
        }
        self.current.push(paragraph);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pagination::PaginationConfigBuilder;

    fn config(target_chars: usize, min_chars: usize) -> PaginationConfig {
        PaginationConfigBuilder::default()
            .target_chars(target_chars)
            .min_chars(min_chars)
            .build()
            .expect("can build pagination config")
    }

    fn para(text: &str) -> Block {
        Block::Paragraph(Paragraph::new(text))
    }

    fn pack(config: &PaginationConfig, blocks: Vec<Block>) -> Vec<Vec<String>> {
        Packer::new(config)
            .pack(blocks)
            .into_iter()
            .map(|page| {
                page.paragraphs()
                    .iter()
                    .map(|p| p.text().to_string())
                    .collect()
            })
            .collect()
    }

    #[test]
    fn paragraphs_fill_up_to_budget() {
        let config = config(10, 0);
        // 5 + 5 fits exactly, the third overflows onto a new page
        assert_eq!(
            pack(&config, vec![para("aaaaa"), para("bbbbb"), para("c")]),
            vec![vec!["aaaaa", "bbbbb"], vec!["c"]]
        );
    }

    #[test]
    fn oversized_paragraph_is_its_own_page() {
        let config = config(10, 0);
        let big = "x".repeat(25);
        assert_eq!(
            pack(&config, vec![para("a"), para(&big), para("b")]),
            vec![vec!["a".to_string()], vec![big], vec!["b".to_string()]]
        );
    }

    #[test]
    fn oversized_first_paragraph_is_not_split() {
        let config = config(10, 0);
        let big = "x".repeat(25);
        let pages = Packer::new(&config).pack(vec![para(&big)]);
        assert_eq!(pages.len(), 1);
        assert_eq!(pages[0].length(), 25);
    }

    #[test]
    fn forced_break_ignores_size() {
        let config = config(1000, 0);
        assert_eq!(
            pack(&config, vec![para("a"), Block::ForcedBreak, para("b")]),
            vec![vec!["a"], vec!["b"]]
        );
    }

    #[test]
    fn forced_breaks_without_content_are_no_ops() {
        let config = config(1000, 0);
        assert!(pack(&config, vec![Block::ForcedBreak, Block::ForcedBreak]).is_empty());
        assert_eq!(
            pack(
                &config,
                vec![para("a"), Block::ForcedBreak, Block::ForcedBreak, para("b")]
            ),
            vec![vec!["a"], vec!["b"]]
        );
    }

    #[test]
    fn heading_starts_new_page() {
        let config = config(1000, 0);
        assert_eq!(
            pack(&config, vec![para("intro"), para("# One"), para("body")]),
            vec![vec!["intro"], vec!["# One", "body"]]
        );
    }

    #[test]
    fn short_first_page_before_heading_stays() {
        let config = config(1000, 450);
        assert_eq!(
            pack(
                &config,
                vec![para("# One"), para("Short."), para("# Two"), para("More text...")]
            ),
            vec![vec!["# One", "Short."], vec!["# Two", "More text..."]]
        );
    }

    #[test]
    fn short_page_before_heading_merges_into_previous() {
        let config = config(1000, 450);
        assert_eq!(
            pack(
                &config,
                vec![
                    para("first"),
                    Block::ForcedBreak,
                    para("# One"),
                    para("Short."),
                    para("# Two"),
                    para("More text..."),
                ]
            ),
            vec![
                vec!["first", "# One", "Short."],
                vec!["# Two", "More text..."]
            ]
        );
    }

    #[test]
    fn long_enough_page_before_heading_stands_alone() {
        let config = config(1000, 5);
        assert_eq!(
            pack(
                &config,
                vec![para("first"), Block::ForcedBreak, para("second"), para("# Two")]
            ),
            vec![vec!["first"], vec!["second"], vec!["# Two"]]
        );
    }

    #[test]
    fn threshold_is_strictly_less_than() {
        // "abcde" is exactly min_chars long, so it is kept as its own page
        let config = config(1000, 5);
        assert_eq!(
            pack(
                &config,
                vec![para("x"), Block::ForcedBreak, para("abcde"), para("# H")]
            ),
            vec![vec!["x"], vec!["abcde"], vec!["# H"]]
        );
    }

    #[test]
    fn trailing_short_page_is_not_merged() {
        let config = config(10, 450);
        assert_eq!(
            pack(&config, vec![para("aaaaaaaaaa"), para("b")]),
            vec![vec!["aaaaaaaaaa"], vec!["b"]]
        );
    }

    #[test]
    fn merged_page_length_includes_tail() {
        let config = config(1000, 450);
        let pages = Packer::new(&config).pack(vec![
            para("abc"),
            Block::ForcedBreak,
            para("de"),
            para("# H"),
        ]);
        assert_eq!(pages.len(), 2);
        assert_eq!(pages[0].length(), 5);
        assert_eq!(pages[1].length(), 3);
    }

    #[test]
    fn heading_length_counts_toward_budget() {
        let config = config(10, 0);
        assert_eq!(
            pack(&config, vec![para("# Head"), para("abcd"), para("e")]),
            vec![vec!["# Head", "abcd"], vec!["e"]]
        );
    }
}
