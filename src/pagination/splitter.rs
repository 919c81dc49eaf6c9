use super::{Block, Paragraph};

/// Splits manuscript text into paragraphs and forced page breaks.
///
/// Blank lines end a paragraph, and a line holding only `page_break` ends the pending paragraph
/// and emits a [`Block::ForcedBreak`]. Runs of blank lines never produce empty paragraphs.
pub(super) fn split(text: &str, page_break: &str) -> Vec<Block> {
    let mut blocks = Vec::new();
    let mut pending: Vec<&str> = Vec::new();

    for raw_line in text.split('\n') {
        let line = raw_line.strip_suffix('\r').unwrap_or(raw_line);
        let trimmed = line.trim();

        if trimmed.is_empty() {
            flush(&mut pending, &mut blocks);
        } else if trimmed == page_break {
            flush(&mut pending, &mut blocks);
            blocks.push(Block::ForcedBreak);
        } else {
            pending.push(line);
        }
    }
    flush(&mut pending, &mut blocks);

    blocks
}

fn flush(pending: &mut Vec<&str>, blocks: &mut Vec<Block>) {
    if pending.is_empty() {
        return;
    }
    blocks.push(Block::Paragraph(Paragraph::new(pending.join("\n"))));
    pending.clear();
}
