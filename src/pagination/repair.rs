use super::Page;

/// Merges every heading-only page into the page that follows it.
///
/// After a merge the cursor re-examines the same index before advancing; the merged page holds at
/// least two paragraphs, so it always passes on the second look. A page of several headings and
/// nothing else is therefore kept, as is a heading-only final page, which has nothing to merge
/// into. Each merge removes a page, which bounds the loop by the initial page count.
pub(super) fn merge_heading_only_pages(mut pages: Vec<Page>) -> Vec<Page> {
    let mut i = 0;
    while i + 1 < pages.len() {
        if pages[i].is_heading_only() {
            let next = pages.remove(i + 1);
            log::trace!("merging heading-only page {} into its successor", i + 1);
            pages[i].append(next);
            continue;
        }
        i += 1;
    }
    pages
}
