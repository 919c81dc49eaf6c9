//! Inline emphasis markup.
//!
//! `***x***`, `**x**`, and `*x*` become strong-emphasis, strong, and emphasis respectively. The
//! rules run in that order, each once over the whole line, so a triple marker is never half
//! consumed by the double or single rule. Markers cannot nest or span other asterisks.

use regex_lite::Regex;
use std::sync::LazyLock;

struct InlineRule {
    pattern: LazyLock<Regex>,
    replacement: &'static str,
}

static RULES: [InlineRule; 3] = [
    InlineRule {
        pattern: LazyLock::new(|| Regex::new(r"\*\*\*([^*]+)\*\*\*").unwrap()),
        replacement: "<strong><em>${1}</em></strong>",
    },
    InlineRule {
        pattern: LazyLock::new(|| Regex::new(r"\*\*([^*]+)\*\*").unwrap()),
        replacement: "<strong>${1}</strong>",
    },
    InlineRule {
        pattern: LazyLock::new(|| Regex::new(r"\*([^*]+)\*").unwrap()),
        replacement: "<em>${1}</em>",
    },
];

/// Escapes a line of plain text for HTML and applies the emphasis rules.
pub fn format_inline(text: &str) -> String {
    let mut html = html_escape::encode_quoted_attribute(text).into_owned();
    for rule in &RULES {
        html = rule
            .pattern
            .replace_all(&html, rule.replacement)
            .into_owned();
    }
    html
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_text_is_unchanged() {
        assert_eq!(format_inline("Hello world."), "Hello world.");
    }

    #[test]
    fn single_marker_is_emphasis() {
        assert_eq!(format_inline("Hello *world*."), "Hello <em>world</em>.");
    }

    #[test]
    fn double_marker_is_strong() {
        assert_eq!(
            format_inline("a **bold** move"),
            "a <strong>bold</strong> move"
        );
    }

    #[test]
    fn triple_marker_is_strong_emphasis() {
        assert_eq!(
            format_inline("***loud***"),
            "<strong><em>loud</em></strong>"
        );
    }

    #[test]
    fn mixed_markers_on_one_line() {
        assert_eq!(
            format_inline("*a* **b** ***c***"),
            "<em>a</em> <strong>b</strong> <strong><em>c</em></strong>"
        );
    }

    #[test]
    fn text_is_escaped_before_markup() {
        assert_eq!(
            format_inline("*<b>* & \"quotes\" 'too'"),
            "<em>&lt;b&gt;</em> &amp; &quot;quotes&quot; &#x27;too&#x27;"
        );
    }

    #[test]
    fn unmatched_marker_is_left_alone() {
        assert_eq!(format_inline("2 * 3 = 6"), "2 * 3 = 6");
    }

    #[test]
    fn inner_single_marker_wins_over_unbalanced_double() {
        assert_eq!(format_inline("**a*b**"), "*<em>a</em>b**");
    }

    #[test]
    fn shortcodes_survive_formatting() {
        assert_eq!(
            format_inline("Meet [[codex:hero|Hero Name]]."),
            "Meet [[codex:hero|Hero Name]]."
        );
    }
}
