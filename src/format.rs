//! Turns analysis text into HTML fragments.
//!
//! The backend writes its reports with a light markup: `**emphasis**`,
//! numbered markers such as `1.`, `- label:` bullets and plain newlines. The
//! rewrite is a fixed chain of global substitutions. Order matters: emphasis
//! goes first so later rules never see the asterisks, and the chain is not
//! idempotent, so format each raw text exactly once.

use once_cell::sync::Lazy;
use regex::Regex;

// Captures stop at any line terminator: `\n`, `\r`, U+2028 and U+2029.
static EMPHASIS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\*\*([^\n\r\x{2028}\x{2029}]*?)\*\*").expect("valid emphasis pattern")
});
static NUMBERED: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"([0-9]+\.)").expect("valid numbered-marker pattern"));
static LABELED_BULLET: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"- ([^\n\r\x{2028}\x{2029}]*?):").expect("valid bullet pattern")
});

const PRINT_BULLET_SOURCE: &str = "🟢";
const PRINT_BULLET: &str = "●";

/// Formats analysis text for on-screen display.
pub fn format_analysis(text: &str) -> String {
    let text = emphasize(text);
    let text = break_lines(&text);
    let text = mark_numbers(&text);
    bullet_labels(&text)
}

/// Print variant of [`format_analysis`]: same rules, and the green circle
/// glyph becomes a plain bullet so it survives black-and-white printing.
pub fn format_for_print(text: &str) -> String {
    let text = emphasize(text);
    let text = break_lines(&text);
    let text = text.replace(PRINT_BULLET_SOURCE, PRINT_BULLET);
    let text = mark_numbers(&text);
    bullet_labels(&text)
}

fn emphasize(text: &str) -> String {
    EMPHASIS
        .replace_all(text, "<strong>${1}</strong>")
        .into_owned()
}

fn break_lines(text: &str) -> String {
    text.replace('\n', "<br>")
}

fn mark_numbers(text: &str) -> String {
    NUMBERED
        .replace_all(text, "<br><strong>${1}</strong>")
        .into_owned()
}

fn bullet_labels(text: &str) -> String {
    LABELED_BULLET
        .replace_all(text, "<br>&nbsp;&nbsp;• <strong>${1}:</strong>")
        .into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_all_markers() {
        let html = format_analysis("**bold** text\n1. first\n- label: value");
        assert!(html.contains("<strong>bold</strong>"));
        assert!(html.contains("<br>"));
        assert!(html.contains("<strong>1.</strong>"));
        assert!(html.contains("&nbsp;&nbsp;• <strong>label:</strong> value"));
        assert_eq!(
            html,
            "<strong>bold</strong> text<br><br><strong>1.</strong> first<br><br>&nbsp;&nbsp;• <strong>label:</strong> value"
        );
    }

    #[test]
    fn replaces_every_occurrence() {
        let html = format_analysis("**a** and **b**");
        assert_eq!(html, "<strong>a</strong> and <strong>b</strong>");
    }

    #[test]
    fn emphasis_does_not_span_lines() {
        let html = format_analysis("**open\nclose**");
        assert_eq!(html, "**open<br>close**");
    }

    #[test]
    fn carriage_return_ends_emphasis_and_labels() {
        assert_eq!(format_analysis("**a\rb**"), "**a\rb**");
        assert_eq!(format_analysis("- x\r\ny: z"), "- x\r<br>y: z");
        assert_eq!(
            format_analysis("- 예문\r\nfoo: bar"),
            "- 예문\r<br>foo: bar"
        );
        assert_eq!(format_analysis("**a\u{2028}b**"), "**a\u{2028}b**");
    }

    #[test]
    fn numbers_are_marked_wherever_they_appear() {
        assert_eq!(
            format_analysis("pi is 3.14"),
            "pi is <br><strong>3.</strong>14"
        );
    }

    #[test]
    fn bullet_label_is_lazy_across_breaks() {
        let html = format_analysis("- a\nb: c");
        assert_eq!(html, "<br>&nbsp;&nbsp;• <strong>a<br>b:</strong> c");
    }

    #[test]
    fn not_idempotent() {
        let once = format_analysis("1. x");
        let twice = format_analysis(&once);
        assert_ne!(once, twice);
    }

    #[test]
    fn print_variant_swaps_green_circle() {
        let html = format_for_print("🟢 발음\n**강세**: 첫음절");
        assert!(html.starts_with("● 발음<br>"));
        assert!(!html.contains("🟢"));
        assert!(html.contains("<strong>강세</strong>"));
    }

    #[test]
    fn screen_variant_keeps_green_circle() {
        assert!(format_analysis("🟢 예문").contains("🟢"));
    }

    #[test]
    fn plain_text_passes_through() {
        assert_eq!(format_analysis("hello"), "hello");
        assert_eq!(format_analysis(""), "");
    }
}
