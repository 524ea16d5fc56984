// SPDX-FileCopyrightText: 2026 Lectern Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Verse markup to plain text.
//!
//! Scripture modules encode verse text as quasi-XML: `<note>` footnotes,
//! `<title>` section headings, `<p>` paragraphs, `x-p` milestones and `<q>`
//! quotations. Normalization runs a fixed sequence of regex passes, each over
//! the output of the previous one:
//!
//! 1. Un-escape `&quot;`, `&apos;`, `&gt;`, `&lt;` and `&amp;` in one pass.
//! 2. Drop `<note>` elements together with their content.
//! 3. Drop `<title>` elements together with their content.
//! 4. Turn every `</p>` into a blank line.
//! 5. Turn every `x-p` milestone into a blank line.
//! 6. Turn `<q>` and `</q>` into a literal `"`.
//! 7. Strip every remaining tag.
//! 8. Trim surrounding whitespace.
//!
//! This is not an XML parser. Unbalanced markup is processed best-effort and
//! never raises; [`normalize_with_warnings`] reports what looked wrong.
//! Because entities are decoded before tags are stripped, escaped markup
//! such as `&lt;b&gt;` is removed like a real tag.

use std::sync::LazyLock;

use regex::{Captures, Regex};
use thiserror::Error;

static ENTITY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"&(quot|apos|gt|lt|amp);").unwrap());

static NOTE_EMPTY: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<note\b[^>]*/>").unwrap());
static NOTE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<note\b[^>]*>.*?</note[^>]*>").unwrap());
static NOTE_OPEN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<note\b").unwrap());

static TITLE_EMPTY: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<title\b[^>]*/>").unwrap());
static TITLE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<title\b[^>]*>.*?</title[^>]*>").unwrap());
static TITLE_OPEN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<title\b").unwrap());

static PARAGRAPH_CLOSE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"</p\s*>").unwrap());

// Some modules mark paragraphs with `<milestone type="x-p" marker="¶"/>`
// instead of wrapping them in `<p>`.
static PARAGRAPH_MILESTONE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"<milestone\b[^>]*\btype\s*=\s*["']x-p["'][^>]*>"#).unwrap()
});

static QUOTE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"</?q\b[^>]*>").unwrap());

static ANY_TAG: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]*>").unwrap());

const PARAGRAPH_BREAK: &str = "\n\n";

/// Non-fatal findings from a normalization run.
///
/// Output accompanied by warnings is still the best-effort result of every
/// pass; callers decide whether to display it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MarkupWarning {
    /// An opening element whose content should have been dropped had no
    /// closing tag, so its content was kept as text.
    #[error("unclosed <{element}> element; its content was kept")]
    UnclosedElement { element: &'static str },

    /// A literal `<` or `>` survived into the output.
    #[error("stray angle bracket left in normalized text")]
    StrayAngleBracket,
}

/// Normalize one verse's markup into plain text.
///
/// Paragraph breaks come out as `\n\n` and quotation tags as `"`. The
/// function is pure and may be called concurrently from any thread.
pub fn normalize(markup: &str) -> String {
    normalize_with_warnings(markup).0
}

/// Normalize one verse's markup and report anything that looked malformed.
pub fn normalize_with_warnings(markup: &str) -> (String, Vec<MarkupWarning>) {
    let mut warnings = Vec::new();

    let text = unescape_entities(markup);

    let text = NOTE_EMPTY.replace_all(&text, "");
    let text = NOTE.replace_all(&text, "").into_owned();
    if NOTE_OPEN.is_match(&text) {
        warnings.push(MarkupWarning::UnclosedElement { element: "note" });
    }

    let text = TITLE_EMPTY.replace_all(&text, "");
    let text = TITLE.replace_all(&text, "").into_owned();
    if TITLE_OPEN.is_match(&text) {
        warnings.push(MarkupWarning::UnclosedElement { element: "title" });
    }

    let text = PARAGRAPH_CLOSE.replace_all(&text, PARAGRAPH_BREAK);
    let text = PARAGRAPH_MILESTONE.replace_all(&text, PARAGRAPH_BREAK);
    let text = QUOTE.replace_all(&text, "\"");
    let text = ANY_TAG.replace_all(&text, "");

    let text = text.trim().to_string();
    if text.contains(['<', '>']) {
        warnings.push(MarkupWarning::StrayAngleBracket);
    }

    (text, warnings)
}

/// Decode the five named XML entities in a single left-to-right pass.
///
/// A single pass means `&amp;lt;` decodes to `&lt;` and stops there, instead
/// of being decoded twice into `<`.
fn unescape_entities(markup: &str) -> String {
    ENTITY
        .replace_all(markup, |caps: &Captures<'_>| match &caps[1] {
            "quot" => "\"",
            "apos" => "'",
            "gt" => ">",
            "lt" => "<",
            _ => "&",
        })
        .into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn closing_paragraph_becomes_blank_line() {
        assert_eq!(normalize("<p>Hello</p><p>World</p>"), "Hello\n\nWorld");
    }

    #[test]
    fn note_content_is_removed() {
        assert_eq!(normalize("<note>ignore me</note>Visible text"), "Visible text");
    }

    #[test]
    fn quote_tags_become_quote_marks() {
        assert_eq!(normalize("<q>quoted</q>"), "\"quoted\"");
    }

    #[test]
    fn ampersand_entity_is_decoded() {
        assert_eq!(normalize("plain &amp; simple"), "plain & simple");
    }

    #[test]
    fn all_named_entities_are_decoded() {
        assert_eq!(
            normalize("&quot;it&apos;s&quot; 1 &gt; 0"),
            "\"it's\" 1 > 0"
        );
    }

    #[test]
    fn escaped_ampersand_is_decoded_only_once() {
        assert_eq!(normalize("a &amp;lt; b"), "a &lt; b");
        assert_eq!(normalize("&amp;amp;"), "&amp;");
    }

    #[test]
    fn notes_with_attributes_and_newlines_are_removed() {
        let markup = "In the beginning<note type=\"study\" n=\"a\">Or\nwhen God began</note> God created";
        assert_eq!(normalize(markup), "In the beginning God created");
    }

    #[test]
    fn note_removal_is_non_greedy() {
        assert_eq!(normalize("A<note>x</note>B<note>y</note>C"), "ABC");
    }

    #[test]
    fn self_closing_note_does_not_swallow_text() {
        assert_eq!(normalize("A<note n=\"1\"/>B<note>y</note>C"), "ABC");
    }

    #[test]
    fn titles_are_removed_with_content() {
        let markup = "<title type=\"section\">The Creation</title>In the beginning";
        assert_eq!(normalize(markup), "In the beginning");
    }

    #[test]
    fn paragraph_milestone_becomes_blank_line() {
        let markup = "earth.<milestone type=\"x-p\" marker=\"\u{b6}\"/>And God said";
        assert_eq!(normalize(markup), "earth.\n\nAnd God said");
    }

    #[test]
    fn other_milestones_are_stripped() {
        let markup = "earth.<milestone type=\"line\"/>And God said";
        assert_eq!(normalize(markup), "earth.And God said");
    }

    #[test]
    fn opening_paragraph_tag_is_not_a_break() {
        assert_eq!(normalize("Hello <p>World"), "Hello World");
    }

    #[test]
    fn quote_with_attributes_and_milestone_form() {
        let markup = "He said, <q who=\"Jesus\" marker=\"\">Follow me</q>";
        assert_eq!(normalize(markup), "He said, \"Follow me\"");
        assert_eq!(normalize("<q sID=\"q1\"/>Go<q eID=\"q1\"/>"), "\"Go\"");
    }

    #[test]
    fn unknown_tags_are_stripped_and_text_trimmed() {
        let markup = "  <w lemma=\"strong:H7225\">beginning</w> <transChange type=\"added\">was</transChange>  ";
        assert_eq!(normalize(markup), "beginning was");
    }

    #[test]
    fn plain_text_passes_through_unchanged() {
        let text = "For God so loved the world,\n\nthat he gave";
        assert_eq!(normalize(text), text);
    }

    #[test]
    fn clean_markup_has_no_warnings() {
        let (_, warnings) = normalize_with_warnings("<p>Hello <q>there</q></p>");
        assert!(warnings.is_empty());
    }

    #[test]
    fn unclosed_note_is_reported_and_content_kept() {
        let (text, warnings) = normalize_with_warnings("Text <note>dangling");
        assert_eq!(text, "Text dangling");
        assert_eq!(
            warnings,
            vec![MarkupWarning::UnclosedElement { element: "note" }]
        );
    }

    #[test]
    fn unclosed_title_is_reported() {
        let (_, warnings) = normalize_with_warnings("<title>Heading only");
        assert_eq!(
            warnings,
            vec![MarkupWarning::UnclosedElement { element: "title" }]
        );
    }

    #[test]
    fn stray_angle_bracket_is_reported() {
        let (text, warnings) = normalize_with_warnings("a &lt; b");
        assert_eq!(text, "a < b");
        assert_eq!(warnings, vec![MarkupWarning::StrayAngleBracket]);
    }

    #[test]
    fn empty_markup_normalizes_to_empty() {
        assert_eq!(normalize(""), "");
        assert_eq!(normalize("<note>only a note</note>"), "");
    }
}
