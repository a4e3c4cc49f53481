//! Markup Normalizer
//!
//! Learner essays arrive from the annotation/export pipeline with inline
//! markup embedded in the prose. This module rewrites that markup into plain
//! text suitable for tokenization:
//!
//! - `<reference_list>…</reference_list>` and
//!   `<in_text_reference>…</in_text_reference>` spans are removed entirely —
//!   bibliographic apparatus is not learner prose and pollutes frequency and
//!   concordance signal.
//! - `<original=VALUE>INNER</original>` keeps only `INNER`, the corrected
//!   word supplied by the annotator. The attribute (the misspelling) is
//!   discarded; quoted and unquoted attribute values behave identically.
//! - `<title>…</title>` inner content is collected and appended once to the
//!   end of the text, so title words stay in the count/search space even when
//!   the surrounding tag would otherwise be stripped around them.
//! - Every remaining `<…>` tag becomes a single space, so the words on either
//!   side never concatenate.
//! - Whitespace runs collapse to one space; ends are trimmed.
//!
//! ## Failure policy
//!
//! Normalization is a total function. Malformed markup — an unterminated
//! span, a `<` with no closing `>` — is not an error; it passes through as
//! literal text. Absence of any tag kind is a no-op.
//!
//! ## How It Works
//!
//! No regex engine: each rule is a single forward byte-scan driven by
//! `memchr`/`memmem`, applied in rule order. Tag delimiters are ASCII, so
//! every slice boundary taken here is a valid UTF-8 char boundary.

use memchr::{memchr, memmem};
use std::borrow::Cow;

const ORIGINAL_OPEN: &str = "<original=";
const ORIGINAL_CLOSE: &str = "</original>";
const TITLE_OPEN: &str = "<title>";
const TITLE_CLOSE: &str = "</title>";

/// Tag kinds whose whole span (tag + content) is removed.
/// Names match case-insensitively.
const REMOVED_SPANS: [&str; 2] = ["reference_list", "in_text_reference"];

/// Rewrites annotation markup into plain prose.
///
/// # Examples
///
/// ```
/// use kwic_core::analyzer::markup::MarkupNormalizer;
///
/// let n = MarkupNormalizer::new();
/// assert_eq!(
///     n.normalize("prefix <original=teh>the</original> suffix"),
///     "prefix the suffix"
/// );
/// assert_eq!(n.normalize("a <reference_list>b c</reference_list> d"), "a d");
/// ```
#[derive(Debug, Default, Clone, Copy)]
pub struct MarkupNormalizer;

impl MarkupNormalizer {
    /// Creates a new normalizer.
    pub const fn new() -> Self {
        Self
    }

    /// Normalizes raw cell text into an existing String buffer.
    ///
    /// Clears the buffer before writing; reuses its capacity where possible.
    pub fn normalize_into(&self, raw: &str, out: &mut String) {
        let text = strip_invisible(raw);
        let text = strip_removed_spans(&text);
        let text = rewrite_original_tags(&text);
        let text = hoist_titles(text);
        let text = strip_remaining_tags(&text);
        collapse_whitespace_into(&text, out);
    }

    /// Normalizes raw cell text and returns a new String.
    pub fn normalize(&self, raw: &str) -> String {
        let mut out = String::with_capacity(raw.len());
        self.normalize_into(raw, &mut out);
        out
    }
}

#[inline(always)]
const fn is_word_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_'
}

/// Case-insensitive prefix check at a byte offset.
#[inline]
fn has_ci_prefix(bytes: &[u8], at: usize, pat: &[u8]) -> bool {
    bytes.len() >= at + pat.len() && bytes[at..at + pat.len()].eq_ignore_ascii_case(pat)
}

/// Non-breaking spaces become plain spaces; zero-width spaces vanish.
/// Borrows the input unchanged when neither is present (the common case).
fn strip_invisible(input: &str) -> Cow<'_, str> {
    if !input.contains(['\u{00A0}', '\u{200B}']) {
        return Cow::Borrowed(input);
    }

    let mut out = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '\u{00A0}' => out.push(' '),
            '\u{200B}' => {}
            _ => out.push(ch),
        }
    }
    Cow::Owned(out)
}

/// Removes `<reference_list …>…</reference_list>` and
/// `<in_text_reference …>…</in_text_reference>` spans in full, replacing each
/// with a single space. Tag names match case-insensitively; content may span
/// lines. An opening tag with no matching close is left as literal text.
fn strip_removed_spans(input: &str) -> String {
    let bytes = input.as_bytes();
    let mut out = String::with_capacity(input.len());
    let mut copied = 0usize;
    let mut at = 0usize;

    while let Some(rel) = memchr(b'<', &bytes[at..]) {
        let open = at + rel;
        match match_removed_span(bytes, open) {
            Some(end) => {
                out.push_str(&input[copied..open]);
                out.push(' ');
                copied = end;
                at = end;
            }
            None => at = open + 1,
        }
    }

    out.push_str(&input[copied..]);
    out
}

/// If a removed-span opening tag starts at `open`, returns the byte offset
/// just past its matching closing tag.
fn match_removed_span(bytes: &[u8], open: usize) -> Option<usize> {
    for name in REMOVED_SPANS {
        let name = name.as_bytes();
        if !has_ci_prefix(bytes, open + 1, name) {
            continue;
        }

        // Word boundary: "<reference_lists" is some other tag.
        let after_name = open + 1 + name.len();
        if bytes.get(after_name).copied().is_some_and(is_word_byte) {
            continue;
        }

        // Opening tag runs to the next '>' (attributes allowed).
        let gt = after_name + memchr(b'>', &bytes[after_name..])?;

        // Scan forward for "</name>".
        let mut pos = gt + 1;
        loop {
            let lt = pos + memchr(b'<', &bytes[pos..])?;
            if bytes.get(lt + 1) == Some(&b'/')
                && has_ci_prefix(bytes, lt + 2, name)
                && bytes.get(lt + 2 + name.len()) == Some(&b'>')
            {
                return Some(lt + 2 + name.len() + 1);
            }
            pos = lt + 1;
        }
    }
    None
}

/// Rewrites `<original=VALUE>INNER</original>` to ` INNER `, discarding the
/// attribute. The padding spaces keep the corrected word from concatenating
/// with its neighbors; the final collapse pass dedups them.
fn rewrite_original_tags(input: &str) -> String {
    let bytes = input.as_bytes();
    let open_finder = memmem::Finder::new(ORIGINAL_OPEN);
    let close_finder = memmem::Finder::new(ORIGINAL_CLOSE);

    let mut out = String::with_capacity(input.len());
    let mut copied = 0usize;
    let mut at = 0usize;

    while let Some(rel) = open_finder.find(&bytes[at..]) {
        let open = at + rel;
        let span = memchr(b'>', &bytes[open..]).and_then(|gt_rel| {
            let gt = open + gt_rel;
            let inner_end = gt + 1 + close_finder.find(&bytes[gt + 1..])?;
            Some((gt, inner_end))
        });

        match span {
            Some((gt, inner_end)) => {
                out.push_str(&input[copied..open]);
                out.push(' ');
                out.push_str(&input[gt + 1..inner_end]);
                out.push(' ');
                copied = inner_end + ORIGINAL_CLOSE.len();
                at = copied;
            }
            // No closing tag anywhere ahead: literal text.
            None => at = open + 1,
        }
    }

    out.push_str(&input[copied..]);
    out
}

/// Appends the inner content of every `<title>…</title>` span, space-joined,
/// to the end of the text. The in-place content is untouched here; rule order
/// means its tag delimiters are stripped by [`strip_remaining_tags`].
fn hoist_titles(input: String) -> String {
    let bytes = input.as_bytes();
    let open_finder = memmem::Finder::new(TITLE_OPEN);
    let close_finder = memmem::Finder::new(TITLE_CLOSE);

    let mut titles = String::new();
    let mut at = 0usize;

    while let Some(rel) = open_finder.find(&bytes[at..]) {
        let start = at + rel + TITLE_OPEN.len();
        let Some(close_rel) = close_finder.find(&bytes[start..]) else {
            break;
        };
        let end = start + close_rel;
        if !titles.is_empty() {
            titles.push(' ');
        }
        titles.push_str(&input[start..end]);
        at = end + TITLE_CLOSE.len();
    }

    if titles.is_empty() {
        return input;
    }

    let mut out = input;
    out.push(' ');
    out.push_str(&titles);
    out
}

/// Replaces every remaining `<…>` pair with a single space. A `<` with no
/// `>` anywhere after it is literal text.
fn strip_remaining_tags(input: &str) -> String {
    let bytes = input.as_bytes();
    let mut out = String::with_capacity(input.len());
    let mut copied = 0usize;
    let mut at = 0usize;

    while let Some(rel) = memchr(b'<', &bytes[at..]) {
        let open = at + rel;
        let Some(gt_rel) = memchr(b'>', &bytes[open + 1..]) else {
            break;
        };
        let end = open + 1 + gt_rel + 1;
        out.push_str(&input[copied..open]);
        out.push(' ');
        copied = end;
        at = end;
    }

    out.push_str(&input[copied..]);
    out
}

/// Collapses whitespace runs to single spaces and trims both ends.
fn collapse_whitespace_into(input: &str, out: &mut String) {
    out.clear();
    out.reserve(input.len());

    let mut pending_space = false;
    for ch in input.chars() {
        if ch.is_whitespace() {
            pending_space = !out.is_empty();
        } else {
            if pending_space {
                out.push(' ');
                pending_space = false;
            }
            out.push(ch);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn norm(input: &str) -> String {
        MarkupNormalizer::new().normalize(input)
    }

    #[test]
    fn plain_text_untouched() {
        assert_eq!(norm("hello world"), "hello world");
    }

    #[test]
    fn empty_input() {
        assert_eq!(norm(""), "");
    }

    #[test]
    fn whitespace_collapsed_and_trimmed() {
        assert_eq!(norm("  a \t b \n c  "), "a b c");
    }

    #[test]
    fn original_tag_keeps_corrected_word() {
        assert_eq!(
            norm("prefix <original=teh>the</original> suffix"),
            "prefix the suffix"
        );
    }

    #[test]
    fn original_attr_quoted_and_unquoted_identical() {
        let bare = norm("a <original=teh>the</original> b");
        let single = norm("a <original='teh'>the</original> b");
        let double = norm("a <original=\"teh\">the</original> b");
        assert_eq!(bare, "a the b");
        assert_eq!(single, bare);
        assert_eq!(double, bare);
    }

    #[test]
    fn original_without_close_is_literal_then_tag_stripped() {
        // The unterminated annotation is no rewrite match; the generic
        // tag-strip pass still removes the "<original=teh>" delimiter.
        assert_eq!(norm("a <original=teh>the b"), "a the b");
    }

    #[test]
    fn multiple_original_tags() {
        assert_eq!(
            norm("<original=wrogn>wrong</original> and <original=rigth>right</original>"),
            "wrong and right"
        );
    }

    #[test]
    fn reference_list_removed_in_full() {
        assert_eq!(norm("a <reference_list>b c</reference_list> d"), "a d");
    }

    #[test]
    fn in_text_reference_removed_in_full() {
        assert_eq!(
            norm("see <in_text_reference>(Smith, 2019)</in_text_reference> here"),
            "see here"
        );
    }

    #[test]
    fn reference_tags_case_insensitive() {
        assert_eq!(norm("a <Reference_List>b</REFERENCE_LIST> c"), "a c");
    }

    #[test]
    fn reference_span_across_lines() {
        assert_eq!(
            norm("before <reference_list>\nSmith, J. (2019).\nJones, K. (2020).\n</reference_list> after"),
            "before after"
        );
    }

    #[test]
    fn reference_open_tag_with_attributes() {
        assert_eq!(norm("a <reference_list id=3>b</reference_list> c"), "a c");
    }

    #[test]
    fn unterminated_reference_list_left_alone() {
        // No closing tag: the span rule passes through, the opening tag is
        // stripped like any other, the content survives.
        assert_eq!(norm("a <reference_list>b c"), "a b c");
    }

    #[test]
    fn similar_tag_name_not_removed() {
        // Word boundary after the name: this is a different tag.
        assert_eq!(norm("a <reference_lists>b</reference_lists> c"), "a b c");
    }

    #[test]
    fn title_content_appended() {
        let out = norm("<title>Great Title</title> body");
        assert!(out.contains("body"));
        assert!(out.ends_with("Great Title"));
    }

    #[test]
    fn title_inside_reference_list_survives_via_append() {
        let out = norm("text <reference_list><title>My Essay</title> refs</reference_list> more");
        assert_eq!(out, "text more");
        // Titles nested inside removed spans are gone with the span; only
        // titles in surviving text are hoisted.
    }

    #[test]
    fn title_outside_removed_region_hoisted() {
        let out = norm("<title>My Essay</title>\nbody text");
        assert!(out.contains("body text"));
        assert!(out.ends_with("My Essay"));
    }

    #[test]
    fn multiple_titles_appended_in_order() {
        let out = norm("<title>One</title> x <title>Two</title> y");
        assert!(out.ends_with("One Two"));
    }

    #[test]
    fn stray_tags_become_spaces() {
        assert_eq!(norm("a<br>b"), "a b");
        assert_eq!(norm("a<p>b</p>c"), "a b c");
    }

    #[test]
    fn lone_angle_bracket_is_literal() {
        assert_eq!(norm("5 < 6"), "5 < 6");
        assert_eq!(norm("tail <"), "tail <");
    }

    #[test]
    fn bracket_pair_with_spaces_is_a_tag() {
        // Mirrors the lazy "<[^>]*?>" rule: first '<' to first '>'.
        assert_eq!(norm("5 < 6 > 7"), "5 7");
    }

    #[test]
    fn non_breaking_and_zero_width_spaces() {
        assert_eq!(norm("a\u{00A0}b"), "a b");
        assert_eq!(norm("a\u{200B}b"), "ab");
    }

    #[test]
    fn invisible_chars_inside_tag_names() {
        // A ZWSP splitting a tag name is removed before tag matching.
        assert_eq!(
            norm("a <reference\u{200B}_list>b</reference_list> c"),
            "a c"
        );
    }

    #[test]
    fn case_preserved() {
        assert_eq!(norm("Hello World"), "Hello World");
    }

    #[test]
    fn idempotent_on_tag_free_output() {
        let n = MarkupNormalizer::new();
        let samples = [
            "prefix <original=teh>the</original> suffix",
            "a <reference_list>b</reference_list> c",
            "<title>T</title> body",
            "  plain   text  ",
        ];
        for s in samples {
            let once = n.normalize(s);
            assert_eq!(n.normalize(&once), once, "not idempotent for {s:?}");
        }
    }

    #[test]
    fn normalize_into_reuses_buffer() {
        let n = MarkupNormalizer::new();
        let mut buf = String::with_capacity(128);
        let cap = buf.capacity();

        n.normalize_into("HELLO <br> WORLD", &mut buf);
        assert_eq!(buf, "HELLO WORLD");
        assert_eq!(buf.capacity(), cap);

        n.normalize_into("next", &mut buf);
        assert_eq!(buf, "next");
    }

    #[test]
    fn combined_annotation_sample() {
        let raw = "Tody <original=Tody>Today</original> I write.\n\
                   <in_text_reference>(Brown, 2018)</in_text_reference>\n\
                   <reference_list>Brown, A. (2018). A book.</reference_list>";
        assert_eq!(norm(raw), "Tody Today I write.");
    }

    #[test]
    fn unicode_text_untouched() {
        assert_eq!(norm("naïve café"), "naïve café");
    }
}
