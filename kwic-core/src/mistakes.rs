//! Spelling-mistake extraction from raw annotated text.
//!
//! Annotators mark misspellings inline as `<original=VALUE>INNER</original>`:
//! the attribute carries the learner's misspelled form, the tag body the
//! corrected word. The extractor reads these pairs straight from raw cell
//! text — it deliberately runs before any normalization, because the
//! normalizer discards exactly the attribute this module is after.
//!
//! Attribute values may be bare, single-quoted, or double-quoted; all three
//! yield the same mistake. A malformed annotation (no closing tag, empty
//! attribute, a stray `<` inside) is skipped, never an error.

use kwic_types::Mistake;
use memchr::{memchr, memmem};

const OPEN: &str = "<original=";
const CLOSE: &str = "</original>";

/// Extracts every well-formed mistake annotation in `text`, tagging each
/// with the row's `major` identifier, in text order.
pub fn extract_into(major: &str, text: &str, out: &mut Vec<Mistake>) {
    let bytes = text.as_bytes();
    let finder = memmem::Finder::new(OPEN);
    let mut at = 0usize;

    while let Some(rel) = finder.find(&bytes[at..]) {
        let open = at + rel;
        match parse_annotation(text, open + OPEN.len()) {
            Some((end, original, corrected)) => {
                out.push(Mistake {
                    major: major.to_string(),
                    original: original.to_string(),
                    corrected: corrected.to_string(),
                });
                at = end;
            }
            None => at = open + 1,
        }
    }
}

/// Convenience wrapper returning a fresh vector.
pub fn extract(major: &str, text: &str) -> Vec<Mistake> {
    let mut out = Vec::new();
    extract_into(major, text, &mut out);
    out
}

/// Parses one annotation starting just after `<original=`.
///
/// Returns (offset past the closing tag, original form, corrected form).
fn parse_annotation(text: &str, attr_start: usize) -> Option<(usize, &str, &str)> {
    let bytes = text.as_bytes();

    let gt = attr_start + memchr(b'>', &bytes[attr_start..])?;
    let attr = &text[attr_start..gt];
    if attr.contains('<') {
        return None;
    }

    let original = attr.trim_matches(['\'', '"']);
    if original.is_empty() {
        return None;
    }

    // The corrected form runs to the next '<', which must open the closing
    // tag, and must be non-empty.
    let inner_start = gt + 1;
    let lt = inner_start + memchr(b'<', &bytes[inner_start..])?;
    if lt == inner_start || !bytes[lt..].starts_with(CLOSE.as_bytes()) {
        return None;
    }

    Some((lt + CLOSE.len(), original, &text[inner_start..lt]))
}
