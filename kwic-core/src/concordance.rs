//! Concordance search over a token stream.
//!
//! A concordance shows every occurrence of a term together with a bounded
//! window of surrounding tokens. Matching is exact-token equality under
//! case-insensitive comparison — never substring containment. Hit windows
//! are independent of each other; overlapping contexts are recomputed per
//! hit.

use kwic_types::ConcordanceHit;

/// Scans the token stream and returns one hit per occurrence of `term`.
///
/// `window` is the number of context tokens on each side. A window of 0
/// still reports the match, with empty contexts. Zero hits yields an empty
/// vector — the caller decides how to signal "not found".
///
/// # Examples
///
/// ```
/// use kwic_core::concordance::find;
///
/// let tokens = ["the", "cat", "sat", "on", "the", "mat"];
/// let hits = find(&tokens, "the", 1);
/// assert_eq!(hits.len(), 2);
/// assert_eq!(hits[0].right, "cat");
/// assert_eq!(hits[1].left, "on");
/// ```
pub fn find<S: AsRef<str>>(tokens: &[S], term: &str, window: usize) -> Vec<ConcordanceHit> {
    let mut hits = Vec::new();
    if term.is_empty() {
        return hits;
    }

    let term_lower = term.to_lowercase();

    for i in 0..tokens.len() {
        if !matches_term(tokens[i].as_ref(), term, &term_lower) {
            continue;
        }

        let start = i.saturating_sub(window);
        let end = (i + window + 1).min(tokens.len());

        hits.push(ConcordanceHit::new(
            join(&tokens[start..i]),
            tokens[i].as_ref(),
            join(&tokens[i + 1..end]),
        ));
    }

    hits
}

/// Case-insensitive exact-token comparison with an ASCII fast path.
#[inline]
fn matches_term(token: &str, term: &str, term_lower: &str) -> bool {
    if token.is_ascii() && term.is_ascii() {
        token.eq_ignore_ascii_case(term)
    } else {
        token.to_lowercase() == term_lower
    }
}

/// Space-joins a window of tokens.
fn join<S: AsRef<str>>(tokens: &[S]) -> String {
    let cap = tokens
        .iter()
        .map(|t| t.as_ref().len() + 1)
        .sum::<usize>()
        .saturating_sub(1);
    let mut out = String::with_capacity(cap);

    for (i, token) in tokens.iter().enumerate() {
        if i > 0 {
            out.push(' ');
        }
        out.push_str(token.as_ref());
    }

    out
}
