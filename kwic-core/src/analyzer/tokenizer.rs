//! Tokenizer/Cleaner
//!
//! Second stage of the pipeline: turns normalized prose into the canonical
//! lowercase token stream consumed by the frequency counter and the
//! concordance indexer.
//!
//! ## What It Does
//!
//! 1. Lowercases the whole text (Unicode, locale-independent).
//! 2. Breaks `a.foreign`-style concatenations: `.` `,` `;` `:` flanked by
//!    word characters on both sides becomes a space.
//! 3. Splits hyphen-joined pairs (`well-known` → `well known`). Hyphenation
//!    is not meaningful for frequency or concordance in this corpus.
//! 4. Splits on whitespace.
//! 5. Cleans each raw token: leading/trailing punctuation is trimmed; a token
//!    still carrying internal punctuation (`word/word`, `it's`) is broken
//!    into maximal alphabetic runs; only purely alphabetic tokens longer
//!    than one character survive.
//! 6. Drops `reference_list` / `references_list` residue.
//!
//! Deterministic: the same input always yields the same token stream.

use smallvec::SmallVec;

#[inline(always)]
fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Characters trimmed from token ends.
#[inline(always)]
fn is_trim_punct(c: char) -> bool {
    matches!(
        c,
        '.' | ',' | ';' | ':' | '!' | '?' | '(' | ')' | '[' | ']' | '{' | '}' | '"' | '\'' | '`'
    )
}

/// Internal punctuation that forces a token to be split into alphabetic runs.
#[inline(always)]
fn is_split_punct(c: char) -> bool {
    matches!(
        c,
        '.' | ',' | ';' | ':' | '!' | '?' | '(' | ')' | '[' | ']' | '{' | '}' | '"' | '\'' | '/'
            | '\\'
    )
}

/// Tag-name residue that can leak through markup stripping.
#[inline(always)]
fn is_residue(token: &str) -> bool {
    matches!(token, "reference_list" | "references_list")
}

/// Converts normalized prose into the canonical token stream.
///
/// # Examples
///
/// ```
/// use kwic_core::analyzer::tokenizer::tokenize_clean;
///
/// assert_eq!(
///     tokenize_clean("The well-known a.foreign word."),
///     vec!["the", "well", "known", "foreign", "word"]
/// );
/// ```
pub fn tokenize_clean(plain: &str) -> Vec<String> {
    let lowered = plain.to_lowercase();
    let separated = separate_joined_words(&lowered);

    let mut tokens = Vec::new();
    for raw in separated.split_whitespace() {
        push_clean(raw, &mut tokens);
    }

    tokens.retain(|t| !is_residue(t));
    tokens
}

/// Replaces `.` `,` `;` `:` `-` with a space when both neighbors are word
/// characters. Other occurrences pass through for per-token cleanup.
fn separate_joined_words(input: &str) -> String {
    let chars: Vec<char> = input.chars().collect();
    let mut out = String::with_capacity(input.len());

    for (i, &c) in chars.iter().enumerate() {
        let joins = matches!(c, '.' | ',' | ';' | ':' | '-');
        if joins
            && i > 0
            && is_word_char(chars[i - 1])
            && chars.get(i + 1).copied().is_some_and(is_word_char)
        {
            out.push(' ');
        } else {
            out.push(c);
        }
    }

    out
}

/// Cleans one raw whitespace-split token and appends the survivors.
fn push_clean(raw: &str, out: &mut Vec<String>) {
    let trimmed = raw.trim_matches(is_trim_punct);
    if trimmed.is_empty() {
        return;
    }

    if trimmed.chars().any(is_split_punct) {
        // Punctuation survived trimming (word/word, it's): keep the maximal
        // alphabetic runs longer than one character.
        let runs: SmallVec<[&str; 4]> = alpha_runs(trimmed);
        for run in runs {
            if run.len() > 1 {
                out.push(run.to_string());
            }
        }
    } else if trimmed.chars().count() > 1 && trimmed.chars().all(char::is_alphabetic) {
        out.push(trimmed.to_string());
    }
}

/// Maximal ASCII-alphabetic runs of a token.
///
/// Run boundaries always fall next to ASCII bytes, so the byte-offset slices
/// are valid char boundaries.
fn alpha_runs(token: &str) -> SmallVec<[&str; 4]> {
    let bytes = token.as_bytes();
    let mut runs: SmallVec<[&str; 4]> = SmallVec::new();
    let mut start: Option<usize> = None;

    for (i, &b) in bytes.iter().enumerate() {
        if b.is_ascii_alphabetic() {
            if start.is_none() {
                start = Some(i);
            }
        } else if let Some(s) = start.take() {
            runs.push(&token[s..i]);
        }
    }
    if let Some(s) = start {
        runs.push(&token[s..]);
    }

    runs
}
