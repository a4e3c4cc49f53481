//! Core types and errors for the Kwic learner-corpus toolkit.
//!
//! This crate provides the fundamental types that are shared across
//! the Kwic ecosystem. Keeping types separate ensures:
//!
//! - **Plain data**: No processing logic, just results and errors
//! - **Cross-crate compatibility**: Core and front-end plumbing share the same types
//! - **Clean boundaries**: No circular dependencies between crates

#![warn(missing_docs)]

use core::fmt;

/// One occurrence of a search term in a token stream, with bounded context.
///
/// Produced by the concordance indexer: `left` and `right` are the
/// space-joined tokens inside the context window, `term` is the matched
/// token exactly as stored in the stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConcordanceHit {
    /// Space-joined tokens preceding the match (up to the window size).
    pub left: String,
    /// The matched token, original casing as stored in the stream.
    pub term: String,
    /// Space-joined tokens following the match (up to the window size).
    pub right: String,
}

impl ConcordanceHit {
    /// Creates a new hit.
    pub fn new(
        left: impl Into<String>,
        term: impl Into<String>,
        right: impl Into<String>,
    ) -> Self {
        Self {
            left: left.into(),
            term: term.into(),
            right: right.into(),
        }
    }
}

impl fmt::Display for ConcordanceHit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [{}] {}", self.left, self.term, self.right)
    }
}

/// Result of a concordance search.
///
/// Zero hits is an expected outcome, not an error: the `NotFound` variant
/// carries that signal explicitly so callers can render a not-found message
/// instead of an empty table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchOutcome {
    /// At least one occurrence was found.
    Hits(Vec<ConcordanceHit>),
    /// The term matched no token in the stream.
    NotFound,
}

impl SearchOutcome {
    /// Returns `true` if the search produced no hits.
    #[inline]
    pub fn is_not_found(&self) -> bool {
        matches!(self, SearchOutcome::NotFound)
    }

    /// Returns the hits as a slice (empty for `NotFound`).
    pub fn hits(&self) -> &[ConcordanceHit] {
        match self {
            SearchOutcome::Hits(hits) => hits,
            SearchOutcome::NotFound => &[],
        }
    }

    /// Consumes the outcome, returning the hit list (empty for `NotFound`).
    pub fn into_hits(self) -> Vec<ConcordanceHit> {
        match self {
            SearchOutcome::Hits(hits) => hits,
            SearchOutcome::NotFound => Vec::new(),
        }
    }
}

/// One row of a frequency table: a distinct word and its occurrence count.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FreqEntry {
    /// The token text.
    pub word: String,
    /// Number of occurrences in the token stream.
    pub count: u32,
}

impl FreqEntry {
    /// Creates a new entry.
    pub fn new(word: impl Into<String>, count: u32) -> Self {
        Self {
            word: word.into(),
            count,
        }
    }
}

impl fmt::Display for FreqEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.word, self.count)
    }
}

/// One annotated spelling mistake extracted from raw cell text.
///
/// `original` is the misspelling transcribed from the learner's essay
/// (the tag's attribute value, quotes stripped), `corrected` is the word
/// the annotator supplied as the tag body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mistake {
    /// Grouping identifier of the row the mistake came from.
    pub major: String,
    /// The misspelled form as written by the learner.
    pub original: String,
    /// The corrected form supplied by the annotator.
    pub corrected: String,
}

impl fmt::Display for Mistake {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {} -> {}", self.major, self.original, self.corrected)
    }
}

/// Errors raised when a column selection cannot be applied to a corpus.
///
/// These are user-facing precondition failures: the pipeline simply does
/// not run, and the caller surfaces a warning.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectionError {
    /// No columns were selected.
    NoColumnsSelected,
    /// A selected column does not exist in the corpus.
    UnknownColumn(String),
}

impl fmt::Display for SelectionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SelectionError::NoColumnsSelected => {
                write!(f, "no columns selected: select at least one column")
            }
            SelectionError::UnknownColumn(name) => {
                write!(f, "unknown column: {:?}", name)
            }
        }
    }
}

impl core::error::Error for SelectionError {}

/// Errors raised when a concordance query cannot be executed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryError {
    /// The search term was empty or whitespace-only.
    EmptyTerm,
    /// The column selection was invalid.
    Selection(SelectionError),
}

impl fmt::Display for QueryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QueryError::EmptyTerm => write!(f, "search term is empty"),
            QueryError::Selection(e) => write!(f, "{}", e),
        }
    }
}

impl core::error::Error for QueryError {
    fn source(&self) -> Option<&(dyn core::error::Error + 'static)> {
        match self {
            QueryError::Selection(e) => Some(e),
            QueryError::EmptyTerm => None,
        }
    }
}

impl From<SelectionError> for QueryError {
    fn from(e: SelectionError) -> Self {
        QueryError::Selection(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hit_display() {
        let hit = ConcordanceHit::new("on", "the", "mat");
        assert_eq!(format!("{hit}"), "on [the] mat");
    }

    #[test]
    fn hit_display_empty_context() {
        let hit = ConcordanceHit::new("", "the", "cat");
        assert_eq!(format!("{hit}"), " [the] cat");
    }

    #[test]
    fn outcome_not_found_is_empty() {
        let outcome = SearchOutcome::NotFound;
        assert!(outcome.is_not_found());
        assert!(outcome.hits().is_empty());
        assert!(outcome.into_hits().is_empty());
    }

    #[test]
    fn outcome_hits_roundtrip() {
        let hits = vec![ConcordanceHit::new("", "the", "cat")];
        let outcome = SearchOutcome::Hits(hits.clone());
        assert!(!outcome.is_not_found());
        assert_eq!(outcome.hits(), &hits[..]);
        assert_eq!(outcome.into_hits(), hits);
    }

    #[test]
    fn freq_entry_display() {
        assert_eq!(format!("{}", FreqEntry::new("the", 42)), "the: 42");
    }

    #[test]
    fn mistake_display() {
        let m = Mistake {
            major: "Nursing".into(),
            original: "teh".into(),
            corrected: "the".into(),
        };
        assert_eq!(format!("{m}"), "Nursing: teh -> the");
    }

    #[test]
    fn selection_errors_display() {
        assert!(format!("{}", SelectionError::NoColumnsSelected).contains("no columns"));
        let e = SelectionError::UnknownColumn("Task 9.9".into());
        assert!(format!("{e}").contains("Task 9.9"));
    }

    #[test]
    fn query_error_wraps_selection() {
        let e: QueryError = SelectionError::NoColumnsSelected.into();
        assert!(matches!(e, QueryError::Selection(_)));
        assert!(format!("{e}").contains("no columns"));
    }
}
