//! Concordance, word-frequency and spelling-mistake pipeline for annotated
//! learner corpora.
//!
//! Learner essays come out of the annotation pipeline with inline markup
//! (`<original=…>`, `<reference_list>`, `<title>`, …) embedded in the prose.
//! This crate turns those raw spreadsheet cells into clean token streams and
//! runs the classic corpus-linguistics queries over them:
//!
//! - **Markup normalization** — tag-aware cleaning into plain prose
//! - **Tokenization** — lowercase word tokens, punctuation artifacts handled
//! - **Frequency counting** — word counts, descending, deterministic ties
//! - **Concordance search** — every occurrence with a bounded context window
//! - **Mistake extraction** — annotated misspelling/correction pairs
//!
//! The [`Kwic`] engine ties the stages together over an immutable [`Corpus`],
//! memoizing token streams per (corpus version, column selection).
//!
//! ```
//! use kwic_core::{Corpus, Kwic};
//!
//! let corpus = Corpus::builder(["Task 1.1.1"])
//!     .row("Nursing", &["The cat sat on <original=teh>the</original> mat."])
//!     .build();
//!
//! let mut kwic = Kwic::new(corpus);
//! let table = kwic.frequency(&["Task 1.1.1"]).unwrap();
//! assert_eq!(table[0].word, "the");
//! assert_eq!(table[0].count, 2);
//! ```

pub mod analyzer;
pub mod concordance;
pub mod corpus;
pub mod export;
pub mod frequency;
pub mod mistakes;
pub mod pipeline;

pub use analyzer::markup::MarkupNormalizer;
pub use analyzer::tokenizer::tokenize_clean;
pub use corpus::{Corpus, CorpusBuilder};
pub use pipeline::{CorpusStats, EngineMetrics, Kwic, TokenCache, DEFAULT_WINDOW};

pub use kwic_types::{
    ConcordanceHit, FreqEntry, Mistake, QueryError, SearchOutcome, SelectionError,
};
