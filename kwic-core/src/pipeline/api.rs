//! Engine operations: token streams, frequency, concordance, mistakes.

use crate::analyzer::markup::MarkupNormalizer;
use crate::analyzer::tokenizer::tokenize_clean;
use crate::concordance;
use crate::corpus::Corpus;
use crate::frequency;
use crate::mistakes;
use crate::pipeline::cache::CacheKey;
use crate::pipeline::types::Kwic;
use kwic_types::{FreqEntry, Mistake, QueryError, SearchOutcome, SelectionError};
use smallvec::SmallVec;

impl Kwic {
    /// The canonical token stream for a column selection, memoized.
    ///
    /// Cells are normalized independently, concatenated column by column in
    /// the caller's selection order (rows in load order within each column),
    /// then tokenized once. The order is deterministic because it shapes
    /// concordance context windows.
    ///
    /// # Errors
    ///
    /// Returns `SelectionError::NoColumnsSelected` for an empty selection and
    /// `SelectionError::UnknownColumn` for a name the corpus does not have.
    pub fn tokens(&mut self, columns: &[&str]) -> Result<&[String], SelectionError> {
        let selection = self.resolve_selection(columns)?;
        let key = CacheKey::new(self.corpus.version(), columns);

        let corpus = &self.corpus;
        let normalizer = &self.normalizer;
        Ok(self
            .cache
            .get_or_insert_with(key, || build_token_stream(corpus, normalizer, &selection)))
    }

    /// Word-frequency table for a column selection: count descending,
    /// ties in first-occurrence order.
    pub fn frequency(&mut self, columns: &[&str]) -> Result<Vec<FreqEntry>, SelectionError> {
        self.queries += 1;
        let tokens = self.tokens(columns)?;
        Ok(frequency::count(tokens))
    }

    /// Concordance search for `term` over a column selection.
    ///
    /// Zero hits is a [`SearchOutcome::NotFound`], not an error.
    ///
    /// # Errors
    ///
    /// Returns `QueryError::EmptyTerm` for a blank term, or the selection
    /// errors of [`Kwic::tokens`].
    pub fn concordance(
        &mut self,
        columns: &[&str],
        term: &str,
        window: usize,
    ) -> Result<SearchOutcome, QueryError> {
        let term = term.trim();
        if term.is_empty() {
            return Err(QueryError::EmptyTerm);
        }

        self.queries += 1;
        let tokens = self.tokens(columns)?;
        let hits = concordance::find(tokens, term, window);

        Ok(if hits.is_empty() {
            SearchOutcome::NotFound
        } else {
            SearchOutcome::Hits(hits)
        })
    }

    /// Extracts every annotated spelling mistake in a column selection.
    ///
    /// Reads raw cells (not the token stream), column by column in selection
    /// order, rows in load order. Not cached — extraction is a single cheap
    /// scan.
    pub fn mistakes(&self, columns: &[&str]) -> Result<Vec<Mistake>, SelectionError> {
        let selection = self.resolve_selection(columns)?;
        let mut out = Vec::new();

        for &column in &selection {
            for row in self.corpus.rows() {
                if let Some(raw) = row.cell(column) {
                    mistakes::extract_into(row.major(), raw, &mut out);
                }
            }
        }

        Ok(out)
    }

    /// Validates a selection and resolves names to column indices.
    fn resolve_selection(&self, columns: &[&str]) -> Result<SmallVec<[usize; 8]>, SelectionError> {
        if columns.is_empty() {
            return Err(SelectionError::NoColumnsSelected);
        }

        let mut selection = SmallVec::with_capacity(columns.len());
        for &name in columns {
            match self.corpus.resolve(name) {
                Some(index) => selection.push(index),
                None => return Err(SelectionError::UnknownColumn(name.to_string())),
            }
        }
        Ok(selection)
    }
}

/// Normalizes every non-empty cell of the selection and tokenizes the
/// concatenation. Missing cells contribute nothing.
fn build_token_stream(
    corpus: &Corpus,
    normalizer: &MarkupNormalizer,
    selection: &[usize],
) -> Vec<String> {
    let mut combined = String::new();
    let mut cell_buf = String::new();

    for &column in selection {
        for row in 0..corpus.len() {
            let Some(raw) = corpus.cell(row, column) else {
                continue;
            };
            normalizer.normalize_into(raw, &mut cell_buf);
            if cell_buf.is_empty() {
                continue;
            }
            if !combined.is_empty() {
                combined.push(' ');
            }
            combined.push_str(&cell_buf);
        }
    }

    tokenize_clean(&combined)
}
