//! The loaded document set.
//!
//! A corpus is one spreadsheet worth of learner writing: a fixed, ordered
//! list of task/essay columns and one row per learner. Each row carries a
//! "Major" grouping identifier and one optional raw-text cell per column.
//! A corpus is immutable once built; derived artifacts (token streams,
//! frequency tables) are recomputed from it, never written back.
//!
//! Every built corpus gets a process-unique `version` number. Downstream
//! caches key on it, so replacing the corpus can never serve stale
//! tokenizations.

use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_VERSION: AtomicU64 = AtomicU64::new(1);

/// One spreadsheet row: a grouping identifier plus one optional cell per
/// corpus column.
#[derive(Debug, Clone)]
pub struct Row {
    major: String,
    cells: Vec<Option<String>>,
}

impl Row {
    /// The row's grouping identifier (e.g. the learner's major).
    #[inline]
    pub fn major(&self) -> &str {
        &self.major
    }

    /// The raw cell text for a column index, `None` when absent or empty.
    #[inline]
    pub fn cell(&self, column: usize) -> Option<&str> {
        self.cells.get(column)?.as_deref()
    }
}

/// An immutable document set with named columns.
#[derive(Debug, Clone)]
pub struct Corpus {
    version: u64,
    columns: Vec<String>,
    rows: Vec<Row>,
}

impl Corpus {
    /// Starts building a corpus with the given column names, in order.
    pub fn builder<I, S>(columns: I) -> CorpusBuilder
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        CorpusBuilder {
            columns: columns.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
        }
    }

    /// Process-unique identity of this document set.
    #[inline]
    pub fn version(&self) -> u64 {
        self.version
    }

    /// Column names, in their fixed order.
    #[inline]
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Number of rows.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Returns `true` if the corpus has no rows.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// All rows, in load order.
    #[inline]
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// Resolves a column name to its index.
    pub fn resolve(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// The raw cell text at (row, column), `None` when absent or empty.
    pub fn cell(&self, row: usize, column: usize) -> Option<&str> {
        self.rows.get(row)?.cell(column)
    }
}

/// Builder for [`Corpus`]. Rows are padded or truncated to the column count;
/// blank cells are stored as absent.
#[derive(Debug)]
pub struct CorpusBuilder {
    columns: Vec<String>,
    rows: Vec<Row>,
}

impl CorpusBuilder {
    /// Appends a row from raw cell strings; a blank string means no value.
    pub fn row(self, major: impl Into<String>, cells: &[&str]) -> Self {
        let cells = cells
            .iter()
            .map(|&c| {
                if c.trim().is_empty() {
                    None
                } else {
                    Some(c.to_string())
                }
            })
            .collect();
        self.row_opt(major, cells)
    }

    /// Appends a row from pre-built optional cells.
    pub fn row_opt(mut self, major: impl Into<String>, mut cells: Vec<Option<String>>) -> Self {
        cells.resize(self.columns.len(), None);
        for cell in &mut cells {
            if cell.as_deref().is_some_and(|c| c.trim().is_empty()) {
                *cell = None;
            }
        }
        self.rows.push(Row {
            major: major.into(),
            cells,
        });
        self
    }

    /// Finalizes the corpus and assigns its version.
    pub fn build(self) -> Corpus {
        Corpus {
            version: NEXT_VERSION.fetch_add(1, Ordering::Relaxed),
            columns: self.columns,
            rows: self.rows,
        }
    }
}
