//! Corpus and cache statistics.

use crate::pipeline::types::Kwic;

/// A snapshot of the engine's corpus and cache state.
#[derive(Debug, Clone, Copy)]
pub struct CorpusStats {
    /// Number of rows in the corpus.
    pub num_rows: usize,
    /// Number of columns in the corpus.
    pub num_columns: usize,
    /// Token streams currently cached.
    pub cached_streams: usize,
    /// Cache lookups served without re-tokenizing.
    pub cache_hits: u64,
    /// Cache lookups that built a stream.
    pub cache_misses: u64,
}

impl Kwic {
    /// Returns corpus and cache statistics.
    pub fn stats(&self) -> CorpusStats {
        CorpusStats {
            num_rows: self.corpus.len(),
            num_columns: self.corpus.columns().len(),
            cached_streams: self.cache.len(),
            cache_hits: self.cache.hits(),
            cache_misses: self.cache.misses(),
        }
    }
}

impl core::fmt::Display for CorpusStats {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(
            f,
            "{} rows, {} columns, {} cached streams ({} hits / {} misses)",
            self.num_rows, self.num_columns, self.cached_streams, self.cache_hits,
            self.cache_misses
        )
    }
}
