//! Token-stream memoization.
//!
//! Normalizing and tokenizing a whole column selection is the expensive part
//! of every operation, and users typically run many concordance searches
//! against the same selection. The cache keys on (corpus version, selected
//! column names in selection order) — enough input identity that a replaced
//! corpus or a different selection can never serve a stale stream.

use rustc_hash::FxHashMap;
use std::collections::hash_map::Entry;

/// Identity of one tokenization: which corpus, which columns, in what order.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub(crate) struct CacheKey {
    version: u64,
    columns: Vec<String>,
}

impl CacheKey {
    pub(crate) fn new(version: u64, columns: &[&str]) -> Self {
        Self {
            version,
            columns: columns.iter().map(|&c| c.to_string()).collect(),
        }
    }
}

/// Memoized token streams, with hit/miss counters.
#[derive(Debug, Default)]
pub struct TokenCache {
    streams: FxHashMap<CacheKey, Vec<String>>,
    hits: u64,
    misses: u64,
}

impl TokenCache {
    /// Creates an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the cached stream for `key`, building and storing it on miss.
    pub(crate) fn get_or_insert_with(
        &mut self,
        key: CacheKey,
        build: impl FnOnce() -> Vec<String>,
    ) -> &[String] {
        match self.streams.entry(key) {
            Entry::Occupied(entry) => {
                self.hits += 1;
                entry.into_mut()
            }
            Entry::Vacant(entry) => {
                self.misses += 1;
                entry.insert(build())
            }
        }
    }

    /// Drops every cached stream; counters reset too.
    pub fn clear(&mut self) {
        self.streams.clear();
        self.hits = 0;
        self.misses = 0;
    }

    /// Number of cached streams.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.streams.len()
    }

    /// Returns `true` if nothing is cached.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.streams.is_empty()
    }

    /// Lookups served from cache.
    #[inline]
    pub fn hits(&self) -> u64 {
        self.hits
    }

    /// Lookups that had to tokenize.
    #[inline]
    pub fn misses(&self) -> u64 {
        self.misses
    }
}
