//! Engine type and constants.

use crate::analyzer::markup::MarkupNormalizer;
use crate::corpus::Corpus;
use crate::pipeline::cache::TokenCache;

/// Default concordance context window, in tokens per side.
pub const DEFAULT_WINDOW: usize = 5;

/// The analysis engine: one corpus plus the pipeline run against it.
///
/// Owns the markup normalizer and the token-stream cache. Every operation
/// is synchronous and derives its result purely from the immutable corpus;
/// the only mutable state is the cache and the operation counters.
///
/// Intentionally not shared across threads: the engine holds reusable
/// mutable state (the cache) that callers access through `&mut self`.
pub struct Kwic {
    pub(crate) corpus: Corpus,
    pub(crate) normalizer: MarkupNormalizer,
    pub(crate) cache: TokenCache,
    /// Total frequency/concordance operations executed.
    pub(crate) queries: u64,
}

impl Kwic {
    /// Creates an engine over a corpus with an empty cache.
    pub fn new(corpus: Corpus) -> Self {
        Self::with_cache(corpus, TokenCache::new())
    }

    /// Creates an engine with an injected cache component.
    pub fn with_cache(corpus: Corpus, cache: TokenCache) -> Self {
        Self {
            corpus,
            normalizer: MarkupNormalizer::new(),
            cache,
            queries: 0,
        }
    }

    /// The current corpus.
    #[inline]
    pub fn corpus(&self) -> &Corpus {
        &self.corpus
    }

    /// The token-stream cache.
    #[inline]
    pub fn cache(&self) -> &TokenCache {
        &self.cache
    }

    /// Swaps in a new document set, invalidating every cached stream.
    pub fn replace_corpus(&mut self, corpus: Corpus) {
        self.corpus = corpus;
        self.cache.clear();
    }

    /// Returns basic metrics about the engine's operation.
    #[inline]
    #[must_use]
    pub fn metrics(&self) -> EngineMetrics {
        EngineMetrics {
            queries_executed: self.queries,
            streams_tokenized: self.cache.misses(),
            cache_hits: self.cache.hits(),
        }
    }
}

/// Basic operational metrics for the engine.
#[derive(Debug, Clone, Copy)]
pub struct EngineMetrics {
    /// Total frequency and concordance operations executed.
    pub queries_executed: u64,
    /// Token streams built from scratch (cache misses).
    pub streams_tokenized: u64,
    /// Operations served from the cache.
    pub cache_hits: u64,
}
