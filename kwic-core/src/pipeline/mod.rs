//! The analysis engine over a loaded corpus.
//!
//! Request/response style: every user-triggered operation (frequency table,
//! concordance search, mistake extraction) runs the full pipeline against
//! the selected columns and blocks until the result is produced. The only
//! state between operations is the token-stream cache.
//!
//! Threading:
//! - [`Kwic`] is intentionally single-threaded. Operations take `&mut self`
//!   for the cache; the underlying corpus is immutable, so there is nothing
//!   to lock.

mod api;
mod cache;
mod stats;
mod types;

pub use cache::TokenCache;
pub use stats::CorpusStats;
pub use types::{EngineMetrics, Kwic, DEFAULT_WINDOW};
