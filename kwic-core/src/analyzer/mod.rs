//! Text analysis pipeline.
//!
//! This module provides the text processing components:
//! - **Markup**: rewrites annotation markup into plain prose
//! - **Tokenizer**: cleans prose into lowercase word tokens

pub mod markup;
pub mod tokenizer;

pub use markup::MarkupNormalizer;
pub use tokenizer::tokenize_clean;
