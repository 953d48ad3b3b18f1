//! Pure, I/O-free stages of the pipeline: relevance filtering, per-post
//! classification, tallying and final result assembly.

pub mod aggregator;
pub mod assembler;
pub mod classifier;
pub mod relevance;

#[cfg(test)]
pub(crate) mod fixtures;

pub use aggregator::{aggregate, Tally};
pub use assembler::assemble;
pub use classifier::{classify_all, ScoreHeuristic, SentimentClassifier};
pub use relevance::RelevanceFilter;
