//! Character-level Markov generation.
//!
//! The model layer is the motivating workload for the ordered map:
//! - Per-context histograms over 27 symbols (`CharDistribution`)
//! - A windowed generator mapping context windows to distributions
//!   (`MarkovGenerator`)

/// Fixed 27-symbol histogram (space + `'a'..='z'`).
///
/// Accumulates occurrence counts and supports weighted random draws
/// from a caller-supplied random source.
pub mod char_distribution;

/// Order-k Markov character generator.
///
/// Builds the context map from a training text, then synthesizes output
/// by repeated windowed lookup and weighted draw.
pub mod generator;

pub use char_distribution::CharDistribution;
pub use generator::{Generation, MarkovGenerator};
