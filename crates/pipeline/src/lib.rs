//! Filtering, scoring, and ranking of restaurant candidates.
//!
//! This crate provides:
//! - Pure scoring functions (similarity, Bayesian rating, attribute match,
//!   distance decay)
//! - Filter trait and implementations for the hard filter stage
//! - FilterPipeline for composing filters
//! - Ranker for the weighted final ordering
//!
//! ## Architecture
//! Candidates move through two stages:
//! 1. Hard filters drop candidates that fail boolean predicates
//! 2. The ranker scores survivors against the user's attributes, sorts, and
//!    truncates to the requested top N
//!
//! Everything here is pure and side-effect free: safe to call concurrently
//! without synchronization.

pub mod filter_pipeline;
pub mod filters;
pub mod ranking;
pub mod scoring;
pub mod traits;

// Re-export main types
pub use filter_pipeline::{FilterOutcome, FilterPipeline, HardFilters};
pub use ranking::{RankOutcome, RankWeights, Ranker, ScoreBreakdown, ScoredCandidate, WeightOverrides};
pub use scoring::ScoringConfig;
pub use traits::Filter;
