//! # Orchestrator Crate
//!
//! Ties the recommendation core together: venue search and user profiling
//! run as parallel fan-out branches, the merged state flows through hard
//! filtering and ranking, and the result is formatted as a card payload.
//! The whole flow is also exposed through an intercepted capability set so
//! every invocation shape returns deduplicated cards.

pub mod cards;
pub mod fanout;
pub mod orchestrator;

// Re-export main types
pub use fanout::{Branch, DispatchState, Fanout};
pub use orchestrator::{RecommendRequest, RecommendationOrchestrator};
