//! Core trait for the hard filter stage.

use sources::Candidate;

/// A boolean predicate over candidates.
///
/// Filters are pure and never fail: a candidate either survives or it does
/// not. `Send + Sync` so a built pipeline can be shared across callers.
pub trait Filter: Send + Sync {
    /// Name of this filter, for logging.
    fn name(&self) -> &str;

    /// Whether the candidate survives this filter.
    fn keep(&self, candidate: &Candidate) -> bool;
}
