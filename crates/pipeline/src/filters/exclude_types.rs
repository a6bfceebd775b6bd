//! Filter dropping candidates with excluded category tags.

use crate::traits::Filter;
use sources::Candidate;

/// Drops candidates whose type set intersects the excluded set.
pub struct ExcludeTypesFilter {
    excluded: Vec<String>,
}

impl ExcludeTypesFilter {
    pub fn new(excluded: Vec<String>) -> Self {
        Self { excluded }
    }
}

impl Filter for ExcludeTypesFilter {
    fn name(&self) -> &str {
        "ExcludeTypesFilter"
    }

    fn keep(&self, candidate: &Candidate) -> bool {
        !self.excluded.iter().any(|t| candidate.has_type(t))
    }
}
