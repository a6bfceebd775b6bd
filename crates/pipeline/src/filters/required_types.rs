//! Filter requiring at least one matching category tag.

use crate::traits::Filter;
use sources::Candidate;

/// Keeps candidates whose type set intersects the required set.
///
/// ANY semantics, not ALL: a single matching tag is enough.
pub struct RequiredTypesFilter {
    required: Vec<String>,
}

impl RequiredTypesFilter {
    pub fn new(required: Vec<String>) -> Self {
        Self { required }
    }
}

impl Filter for RequiredTypesFilter {
    fn name(&self) -> &str {
        "RequiredTypesFilter"
    }

    fn keep(&self, candidate: &Candidate) -> bool {
        self.required.iter().any(|t| candidate.has_type(t))
    }
}
