//! Filter on the candidate's open/closed flag.

use crate::traits::Filter;
use sources::Candidate;

/// Keeps candidates whose open/closed flag equals the requested value.
///
/// A candidate with no flag is treated as open. This is deliberately
/// asymmetric with the other filters (which pass unknowns through): hiding
/// every venue that forgot to publish hours would empty most result sets.
pub struct OpenNowFilter {
    open: bool,
}

impl OpenNowFilter {
    pub fn new(open: bool) -> Self {
        Self { open }
    }
}

impl Filter for OpenNowFilter {
    fn name(&self) -> &str {
        "OpenNowFilter"
    }

    fn keep(&self, candidate: &Candidate) -> bool {
        candidate.open_now.unwrap_or(true) == self.open
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_flag(open_now: Option<bool>) -> Candidate {
        let mut candidate = Candidate::new("a", "A");
        candidate.open_now = open_now;
        candidate
    }

    #[test]
    fn test_open_now_matches_flag() {
        let filter = OpenNowFilter::new(true);
        assert!(filter.keep(&with_flag(Some(true))));
        assert!(!filter.keep(&with_flag(Some(false))));
    }

    #[test]
    fn test_missing_flag_is_treated_as_open() {
        assert!(OpenNowFilter::new(true).keep(&with_flag(None)));
        assert!(!OpenNowFilter::new(false).keep(&with_flag(None)));
    }
}
