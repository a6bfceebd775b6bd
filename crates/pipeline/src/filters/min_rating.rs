//! Filter dropping candidates below a rating threshold.

use crate::traits::Filter;
use sources::Candidate;

/// Drops candidates whose rating is below the threshold.
///
/// A rating of 0 means "no data" and is dropped by any positive threshold,
/// matching the scoring side where unrated venues score zero.
pub struct MinRatingFilter {
    min_rating: f64,
}

impl MinRatingFilter {
    pub fn new(min_rating: f64) -> Self {
        Self { min_rating }
    }
}

impl Filter for MinRatingFilter {
    fn name(&self) -> &str {
        "MinRatingFilter"
    }

    fn keep(&self, candidate: &Candidate) -> bool {
        candidate.rating >= self.min_rating
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_min_rating_threshold_is_inclusive() {
        let filter = MinRatingFilter::new(4.0);

        let mut candidate = Candidate::new("a", "A");
        candidate.rating = 3.5;
        assert!(!filter.keep(&candidate));

        candidate.rating = 4.0;
        assert!(filter.keep(&candidate));

        candidate.rating = 4.8;
        assert!(filter.keep(&candidate));
    }
}
