//! Filter capping candidates by price level.

use crate::traits::Filter;
use sources::{Candidate, PriceLevel};

/// Drops candidates whose price position exceeds the cap.
///
/// Candidates with an `Unspecified` price level have no position on the
/// scale and always pass.
pub struct MaxPriceFilter {
    max_price: PriceLevel,
}

impl MaxPriceFilter {
    pub fn new(max_price: PriceLevel) -> Self {
        Self { max_price }
    }
}

impl Filter for MaxPriceFilter {
    fn name(&self) -> &str {
        "MaxPriceFilter"
    }

    fn keep(&self, candidate: &Candidate) -> bool {
        match (candidate.price_level.position(), self.max_price.position()) {
            (Some(candidate_pos), Some(max_pos)) => candidate_pos <= max_pos,
            // Unspecified on either side: the rule cannot apply.
            _ => true,
        }
    }
}
