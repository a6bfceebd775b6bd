//! Multi-factor ranking of filtered candidates.
//!
//! Combines the scoring functions into a weighted final score, sorts, and
//! truncates. Scoring is pure: every candidate comes back as a new
//! [`ScoredCandidate`], the input records are never touched.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use sources::{Candidate, UserAttributes};
use tracing::debug;

use crate::scoring::{self, ScoringConfig};

/// Weights for the convex combination of component scores.
///
/// No re-normalization happens: callers overriding weights are responsible
/// for keeping the sum sane.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RankWeights {
    pub similarity: f64,
    pub rating: f64,
    pub attributes: f64,
    pub distance: f64,
}

impl Default for RankWeights {
    fn default() -> Self {
        Self {
            similarity: 0.35,
            rating: 0.25,
            attributes: 0.25,
            distance: 0.15,
        }
    }
}

impl RankWeights {
    /// Shallow merge: present override keys replace defaults, absent keys
    /// keep their current value.
    pub fn with_overrides(self, overrides: &WeightOverrides) -> Self {
        Self {
            similarity: overrides.similarity.unwrap_or(self.similarity),
            rating: overrides.rating.unwrap_or(self.rating),
            attributes: overrides.attributes.unwrap_or(self.attributes),
            distance: overrides.distance.unwrap_or(self.distance),
        }
    }
}

/// Caller-supplied weight overrides, one optional value per component.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
#[serde(default)]
pub struct WeightOverrides {
    pub similarity: Option<f64>,
    pub rating: Option<f64>,
    pub attributes: Option<f64>,
    pub distance: Option<f64>,
}

/// Component scores, rounded to 3 decimals for explainability.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScoreBreakdown {
    pub similarity: f64,
    pub rating: f64,
    pub attributes: f64,
    pub distance: f64,
}

/// A candidate with its component and final scores attached.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoredCandidate {
    #[serde(flatten)]
    pub candidate: Candidate,
    pub score_breakdown: ScoreBreakdown,
    /// Weighted combination of the four components, rounded to 4 decimals.
    pub final_score: f64,
}

/// The ranking engine's primary output.
#[derive(Debug, Clone, Serialize)]
pub struct RankOutcome {
    pub ranked: Vec<ScoredCandidate>,
    pub total_candidates: usize,
    pub top_n: usize,
    pub weights_used: RankWeights,
}

/// Scores and orders candidates against a user's attributes.
#[derive(Debug, Clone, Default)]
pub struct Ranker {
    config: ScoringConfig,
}

impl Ranker {
    pub fn new(config: ScoringConfig) -> Self {
        Self { config }
    }

    /// Rank candidates and keep the best `top_n`.
    ///
    /// An empty input yields an empty ranking; `top_n` larger than the
    /// candidate count returns everything. Ties on the final score keep
    /// their original input order (stable sort).
    pub fn rank(
        &self,
        candidates: Vec<Candidate>,
        attrs: &UserAttributes,
        top_n: usize,
        overrides: Option<&WeightOverrides>,
    ) -> RankOutcome {
        let total_candidates = candidates.len();
        let weights = overrides
            .map(|o| RankWeights::default().with_overrides(o))
            .unwrap_or_default();

        let mut ranked: Vec<ScoredCandidate> = candidates
            .into_par_iter()
            .map(|candidate| self.score_one(candidate, attrs, &weights))
            .collect();

        // Vec::sort_by is stable, so equal final scores keep input order.
        ranked.sort_by(|a, b| {
            b.final_score
                .partial_cmp(&a.final_score)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        ranked.truncate(top_n);

        debug!(
            "Ranked {} candidates, kept top {}",
            total_candidates,
            ranked.len()
        );

        RankOutcome {
            ranked,
            total_candidates,
            top_n,
            weights_used: weights,
        }
    }

    fn score_one(
        &self,
        candidate: Candidate,
        attrs: &UserAttributes,
        weights: &RankWeights,
    ) -> ScoredCandidate {
        // Missing similarity scores neutral: the midpoint of the range.
        let similarity = candidate
            .similarity
            .map(scoring::similarity_score)
            .unwrap_or(0.5);
        let rating = scoring::rating_score(candidate.rating, candidate.rating_count, &self.config);
        let attributes = scoring::attribute_score(&candidate, attrs);
        let distance = scoring::distance_score(candidate.distance_km);

        let final_score = weights.similarity * similarity
            + weights.rating * rating
            + weights.attributes * attributes
            + weights.distance * distance;

        ScoredCandidate {
            candidate,
            score_breakdown: ScoreBreakdown {
                similarity: round_to(similarity, 3),
                rating: round_to(rating, 3),
                attributes: round_to(attributes, 3),
                distance: round_to(distance, 3),
            },
            final_score: round_to(final_score, 4),
        }
    }
}

fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}
