//! Pure scoring functions for candidate ranking.
//!
//! Each function maps one signal onto [0, 1]. The ranking engine combines
//! them into a weighted final score; nothing here mutates the candidate.

use sources::{Candidate, UserAttributes};

/// Dimension weights for [`attribute_score`]. A dimension only contributes
/// its weight to the denominator when the user actually expressed it.
const PRICE_WEIGHT: f64 = 0.15;
const DIET_WEIGHT: f64 = 0.25;
const REGION_WEIGHT: f64 = 0.35;
const STYLE_WEIGHT: f64 = 0.25;

/// Constants for the Bayesian rating score, injectable so tests can pin
/// alternate values.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoringConfig {
    /// Assumed global mean rating the Bayesian average shrinks towards.
    pub global_mean_rating: f64,
    /// Confidence pseudo-count: how many reviews the prior is worth.
    pub rating_confidence: f64,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            global_mean_rating: 4.0,
            rating_confidence: 10.0,
        }
    }
}

/// Normalize a cosine-like similarity from [-1, 1] onto [0, 1].
///
/// Values outside [-1, 1] are not clamped: upstream similarity is always a
/// cosine-style value by contract.
pub fn similarity_score(similarity: f64) -> f64 {
    (similarity + 1.0) / 2.0
}

/// Confidence-weighted rating score.
///
/// A rating of 0 means "no data" and scores 0. Otherwise the rating is
/// blended with the assumed global mean, weighted by review volume, so a
/// 5.0 with three reviews scores below a 4.6 with three hundred.
pub fn rating_score(rating: f64, rating_count: u32, config: &ScoringConfig) -> f64 {
    if rating == 0.0 {
        return 0.0;
    }
    let count = rating_count as f64;
    let weighted = (rating * count + config.global_mean_rating * config.rating_confidence)
        / (count + config.rating_confidence);
    weighted / 5.0
}

/// Distance decay score.
///
/// Unknown or zero distance is treated as best case; otherwise an
/// exponential decay with a 2 km half-scale.
pub fn distance_score(distance_km: Option<f64>) -> f64 {
    match distance_km {
        None => 1.0,
        Some(d) if d == 0.0 => 1.0,
        Some(d) => (-d / 2.0).exp(),
    }
}

/// Score how well a candidate matches the user's expressed attributes.
///
/// Up to four independent dimensions (price band, diet, region/cuisine,
/// style) are evaluated; each contributes its weight to the denominator
/// only when present in `attrs`. When no dimension is present at all the
/// result is exactly 0.5: a documented neutral, not an average of zeros.
pub fn attribute_score(candidate: &Candidate, attrs: &UserAttributes) -> f64 {
    let mut score = 0.0;
    let mut max_score = 0.0;

    if let Some(band) = attrs.price_band {
        max_score += PRICE_WEIGHT;
        if band.matches(candidate.price_level) {
            score += PRICE_WEIGHT;
        } else if candidate.price_level == sources::PriceLevel::Unspecified {
            // Unknown price: partial benefit of the doubt
            score += PRICE_WEIGHT / 3.0;
        }
    }

    if !attrs.diet.is_empty() {
        max_score += DIET_WEIGHT;
        score += diet_credit(candidate, &attrs.diet);
    }

    if !attrs.region.is_empty() {
        max_score += REGION_WEIGHT;
        score += region_credit(candidate, &attrs.region);
    }

    if !attrs.style.is_empty() {
        max_score += STYLE_WEIGHT;
        score += style_credit(candidate, &attrs.style);
    }

    if max_score > 0.0 {
        score / max_score
    } else {
        0.5
    }
}

/// Diet credit. Vegetarian/vegan requests check category tags first, then
/// fall back to a name-text hint. Other diet terms get flat neutral credit
/// since venue data carries no signal for them.
fn diet_credit(candidate: &Candidate, diet: &[String]) -> f64 {
    let wants_veg = diet.iter().any(|term| {
        let term = term.to_lowercase();
        term.contains("vegetarian") || term.contains("vegan") || term.contains("plant")
    });

    if !wants_veg {
        return 0.15;
    }

    let tag_match = candidate
        .types
        .iter()
        .any(|t| t.contains("vegetarian") || t.contains("vegan"));
    if tag_match {
        return DIET_WEIGHT;
    }

    let name = candidate.name.to_lowercase();
    if name.contains("vegetarian") || name.contains("vegan") || name.contains("veggie") {
        0.15
    } else {
        0.05
    }
}

/// Region/cuisine credit. Full credit per category-tag match, half credit
/// per name-substring match, capped at the dimension weight, with a small
/// floor when nothing matches.
fn region_credit(candidate: &Candidate, regions: &[String]) -> f64 {
    let name = candidate.name.to_lowercase();
    let mut credit = 0.0;

    for region in regions {
        let term = region.trim().to_lowercase();
        if term.is_empty() {
            continue;
        }
        let tag = term.replace(' ', "_");
        if candidate.types.iter().any(|t| t.contains(&tag)) {
            credit += REGION_WEIGHT;
        } else if name.contains(&term) {
            credit += REGION_WEIGHT / 2.0;
        }
    }

    if credit == 0.0 {
        0.05
    } else {
        credit.min(REGION_WEIGHT)
    }
}

/// Style credit: proportional to how many requested styles the candidate's
/// category tags satisfy.
fn style_credit(candidate: &Candidate, styles: &[String]) -> f64 {
    let matched = styles
        .iter()
        .filter(|style| style_matches(candidate, style))
        .count();
    STYLE_WEIGHT * (matched as f64 / styles.len() as f64)
}

fn style_matches(candidate: &Candidate, style: &str) -> bool {
    let style = style.to_lowercase();
    let has = |keyword: &str| candidate.types.iter().any(|t| t.contains(keyword));

    if style.contains("casual") {
        has("cafe") || has("coffee") || has("fast_food") || has("diner") || has("bar")
    } else if style.contains("fine") {
        has("fine_dining") || has("steak") || has("wine_bar")
    } else if style.contains("street") {
        has("street") || has("food_court") || has("market") || has("hawker")
    } else {
        false
    }
}
