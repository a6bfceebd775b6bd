//! Core domain types shared across the recommendation pipeline.

use serde::{Deserialize, Serialize};

/// Geographic point attached to a candidate venue.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub lat: f64,
    pub lng: f64,
}

/// Price level on the fixed 5-point ordered scale used by venue search.
///
/// `Unspecified` sits outside the order: it has no position and is never
/// rejected by price filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum PriceLevel {
    #[default]
    #[serde(rename = "PRICE_LEVEL_UNSPECIFIED")]
    Unspecified,
    #[serde(rename = "PRICE_LEVEL_FREE")]
    Free,
    #[serde(rename = "PRICE_LEVEL_INEXPENSIVE")]
    Inexpensive,
    #[serde(rename = "PRICE_LEVEL_MODERATE")]
    Moderate,
    #[serde(rename = "PRICE_LEVEL_EXPENSIVE")]
    Expensive,
    #[serde(rename = "PRICE_LEVEL_VERY_EXPENSIVE")]
    VeryExpensive,
}

impl PriceLevel {
    /// Position on the ordered scale, `None` for `Unspecified`.
    pub fn position(self) -> Option<u8> {
        match self {
            PriceLevel::Unspecified => None,
            PriceLevel::Free => Some(0),
            PriceLevel::Inexpensive => Some(1),
            PriceLevel::Moderate => Some(2),
            PriceLevel::Expensive => Some(3),
            PriceLevel::VeryExpensive => Some(4),
        }
    }
}

/// Price band a user asks for, each mapping to a fixed set of price levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PriceBand {
    Budget,
    Mid,
    Upscale,
}

impl PriceBand {
    /// The price levels considered an exact match for this band.
    pub fn levels(self) -> &'static [PriceLevel] {
        match self {
            PriceBand::Budget => &[PriceLevel::Free, PriceLevel::Inexpensive],
            PriceBand::Mid => &[PriceLevel::Moderate],
            PriceBand::Upscale => &[PriceLevel::Expensive, PriceLevel::VeryExpensive],
        }
    }

    pub fn matches(self, level: PriceLevel) -> bool {
        self.levels().contains(&level)
    }
}

/// A raw venue record gathered from external search, pre-scoring.
///
/// Candidates are immutable once handed to the ranking engine: scoring
/// produces a new derived record instead of mutating this one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candidate {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub location: Option<Location>,
    /// Average rating in [0, 5]; 0 means "no rating data".
    #[serde(default)]
    pub rating: f64,
    #[serde(default)]
    pub rating_count: u32,
    #[serde(default)]
    pub price_level: PriceLevel,
    #[serde(default)]
    pub types: Vec<String>,
    /// Distance from the query point in kilometers, when known.
    #[serde(default)]
    pub distance_km: Option<f64>,
    /// Cosine-like similarity against the user's taste vector, in [-1, 1].
    #[serde(default)]
    pub similarity: Option<f64>,
    /// Open/closed flag from the search result, when the venue reports one.
    #[serde(default)]
    pub open_now: Option<bool>,
}

impl Candidate {
    /// Create a minimal candidate; the remaining fields start empty.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            address: None,
            location: None,
            rating: 0.0,
            rating_count: 0,
            price_level: PriceLevel::Unspecified,
            types: Vec::new(),
            distance_km: None,
            similarity: None,
            open_now: None,
        }
    }

    pub fn has_type(&self, tag: &str) -> bool {
        self.types.iter().any(|t| t == tag)
    }
}

/// Derived taste signals for a user, supplied by the profiling collaborator.
///
/// Every dimension is optional. A fully empty value means "no preferences
/// known" which the scoring functions treat as neutral, distinct from
/// "preferences known but nothing matched".
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserAttributes {
    #[serde(default)]
    pub price_band: Option<PriceBand>,
    #[serde(default)]
    pub diet: Vec<String>,
    #[serde(default)]
    pub region: Vec<String>,
    #[serde(default)]
    pub style: Vec<String>,
}

impl UserAttributes {
    /// True when no dimension carries any signal.
    pub fn is_empty(&self) -> bool {
        self.price_band.is_none()
            && self.diet.is_empty()
            && self.region.is_empty()
            && self.style.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_price_level_order() {
        assert!(PriceLevel::Inexpensive.position() < PriceLevel::Expensive.position());
        assert_eq!(PriceLevel::Unspecified.position(), None);
    }

    #[test]
    fn test_price_band_membership() {
        assert!(PriceBand::Budget.matches(PriceLevel::Inexpensive));
        assert!(PriceBand::Mid.matches(PriceLevel::Moderate));
        assert!(!PriceBand::Upscale.matches(PriceLevel::Moderate));
    }

    #[test]
    fn test_price_level_wire_names() {
        let level: PriceLevel = serde_json::from_str("\"PRICE_LEVEL_MODERATE\"").unwrap();
        assert_eq!(level, PriceLevel::Moderate);
    }

    #[test]
    fn test_empty_attributes() {
        assert!(UserAttributes::default().is_empty());

        let attrs = UserAttributes {
            diet: vec!["vegan".to_string()],
            ..Default::default()
        };
        assert!(!attrs.is_empty());
    }

    #[test]
    fn test_candidate_deserializes_with_defaults() {
        let candidate: Candidate =
            serde_json::from_str(r#"{"id": "abc", "name": "Thai Delight"}"#).unwrap();
        assert_eq!(candidate.rating, 0.0);
        assert_eq!(candidate.price_level, PriceLevel::Unspecified);
        assert!(candidate.open_now.is_none());
    }
}
