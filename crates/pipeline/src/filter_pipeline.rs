//! The FilterPipeline chains hard filters over a candidate list.

use serde::Deserialize;
use sources::{Candidate, PriceLevel};

use crate::filters::{
    ExcludeTypesFilter, MaxPriceFilter, MinRatingFilter, OpenNowFilter, RequiredTypesFilter,
};
use crate::traits::Filter;

/// Named hard filters, all optional and independently applicable.
///
/// Deserialization ignores unrecognized keys, so a filter map produced by an
/// upstream agent with extra entries degrades to the subset this stage
/// understands instead of failing the request.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct HardFilters {
    pub min_rating: Option<f64>,
    pub max_price: Option<PriceLevel>,
    pub required_types: Option<Vec<String>>,
    pub exclude_types: Option<Vec<String>>,
    pub open_now: Option<bool>,
}

impl HardFilters {
    /// Build a pipeline containing one filter per present key.
    pub fn build(&self) -> FilterPipeline {
        let mut pipeline = FilterPipeline::new();
        if let Some(min_rating) = self.min_rating {
            pipeline = pipeline.add_filter(MinRatingFilter::new(min_rating));
        }
        if let Some(max_price) = self.max_price {
            pipeline = pipeline.add_filter(MaxPriceFilter::new(max_price));
        }
        if let Some(required) = &self.required_types {
            pipeline = pipeline.add_filter(RequiredTypesFilter::new(required.clone()));
        }
        if let Some(excluded) = &self.exclude_types {
            pipeline = pipeline.add_filter(ExcludeTypesFilter::new(excluded.clone()));
        }
        if let Some(open) = self.open_now {
            pipeline = pipeline.add_filter(OpenNowFilter::new(open));
        }
        pipeline
    }
}

/// Result of a filter pass, with counts for observability.
#[derive(Debug, Clone)]
pub struct FilterOutcome {
    pub candidates: Vec<Candidate>,
    pub original_count: usize,
    pub filtered_count: usize,
}

/// Chains multiple filters together with logical AND semantics.
///
/// ## Usage
/// ```ignore
/// let outcome = HardFilters {
///     min_rating: Some(4.0),
///     open_now: Some(true),
///     ..Default::default()
/// }
/// .build()
/// .apply(candidates);
/// ```
pub struct FilterPipeline {
    filters: Vec<Box<dyn Filter>>,
}

impl FilterPipeline {
    pub fn new() -> Self {
        Self {
            filters: Vec::new(),
        }
    }

    /// Add a filter to the pipeline (builder pattern).
    pub fn add_filter(mut self, filter: impl Filter + 'static) -> Self {
        self.filters.push(Box::new(filter));
        self
    }

    /// Apply all filters in sequence to the candidates. Never fails.
    pub fn apply(&self, candidates: Vec<Candidate>) -> FilterOutcome {
        let original_count = candidates.len();
        let mut current = candidates;

        for filter in &self.filters {
            let before = current.len();
            current.retain(|candidate| filter.keep(candidate));
            tracing::debug!(
                "Applied filter: {} ({} -> {})",
                filter.name(),
                before,
                current.len()
            );
        }

        FilterOutcome {
            original_count,
            filtered_count: current.len(),
            candidates: current,
        }
    }
}

impl Default for FilterPipeline {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rated(id: &str, rating: f64) -> Candidate {
        let mut candidate = Candidate::new(id, id.to_uppercase());
        candidate.rating = rating;
        candidate
    }

    #[test]
    fn test_empty_pipeline_keeps_everything() {
        let outcome = FilterPipeline::new().apply(vec![rated("a", 3.5), rated("b", 4.0)]);
        assert_eq!(outcome.original_count, 2);
        assert_eq!(outcome.filtered_count, 2);
    }

    #[test]
    fn test_min_rating_counts() {
        let candidates = vec![rated("a", 3.5), rated("b", 4.0), rated("c", 4.8)];
        let filters = HardFilters {
            min_rating: Some(4.0),
            ..Default::default()
        };

        let outcome = filters.build().apply(candidates);
        assert_eq!(outcome.original_count, 3);
        assert_eq!(outcome.filtered_count, 2);
        let ids: Vec<&str> = outcome.candidates.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["b", "c"]);
    }

    #[test]
    fn test_filters_combine_with_and() {
        let mut cheap_bar = rated("bar", 4.5);
        cheap_bar.price_level = PriceLevel::Inexpensive;
        cheap_bar.types = vec!["bar".to_string()];

        let mut pricey_thai = rated("thai", 4.5);
        pricey_thai.price_level = PriceLevel::VeryExpensive;
        pricey_thai.types = vec!["thai_restaurant".to_string()];

        let filters = HardFilters {
            min_rating: Some(4.0),
            max_price: Some(PriceLevel::Expensive),
            exclude_types: Some(vec!["bar".to_string()]),
            ..Default::default()
        };

        let outcome = filters.build().apply(vec![cheap_bar, pricey_thai]);
        assert_eq!(outcome.filtered_count, 0);
    }

    #[test]
    fn test_unrecognized_filter_keys_are_ignored() {
        let filters: HardFilters = serde_json::from_str(
            r#"{"min_rating": 4.0, "max_results": 10, "sort_order": "asc"}"#,
        )
        .unwrap();

        assert_eq!(filters.min_rating, Some(4.0));
        assert!(filters.max_price.is_none());
        assert!(filters.open_now.is_none());
    }
}
