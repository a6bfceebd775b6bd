//! Card formatting: ranked candidates become the JSON payload the client
//! renders.

use pipeline::{RankOutcome, ScoredCandidate};
use serde_json::{json, Map, Value};

// Component score above which it counts as a reason to recommend.
const REASON_THRESHOLD: f64 = 0.7;

/// Build a renderable card for one scored candidate.
pub fn card(scored: &ScoredCandidate) -> Value {
    let candidate = &scored.candidate;
    let mut card = Map::new();
    card.insert("place_id".to_string(), json!(candidate.id));
    card.insert("name".to_string(), json!(candidate.name));
    if let Some(address) = &candidate.address {
        card.insert("address".to_string(), json!(address));
    }
    card.insert("rating".to_string(), json!(candidate.rating));
    card.insert(
        "user_rating_count".to_string(),
        json!(candidate.rating_count),
    );
    card.insert(
        "price_level".to_string(),
        serde_json::to_value(candidate.price_level).unwrap_or(Value::Null),
    );
    card.insert("types".to_string(), json!(candidate.types));
    if let Some(distance_km) = candidate.distance_km {
        card.insert("distance_km".to_string(), json!(distance_km));
    }
    card.insert("score".to_string(), json!(scored.final_score));
    card.insert("why".to_string(), json!(reasons(scored)));
    Value::Object(card)
}

/// Human-readable reasons, one per component score strong enough to have
/// driven the recommendation.
fn reasons(scored: &ScoredCandidate) -> Vec<&'static str> {
    let b = scored.score_breakdown;
    let mut reasons = Vec::new();
    if b.similarity >= REASON_THRESHOLD {
        reasons.push("matches your taste");
    }
    if b.rating >= REASON_THRESHOLD {
        reasons.push("great reviews");
    }
    if b.attributes >= REASON_THRESHOLD {
        reasons.push("fits your preferences");
    }
    if b.distance >= REASON_THRESHOLD {
        reasons.push("close by");
    }
    if reasons.is_empty() {
        reasons.push("well-rounded option");
    }
    reasons
}

/// The payload carried by the final message: cards plus a one-line
/// rationale.
pub fn payload(outcome: &RankOutcome, query: &str) -> Value {
    json!({
        "cards": outcome.ranked.iter().map(card).collect::<Vec<Value>>(),
        "rationale": format!(
            "Top {} of {} candidates for \"{}\".",
            outcome.ranked.len(),
            outcome.total_candidates,
            query,
        ),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pipeline::{Ranker, ScoringConfig};
    use sources::{Candidate, PriceLevel, UserAttributes};

    fn scored(similarity: f64, rating: f64, count: u32, distance: Option<f64>) -> ScoredCandidate {
        let mut candidate = Candidate::new("eem", "Eem - Thai BBQ & Cocktails");
        candidate.address = Some("3808 N Williams Ave, Portland, OR".to_string());
        candidate.rating = rating;
        candidate.rating_count = count;
        candidate.price_level = PriceLevel::Moderate;
        candidate.types = vec!["thai_restaurant".to_string()];
        candidate.distance_km = distance;
        candidate.similarity = Some(similarity);

        let outcome = Ranker::new(ScoringConfig::default()).rank(
            vec![candidate],
            &UserAttributes::default(),
            1,
            None,
        );
        outcome.ranked[0].clone()
    }

    #[test]
    fn test_card_shape() {
        let card = card(&scored(0.82, 4.5, 234, Some(1.2)));

        assert_eq!(card["place_id"], "eem");
        assert_eq!(card["name"], "Eem - Thai BBQ & Cocktails");
        assert_eq!(card["address"], "3808 N Williams Ave, Portland, OR");
        assert_eq!(card["rating"], 4.5);
        assert_eq!(card["user_rating_count"], 234);
        assert_eq!(card["price_level"], "PRICE_LEVEL_MODERATE");
        assert_eq!(card["types"], json!(["thai_restaurant"]));
        assert_eq!(card["distance_km"], 1.2);
        assert!(card["score"].as_f64().unwrap() > 0.0);
        assert!(card["why"].as_array().unwrap().len() >= 2);
    }

    #[test]
    fn test_optional_fields_omitted() {
        let mut candidate = Candidate::new("x", "Mystery Spot");
        candidate.rating = 4.0;
        candidate.rating_count = 12;
        let outcome =
            Ranker::default().rank(vec![candidate], &UserAttributes::default(), 1, None);

        let card = card(&outcome.ranked[0]);
        assert!(card.get("address").is_none());
        assert!(card.get("distance_km").is_none());
    }

    #[test]
    fn test_reasons_reflect_strong_components() {
        // High similarity and rating volume, close by.
        let strong = scored(0.9, 4.7, 500, Some(0.5));
        let why = card(&strong)["why"].clone();
        let why: Vec<&str> = why.as_array().unwrap().iter().map(|r| r.as_str().unwrap()).collect();
        assert!(why.contains(&"matches your taste"));
        assert!(why.contains(&"great reviews"));
        assert!(why.contains(&"close by"));
    }

    #[test]
    fn test_weak_scores_fall_back_to_generic_reason() {
        let weak = scored(-0.4, 3.0, 5, Some(10.0));
        assert_eq!(card(&weak)["why"], json!(["well-rounded option"]));
    }

    #[test]
    fn test_payload_wraps_cards_and_rationale() {
        let outcome = Ranker::default().rank(
            vec![Candidate::new("a", "A"), Candidate::new("b", "B")],
            &UserAttributes::default(),
            1,
            None,
        );
        let payload = payload(&outcome, "thai near me");

        assert_eq!(payload["cards"].as_array().unwrap().len(), 1);
        assert_eq!(payload["rationale"], "Top 1 of 2 candidates for \"thai near me\".");
    }
}
