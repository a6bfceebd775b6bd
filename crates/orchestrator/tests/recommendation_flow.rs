//! Integration test: the full flow from search results to deduplicated
//! card payloads, consumed through several invocation shapes.

use std::sync::Arc;

use futures::future::BoxFuture;
use futures::StreamExt;
use orchestrator::{RecommendRequest, RecommendationOrchestrator};
use pipeline::HardFilters;
use serde_json::{json, Value};
use sources::{Candidate, CandidateSearch, PriceLevel, ProfileSource, UserAttributes};

struct PortlandSearch;

impl CandidateSearch for PortlandSearch {
    fn name(&self) -> &str {
        "places_agent"
    }

    fn search<'a>(&'a self, _query: &'a str) -> BoxFuture<'a, sources::Result<Vec<Candidate>>> {
        let mut eem = Candidate::new("eem", "Eem - Thai BBQ & Cocktails");
        eem.address = Some("3808 N Williams Ave, Portland, OR".to_string());
        eem.rating = 4.5;
        eem.rating_count = 234;
        eem.price_level = PriceLevel::Moderate;
        eem.types = vec!["thai_restaurant".to_string()];
        eem.distance_km = Some(1.2);
        eem.similarity = Some(0.82);

        // The same venue surfaces again from a second query expansion,
        // this time without an address.
        let mut eem_again = eem.clone();
        eem_again.address = None;
        eem_again.similarity = Some(0.78);

        let mut pqn = Candidate::new("pqn", "Por Qué No?");
        pqn.rating = 4.3;
        pqn.rating_count = 189;
        pqn.price_level = PriceLevel::Inexpensive;
        pqn.types = vec!["mexican_restaurant".to_string()];
        pqn.distance_km = Some(2.8);
        pqn.similarity = Some(0.61);

        let mut dive = Candidate::new("dive", "Rusty Anchor");
        dive.rating = 3.4;
        dive.rating_count = 77;
        dive.types = vec!["bar".to_string()];
        dive.similarity = Some(0.1);

        Box::pin(async move { Ok(vec![eem, eem_again, pqn, dive]) })
    }
}

struct ThaiLover;

impl ProfileSource for ThaiLover {
    fn name(&self) -> &str {
        "profile_agent"
    }

    fn profile<'a>(&'a self, _query: &'a str) -> BoxFuture<'a, sources::Result<UserAttributes>> {
        Box::pin(async move {
            Ok(UserAttributes {
                region: vec!["thai".to_string()],
                ..Default::default()
            })
        })
    }
}

fn build() -> Arc<RecommendationOrchestrator> {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
    Arc::new(RecommendationOrchestrator::new(
        Arc::new(PortlandSearch),
        Arc::new(ThaiLover),
    ))
}

fn cards_of(output: &Value) -> Vec<Value> {
    let content = output["messages"]
        .as_array()
        .unwrap()
        .last()
        .unwrap()["content"]
        .as_str()
        .unwrap();
    let payload: Value = serde_json::from_str(content).unwrap();
    payload["cards"].as_array().unwrap().clone()
}

#[tokio::test]
async fn test_invoke_async_merges_duplicate_venue() {
    let caps = build().intercepted_capabilities();

    let request = json!({
        "query": "thai tonight",
        "filters": {"min_rating": 4.0},
        "top_n": 5,
    });
    let output = (caps.invoke_async.unwrap())(request).await;
    let cards = cards_of(&output);

    // Four candidates, one below the rating floor, two are the same venue.
    assert_eq!(cards.len(), 2);
    assert_eq!(cards[0]["place_id"], "eem");
    // The address survives the merge even though one duplicate lacked it.
    assert_eq!(cards[0]["address"], "3808 N Williams Ave, Portland, OR");
    assert_eq!(cards[1]["place_id"], "pqn");
}

#[tokio::test]
async fn test_batch_async_handles_each_request() {
    let caps = build().intercepted_capabilities();

    let outputs = (caps.batch_async.unwrap())(vec![
        json!({"query": "thai", "top_n": 1}),
        json!({"query": "anything"}),
    ])
    .await;

    assert_eq!(outputs.len(), 2);
    assert_eq!(cards_of(&outputs[0]).len(), 1);
    assert_eq!(cards_of(&outputs[1]).len(), 3);
}

#[tokio::test]
async fn test_stream_async_emits_deduplicated_result() {
    let caps = build().intercepted_capabilities();

    let chunks: Vec<Value> = (caps.stream_async.unwrap())(json!({"query": "thai"}))
        .collect()
        .await;
    assert_eq!(chunks.len(), 1);
    assert_eq!(cards_of(&chunks[0]).len(), 3);
}

#[test]
fn test_blocking_invoke_matches_direct_flow() {
    let orchestrator = build();
    let request = RecommendRequest {
        query: "thai tonight".to_string(),
        filters: HardFilters {
            min_rating: Some(4.0),
            ..Default::default()
        },
        ..Default::default()
    };

    let direct = orchestrator.recommend_blocking(&request);
    let via_caps = (orchestrator.intercepted_capabilities().invoke.unwrap())(json!({
        "query": "thai tonight",
        "filters": {"min_rating": 4.0},
    }));

    // The capability path additionally dedupes, so compare card identities.
    let direct_ids: Vec<String> = cards_of(&direct)
        .iter()
        .map(|c| c["place_id"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(direct_ids, vec!["eem", "eem", "pqn"]);

    let deduped_ids: Vec<String> = cards_of(&via_caps)
        .iter()
        .map(|c| c["place_id"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(deduped_ids, vec!["eem", "pqn"]);
}
