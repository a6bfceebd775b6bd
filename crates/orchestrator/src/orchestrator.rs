//! End-to-end recommendation flow.
//!
//! Venue search and user profiling run as parallel fan-out branches; the
//! merged state then flows through hard filtering, ranking, and card
//! formatting. The final payload lands in the last assistant message, which
//! is where the dedupe transform of [`intercepted_capabilities`] looks for
//! it.
//!
//! [`intercepted_capabilities`]: RecommendationOrchestrator::intercepted_capabilities

use std::sync::Arc;

use anyhow::{Context, Result};
use futures::future::BoxFuture;
use futures::{FutureExt, StreamExt};
use pipeline::{HardFilters, Ranker, ScoringConfig, WeightOverrides};
use postprocess::{dedupe_final_output, intercept, Capabilities};
use serde::Deserialize;
use serde_json::{json, Value};
use sources::{Candidate, CandidateSearch, ProfileSource, UserAttributes};
use tracing::{info, warn};

use crate::cards;
use crate::fanout::{Branch, DispatchState, Fanout};

/// One recommendation request. Deserializes leniently: missing fields take
/// their defaults, unknown fields are ignored.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RecommendRequest {
    pub query: String,
    pub filters: HardFilters,
    pub top_n: usize,
    pub weights: WeightOverrides,
}

impl Default for RecommendRequest {
    fn default() -> Self {
        Self {
            query: String::new(),
            filters: HardFilters::default(),
            top_n: 5,
            weights: WeightOverrides::default(),
        }
    }
}

struct SearchBranch {
    search: Arc<dyn CandidateSearch>,
    query: String,
}

impl Branch for SearchBranch {
    fn name(&self) -> &str {
        self.search.name()
    }

    fn run<'a>(&'a self, _state: &'a DispatchState) -> BoxFuture<'a, Result<DispatchState>> {
        async move {
            let candidates = self.search.search(&self.query).await?;
            let mut output = DispatchState::default();
            output.messages.push(json!({
                "role": "assistant",
                "content": format!("Found {} candidate venues.", candidates.len()),
            }));
            output.fields.insert(
                "candidates".to_string(),
                serde_json::to_value(&candidates).context("serializing candidates")?,
            );
            Ok(output)
        }
        .boxed()
    }
}

struct ProfileBranch {
    profile: Arc<dyn ProfileSource>,
    query: String,
}

impl Branch for ProfileBranch {
    fn name(&self) -> &str {
        self.profile.name()
    }

    fn run<'a>(&'a self, _state: &'a DispatchState) -> BoxFuture<'a, Result<DispatchState>> {
        async move {
            let attrs = self.profile.profile(&self.query).await?;
            let mut output = DispatchState::default();
            output.messages.push(json!({
                "role": "assistant",
                "content": "Derived taste profile for this request.",
            }));
            output.fields.insert(
                "attributes".to_string(),
                serde_json::to_value(&attrs).context("serializing attributes")?,
            );
            Ok(output)
        }
        .boxed()
    }
}

/// Ties the whole flow together: fan-out, filter, rank, format.
///
/// Collaborator failures degrade instead of propagating: a failed search
/// branch yields an empty card list, a failed profile branch falls back to
/// empty attributes.
pub struct RecommendationOrchestrator {
    search: Arc<dyn CandidateSearch>,
    profile: Arc<dyn ProfileSource>,
    ranker: Ranker,
}

impl RecommendationOrchestrator {
    pub fn new(search: Arc<dyn CandidateSearch>, profile: Arc<dyn ProfileSource>) -> Self {
        Self {
            search,
            profile,
            ranker: Ranker::default(),
        }
    }

    pub fn with_scoring(mut self, config: ScoringConfig) -> Self {
        self.ranker = Ranker::new(config);
        self
    }

    fn fanout(&self, request: &RecommendRequest) -> Fanout {
        Fanout::new(vec![
            Box::new(SearchBranch {
                search: self.search.clone(),
                query: request.query.clone(),
            }),
            Box::new(ProfileBranch {
                profile: self.profile.clone(),
                query: request.query.clone(),
            }),
        ])
    }

    /// Run the full flow. The returned object carries the conversation
    /// messages with the card payload in the last one.
    pub async fn recommend(&self, request: &RecommendRequest) -> Value {
        let state = self.fanout(request).run(&DispatchState::default()).await;
        self.finish(state, request)
    }

    /// Synchronous variant: branches run one at a time on the current
    /// thread. Same output as [`recommend`](Self::recommend) for the same
    /// branch results.
    pub fn recommend_blocking(&self, request: &RecommendRequest) -> Value {
        let state = self.fanout(request).run_blocking(&DispatchState::default());
        self.finish(state, request)
    }

    fn finish(&self, mut state: DispatchState, request: &RecommendRequest) -> Value {
        let candidates: Vec<Candidate> = state
            .fields
            .remove("candidates")
            .and_then(|value| serde_json::from_value(value).ok())
            .unwrap_or_default();
        let attrs: UserAttributes = state
            .fields
            .remove("attributes")
            .and_then(|value| serde_json::from_value(value).ok())
            .unwrap_or_default();

        if candidates.is_empty() {
            warn!("No candidates available for query '{}'", request.query);
        }

        let filtered = request.filters.build().apply(candidates);
        let ranking = self.ranker.rank(
            filtered.candidates,
            &attrs,
            request.top_n,
            Some(&request.weights),
        );
        info!(
            "Query '{}': {} gathered, {} after filters, {} recommended",
            request.query,
            filtered.original_count,
            filtered.filtered_count,
            ranking.ranked.len()
        );

        let payload = cards::payload(&ranking, &request.query);
        state.messages.push(json!({
            "role": "assistant",
            "content": payload.to_string(),
        }));
        state.to_output()
    }

    /// Expose the flow through every invocation shape, with duplicate-card
    /// resolution applied to each emitted result.
    ///
    /// Inputs deserialize as [`RecommendRequest`]; anything malformed falls
    /// back to the default request. The event-stream shapes stay absent:
    /// this flow emits results, not intermediate events.
    pub fn intercepted_capabilities(self: &Arc<Self>) -> Capabilities {
        let caps = Capabilities {
            invoke: Some({
                let this = self.clone();
                Box::new(move |input| this.recommend_blocking(&parse_request(input)))
            }),
            invoke_async: Some({
                let this = self.clone();
                Box::new(move |input| {
                    let this = this.clone();
                    async move { this.recommend(&parse_request(input)).await }.boxed()
                })
            }),
            batch: Some({
                let this = self.clone();
                Box::new(move |inputs| {
                    inputs
                        .into_iter()
                        .map(|input| this.recommend_blocking(&parse_request(input)))
                        .collect()
                })
            }),
            batch_async: Some({
                let this = self.clone();
                Box::new(move |inputs| {
                    let this = this.clone();
                    async move {
                        let mut outputs = Vec::with_capacity(inputs.len());
                        for input in inputs {
                            outputs.push(this.recommend(&parse_request(input)).await);
                        }
                        outputs
                    }
                    .boxed()
                })
            }),
            stream: Some({
                let this = self.clone();
                Box::new(move |input| {
                    let result = this.recommend_blocking(&parse_request(input));
                    Box::new(std::iter::once(result))
                })
            }),
            stream_async: Some({
                let this = self.clone();
                Box::new(move |input| {
                    let this = this.clone();
                    futures::stream::once(
                        async move { this.recommend(&parse_request(input)).await },
                    )
                    .boxed()
                })
            }),
            stream_events: None,
            stream_events_async: None,
        };
        intercept(caps, Arc::new(|chunk| dedupe_final_output(chunk)))
    }
}

fn parse_request(input: Value) -> RecommendRequest {
    serde_json::from_value(input).unwrap_or_default()
}
