//! Parallel fan-out over independent agent branches.
//!
//! Each branch receives the same input state and produces its own output
//! state in isolation. The fan-out runs every branch, then merges the
//! per-branch outputs deterministically in declaration order. A branch
//! failure is recorded, never propagated: siblings keep running and the
//! merged result always comes back.

use anyhow::Result;
use futures::future::{join_all, BoxFuture};
use serde_json::{json, Map, Value};
use tracing::{debug, warn};

/// Shared input to every branch and the shape of the merged output.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DispatchState {
    /// Conversation-style messages, in order.
    pub messages: Vec<Value>,
    /// Non-message fields carried alongside the conversation.
    pub fields: Map<String, Value>,
}

impl DispatchState {
    /// Render the state as one JSON object: the fields plus the `messages`
    /// array.
    pub fn to_output(&self) -> Value {
        let mut output = self.fields.clone();
        output.insert("messages".to_string(), Value::Array(self.messages.clone()));
        Value::Object(output)
    }
}

/// One independent unit of work in the fan-out.
pub trait Branch: Send + Sync {
    /// Name used in status messages and logs.
    fn name(&self) -> &str;

    fn run<'a>(&'a self, state: &'a DispatchState) -> BoxFuture<'a, Result<DispatchState>>;
}

/// Runs a fixed set of branches and merges their outputs.
///
/// Declaration order is the merge order: messages concatenate branch by
/// branch, and overlapping fields resolve last-writer-wins, regardless of
/// which branch finished first.
pub struct Fanout {
    branches: Vec<Box<dyn Branch>>,
}

impl Fanout {
    pub fn new(branches: Vec<Box<dyn Branch>>) -> Self {
        Self { branches }
    }

    /// Run all branches concurrently. Cancelling the returned future
    /// cancels every branch still in flight.
    pub async fn run(&self, state: &DispatchState) -> DispatchState {
        let results = join_all(self.branches.iter().map(|branch| branch.run(state))).await;
        self.merge(results)
    }

    /// Run the branches one at a time on the current thread. Produces the
    /// same output as [`Fanout::run`] for the same branch results.
    pub fn run_blocking(&self, state: &DispatchState) -> DispatchState {
        let results = self
            .branches
            .iter()
            .map(|branch| futures::executor::block_on(branch.run(state)))
            .collect();
        self.merge(results)
    }

    fn merge(&self, results: Vec<Result<DispatchState>>) -> DispatchState {
        let mut merged = DispatchState::default();
        let mut status_lines: Vec<String> = Vec::new();
        let mut any_success = false;

        for (branch, result) in self.branches.iter().zip(results) {
            match result {
                Ok(output) => {
                    any_success = true;
                    debug!("Branch '{}' completed", branch.name());
                    merged.messages.extend(output.messages);
                    for (key, value) in output.fields {
                        merged.fields.insert(key, value);
                    }
                    status_lines.push(format!("{} completed successfully.", branch.name()));
                }
                Err(err) => {
                    warn!("Branch '{}' failed: {err:#}", branch.name());
                    status_lines.push(format!("{} failed: {err}", branch.name()));
                }
            }
        }

        if !any_success {
            status_lines.push("No responses were returned from parallel branches.".to_string());
        }

        merged.messages.push(json!({
            "role": "assistant",
            "content": status_lines.join("\n"),
        }));
        merged
    }
}
