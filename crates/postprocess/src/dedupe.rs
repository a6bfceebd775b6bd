//! Identity resolution and merge for restaurant cards.
//!
//! The pipeline's final message should carry a JSON payload with a `cards`
//! array. When upstream control flow emits the same place more than once,
//! duplicates leak into that array. This module derives an identity key per
//! card, keeps the first occurrence as the anchor, and folds later
//! occurrences into it.
//!
//! Everything here degrades to a no-op on irregular input. The merge sits
//! at the tail of a multi-stage pipeline where partial data is the common
//! case, so "return the input unchanged" always beats raising.

use std::collections::hash_map::Entry;
use std::collections::{HashMap, HashSet};

use serde_json::{Map, Value};
use tracing::debug;

use crate::content::{with_content, ContentShape};

/// Derived identity of a card. Never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum MergeKey {
    /// Trimmed non-empty `place_id`.
    Id(String),
    /// Fallback: lowercased trimmed name and address, at least one
    /// non-empty.
    NameAddress(String, String),
}

impl MergeKey {
    /// Derive the identity of a card, if it has one. A card with neither a
    /// usable `place_id` nor name/address has no identity and is never
    /// merged with anything.
    pub fn of(card: &Map<String, Value>) -> Option<Self> {
        if let Some(place_id) = card.get("place_id").and_then(Value::as_str) {
            let trimmed = place_id.trim();
            if !trimmed.is_empty() {
                return Some(Self::Id(trimmed.to_string()));
            }
        }

        let normalize = |key: &str| {
            card.get(key)
                .and_then(Value::as_str)
                .map(|s| s.trim().to_lowercase())
                .unwrap_or_default()
        };
        let name = normalize("name");
        let address = normalize("address");
        if !name.is_empty() || !address.is_empty() {
            return Some(Self::NameAddress(name, address));
        }

        None
    }
}

/// Deduplicate cards while preserving order.
///
/// Returns the deduplicated list and whether anything changed. `mutated`
/// is true whenever a duplicate key was seen, even if the merge added no
/// new field values.
pub fn dedupe_cards(cards: &[Value]) -> (Vec<Value>, bool) {
    let mut seen: HashMap<MergeKey, usize> = HashMap::new();
    let mut deduped: Vec<Value> = Vec::new();
    let mut mutated = false;

    for card in cards {
        let Some(fields) = card.as_object() else {
            // Non-object entries pass through untouched.
            deduped.push(card.clone());
            continue;
        };

        let Some(key) = MergeKey::of(fields) else {
            deduped.push(card.clone());
            continue;
        };

        match seen.entry(key) {
            Entry::Vacant(slot) => {
                slot.insert(deduped.len());
                deduped.push(card.clone());
            }
            Entry::Occupied(slot) => {
                mutated = true;
                if let Some(anchor) = deduped[*slot.get()].as_object_mut() {
                    merge_card(anchor, fields);
                }
            }
        }
    }

    if deduped.len() != cards.len() {
        mutated = true;
    }

    (deduped, mutated)
}

/// Merge an incoming duplicate into the anchor card.
///
/// The anchor's non-missing values are authoritative: a later duplicate
/// can fill gaps and extend lists, never overwrite real data.
fn merge_card(anchor: &mut Map<String, Value>, incoming: &Map<String, Value>) {
    for (key, value) in incoming {
        match anchor.get_mut(key) {
            None => {
                anchor.insert(key.clone(), value.clone());
            }
            Some(existing) => {
                if let (Value::Array(existing_items), Value::Array(incoming_items)) =
                    (&*existing, value)
                {
                    let merged = merge_lists(existing_items, incoming_items, key);
                    *existing = Value::Array(merged);
                } else if is_missing(existing) && !is_missing(value) {
                    *existing = value.clone();
                }
            }
        }
    }
}

/// Merge two lists while removing duplicates, anchor items first.
///
/// `photos` items are objects identified by their `name` string; first
/// occurrence wins. Everything else dedupes by exact equality.
fn merge_lists(existing: &[Value], incoming: &[Value], field: &str) -> Vec<Value> {
    if field == "photos" {
        let mut seen_names: HashSet<String> = HashSet::new();
        let mut merged: Vec<Value> = Vec::new();
        for item in existing.iter().chain(incoming) {
            if let Some(fields) = item.as_object() {
                if let Some(name) = fields.get("name").and_then(Value::as_str) {
                    if !seen_names.insert(name.to_string()) {
                        continue;
                    }
                }
                merged.push(item.clone());
            } else {
                if merged.contains(item) {
                    continue;
                }
                merged.push(item.clone());
            }
        }
        return merged;
    }

    let mut merged: Vec<Value> = Vec::new();
    for item in existing.iter().chain(incoming) {
        if !merged.contains(item) {
            merged.push(item.clone());
        }
    }
    merged
}

/// Missing means "carries no information": null, empty string, empty list,
/// empty object.
fn is_missing(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(fields) => fields.is_empty(),
        _ => false,
    }
}

/// Deduplicate the `cards` array of a payload.
///
/// Returns `Some(updated)` only when a merge actually changed something;
/// otherwise `None` so callers can leave the original payload untouched.
pub fn dedupe_payload(payload: &Value) -> Option<Value> {
    let fields = payload.as_object()?;
    let cards = fields.get("cards")?.as_array()?;
    if cards.is_empty() {
        return None;
    }

    let (deduped, mutated) = dedupe_cards(cards);
    if !mutated {
        return None;
    }

    debug!("Deduplicated cards: {} -> {}", cards.len(), deduped.len());

    let mut updated = fields.clone();
    updated.insert("cards".to_string(), Value::Array(deduped));
    Some(Value::Object(updated))
}

/// Remove duplicate cards from the final message of a pipeline result.
///
/// The result is expected to be a JSON object with a `messages` array whose
/// last entry carries a JSON payload including `cards`. Any shape mismatch
/// along that path (no messages, unrecognized content, malformed JSON, no
/// cards) returns the input unchanged. This function never fails; it only
/// upgrades well-formed payloads.
pub fn dedupe_final_output(output: &Value) -> Value {
    match deduped_output(output) {
        Some(updated) => updated,
        None => output.clone(),
    }
}

fn deduped_output(output: &Value) -> Option<Value> {
    let fields = output.as_object()?;
    let messages = fields.get("messages")?.as_array()?;
    let last = messages.last()?;

    let shape = ContentShape::detect(last.get("content")?)?;
    let payload = shape.parse_json()?;
    let updated_payload = dedupe_payload(&payload)?;

    let mut new_messages = messages.clone();
    let replacement = with_content(last, shape.serialize(&updated_payload));
    *new_messages.last_mut()? = replacement;

    let mut updated = fields.clone();
    updated.insert("messages".to_string(), Value::Array(new_messages));
    Some(Value::Object(updated))
}
