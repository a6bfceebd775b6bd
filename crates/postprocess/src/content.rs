//! Message content shapes.
//!
//! A pipeline message carries its content either as one plain string or as
//! a list of typed parts. The shape is detected once at the boundary and
//! carried as a closed tagged union; parsing and serialization are explicit
//! per variant instead of re-sniffing the value ad hoc.

use serde_json::{json, Map, Value};

/// The two content shapes a final message can carry.
#[derive(Debug, Clone, PartialEq)]
pub enum ContentShape {
    /// `"content": "..."`
    PlainText(String),
    /// `"content": [{"type": "text", "text": "..."}, ...]`
    Parts(Vec<Value>),
}

impl ContentShape {
    /// Detect the shape of a content value. Anything that is neither a
    /// string nor an array has no recognizable shape.
    pub fn detect(content: &Value) -> Option<Self> {
        match content {
            Value::String(text) => Some(Self::PlainText(text.clone())),
            Value::Array(parts) => Some(Self::Parts(parts.clone())),
            _ => None,
        }
    }

    /// The concatenated text carried by this shape, trimmed.
    pub fn text(&self) -> String {
        match self {
            Self::PlainText(text) => text.trim().to_string(),
            Self::Parts(parts) => {
                let mut combined = String::new();
                for part in parts {
                    if !is_text_part(part) {
                        continue;
                    }
                    if let Some(text) = part.get("text").and_then(Value::as_str) {
                        combined.push_str(text);
                    }
                }
                combined.trim().to_string()
            }
        }
    }

    /// Parse the carried text as a JSON object. `None` for empty or
    /// malformed text; callers treat that as "nothing to upgrade".
    pub fn parse_json(&self) -> Option<Value> {
        let text = self.text();
        if text.is_empty() {
            return None;
        }
        serde_json::from_str(&text).ok()
    }

    /// Serialize a payload back into this shape.
    ///
    /// For parts, the first text part receives the payload and any further
    /// text parts are dropped so the payload cannot appear twice; non-text
    /// parts keep their position. A parts list without any text part gets
    /// one appended.
    pub fn serialize(&self, payload: &Value) -> Value {
        let dumped = payload.to_string();
        match self {
            Self::PlainText(_) => Value::String(dumped),
            Self::Parts(parts) => {
                let mut rebuilt: Vec<Value> = Vec::with_capacity(parts.len());
                let mut replaced = false;
                for part in parts {
                    if is_text_part(part) {
                        if !replaced {
                            let mut updated = part
                                .as_object()
                                .cloned()
                                .unwrap_or_else(Map::new);
                            updated.insert("text".to_string(), Value::String(dumped.clone()));
                            rebuilt.push(Value::Object(updated));
                            replaced = true;
                        }
                        continue;
                    }
                    rebuilt.push(part.clone());
                }
                if !replaced {
                    rebuilt.push(json!({"type": "text", "text": dumped}));
                }
                Value::Array(rebuilt)
            }
        }
    }
}

fn is_text_part(part: &Value) -> bool {
    part.get("type").and_then(Value::as_str) == Some("text")
}

/// Pure constructor: a copy of `message` carrying `content`.
///
/// Callers replace list elements with the returned value instead of
/// mutating message objects in place.
pub fn with_content(message: &Value, content: Value) -> Value {
    let mut updated = message.as_object().cloned().unwrap_or_else(Map::new);
    updated.insert("content".to_string(), content);
    Value::Object(updated)
}
