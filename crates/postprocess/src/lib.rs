//! Post-processing for pipeline results: content-shape handling, duplicate
//! card resolution, and interception of the invocation surface.

pub mod content;
pub mod dedupe;
pub mod interceptor;

pub use content::{with_content, ContentShape};
pub use dedupe::{dedupe_cards, dedupe_final_output, dedupe_payload, MergeKey};
pub use interceptor::{intercept, Capabilities, Transform};
