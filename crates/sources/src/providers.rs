//! Trait boundary for the external data-gathering collaborators.
//!
//! Venue search and user profiling are remote services. The core only sees
//! them through these traits: a request goes in, structured data or a
//! request-level [`SourceError`] comes back. Retry and timeout policy live
//! on the other side of the boundary.

use futures::future::BoxFuture;

use crate::error::Result;
use crate::types::{Candidate, UserAttributes};

/// External venue search: free-text query in, candidate venues out.
pub trait CandidateSearch: Send + Sync {
    /// Name used in logs and fan-out status messages.
    fn name(&self) -> &str;

    /// Run the search. Returns every candidate the service produced;
    /// the core applies its own filtering and ranking afterwards.
    fn search<'a>(&'a self, query: &'a str) -> BoxFuture<'a, Result<Vec<Candidate>>>;
}

/// External user profiling: derives taste attributes for the request.
///
/// An empty [`UserAttributes`] is a valid answer meaning "no preference",
/// never an error.
pub trait ProfileSource: Send + Sync {
    fn name(&self) -> &str;

    fn profile<'a>(&'a self, query: &'a str) -> BoxFuture<'a, Result<UserAttributes>>;
}
