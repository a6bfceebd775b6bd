//! # Sources Crate
//!
//! Domain types and the external-collaborator boundary for the restaurant
//! recommendation core.
//!
//! ## Components
//!
//! - [`types`]: `Candidate`, `UserAttributes`, `PriceLevel` and friends,
//!   the records flowing through filtering and ranking.
//! - [`providers`]: traits for the venue-search and user-profiling services
//!   the core depends on but does not implement.
//! - [`error`]: the request-level error those services can raise.

pub mod error;
pub mod providers;
pub mod types;

// Re-export commonly used types
pub use error::{Result, SourceError};
pub use providers::{CandidateSearch, ProfileSource};
pub use types::{Candidate, Location, PriceBand, PriceLevel, UserAttributes};
