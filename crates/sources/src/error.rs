//! Error types for the external collaborator boundary.

use thiserror::Error;

/// Request-level errors raised by external collaborators.
///
/// The recommendation core never retries: a failed request surfaces as one
/// of these variants and the caller (or the fan-out orchestrator) decides
/// what to do with it.
#[derive(Error, Debug)]
pub enum SourceError {
    /// The upstream service answered with an error
    #[error("{service} request failed: {reason}")]
    Upstream { service: String, reason: String },

    /// The upstream service did not answer in time
    #[error("{service} request timed out")]
    Timeout { service: String },

    /// The upstream response could not be decoded
    #[error("Invalid response from {service}: {reason}")]
    InvalidResponse { service: String, reason: String },
}

/// Convenience type alias for Results at the collaborator boundary
pub type Result<T> = std::result::Result<T, SourceError>;
