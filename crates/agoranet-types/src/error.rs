//! Error types for Agoranet
//!
//! The taxonomy separates transient provider trouble (absorbed at the
//! synchronizer boundary and retried by the next tick) from structural
//! states the presentation layer must render distinctly (unsupported
//! network, directory unavailable).

use thiserror::Error;

/// Result type for Agoranet operations
pub type Result<T> = std::result::Result<T, AgoranetError>;

/// Agoranet error types
#[derive(Debug, Clone, Error)]
pub enum AgoranetError {
    // ========================================================================
    // Provider Errors
    // ========================================================================

    /// No injected wallet/node connection is available
    #[error("No wallet provider is available")]
    ProviderUnavailable,

    /// A provider query failed transiently; the next poll tick retries
    #[error("Provider query failed: {reason}")]
    QueryFailed { reason: String },

    /// A state-mutating call was rejected by the provider or contract
    #[error("Call {method} rejected: {reason}")]
    CallRejected { method: String, reason: String },

    // ========================================================================
    // Binding Errors
    // ========================================================================

    /// The active network has no known contract deployments
    #[error("Network {network} has no known contract deployments")]
    UnsupportedNetwork { network: String },

    /// No registry binding exists for the current network
    #[error("Service directory is unavailable on the current network")]
    DirectoryUnavailable,

    // ========================================================================
    // Job Errors
    // ========================================================================

    /// Deposit larger than available balance or allowance
    #[error("Insufficient funds for deposit of {requested}")]
    InsufficientFunds { requested: u128 },

    /// Withdrawal attempted before the job completed
    #[error("Job is not ready for withdrawal (phase: {phase})")]
    NotReady { phase: String },

    /// A zero or otherwise invalid amount was supplied
    #[error("Invalid amount: {reason}")]
    InvalidAmount { reason: String },

    // ========================================================================
    // Value Errors
    // ========================================================================

    /// A string failed to parse as a 20-byte address
    #[error("Invalid address: {value}")]
    InvalidAddress { value: String },

    /// A contract call returned a value the ABI descriptor cannot decode
    #[error("Malformed {method} response: {reason}")]
    MalformedResponse { method: String, reason: String },

    // ========================================================================
    // Lifecycle Errors
    // ========================================================================

    /// The synchronizer or controller was stopped
    #[error("Component has been stopped")]
    Stopped,
}

impl AgoranetError {
    /// Transient errors are absorbed at poll boundaries and retried by
    /// the next tick; structural errors are surfaced as state.
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            AgoranetError::QueryFailed { .. } | AgoranetError::ProviderUnavailable
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transient_classification() {
        assert!(AgoranetError::QueryFailed {
            reason: "rpc timeout".into()
        }
        .is_transient());
        assert!(!AgoranetError::UnsupportedNetwork {
            network: "99".into()
        }
        .is_transient());
        assert!(!AgoranetError::DirectoryUnavailable.is_transient());
    }
}
