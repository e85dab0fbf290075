//! Marketplace values

use serde::{Deserialize, Serialize};

use crate::chain::Address;

/// A service agent as listed by the on-ledger registry.
///
/// Ephemeral: re-fetched per listing call, never cached across calls.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentDescriptor {
    /// The agent contract address.
    pub address: Address,
    /// Human-readable agent name from the agent contract.
    pub name: String,
    /// Off-chain service endpoint, when the agent publishes one.
    pub endpoint: Option<String>,
}
