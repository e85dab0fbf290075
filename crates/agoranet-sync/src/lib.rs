//! Agoranet Sync - the chain state synchronization core
//!
//! Owns the canonical client-side view of {current account, native
//! balance, token balance, network identifier} plus the contract
//! bindings for the active network, and keeps it consistent by polling
//! the injected provider. Everything else in Agoranet consumes this
//! crate; it depends on nothing above it.
//!
//! # Architecture
//!
//! ```text
//! ChainProvider (injected)
//!       │ request/response only
//!       ▼
//! ChainSynchronizer ── rebinds via agoranet-contracts on network change
//!       │
//!       ├── view()       consistent ChainView snapshots
//!       └── subscribe()  ChainEvent broadcast (no consumer polling)
//! ```
//!
//! The synchronizer is an owned instance with an explicit
//! `start()`/`stop()` lifecycle — no ambient globals, no timers outliving
//! their owner.

pub mod events;
mod synchronizer;

use serde::{Deserialize, Serialize};

use agoranet_types::{BalanceSnapshot, ChainIdentity, WalletIdentity};

pub use events::ChainEvent;
pub use synchronizer::{ChainSynchronizer, SyncConfig, DEFAULT_POLL_INTERVAL};

/// A consistent snapshot of the synchronized chain state.
///
/// `supported` is `None` until the first successful network query, then
/// states whether the active network has known deployments — a steady
/// state the presentation layer renders distinctly from "loading".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChainView {
    pub wallet: WalletIdentity,
    pub chain: ChainIdentity,
    pub balances: BalanceSnapshot,
    pub supported: Option<bool>,
    /// Rebind generation; bumps whenever the network changes. Consumers
    /// holding per-network state compare generations to detect
    /// invalidation.
    pub generation: u64,
}
