//! Chain events for subscribers
//!
//! Events are broadcast to all subscribers (presentation layer, job
//! controllers, logging). Consumers never need to poll the synchronizer
//! themselves.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use agoranet_types::{Address, NetworkId, TokenUnits};

/// Change notifications emitted by the chain state synchronizer.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ChainEvent {
    /// An account was unlocked, or the unlocked account changed.
    AccountChanged {
        account: Address,
        timestamp: DateTime<Utc>,
    },

    /// The wallet reported zero unlocked accounts.
    WalletLocked { timestamp: DateTime<Utc> },

    /// Native-currency balance of the current account changed.
    NativeBalanceChanged {
        account: Address,
        balance: TokenUnits,
        timestamp: DateTime<Utc>,
    },

    /// Marketplace-token balance of the current account changed.
    TokenBalanceChanged {
        account: Address,
        balance: TokenUnits,
        timestamp: DateTime<Utc>,
    },

    /// The active network changed and contracts were rebound.
    ///
    /// `supported` is false when the network has no known deployments;
    /// directory listings and token balances are unavailable until the
    /// network changes again. Consumers holding job state bound to the
    /// previous network must treat it as invalidated.
    NetworkChanged {
        network: NetworkId,
        supported: bool,
        timestamp: DateTime<Utc>,
    },

    /// A balance query failed this tick; the last known values remain
    /// visible, flagged stale, until a later tick succeeds.
    BalanceQueryFailed {
        reason: String,
        timestamp: DateTime<Utc>,
    },
}

impl ChainEvent {
    pub fn account_changed(account: Address) -> Self {
        Self::AccountChanged {
            account,
            timestamp: Utc::now(),
        }
    }

    pub fn wallet_locked() -> Self {
        Self::WalletLocked {
            timestamp: Utc::now(),
        }
    }

    pub fn native_balance_changed(account: Address, balance: TokenUnits) -> Self {
        Self::NativeBalanceChanged {
            account,
            balance,
            timestamp: Utc::now(),
        }
    }

    pub fn token_balance_changed(account: Address, balance: TokenUnits) -> Self {
        Self::TokenBalanceChanged {
            account,
            balance,
            timestamp: Utc::now(),
        }
    }

    pub fn network_changed(network: NetworkId, supported: bool) -> Self {
        Self::NetworkChanged {
            network,
            supported,
            timestamp: Utc::now(),
        }
    }

    pub fn balance_query_failed(reason: impl Into<String>) -> Self {
        Self::BalanceQueryFailed {
            reason: reason.into(),
            timestamp: Utc::now(),
        }
    }
}
