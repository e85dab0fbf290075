//! Observed wallet and chain identities
//!
//! These are the values the synchronizer keeps canonical. They are plain
//! data: the synchronizer owns mutation, everything else reads.

use serde::{Deserialize, Serialize};

use crate::chain::{Address, NetworkId, TokenUnits};

/// The currently unlocked account, if any.
///
/// Transitions: `None -> Some` (unlock), `Some -> Some(other)` (account
/// switch), `Some -> None` (wallet locked).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WalletIdentity {
    pub account: Option<Address>,
}

impl WalletIdentity {
    pub fn locked() -> Self {
        Self { account: None }
    }

    pub fn unlocked(account: Address) -> Self {
        Self {
            account: Some(account),
        }
    }

    pub fn is_locked(&self) -> bool {
        self.account.is_none()
    }
}

/// The active network, `None` until the first successful network query.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChainIdentity {
    pub network: Option<NetworkId>,
}

/// Balances observed for the current account under the current network.
///
/// `token` is meaningful only while a token binding exists for the
/// current network; with no binding it is reported as zero without a
/// query ever being issued. `stale` marks that the last query attempt
/// failed and the values shown are the last known good ones.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BalanceSnapshot {
    pub native: TokenUnits,
    pub token: TokenUnits,
    pub stale: bool,
}

impl BalanceSnapshot {
    pub fn zero() -> Self {
        Self::default()
    }
}
