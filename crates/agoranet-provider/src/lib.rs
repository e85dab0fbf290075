//! Agoranet Provider - the injected wallet/node seam
//!
//! The browser host injects a wallet/node connection that only offers
//! request/response calls — no push events. This crate defines the trait
//! the rest of Agoranet consumes. Implementations live with the host
//! (and in test doubles); the core never constructs one itself.
//!
//! Failure is a distinct outcome on every call: a default of zero would
//! be indistinguishable from a real zero balance, so nothing here ever
//! coerces an error to a value.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use agoranet_types::{Address, NetworkId, Result, TokenUnits};

/// A read or state-mutating call addressed to a deployed contract.
///
/// `args` are JSON values shaped by the target function's ABI
/// descriptor; the provider is responsible for encoding them on the
/// wire.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CallRequest {
    /// Contract address the call is directed at.
    pub to: Address,
    /// ABI function name.
    pub method: String,
    /// Positional arguments.
    pub args: Vec<Value>,
}

impl CallRequest {
    pub fn new(to: Address, method: impl Into<String>) -> Self {
        Self {
            to,
            method: method.into(),
            args: Vec::new(),
        }
    }

    pub fn with_args(mut self, args: Vec<Value>) -> Self {
        self.args = args;
        self
    }
}

/// Receipt for a submitted state-mutating call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TxReceipt {
    pub tx_hash: String,
}

/// The injected wallet/node connection.
///
/// Pure request/response: every method is a single round-trip with no
/// side effects beyond the read (for the query methods) and no event
/// subscription surface. Timeouts are the implementation's concern and
/// surface as ordinary `QueryFailed` errors.
#[async_trait]
pub trait ChainProvider: Send + Sync {
    /// List unlocked accounts. An empty list means the wallet is locked.
    async fn list_accounts(&self) -> Result<Vec<Address>>;

    /// Native-currency balance of `account`, in smallest units.
    async fn native_balance_of(&self, account: &Address) -> Result<TokenUnits>;

    /// Identifier of the network the node is connected to.
    async fn current_network_id(&self) -> Result<NetworkId>;

    /// Issue a read-only contract call and return the decoded JSON value.
    async fn call(&self, request: CallRequest) -> Result<Value>;

    /// Submit a state-mutating contract call; resolves once the
    /// transaction is accepted, with its receipt.
    async fn send(&self, request: CallRequest) -> Result<TxReceipt>;
}
