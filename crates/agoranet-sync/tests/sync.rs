//! Synchronizer protocol tests
//!
//! Ticks are driven directly through `poll_wallet_once` /
//! `poll_network_once` so every interleaving is deterministic; no test
//! depends on timer cadence.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::{json, Value};
use tokio::sync::Notify;

use agoranet_provider::{CallRequest, ChainProvider, TxReceipt};
use agoranet_sync::{ChainEvent, ChainSynchronizer, SyncConfig};
use agoranet_types::{Address, AgoranetError, NetworkId, Result, TokenUnits};

const ACCOUNT_A: &str = "0xaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa";
const ONE_ETHER: TokenUnits = 1_000_000_000_000_000_000;

fn addr(s: &str) -> Address {
    Address::parse(s).unwrap()
}

/// Scripted provider: each query pops the next scripted response; the
/// last response is sticky once the script runs out.
#[derive(Default)]
struct ScriptedProvider {
    accounts: Mutex<VecDeque<Result<Vec<Address>>>>,
    native: Mutex<VecDeque<Result<TokenUnits>>>,
    network: Mutex<VecDeque<Result<NetworkId>>>,
    call_results: Mutex<VecDeque<Result<Value>>>,
    calls_seen: Mutex<Vec<CallRequest>>,
}

impl ScriptedProvider {
    fn push_accounts(&self, response: Result<Vec<Address>>) {
        self.accounts.lock().unwrap().push_back(response);
    }

    fn push_native(&self, response: Result<TokenUnits>) {
        self.native.lock().unwrap().push_back(response);
    }

    fn push_network(&self, response: Result<NetworkId>) {
        self.network.lock().unwrap().push_back(response);
    }

    fn push_call(&self, response: Result<Value>) {
        self.call_results.lock().unwrap().push_back(response);
    }

    fn next<T: Clone>(queue: &Mutex<VecDeque<Result<T>>>) -> Result<T> {
        let mut queue = queue.lock().unwrap();
        match queue.len() {
            0 => Err(AgoranetError::QueryFailed {
                reason: "script exhausted".into(),
            }),
            1 => queue.front().cloned().unwrap(),
            _ => queue.pop_front().unwrap(),
        }
    }
}

#[async_trait]
impl ChainProvider for ScriptedProvider {
    async fn list_accounts(&self) -> Result<Vec<Address>> {
        Self::next(&self.accounts)
    }

    async fn native_balance_of(&self, _account: &Address) -> Result<TokenUnits> {
        Self::next(&self.native)
    }

    async fn current_network_id(&self) -> Result<NetworkId> {
        Self::next(&self.network)
    }

    async fn call(&self, request: CallRequest) -> Result<Value> {
        self.calls_seen.lock().unwrap().push(request);
        Self::next(&self.call_results)
    }

    async fn send(&self, _request: CallRequest) -> Result<TxReceipt> {
        Err(AgoranetError::CallRejected {
            method: "send".into(),
            reason: "not scripted".into(),
        })
    }
}

fn drain_events(rx: &mut tokio::sync::broadcast::Receiver<ChainEvent>) -> Vec<ChainEvent> {
    let mut events = Vec::new();
    while let Ok(event) = rx.try_recv() {
        events.push(event);
    }
    events
}

#[tokio::test]
async fn wallet_identity_follows_account_responses() {
    let provider = Arc::new(ScriptedProvider::default());
    provider.push_accounts(Ok(vec![]));
    provider.push_accounts(Ok(vec![addr(ACCOUNT_A)]));
    provider.push_accounts(Ok(vec![]));
    provider.push_native(Ok(0));

    let sync = ChainSynchronizer::new(provider, SyncConfig::default());

    sync.poll_wallet_once().await;
    assert!(sync.view().await.wallet.is_locked());

    sync.poll_wallet_once().await;
    assert_eq!(sync.view().await.wallet.account, Some(addr(ACCOUNT_A)));

    sync.poll_wallet_once().await;
    assert!(sync.view().await.wallet.is_locked());
}

#[tokio::test]
async fn unlock_and_balance_emit_one_notification_each() {
    let provider = Arc::new(ScriptedProvider::default());
    provider.push_accounts(Ok(vec![]));
    provider.push_accounts(Ok(vec![addr(ACCOUNT_A)]));
    provider.push_native(Ok(ONE_ETHER));

    let sync = ChainSynchronizer::new(provider, SyncConfig::default());
    let mut rx = sync.subscribe();

    // Locked wallet, already locked: nothing to report.
    sync.poll_wallet_once().await;
    assert!(drain_events(&mut rx).is_empty());

    sync.poll_wallet_once().await;
    let view = sync.view().await;
    assert_eq!(view.wallet.account, Some(addr(ACCOUNT_A)));
    assert_eq!(view.balances.native, ONE_ETHER);

    let events = drain_events(&mut rx);
    let unlocks = events
        .iter()
        .filter(|e| matches!(e, ChainEvent::AccountChanged { .. }))
        .count();
    let balance_changes = events
        .iter()
        .filter(|e| matches!(e, ChainEvent::NativeBalanceChanged { .. }))
        .count();
    assert_eq!(unlocks, 1);
    assert_eq!(balance_changes, 1);
}

#[tokio::test]
async fn identical_balance_responses_are_idempotent() {
    let provider = Arc::new(ScriptedProvider::default());
    provider.push_accounts(Ok(vec![addr(ACCOUNT_A)]));
    provider.push_native(Ok(ONE_ETHER));

    let sync = ChainSynchronizer::new(provider, SyncConfig::default());

    sync.poll_wallet_once().await;
    let mut rx = sync.subscribe();

    // Same account, same balance: no notification fires.
    sync.poll_wallet_once().await;
    sync.poll_wallet_once().await;
    assert!(drain_events(&mut rx).is_empty());
}

#[tokio::test]
async fn balance_failure_keeps_last_known_value_and_flags_stale() {
    let provider = Arc::new(ScriptedProvider::default());
    provider.push_accounts(Ok(vec![addr(ACCOUNT_A)]));
    provider.push_native(Ok(ONE_ETHER));
    provider.push_native(Err(AgoranetError::QueryFailed {
        reason: "rpc timeout".into(),
    }));

    let sync = ChainSynchronizer::new(provider, SyncConfig::default());
    sync.poll_wallet_once().await;
    assert_eq!(sync.view().await.balances.native, ONE_ETHER);

    let mut rx = sync.subscribe();
    sync.poll_wallet_once().await;

    let view = sync.view().await;
    // Never coerced to zero: the last known value stays, flagged stale.
    assert_eq!(view.balances.native, ONE_ETHER);
    assert!(view.balances.stale);
    let events = drain_events(&mut rx);
    assert!(events
        .iter()
        .any(|e| matches!(e, ChainEvent::BalanceQueryFailed { .. })));
}

#[tokio::test]
async fn network_change_binds_known_deployments() {
    let provider = Arc::new(ScriptedProvider::default());
    provider.push_network(Ok(NetworkId::from("3")));

    let sync = ChainSynchronizer::new(provider, SyncConfig::default());
    let mut rx = sync.subscribe();
    assert!(sync.bindings().await.is_none());

    sync.poll_network_once().await;

    let bindings = sync.bindings().await.expect("bound after network tick");
    assert_eq!(bindings.network(), &NetworkId::from("3"));
    assert!(bindings.registry().is_some());
    assert!(bindings.token().is_some());
    assert!(matches!(
        drain_events(&mut rx).as_slice(),
        [ChainEvent::NetworkChanged {
            supported: true,
            ..
        }]
    ));

    // Same identifier again: no-op, no notification.
    sync.poll_network_once().await;
    assert!(drain_events(&mut rx).is_empty());
}

#[tokio::test]
async fn switching_to_unbound_network_zeroes_token_observation() {
    let provider = Arc::new(ScriptedProvider::default());
    provider.push_accounts(Ok(vec![addr(ACCOUNT_A)]));
    provider.push_native(Ok(ONE_ETHER));
    // Token balance on the bound network.
    provider.push_call(Ok(json!({ "balance": "25000" })));
    provider.push_network(Ok(NetworkId::from("3")));
    provider.push_network(Ok(NetworkId::from("99")));

    let sync = ChainSynchronizer::new(provider.clone(), SyncConfig::default());

    sync.poll_network_once().await;
    sync.poll_wallet_once().await;
    assert_eq!(sync.view().await.balances.token, 25_000);

    let mut rx = sync.subscribe();
    sync.poll_network_once().await;

    let view = sync.view().await;
    assert_eq!(view.supported, Some(false));
    assert_eq!(view.balances.token, 0);
    let bindings = sync.bindings().await.unwrap();
    assert_eq!(bindings.network(), &NetworkId::from("99"));
    assert!(bindings.registry().is_none());
    assert!(bindings.token().is_none());
    assert!(matches!(
        drain_events(&mut rx).as_slice(),
        [ChainEvent::NetworkChanged {
            supported: false,
            ..
        }]
    ));

    // Next wallet tick must not query token balance through the old
    // binding: only the one balanceOf from the bound network is seen.
    sync.poll_wallet_once().await;
    assert_eq!(provider.calls_seen.lock().unwrap().len(), 1);
    assert_eq!(sync.view().await.balances.token, 0);
}

/// Provider that suspends the native balance query until the test
/// releases it, so a network rebind can land mid-flight.
struct RacingProvider {
    balance_requested: Notify,
    balance_release: Notify,
    network: NetworkId,
}

#[async_trait]
impl ChainProvider for RacingProvider {
    async fn list_accounts(&self) -> Result<Vec<Address>> {
        Ok(vec![addr(ACCOUNT_A)])
    }

    async fn native_balance_of(&self, _account: &Address) -> Result<TokenUnits> {
        self.balance_requested.notify_one();
        self.balance_release.notified().await;
        Ok(777)
    }

    async fn current_network_id(&self) -> Result<NetworkId> {
        Ok(self.network.clone())
    }

    async fn call(&self, _request: CallRequest) -> Result<Value> {
        Ok(json!("0x00"))
    }

    async fn send(&self, _request: CallRequest) -> Result<TxReceipt> {
        Err(AgoranetError::CallRejected {
            method: "send".into(),
            reason: "read-only test".into(),
        })
    }
}

#[tokio::test]
async fn late_balance_response_from_stale_context_is_discarded() {
    let provider = Arc::new(RacingProvider {
        balance_requested: Notify::new(),
        balance_release: Notify::new(),
        network: NetworkId::from("99"),
    });
    let sync = Arc::new(ChainSynchronizer::new(
        provider.clone(),
        SyncConfig::default(),
    ));
    let mut rx = sync.subscribe();

    let wallet_sync = sync.clone();
    let wallet_tick = tokio::spawn(async move { wallet_sync.poll_wallet_once().await });

    // Wait until the balance query is in flight, then change networks
    // underneath it before letting the response arrive.
    provider.balance_requested.notified().await;
    sync.poll_network_once().await;
    provider.balance_release.notify_one();
    wallet_tick.await.unwrap();

    let view = sync.view().await;
    assert_eq!(view.balances.native, 0, "stale response must be discarded");
    assert!(!drain_events(&mut rx)
        .iter()
        .any(|e| matches!(e, ChainEvent::NativeBalanceChanged { .. })));
}

#[tokio::test]
async fn stopped_synchronizer_emits_nothing_and_keeps_state() {
    let provider = Arc::new(ScriptedProvider::default());
    provider.push_accounts(Ok(vec![addr(ACCOUNT_A)]));
    provider.push_native(Ok(ONE_ETHER));
    provider.push_network(Ok(NetworkId::from("3")));

    let sync = ChainSynchronizer::new(provider, SyncConfig::default());
    let mut rx = sync.subscribe();

    sync.stop().await;
    sync.poll_wallet_once().await;
    sync.poll_network_once().await;

    let view = sync.view().await;
    assert!(view.wallet.is_locked());
    assert!(view.chain.network.is_none());
    assert!(drain_events(&mut rx).is_empty());
}
