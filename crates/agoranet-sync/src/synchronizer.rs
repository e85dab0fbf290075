//! The polling synchronizer
//!
//! The injected provider has no push API, so observation is pull-based:
//! two independent fixed-interval cycles, one for wallet/balances and
//! one for the network identifier, each running as its own tokio task.
//! A slow network lookup therefore never blocks balance observation and
//! vice versa. Ticks never overlap within a cycle (the tick runs inline
//! in the task; missed interval slots are skipped, not queued).
//!
//! Every tick captures the rebind generation at its start and re-checks
//! it before applying any response, so a late balance fetched under an
//! old network can never overwrite state computed under the current one.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{broadcast, Mutex, RwLock};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use agoranet_contracts::{bind, ContractBindingSet, TokenBinding};
use agoranet_provider::ChainProvider;
use agoranet_types::{BalanceSnapshot, ChainIdentity, WalletIdentity};

use crate::events::ChainEvent;
use crate::ChainView;

/// Reference polling cadence of the original client.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(500);

const EVENT_CHANNEL_CAPACITY: usize = 256;

/// Synchronizer configuration.
#[derive(Debug, Clone)]
pub struct SyncConfig {
    /// Cadence of both polling cycles.
    pub poll_interval: Duration,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            poll_interval: DEFAULT_POLL_INTERVAL,
        }
    }
}

struct SyncState {
    wallet: WalletIdentity,
    chain: ChainIdentity,
    balances: BalanceSnapshot,
    bindings: Option<ContractBindingSet>,
    /// Bumped on every rebind; stale-response guard for in-flight queries.
    generation: u64,
}

struct SyncInner {
    provider: Arc<dyn ChainProvider>,
    state: RwLock<SyncState>,
    events: broadcast::Sender<ChainEvent>,
    stopped: AtomicBool,
}

impl SyncInner {
    fn is_stopped(&self) -> bool {
        self.stopped.load(Ordering::SeqCst)
    }

    fn emit(&self, event: ChainEvent) {
        // No notifications after stop() resolves.
        if !self.is_stopped() {
            let _ = self.events.send(event);
        }
    }
}

/// Owns the canonical view of {account, balances, network} and the
/// currently bound contracts.
///
/// Consumers read snapshots via [`view`](ChainSynchronizer::view) and
/// receive change notifications via
/// [`subscribe`](ChainSynchronizer::subscribe); only the synchronizer
/// mutates.
pub struct ChainSynchronizer {
    inner: Arc<SyncInner>,
    config: SyncConfig,
    tasks: Mutex<Vec<JoinHandle<()>>>,
}

impl ChainSynchronizer {
    pub fn new(provider: Arc<dyn ChainProvider>, config: SyncConfig) -> Self {
        let (events, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        Self {
            inner: Arc::new(SyncInner {
                provider,
                state: RwLock::new(SyncState {
                    wallet: WalletIdentity::locked(),
                    chain: ChainIdentity::default(),
                    balances: BalanceSnapshot::zero(),
                    bindings: None,
                    generation: 0,
                }),
                events,
                stopped: AtomicBool::new(false),
            }),
            config,
            tasks: Mutex::new(Vec::new()),
        }
    }

    /// Subscribe to change notifications.
    pub fn subscribe(&self) -> broadcast::Receiver<ChainEvent> {
        self.inner.events.subscribe()
    }

    /// Consistent snapshot of the current chain view.
    pub async fn view(&self) -> ChainView {
        let state = self.inner.state.read().await;
        ChainView {
            wallet: state.wallet.clone(),
            chain: state.chain.clone(),
            balances: state.balances.clone(),
            supported: state.bindings.as_ref().map(ContractBindingSet::is_bound),
            generation: state.generation,
        }
    }

    /// The binding set for the current network, if one was produced yet.
    pub async fn bindings(&self) -> Option<ContractBindingSet> {
        self.inner.state.read().await.bindings.clone()
    }

    /// Start both polling cycles. Idempotent per instance lifecycle:
    /// call once; restart after `stop` is not supported.
    pub async fn start(&self) {
        let mut tasks = self.tasks.lock().await;
        if !tasks.is_empty() || self.inner.is_stopped() {
            return;
        }
        info!(
            interval_ms = self.config.poll_interval.as_millis() as u64,
            "chain synchronizer starting"
        );
        tasks.push(spawn_cycle(
            self.inner.clone(),
            self.config.poll_interval,
            CycleKind::Wallet,
        ));
        tasks.push(spawn_cycle(
            self.inner.clone(),
            self.config.poll_interval,
            CycleKind::Network,
        ));
    }

    /// Stop both cycles. After this resolves no further notifications
    /// are emitted and no pending tick mutates state.
    pub async fn stop(&self) {
        self.inner.stopped.store(true, Ordering::SeqCst);
        let mut tasks = self.tasks.lock().await;
        for task in tasks.drain(..) {
            task.abort();
        }
        info!("chain synchronizer stopped");
    }

    /// Run a single wallet/balance tick. Exposed for hosts that drive
    /// their own scheduler instead of calling [`start`](Self::start).
    pub async fn poll_wallet_once(&self) {
        wallet_tick(&self.inner).await;
    }

    /// Run a single network tick. See [`poll_wallet_once`](Self::poll_wallet_once).
    pub async fn poll_network_once(&self) {
        network_tick(&self.inner).await;
    }
}

impl Drop for ChainSynchronizer {
    fn drop(&mut self) {
        self.inner.stopped.store(true, Ordering::SeqCst);
        if let Ok(mut tasks) = self.tasks.try_lock() {
            for task in tasks.drain(..) {
                task.abort();
            }
        }
    }
}

#[derive(Clone, Copy)]
enum CycleKind {
    Wallet,
    Network,
}

fn spawn_cycle(inner: Arc<SyncInner>, interval: Duration, kind: CycleKind) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(interval);
        // A tick that outruns the interval skips slots instead of
        // queueing bursts behind it.
        ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);
        loop {
            ticker.tick().await;
            if inner.is_stopped() {
                break;
            }
            match kind {
                CycleKind::Wallet => wallet_tick(&inner).await,
                CycleKind::Network => network_tick(&inner).await,
            }
        }
    })
}

// ============================================================================
// Wallet/balance cycle
// ============================================================================

async fn wallet_tick(inner: &SyncInner) {
    if inner.is_stopped() {
        return;
    }

    // Tick-scoped snapshot: identity changes mid-tick are picked up on
    // the next tick, never mixed into this one.
    let (generation, token_binding): (u64, Option<TokenBinding>) = {
        let state = inner.state.read().await;
        (
            state.generation,
            state.bindings.as_ref().and_then(|b| b.token().cloned()),
        )
    };

    let accounts = match inner.provider.list_accounts().await {
        Ok(accounts) => accounts,
        Err(err) => {
            warn!(error = %err, "account listing failed");
            return;
        }
    };
    if inner.is_stopped() {
        return;
    }

    let Some(account) = accounts.into_iter().next() else {
        let mut state = inner.state.write().await;
        if !state.wallet.is_locked() {
            info!("wallet is locked");
            state.wallet = WalletIdentity::locked();
            drop(state);
            inner.emit(ChainEvent::wallet_locked());
        }
        // No balance queries with no account.
        return;
    };

    {
        let mut state = inner.state.write().await;
        if state.wallet.account.as_ref() != Some(&account) {
            info!(account = %account, "account unlocked");
            state.wallet = WalletIdentity::unlocked(account.clone());
            drop(state);
            inner.emit(ChainEvent::account_changed(account.clone()));
        }
    }

    // Native balance.
    let native = match inner.provider.native_balance_of(&account).await {
        Ok(balance) => balance,
        Err(err) => {
            warn!(account = %account, error = %err, "native balance query failed");
            mark_stale(inner, generation, err.to_string()).await;
            return;
        }
    };
    if !apply_balance(inner, generation, |state| {
        if state.balances.native != native {
            state.balances.native = native;
            state.balances.stale = false;
            Some(ChainEvent::native_balance_changed(account.clone(), native))
        } else {
            state.balances.stale = false;
            None
        }
    })
    .await
    {
        return;
    }

    // Token balance: only when a binding exists for the current network;
    // otherwise reported as zero without issuing a query.
    match token_binding {
        Some(token) => {
            let balance = match token.balance_of(&account).await {
                Ok(balance) => balance,
                Err(err) => {
                    warn!(account = %account, error = %err, "token balance query failed");
                    mark_stale(inner, generation, err.to_string()).await;
                    return;
                }
            };
            apply_balance(inner, generation, |state| {
                if state.balances.token != balance {
                    state.balances.token = balance;
                    state.balances.stale = false;
                    Some(ChainEvent::token_balance_changed(account.clone(), balance))
                } else {
                    None
                }
            })
            .await;
        }
        None => {
            apply_balance(inner, generation, |state| {
                if state.balances.token != 0 {
                    state.balances.token = 0;
                    Some(ChainEvent::token_balance_changed(account.clone(), 0))
                } else {
                    None
                }
            })
            .await;
        }
    }
}

/// Apply a balance mutation if the tick's context is still current.
/// Returns false when the response was discarded (stop or rebind).
async fn apply_balance<F>(inner: &SyncInner, generation: u64, mutate: F) -> bool
where
    F: FnOnce(&mut SyncState) -> Option<ChainEvent>,
{
    if inner.is_stopped() {
        return false;
    }
    let mut state = inner.state.write().await;
    if state.generation != generation {
        debug!("discarding balance response from a stale network context");
        return false;
    }
    let event = mutate(&mut state);
    drop(state);
    if let Some(event) = event {
        inner.emit(event);
    }
    true
}

async fn mark_stale(inner: &SyncInner, generation: u64, reason: String) {
    if inner.is_stopped() {
        return;
    }
    let mut state = inner.state.write().await;
    if state.generation != generation || state.balances.stale {
        return;
    }
    // Last known values stay visible; the flag says they may lag.
    state.balances.stale = true;
    drop(state);
    inner.emit(ChainEvent::balance_query_failed(reason));
}

// ============================================================================
// Network cycle
// ============================================================================

async fn network_tick(inner: &SyncInner) {
    if inner.is_stopped() {
        return;
    }

    let known = inner.state.read().await.chain.network.clone();

    let network = match inner.provider.current_network_id().await {
        Ok(id) => id,
        Err(err) => {
            warn!(error = %err, "network identifier query failed");
            return;
        }
    };
    if inner.is_stopped() {
        return;
    }
    if known.as_ref() == Some(&network) {
        return;
    }

    // Store the identifier and replace the binding set in one write so
    // no reader ever observes a binding whose network does not match the
    // stored identity.
    let set = bind(inner.provider.clone(), network.clone());
    let supported = set.is_bound();
    {
        let mut state = inner.state.write().await;
        if state.chain.network.as_ref() == Some(&network) {
            // Another tick already applied this change.
            return;
        }
        info!(network = %network, supported, "connected to network");
        state.chain.network = Some(network.clone());
        state.generation += 1;
        let token_bound = set.token().is_some();
        state.bindings = Some(set);
        if !token_bound {
            // No token deployment here; the observation is zero.
            state.balances.token = 0;
        }
    }
    inner.emit(ChainEvent::network_changed(network, supported));
}
