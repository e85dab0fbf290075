//! Agoranet Jobs - drives the escrow protocol for one hired agent
//!
//! The controller owns nothing on-ledger: it submits deposit/withdraw
//! calls and *observes* acceptance and completion by polling, tolerating
//! the ledger moving between two of its own polls. Lifecycle:
//!
//! ```text
//! Intent → Deposited → Accepted → Completed → Withdrawn
//!    └────────────── Unsupported (absorbing) ──────────┘
//! ```
//!
//! Acceptance and completion are set by the agent, never by this
//! client. Polling reuses the synchronizer's cooperative fixed-interval
//! model and stops at a terminal phase or teardown.

pub mod events;

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{broadcast, Mutex, RwLock};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};
use uuid::Uuid;

use agoranet_contracts::{JobBinding, JobVariant, TokenBinding};
use agoranet_sync::ChainEvent;
use agoranet_types::{
    Address, AgentDescriptor, AgoranetError, JobPhase, Result, TokenUnits,
};

pub use events::JobEvent;

const EVENT_CHANNEL_CAPACITY: usize = 64;

/// Controller configuration.
#[derive(Debug, Clone)]
pub struct JobConfig {
    /// Cadence of the acceptance/completion observation loop.
    pub poll_interval: Duration,
}

impl Default for JobConfig {
    fn default() -> Self {
        Self {
            poll_interval: agoranet_sync::DEFAULT_POLL_INTERVAL,
        }
    }
}

struct JobState {
    phase: JobPhase,
    deposited: TokenUnits,
    result: Option<Vec<u8>>,
}

struct JobInner {
    id: Uuid,
    agent: AgentDescriptor,
    payer: Address,
    token: Option<TokenBinding>,
    job: JobBinding,
    state: RwLock<JobState>,
    events: broadcast::Sender<JobEvent>,
    stopped: AtomicBool,
}

impl JobInner {
    fn is_stopped(&self) -> bool {
        self.stopped.load(Ordering::SeqCst)
    }

    fn emit(&self, event: JobEvent) {
        if !self.is_stopped() {
            let _ = self.events.send(event);
        }
    }
}

/// Drives the escrow protocol for a single hired agent.
pub struct JobController {
    inner: Arc<JobInner>,
    config: JobConfig,
    tasks: Mutex<Vec<JoinHandle<()>>>,
}

impl JobController {
    /// Record a hire intent against `agent`, escrowed at `job`.
    ///
    /// `token` is the token binding of the network the hire was made
    /// under; with none (unsupported network) the controller starts in
    /// the absorbing `Unsupported` phase and every operation fails.
    pub fn hire(
        agent: AgentDescriptor,
        payer: Address,
        token: Option<TokenBinding>,
        job: JobBinding,
        config: JobConfig,
    ) -> Self {
        let phase = if token.is_some() {
            JobPhase::Intent
        } else {
            JobPhase::Unsupported
        };
        let (events, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        let id = Uuid::new_v4();
        info!(job_id = %id, agent = %agent.address, ?phase, "agent hired");
        Self {
            inner: Arc::new(JobInner {
                id,
                agent,
                payer,
                token,
                job,
                state: RwLock::new(JobState {
                    phase,
                    deposited: 0,
                    result: None,
                }),
                events,
                stopped: AtomicBool::new(false),
            }),
            config,
            tasks: Mutex::new(Vec::new()),
        }
    }

    pub fn id(&self) -> Uuid {
        self.inner.id
    }

    pub fn agent(&self) -> &AgentDescriptor {
        &self.inner.agent
    }

    pub fn subscribe(&self) -> broadcast::Receiver<JobEvent> {
        self.inner.events.subscribe()
    }

    pub async fn phase(&self) -> JobPhase {
        self.inner.state.read().await.phase
    }

    /// Result bytes, available once `Completed` has been observed.
    pub async fn result(&self) -> Option<Vec<u8>> {
        self.inner.state.read().await.result.clone()
    }

    /// Amount escrowed so far; zero before a successful deposit.
    pub async fn deposited(&self) -> TokenUnits {
        self.inner.state.read().await.deposited
    }

    /// Escrow the payment for one unit of work.
    ///
    /// Validates the amount before any provider call, ensures the escrow
    /// has sufficient allowance (approving when short — the token demands
    /// approval before `transferFrom`), then deposits. On failure the
    /// phase stays `Intent`; nothing retries automatically.
    pub async fn deposit(&self, amount: TokenUnits) -> Result<()> {
        if amount == 0 {
            return Err(AgoranetError::InvalidAmount {
                reason: "deposit amount must be positive".into(),
            });
        }
        {
            let state = self.inner.state.read().await;
            match state.phase {
                JobPhase::Intent => {}
                JobPhase::Unsupported => {
                    return Err(AgoranetError::UnsupportedNetwork {
                        network: "unbound".into(),
                    })
                }
                other => {
                    return Err(AgoranetError::CallRejected {
                        method: "deposit".into(),
                        reason: format!("already past intent (phase: {other:?})"),
                    })
                }
            }
        }
        let token = self
            .inner
            .token
            .as_ref()
            .ok_or(AgoranetError::ProviderUnavailable)?;

        let balance = token.balance_of(&self.inner.payer).await?;
        if balance < amount {
            return Err(AgoranetError::InsufficientFunds { requested: amount });
        }
        let escrow = self.inner.job.address();
        let allowance = token.allowance(&self.inner.payer, escrow).await?;
        if allowance < amount {
            token.approve(escrow, amount).await?;
        }
        let receipt = self.inner.job.deposit(amount).await?;
        debug!(job_id = %self.inner.id, tx = %receipt.tx_hash, "deposit accepted");

        {
            let mut state = self.inner.state.write().await;
            state.phase = JobPhase::Deposited;
            state.deposited = amount;
        }
        self.inner.emit(JobEvent::deposited(amount));
        Ok(())
    }

    /// Start the acceptance/completion observation loop.
    ///
    /// Safe to call before `deposit`: the loop idles through `Intent`
    /// and picks the job up once the deposit lands. It ends at
    /// `Completed` or an absorbing phase, or on teardown.
    pub async fn start_observing(&self) {
        let mut tasks = self.tasks.lock().await;
        if self.inner.is_stopped() {
            return;
        }
        let inner = self.inner.clone();
        let interval = self.config.poll_interval;
        tasks.push(tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);
            loop {
                ticker.tick().await;
                if inner.is_stopped() {
                    break;
                }
                observe_tick(&inner).await;
                let phase = inner.state.read().await.phase;
                // Completed is terminal for observation; Intent is not --
                // there is just nothing to observe yet.
                if phase == JobPhase::Completed || phase.is_terminal() {
                    break;
                }
            }
        }));
    }

    /// Run a single observation tick. Exposed for hosts driving their
    /// own scheduler.
    pub async fn poll_job_once(&self) {
        observe_tick(&self.inner).await;
    }

    /// Withdraw escrowed funds.
    ///
    /// The multi-payer escrow pays out only after completion, so before
    /// `Completed` is observed this fails with `NotReady`. The
    /// single-payer variant lets the payer reclaim funds any time a
    /// deposit remains.
    pub async fn withdraw(&self) -> Result<()> {
        let phase = self.inner.state.read().await.phase;
        let allowed = match self.inner.job.variant() {
            JobVariant::SinglePayer => matches!(
                phase,
                JobPhase::Deposited | JobPhase::Accepted | JobPhase::Completed
            ),
            JobVariant::MultiPayer => phase == JobPhase::Completed,
        };
        if !allowed {
            return Err(AgoranetError::NotReady {
                phase: format!("{phase:?}"),
            });
        }
        let receipt = self.inner.job.withdraw().await?;
        info!(job_id = %self.inner.id, tx = %receipt.tx_hash, "escrow withdrawn");
        self.inner.state.write().await.phase = JobPhase::Withdrawn;
        self.inner.emit(JobEvent::withdrawn());
        self.teardown().await;
        Ok(())
    }

    /// Invalidate the job: its bindings belong to a network that is no
    /// longer active. Enters the absorbing `Unsupported` phase.
    pub async fn invalidate(&self, reason: impl Into<String>) {
        invalidate_inner(&self.inner, reason.into()).await;
        self.teardown().await;
    }

    /// Tie this job to the synchronizer's network notifications: the
    /// first network change invalidates it.
    pub async fn watch_network(&self, mut chain_events: broadcast::Receiver<ChainEvent>) {
        let inner = self.inner.clone();
        let mut tasks = self.tasks.lock().await;
        tasks.push(tokio::spawn(async move {
            loop {
                match chain_events.recv().await {
                    Ok(ChainEvent::NetworkChanged { network, .. }) => {
                        invalidate_inner(&inner, format!("network changed to {network}")).await;
                        break;
                    }
                    Ok(_) => continue,
                    Err(broadcast::error::RecvError::Lagged(_)) => continue,
                    Err(broadcast::error::RecvError::Closed) => break,
                }
            }
        }));
    }

    /// Tear the controller down: stop polling, emit nothing further.
    pub async fn stop(&self) {
        self.inner.stopped.store(true, Ordering::SeqCst);
        self.teardown().await;
    }

    async fn teardown(&self) {
        let mut tasks = self.tasks.lock().await;
        for task in tasks.drain(..) {
            task.abort();
        }
    }
}

impl Drop for JobController {
    fn drop(&mut self) {
        self.inner.stopped.store(true, Ordering::SeqCst);
        if let Ok(mut tasks) = self.tasks.try_lock() {
            for task in tasks.drain(..) {
                task.abort();
            }
        }
    }
}

async fn invalidate_inner(inner: &JobInner, reason: String) {
    {
        let mut state = inner.state.write().await;
        if state.phase.is_terminal() {
            return;
        }
        warn!(job_id = %inner.id, reason = %reason, "job invalidated");
        state.phase = JobPhase::Unsupported;
    }
    inner.emit(JobEvent::invalidated(reason));
}

/// One observation tick: acceptance first, then completion, then the
/// result fetch. Transient query failures are logged and retried by the
/// next tick.
async fn observe_tick(inner: &JobInner) {
    if inner.is_stopped() {
        return;
    }
    let phase = inner.state.read().await.phase;
    if !phase.is_observable() {
        return;
    }

    if phase == JobPhase::Deposited {
        match inner.job.job_accepted().await {
            Ok(true) => {
                let mut state = inner.state.write().await;
                if state.phase == JobPhase::Deposited {
                    info!(job_id = %inner.id, "job accepted by agent");
                    state.phase = JobPhase::Accepted;
                    drop(state);
                    inner.emit(JobEvent::accepted());
                }
            }
            Ok(false) => {}
            Err(err) => {
                warn!(job_id = %inner.id, error = %err, "acceptance poll failed");
                return;
            }
        }
    }

    match inner.job.job_completed().await {
        Ok(true) => {
            let result = match inner.job.job_result().await {
                Ok(result) => result,
                Err(err) => {
                    warn!(job_id = %inner.id, error = %err, "result fetch failed");
                    return;
                }
            };
            if inner.is_stopped() {
                return;
            }
            let mut state = inner.state.write().await;
            if state.phase.is_observable() {
                info!(
                    job_id = %inner.id,
                    result_len = result.len(),
                    "job completed"
                );
                state.phase = JobPhase::Completed;
                state.result = Some(result.clone());
                drop(state);
                inner.emit(JobEvent::completed(result));
            }
        }
        Ok(false) => {}
        Err(err) => {
            warn!(job_id = %inner.id, error = %err, "completion poll failed");
        }
    }
}
