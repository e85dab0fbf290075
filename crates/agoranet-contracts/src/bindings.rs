//! Typed contract bindings
//!
//! Each binding wraps the provider handle, one deployment address, and
//! one ABI descriptor, and exposes decoded typed calls. Providers return
//! loosely shaped JSON (bare values, decimal or 0x-hex strings, or an
//! object keyed by the output name), so decoding is tolerant of shape
//! but never of meaning: anything undecodable is a `MalformedResponse`,
//! never a default.

use std::sync::Arc;

use serde_json::{json, Value};

use agoranet_provider::{CallRequest, ChainProvider, TxReceipt};
use agoranet_types::{Address, AgoranetError, NetworkId, Result, TokenUnits};

use crate::abi::{AbiDescriptor, AGENT_ABI, MARKET_JOB_ABI, REGISTRY_ABI, SIMPLE_JOB_ABI, TOKEN_ABI};
use crate::networks;

// ============================================================================
// Decode helpers
// ============================================================================

fn unwrap_named(value: &Value) -> &Value {
    // Providers that honor ABI output names wrap single outputs in a
    // one-entry object.
    if let Value::Object(map) = value {
        if map.len() == 1 {
            return map.values().next().unwrap_or(value);
        }
    }
    value
}

fn decode_units(method: &str, value: &Value) -> Result<TokenUnits> {
    let inner = unwrap_named(value);
    let parsed = match inner {
        Value::Number(n) => n.as_u64().map(TokenUnits::from),
        Value::String(s) => {
            if let Some(hex_body) = s.strip_prefix("0x") {
                TokenUnits::from_str_radix(hex_body, 16).ok()
            } else {
                s.parse::<TokenUnits>().ok()
            }
        }
        _ => None,
    };
    parsed.ok_or_else(|| AgoranetError::MalformedResponse {
        method: method.to_string(),
        reason: format!("expected uint256, got {inner}"),
    })
}

fn decode_bool(method: &str, value: &Value) -> Result<bool> {
    match unwrap_named(value) {
        Value::Bool(b) => Ok(*b),
        other => Err(AgoranetError::MalformedResponse {
            method: method.to_string(),
            reason: format!("expected bool, got {other}"),
        }),
    }
}

fn decode_bytes(method: &str, value: &Value) -> Result<Vec<u8>> {
    match unwrap_named(value) {
        Value::String(s) => {
            let body = s.strip_prefix("0x").unwrap_or(s);
            hex::decode(body).map_err(|e| AgoranetError::MalformedResponse {
                method: method.to_string(),
                reason: format!("bad hex bytes: {e}"),
            })
        }
        other => Err(AgoranetError::MalformedResponse {
            method: method.to_string(),
            reason: format!("expected hex bytes, got {other}"),
        }),
    }
}

fn decode_string(method: &str, value: &Value) -> Result<String> {
    match unwrap_named(value) {
        Value::String(s) => Ok(s.clone()),
        other => Err(AgoranetError::MalformedResponse {
            method: method.to_string(),
            reason: format!("expected string, got {other}"),
        }),
    }
}

fn decode_address(method: &str, value: &Value) -> Result<Address> {
    let s = decode_string(method, value)?;
    Address::parse(&s).map_err(|_| AgoranetError::MalformedResponse {
        method: method.to_string(),
        reason: format!("bad address: {s}"),
    })
}

fn decode_address_list(method: &str, value: &Value) -> Result<Vec<Address>> {
    match unwrap_named(value) {
        Value::Array(items) => items
            .iter()
            .map(|item| decode_address(method, item))
            .collect(),
        other => Err(AgoranetError::MalformedResponse {
            method: method.to_string(),
            reason: format!("expected address[], got {other}"),
        }),
    }
}

// ============================================================================
// Binding core
// ============================================================================

/// Shared plumbing for all typed bindings.
#[derive(Clone)]
struct Binding {
    provider: Arc<dyn ChainProvider>,
    address: Address,
    abi: &'static AbiDescriptor,
}

impl Binding {
    fn request(&self, method: &str, args: Vec<Value>) -> Result<CallRequest> {
        let function = self
            .abi
            .function(method)
            .ok_or_else(|| AgoranetError::CallRejected {
                method: method.to_string(),
                reason: "not part of this contract's interface".to_string(),
            })?;
        if function.inputs.len() != args.len() {
            return Err(AgoranetError::CallRejected {
                method: method.to_string(),
                reason: format!(
                    "expected {} argument(s), got {}",
                    function.inputs.len(),
                    args.len()
                ),
            });
        }
        Ok(CallRequest::new(self.address.clone(), method).with_args(args))
    }

    async fn call(&self, method: &str, args: Vec<Value>) -> Result<Value> {
        let request = self.request(method, args)?;
        self.provider.call(request).await
    }

    async fn send(&self, method: &str, args: Vec<Value>) -> Result<TxReceipt> {
        let request = self.request(method, args)?;
        self.provider.send(request).await
    }
}

impl std::fmt::Debug for Binding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Binding")
            .field("address", &self.address)
            .finish()
    }
}

// ============================================================================
// Token
// ============================================================================

/// Binding to the fungible marketplace token.
#[derive(Debug, Clone)]
pub struct TokenBinding {
    inner: Binding,
}

impl TokenBinding {
    pub fn new(provider: Arc<dyn ChainProvider>, address: Address) -> Self {
        Self {
            inner: Binding {
                provider,
                address,
                abi: &TOKEN_ABI,
            },
        }
    }

    pub fn address(&self) -> &Address {
        &self.inner.address
    }

    pub async fn balance_of(&self, owner: &Address) -> Result<TokenUnits> {
        let value = self
            .inner
            .call("balanceOf", vec![json!(owner.as_str())])
            .await?;
        decode_units("balanceOf", &value)
    }

    pub async fn allowance(&self, owner: &Address, spender: &Address) -> Result<TokenUnits> {
        let value = self
            .inner
            .call(
                "allowance",
                vec![json!(owner.as_str()), json!(spender.as_str())],
            )
            .await?;
        decode_units("allowance", &value)
    }

    pub async fn total_supply(&self) -> Result<TokenUnits> {
        let value = self.inner.call("totalSupply", vec![]).await?;
        decode_units("totalSupply", &value)
    }

    pub async fn approve(&self, spender: &Address, amount: TokenUnits) -> Result<TxReceipt> {
        self.inner
            .send(
                "approve",
                vec![json!(spender.as_str()), json!(amount.to_string())],
            )
            .await
    }

    pub async fn transfer(&self, to: &Address, amount: TokenUnits) -> Result<TxReceipt> {
        self.inner
            .send(
                "transfer",
                vec![json!(to.as_str()), json!(amount.to_string())],
            )
            .await
    }
}

// ============================================================================
// Registry & agent
// ============================================================================

/// Binding to the on-ledger agent registry.
#[derive(Debug, Clone)]
pub struct RegistryBinding {
    inner: Binding,
}

impl RegistryBinding {
    pub fn new(provider: Arc<dyn ChainProvider>, address: Address) -> Self {
        Self {
            inner: Binding {
                provider,
                address,
                abi: &REGISTRY_ABI,
            },
        }
    }

    pub fn address(&self) -> &Address {
        &self.inner.address
    }

    pub async fn list_agents(&self) -> Result<Vec<Address>> {
        let value = self.inner.call("listAgents", vec![]).await?;
        decode_address_list("listAgents", &value)
    }

    /// Binding to one listed agent contract, sharing this registry's
    /// provider handle.
    pub fn agent(&self, address: Address) -> AgentBinding {
        AgentBinding::new(self.inner.provider.clone(), address)
    }
}

/// Binding to an individual agent contract.
#[derive(Debug, Clone)]
pub struct AgentBinding {
    inner: Binding,
}

impl AgentBinding {
    pub fn new(provider: Arc<dyn ChainProvider>, address: Address) -> Self {
        Self {
            inner: Binding {
                provider,
                address,
                abi: &AGENT_ABI,
            },
        }
    }

    pub fn address(&self) -> &Address {
        &self.inner.address
    }

    pub async fn name(&self) -> Result<String> {
        let value = self.inner.call("name", vec![]).await?;
        decode_string("name", &value)
    }

    pub async fn endpoint(&self) -> Result<String> {
        let value = self.inner.call("endpoint", vec![]).await?;
        decode_string("endpoint", &value)
    }
}

// ============================================================================
// Job escrow
// ============================================================================

/// Which escrow flavor a job binding talks to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobVariant {
    /// One payer; the payer may withdraw while funds remain.
    SinglePayer,
    /// Multiple payers with per-payer amounts and an explicit
    /// acceptance call.
    MultiPayer,
}

impl JobVariant {
    /// Deployment data for instantiating a fresh escrow of this flavor.
    pub fn deployment(&self) -> crate::abi::JobDeployment {
        match self {
            JobVariant::SinglePayer => crate::abi::JobDeployment {
                constructor_inputs: SIMPLE_JOB_ABI.constructor_inputs,
                bytecode: crate::bytecode::SIMPLE_JOB_BYTECODE,
            },
            JobVariant::MultiPayer => crate::abi::JobDeployment {
                constructor_inputs: MARKET_JOB_ABI.constructor_inputs,
                bytecode: crate::bytecode::MARKET_JOB_BYTECODE,
            },
        }
    }
}

/// Binding to a deployed job escrow contract, polymorphic over the two
/// variants. Calls absent from the bound variant's interface fail with
/// `CallRejected` rather than being unrepresentable, because the
/// deployed variant is a runtime fact.
#[derive(Debug, Clone)]
pub struct JobBinding {
    inner: Binding,
    variant: JobVariant,
}

impl JobBinding {
    pub fn new(provider: Arc<dyn ChainProvider>, address: Address, variant: JobVariant) -> Self {
        let abi = match variant {
            JobVariant::SinglePayer => &SIMPLE_JOB_ABI,
            JobVariant::MultiPayer => &MARKET_JOB_ABI,
        };
        Self {
            inner: Binding {
                provider,
                address,
                abi,
            },
            variant,
        }
    }

    pub fn address(&self) -> &Address {
        &self.inner.address
    }

    pub fn variant(&self) -> JobVariant {
        self.variant
    }

    pub async fn deposit(&self, amount: TokenUnits) -> Result<TxReceipt> {
        self.inner
            .send("deposit", vec![json!(amount.to_string())])
            .await
    }

    pub async fn withdraw(&self) -> Result<TxReceipt> {
        self.inner.send("withdraw", vec![]).await
    }

    pub async fn set_job_accepted(&self) -> Result<TxReceipt> {
        // Fails with CallRejected on the single-payer variant, whose
        // interface has no acceptance setter.
        self.inner.send("setJobAccepted", vec![]).await
    }

    pub async fn set_job_completed(&self, result: &[u8]) -> Result<TxReceipt> {
        self.inner
            .send(
                "setJobCompleted",
                vec![json!(format!("0x{}", hex::encode(result)))],
            )
            .await
    }

    pub async fn job_accepted(&self) -> Result<bool> {
        let value = self.inner.call("jobAccepted", vec![]).await?;
        decode_bool("jobAccepted", &value)
    }

    pub async fn job_completed(&self) -> Result<bool> {
        let value = self.inner.call("jobCompleted", vec![]).await?;
        decode_bool("jobCompleted", &value)
    }

    pub async fn job_result(&self) -> Result<Vec<u8>> {
        let value = self.inner.call("jobResult", vec![]).await?;
        decode_bytes("jobResult", &value)
    }

    pub async fn job_descriptor(&self) -> Result<Vec<u8>> {
        let value = self.inner.call("jobDescriptor", vec![]).await?;
        decode_bytes("jobDescriptor", &value)
    }

    pub async fn payer(&self) -> Result<Address> {
        let value = self.inner.call("payer", vec![]).await?;
        decode_address("payer", &value)
    }

    pub async fn token(&self) -> Result<Address> {
        let value = self.inner.call("token", vec![]).await?;
        decode_address("token", &value)
    }

    /// Per-payer deposited amount (multi-payer variant only).
    pub async fn amount_of(&self, payer: &Address) -> Result<TokenUnits> {
        let value = self
            .inner
            .call("amounts", vec![json!(payer.as_str())])
            .await?;
        // Two outputs: (amount, idService); take the first.
        match &value {
            Value::Array(items) if !items.is_empty() => decode_units("amounts", &items[0]),
            other => decode_units("amounts", other),
        }
    }
}

// ============================================================================
// Binding set
// ============================================================================

/// All bindings produced for one network identifier.
///
/// Immutable once produced: a network change produces a new set, never
/// mutates this one. At most one set is current at any time, and the
/// synchronizer guarantees the current set's `network` always matches
/// the stored chain identity.
#[derive(Debug, Clone)]
pub struct ContractBindingSet {
    network: NetworkId,
    registry: Option<RegistryBinding>,
    token: Option<TokenBinding>,
}

impl ContractBindingSet {
    /// The network this set was bound for.
    pub fn network(&self) -> &NetworkId {
        &self.network
    }

    /// Registry binding, `None` on an unsupported network.
    pub fn registry(&self) -> Option<&RegistryBinding> {
        self.registry.as_ref()
    }

    /// Token binding, `None` on an unsupported network.
    pub fn token(&self) -> Option<&TokenBinding> {
        self.token.as_ref()
    }

    pub fn is_bound(&self) -> bool {
        self.registry.is_some() && self.token.is_some()
    }
}

/// Resolve the deployments for `network` and produce callable bindings.
///
/// Pure and stateless: the same network always yields equivalent
/// addresses, and no I/O occurs here — only through the returned
/// bindings.
pub fn bind(provider: Arc<dyn ChainProvider>, network: NetworkId) -> ContractBindingSet {
    match networks::deployments(&network) {
        Some(addresses) => ContractBindingSet {
            network,
            registry: Some(RegistryBinding::new(provider.clone(), addresses.registry)),
            token: Some(TokenBinding::new(provider, addresses.token)),
        },
        None => ContractBindingSet {
            network,
            registry: None,
            token: None,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::sync::Mutex;

    use async_trait::async_trait;
    use agoranet_types::Result;

    /// Echo provider: answers every read with a fixed value and records
    /// what was asked.
    struct EchoProvider {
        answer: Value,
        requests: Mutex<Vec<CallRequest>>,
    }

    impl EchoProvider {
        fn new(answer: Value) -> Self {
            Self {
                answer,
                requests: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl ChainProvider for EchoProvider {
        async fn list_accounts(&self) -> Result<Vec<Address>> {
            Ok(vec![])
        }

        async fn native_balance_of(&self, _account: &Address) -> Result<TokenUnits> {
            Ok(0)
        }

        async fn current_network_id(&self) -> Result<NetworkId> {
            Ok(NetworkId::from("3"))
        }

        async fn call(&self, request: CallRequest) -> Result<Value> {
            self.requests.lock().unwrap().push(request);
            Ok(self.answer.clone())
        }

        async fn send(&self, request: CallRequest) -> Result<agoranet_provider::TxReceipt> {
            self.requests.lock().unwrap().push(request);
            Ok(agoranet_provider::TxReceipt {
                tx_hash: "0xtx".into(),
            })
        }
    }

    fn test_address() -> Address {
        Address::parse("0x9de7efeb49a9dbc948a4dd4d4a6bcad624a797fe").unwrap()
    }

    #[test]
    fn units_decode_accepts_provider_shapes() {
        assert_eq!(decode_units("balanceOf", &json!(42)).unwrap(), 42);
        assert_eq!(decode_units("balanceOf", &json!("42")).unwrap(), 42);
        assert_eq!(decode_units("balanceOf", &json!("0x2a")).unwrap(), 42);
        assert_eq!(
            decode_units("balanceOf", &json!({ "balance": "42" })).unwrap(),
            42
        );
        assert!(decode_units("balanceOf", &json!(null)).is_err());
        assert!(decode_units("balanceOf", &json!("not-a-number")).is_err());
    }

    #[test]
    fn bytes_decode_rejects_bad_hex() {
        assert_eq!(
            decode_bytes("jobResult", &json!("0xdead")).unwrap(),
            vec![0xde, 0xad]
        );
        assert!(decode_bytes("jobResult", &json!("0xzz")).is_err());
        assert!(decode_bytes("jobResult", &json!(7)).is_err());
    }

    #[tokio::test]
    async fn unknown_method_is_rejected_without_io() {
        let provider = Arc::new(EchoProvider::new(json!(true)));
        let token = TokenBinding::new(provider.clone(), test_address());

        // "mint" is not part of the token interface.
        let err = token
            .inner
            .call("mint", vec![])
            .await
            .unwrap_err();
        assert!(matches!(err, AgoranetError::CallRejected { .. }));
        assert!(provider.requests.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn argument_arity_is_checked() {
        let provider = Arc::new(EchoProvider::new(json!(true)));
        let token = TokenBinding::new(provider.clone(), test_address());

        let err = token.inner.call("balanceOf", vec![]).await.unwrap_err();
        assert!(matches!(err, AgoranetError::CallRejected { .. }));
        assert!(provider.requests.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn acceptance_setter_exists_only_on_multi_payer() {
        let provider = Arc::new(EchoProvider::new(json!(true)));
        let single = JobBinding::new(provider.clone(), test_address(), JobVariant::SinglePayer);
        let multi = JobBinding::new(provider.clone(), test_address(), JobVariant::MultiPayer);

        let err = single.set_job_accepted().await.unwrap_err();
        assert!(matches!(err, AgoranetError::CallRejected { .. }));
        assert!(multi.set_job_accepted().await.is_ok());
    }

    #[test]
    fn deployment_data_matches_variant() {
        let single = JobVariant::SinglePayer.deployment();
        assert_eq!(single.constructor_inputs, &["address", "address", "bytes"]);
        assert!(single.bytecode.starts_with("0x"));

        let multi = JobVariant::MultiPayer.deployment();
        assert_eq!(multi.constructor_inputs.len(), 6);
        assert_ne!(single.bytecode, multi.bytecode);
    }

    #[test]
    fn binding_is_pure_per_network() {
        let provider: Arc<dyn ChainProvider> = Arc::new(EchoProvider::new(json!(null)));
        let a = bind(provider.clone(), NetworkId::from("3"));
        let b = bind(provider.clone(), NetworkId::from("3"));
        assert_eq!(
            a.token().unwrap().address(),
            b.token().unwrap().address()
        );
        assert_eq!(
            a.registry().unwrap().address(),
            b.registry().unwrap().address()
        );
        assert!(a.is_bound());

        let unbound = bind(provider, NetworkId::from("1337"));
        assert!(!unbound.is_bound());
        assert!(unbound.token().is_none());
        assert!(unbound.registry().is_none());
    }
}
