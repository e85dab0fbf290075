//! Agoranet Directory - reads the on-ledger agent registry
//!
//! Listing is ephemeral: every call re-queries the registry, so the
//! result reflects the network the binding set was produced for. An
//! unsupported network is `DirectoryUnavailable`, which callers must
//! render distinctly from an empty listing — the two are different
//! facts.

use tracing::{debug, warn};

use agoranet_contracts::ContractBindingSet;
use agoranet_types::{AgentDescriptor, AgoranetError, Result};

/// List the agents registered on the current network.
///
/// Fails with `DirectoryUnavailable` when the binding set has no
/// registry (unsupported network). Agents whose metadata cannot be read
/// are skipped, not fatal: one broken listing must not hide the rest.
pub async fn list_agents(bindings: &ContractBindingSet) -> Result<Vec<AgentDescriptor>> {
    let registry = bindings
        .registry()
        .ok_or(AgoranetError::DirectoryUnavailable)?;

    let addresses = registry.list_agents().await?;
    debug!(
        network = %bindings.network(),
        count = addresses.len(),
        "registry listing fetched"
    );

    let mut agents = Vec::with_capacity(addresses.len());
    for address in addresses {
        let agent = registry.agent(address.clone());
        let name = match agent.name().await {
            Ok(name) => name,
            Err(err) => {
                warn!(agent = %address, error = %err, "skipping unreadable agent");
                continue;
            }
        };
        // Endpoint is optional metadata; absence is not an error.
        let endpoint = agent.endpoint().await.ok().filter(|e| !e.is_empty());
        agents.push(AgentDescriptor {
            address,
            name,
            endpoint,
        });
    }
    Ok(agents)
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::collections::HashMap;
    use std::sync::{Arc, Mutex};

    use async_trait::async_trait;
    use serde_json::{json, Value};

    use agoranet_provider::{CallRequest, ChainProvider, TxReceipt};
    use agoranet_types::{Address, NetworkId, TokenUnits};

    /// Answers reads per (address, method); everything else fails.
    #[derive(Default)]
    struct TableProvider {
        reads: Mutex<HashMap<(String, String), Value>>,
    }

    impl TableProvider {
        fn set(&self, to: &str, method: &str, value: Value) {
            self.reads
                .lock()
                .unwrap()
                .insert((to.to_string(), method.to_string()), value);
        }
    }

    #[async_trait]
    impl ChainProvider for TableProvider {
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
            self.reads
                .lock()
                .unwrap()
                .get(&(request.to.as_str().to_string(), request.method.clone()))
                .cloned()
                .ok_or(AgoranetError::QueryFailed {
                    reason: format!("no answer for {}", request.method),
                })
        }

        async fn send(&self, request: CallRequest) -> Result<TxReceipt> {
            Err(AgoranetError::CallRejected {
                method: request.method,
                reason: "directory is read-only".into(),
            })
        }
    }

    const AGENT_ONE: &str = "0x1111111111111111111111111111111111111111";
    const AGENT_TWO: &str = "0x2222222222222222222222222222222222222222";

    fn bound_set(provider: Arc<TableProvider>) -> ContractBindingSet {
        agoranet_contracts::bind(provider, NetworkId::from("3"))
    }

    #[tokio::test]
    async fn unsupported_network_is_directory_unavailable() {
        let provider = Arc::new(TableProvider::default());
        let unbound = agoranet_contracts::bind(provider, NetworkId::from("1337"));

        let err = list_agents(&unbound).await.unwrap_err();
        assert!(matches!(err, AgoranetError::DirectoryUnavailable));
    }

    #[tokio::test]
    async fn empty_registry_is_an_empty_list_not_an_error() {
        let provider = Arc::new(TableProvider::default());
        let set = bound_set(provider.clone());
        let registry = set.registry().unwrap().address().as_str().to_string();
        provider.set(&registry, "listAgents", json!([]));

        let agents = list_agents(&set).await.unwrap();
        assert!(agents.is_empty());
    }

    #[tokio::test]
    async fn listing_hydrates_names_and_skips_unreadable_agents() {
        let provider = Arc::new(TableProvider::default());
        let set = bound_set(provider.clone());
        let registry = set.registry().unwrap().address().as_str().to_string();

        provider.set(&registry, "listAgents", json!([AGENT_ONE, AGENT_TWO]));
        provider.set(AGENT_ONE, "name", json!("alpha-translator"));
        provider.set(AGENT_ONE, "endpoint", json!("http://localhost:8000/api"));
        // AGENT_TWO has no readable name and is skipped.

        let agents = list_agents(&set).await.unwrap();
        assert_eq!(agents.len(), 1);
        assert_eq!(agents[0].name, "alpha-translator");
        assert_eq!(
            agents[0].endpoint.as_deref(),
            Some("http://localhost:8000/api")
        );
        assert_eq!(agents[0].address, Address::parse(AGENT_ONE).unwrap());
    }
}
