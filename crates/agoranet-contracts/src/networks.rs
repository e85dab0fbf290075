//! Per-network deployment address tables
//!
//! Static configuration mapping a network identifier to the registry and
//! token deployments on that network. A network absent from the table is
//! simply unsupported; callers get `None` and must represent that state,
//! not treat it as a failure.

use agoranet_types::{Address, NetworkId};

/// Deployment addresses for one supported network.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeploymentAddresses {
    pub registry: Address,
    pub token: Address,
}

struct NetworkEntry {
    network: &'static str,
    registry: &'static str,
    token: &'static str,
}

static NETWORKS: &[NetworkEntry] = &[
    // Mainnet
    NetworkEntry {
        network: "1",
        registry: "0x4e74fefa82e83e0964f0d9f53c68e03f7298a8b2",
        token: "0x8eb24319393716668d768dcec29356ae9cffe285",
    },
    // Ropsten
    NetworkEntry {
        network: "3",
        registry: "0x663422c6999ff94933dbcb388623952cf2407f6f",
        token: "0xb97e9bbb6fd49865709d3f1576e8506ad640a13b",
    },
    // Kovan
    NetworkEntry {
        network: "42",
        registry: "0x2e4b2f2b72402b9b2d6a7851e37c856c329ecc30",
        token: "0x9de7efeb49a9dbc948a4dd4d4a6bcad624a797fe",
    },
];

/// Look up the deployments for `network`. `None` means unsupported.
pub fn deployments(network: &NetworkId) -> Option<DeploymentAddresses> {
    NETWORKS
        .iter()
        .find(|entry| entry.network == network.as_str())
        .map(|entry| DeploymentAddresses {
            // Table entries are checked by tests; parse cannot fail here.
            registry: Address::parse(entry.registry).expect("static registry address"),
            token: Address::parse(entry.token).expect("static token address"),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_table_entry_parses() {
        for entry in NETWORKS {
            assert!(Address::parse(entry.registry).is_ok(), "{}", entry.network);
            assert!(Address::parse(entry.token).is_ok(), "{}", entry.network);
        }
    }

    #[test]
    fn known_network_resolves() {
        let d = deployments(&NetworkId::from("3")).unwrap();
        assert_eq!(d.token.as_str(), "0xb97e9bbb6fd49865709d3f1576e8506ad640a13b");
    }

    #[test]
    fn unknown_network_is_unbound() {
        assert!(deployments(&NetworkId::from("1337")).is_none());
    }

    #[test]
    fn lookup_is_stable() {
        let a = deployments(&NetworkId::from("42"));
        let b = deployments(&NetworkId::from("42"));
        assert_eq!(a, b);
    }
}
