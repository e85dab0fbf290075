//! Agoranet Contracts - deployment tables and typed bindings
//!
//! A *binding* is a callable handle to one contract instance on one
//! network: provider handle + deployment address + ABI descriptor.
//! Binding itself is pure data-table lookup — no network I/O happens
//! until a call is issued through the binding.
//!
//! The network tables and ABI descriptors are static data; a network
//! absent from the tables yields unbound (`None`) entries, which is the
//! legitimate "unsupported network" state, not an error.

pub mod abi;
pub mod bindings;
pub mod bytecode;
pub mod networks;

pub use bindings::*;
pub use networks::{deployments, DeploymentAddresses};
