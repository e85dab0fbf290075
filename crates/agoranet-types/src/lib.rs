//! Agoranet Types - Canonical domain types for the marketplace client
//!
//! This crate contains all foundational types for Agoranet with zero
//! dependencies on other agoranet crates:
//!
//! - Chain primitives (Address, NetworkId, TokenUnits)
//! - Observed identities (WalletIdentity, ChainIdentity, BalanceSnapshot)
//! - Marketplace values (AgentDescriptor)
//! - Job escrow phases
//! - The error taxonomy
//!
//! # Architectural Invariants
//!
//! 1. A balance is never attributed to a network other than the one it
//!    was fetched under.
//! 2. A query failure is never coerced to a default value — zero must
//!    mean zero.
//! 3. "Unsupported network" is a steady, representable state, not an
//!    error path.

pub mod chain;
pub mod identity;
pub mod marketplace;
pub mod job;
pub mod error;

pub use chain::*;
pub use identity::*;
pub use marketplace::*;
pub use job::*;
pub use error::*;
