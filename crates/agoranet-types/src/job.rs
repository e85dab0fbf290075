//! Job escrow lifecycle phases

use serde::{Deserialize, Serialize};

/// Client-observed phase of a job escrow.
///
/// The authoritative copy lives on-ledger; the client reconstructs the
/// phase by polling and must tolerate the ledger moving between two of
/// its own polls. `Withdrawn` is terminal; `Unsupported` is an absorbing
/// state entered when no token binding exists for the active network.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum JobPhase {
    /// Hire intent recorded client-side; nothing deposited yet.
    Intent,
    /// Deposit call succeeded.
    Deposited,
    /// The agent accepted the job (observed).
    Accepted,
    /// A job result is available (observed).
    Completed,
    /// Escrowed funds were withdrawn. Terminal.
    Withdrawn,
    /// No token binding existed at hire time, or a network change
    /// invalidated the escrow bindings. Absorbing.
    Unsupported,
}

impl JobPhase {
    /// Whether the observation loop should keep polling in this phase.
    pub fn is_observable(&self) -> bool {
        matches!(self, JobPhase::Deposited | JobPhase::Accepted)
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, JobPhase::Withdrawn | JobPhase::Unsupported)
    }
}
