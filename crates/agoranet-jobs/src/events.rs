//! Job lifecycle events

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use agoranet_types::TokenUnits;

/// Notifications emitted as a hired job moves through its lifecycle.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum JobEvent {
    /// The deposit call succeeded.
    Deposited {
        amount: TokenUnits,
        timestamp: DateTime<Utc>,
    },

    /// The agent accepted the job (observed by polling).
    Accepted { timestamp: DateTime<Utc> },

    /// The job completed and its result bytes were retrieved.
    Completed {
        result: Vec<u8>,
        timestamp: DateTime<Utc>,
    },

    /// Escrowed funds were withdrawn.
    Withdrawn { timestamp: DateTime<Utc> },

    /// The job state was invalidated (network change tore down the
    /// bindings it was created under).
    Invalidated {
        reason: String,
        timestamp: DateTime<Utc>,
    },
}

impl JobEvent {
    pub fn deposited(amount: TokenUnits) -> Self {
        Self::Deposited {
            amount,
            timestamp: Utc::now(),
        }
    }

    pub fn accepted() -> Self {
        Self::Accepted {
            timestamp: Utc::now(),
        }
    }

    pub fn completed(result: Vec<u8>) -> Self {
        Self::Completed {
            result,
            timestamp: Utc::now(),
        }
    }

    pub fn withdrawn() -> Self {
        Self::Withdrawn {
            timestamp: Utc::now(),
        }
    }

    pub fn invalidated(reason: impl Into<String>) -> Self {
        Self::Invalidated {
            reason: reason.into(),
            timestamp: Utc::now(),
        }
    }
}
