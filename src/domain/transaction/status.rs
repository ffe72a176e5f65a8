//! Transaction status state machine.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::StateMachine;

/// Lifecycle status of a merchant transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransactionStatus {
    /// Created at initiation; no processor outcome yet.
    Initiated,

    /// An authenticated callback reported a successful payment.
    Success,

    /// An authenticated callback reported a failed payment.
    Failed,
}

impl StateMachine for TransactionStatus {
    fn can_transition_to(&self, target: &Self) -> bool {
        use TransactionStatus::*;
        matches!(
            (self, target),
            // First authenticated outcome
            (Initiated, Success)
                | (Initiated, Failed)
            // Duplicate callback deliveries replay the same outcome
                | (Success, Success)
                | (Failed, Failed)
            // A later success supersedes a failed attempt on the same id
                | (Failed, Success)
        )
    }

    fn valid_transitions(&self) -> Vec<Self> {
        use TransactionStatus::*;
        match self {
            Initiated => vec![Success, Failed],
            Success => vec![Success],
            Failed => vec![Failed, Success],
        }
    }
}
