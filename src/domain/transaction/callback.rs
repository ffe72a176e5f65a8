//! Callback processing stages.
//!
//! Every inbound callback walks a fixed pipeline:
//! RECEIVED -> DECRYPTED -> SIGNATURE_CHECKED -> ACCEPTED | REJECTED.
//! A callback that fails decryption never reaches signature checking; it
//! moves straight from RECEIVED to the terminal REJECTED state. A callback
//! that decrypts but fails verification is REJECTED after the signature
//! check and must not touch any transaction state, regardless of the
//! status code it claims.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::StateMachine;

/// Processing stage of an inbound callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CallbackStage {
    Received,
    Decrypted,
    SignatureChecked,
    Accepted,
    Rejected,
}

impl StateMachine for CallbackStage {
    fn can_transition_to(&self, target: &Self) -> bool {
        use CallbackStage::*;
        matches!(
            (self, target),
            (Received, Decrypted)
                // Decryption failure short-circuits to rejection
                | (Received, Rejected)
                | (Decrypted, SignatureChecked)
                | (SignatureChecked, Accepted)
                | (SignatureChecked, Rejected)
        )
    }

    fn valid_transitions(&self) -> Vec<Self> {
        use CallbackStage::*;
        match self {
            Received => vec![Decrypted, Rejected],
            Decrypted => vec![SignatureChecked],
            SignatureChecked => vec![Accepted, Rejected],
            Accepted => vec![],
            Rejected => vec![],
        }
    }
}

/// Why a callback was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RejectionReason {
    /// The envelope failed to decrypt or did not contain a callback
    /// document.
    DecryptionFailed,

    /// The embedded signature did not match the recomputed digest.
    SignatureMismatch,
}
