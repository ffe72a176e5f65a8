//! Property tests for the crypto envelope.

mod common;

use once_cell::sync::Lazy;
use proptest::prelude::*;
use serde::{Deserialize, Serialize};

use sabbpe_gateway::domain::envelope::CryptoEnvelope;
use sabbpe_gateway::domain::foundation::Amount;

static SYMMETRIC: Lazy<CryptoEnvelope> = Lazy::new(|| {
    CryptoEnvelope::new(common::symmetric_credentials()).expect("envelope")
});

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct ArbitraryPayload {
    name: String,
    amount: f64,
    tags: Vec<u32>,
    note: Option<String>,
}

proptest! {
    #[test]
    fn decrypt_inverts_encrypt_for_any_payload(
        name in ".*",
        amount in 0.0f64..1_000_000_000.0,
        tags in proptest::collection::vec(any::<u32>(), 0..8),
        note in proptest::option::of(".{0,64}"),
    ) {
        let payload = ArbitraryPayload { name, amount, tags, note };
        let encrypted = SYMMETRIC.encrypt(&payload).unwrap();
        let decrypted: ArbitraryPayload = SYMMETRIC.decrypt(&encrypted).unwrap();
        prop_assert_eq!(decrypted, payload);
    }

    #[test]
    fn encryption_is_deterministic(
        name in ".{0,128}",
    ) {
        let payload = ArbitraryPayload {
            name,
            amount: 1.0,
            tags: vec![],
            note: None,
        };
        let first = SYMMETRIC.encrypt(&payload).unwrap();
        let second = SYMMETRIC.encrypt(&payload).unwrap();
        prop_assert_eq!(first, second);
    }

    #[test]
    fn wire_amount_always_has_exactly_two_decimals(
        value in 0.0f64..1_000_000_000.0,
    ) {
        let wire = Amount::new(value).to_wire();
        let (integral, decimals) = wire.split_once('.').expect("decimal point present");
        prop_assert!(!integral.is_empty());
        prop_assert!(integral.chars().all(|c| c.is_ascii_digit()));
        prop_assert_eq!(decimals.len(), 2);
        prop_assert!(decimals.chars().all(|c| c.is_ascii_digit()));
    }

    #[test]
    fn ciphertext_is_always_uppercase_hex_blocks(
        name in ".{0,256}",
    ) {
        let payload = ArbitraryPayload {
            name,
            amount: 0.0,
            tags: vec![],
            note: None,
        };
        let encrypted = SYMMETRIC.encrypt(&payload).unwrap();
        prop_assert!(encrypted
            .chars()
            .all(|c| c.is_ascii_digit() || c.is_ascii_uppercase()));
        // Whole AES blocks: 32 hex chars each.
        prop_assert_eq!(encrypted.len() % 32, 0);
    }
}
