//! HMAC-SHA512 signature schemes.
//!
//! Two distinct, non-interchangeable schemes exist, both HMAC-SHA512 over a
//! delimiter-free concatenation of specific fields with lowercase hex
//! output:
//!
//! - the outbound scheme signs status-enquiry and refund-initiation
//!   requests with the request hash key;
//! - the inbound scheme authenticates callbacks with the response hash key.
//!
//! Field order and the two-decimal amount rendering must be reproduced
//! exactly; the processor validates these independently and rejects
//! mismatches with opaque status codes.

use hmac::{Hmac, Mac};
use sha2::Sha512;
use subtle::ConstantTimeEq;

use super::error::EnvelopeError;
use crate::domain::foundation::Amount;
use crate::domain::payload::CallbackBody;

type HmacSha512 = Hmac<Sha512>;

/// HMAC-SHA512 of a message, rendered as lowercase hex.
pub fn hmac_sha512_hex(key: &[u8], message: &str) -> String {
    let mut mac =
        HmacSha512::new_from_slice(key).expect("HMAC accepts keys of any length");
    mac.update(message.as_bytes());
    hex::encode(mac.finalize().into_bytes())
}

/// Builds the outbound signature for a status-enquiry or refund-initiation
/// request.
pub fn request_signature(
    hash_key: &[u8],
    merch_id: &str,
    password: &str,
    merch_txn_id: &str,
    amount: Amount,
    currency: &str,
    operation: &str,
) -> String {
    let message = format!(
        "{}{}{}{}{}{}",
        merch_id,
        password,
        merch_txn_id,
        amount.to_wire(),
        currency,
        operation
    );
    hmac_sha512_hex(hash_key, &message)
}

/// Outcome of callback signature verification.
///
/// The digests are exposed for diagnostic logging only, never for
/// bypassing a failed check.
#[derive(Debug, Clone)]
pub struct SignatureCheck {
    pub is_valid: bool,
    pub calculated: String,
    pub received: String,
}

impl SignatureCheck {
    /// Converts a failed check into the error the caller must propagate.
    pub fn ensure_valid(self) -> Result<(), EnvelopeError> {
        if self.is_valid {
            Ok(())
        } else {
            Err(EnvelopeError::SignatureMismatch {
                calculated: self.calculated,
                received: self.received,
            })
        }
    }
}

/// Recomputes the callback signature and compares it against the one
/// embedded in the payload's payment details.
///
/// Concatenation order is fixed by the protocol: merchant id, processor
/// transaction id, merchant transaction id, total amount (two decimals),
/// status code, first sub-channel, bank transaction id.
pub fn verify_callback(hash_key: &[u8], callback: &CallbackBody) -> SignatureCheck {
    let message = format!(
        "{}{}{}{}{}{}{}",
        callback.merch_details.merch_id.as_wire_string(),
        callback.pay_details.atom_txn_id.as_wire_string(),
        callback.merch_details.merch_txn_id,
        callback.pay_details.total_amount.to_wire(),
        callback.response_details.status_code,
        callback
            .pay_mode_specific_data
            .sub_channel
            .first()
            .unwrap_or_default(),
        callback
            .pay_mode_specific_data
            .bank_details
            .bank_txn_id
            .as_wire_string()
    );

    let calculated = hmac_sha512_hex(hash_key, &message);
    let received = callback.pay_details.signature.clone();
    let is_valid = constant_time_eq(calculated.as_bytes(), received.as_bytes());

    SignatureCheck {
        is_valid,
        calculated,
        received,
    }
}

/// Constant-time comparison of two byte slices.
fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.ct_eq(b).into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::payload::{
        BankDetails, CallbackPayDetails, CallbackPayMode, FlexId, MerchDetails,
        ResponseDetails, SubChannel,
    };

    const REQ_HASH_KEY: &[u8] = b"KEY123657234";
    const RES_HASH_KEY: &[u8] = b"KEYRESP123657234";

    fn sample_callback(signature: &str) -> CallbackBody {
        CallbackBody {
            merch_details: MerchDetails {
                merch_id: FlexId::Num(446442),
                password: None,
                merch_txn_id: "TXN_1738216820431_ab12cd34e".to_string(),
                merch_txn_date: Some("2026-01-30 09:05:07".to_string()),
            },
            pay_details: CallbackPayDetails {
                atom_txn_id: FlexId::Num(11000000123),
                amount: Some(crate::domain::foundation::Amount::new(500.0)),
                surcharge_amount: None,
                total_amount: crate::domain::foundation::Amount::new(500.0),
                signature: signature.to_string(),
                txn_currency: Some("INR".to_string()),
                txn_init_date: None,
                txn_complete_date: None,
            },
            response_details: ResponseDetails {
                status_code: "OTS0000".to_string(),
                message: Some("SUCCESS".to_string()),
                description: None,
            },
            pay_mode_specific_data: CallbackPayMode {
                sub_channel: SubChannel::Many(vec!["NB".to_string()]),
                bank_details: BankDetails {
                    ots_bank_id: None,
                    ots_bank_name: Some("HDFC Bank".to_string()),
                    bank_txn_id: FlexId::from("BANK123456789"),
                    card_mask_number: None,
                    card_type: None,
                },
            },
        }
    }

    /// The digest this file's `sample_callback` fields must produce with
    /// the UAT response hash key.
    const SAMPLE_CALLBACK_DIGEST: &str = "989bc9db5fe3bd0d192821bd407562e8936ae662a47ff2de4e69acbd94e5fae983b9a9cf3d97acb314cd8c8dce86c1cec99b3ac95f96208ae7def44e18808525";

    // ══════════════════════════════════════════════════════════════
    // Outbound signature
    // ══════════════════════════════════════════════════════════════

    #[test]
    fn refund_signature_matches_reference_vector() {
        // Fixed regression vector; this digest must never silently change.
        let signature = request_signature(
            REQ_HASH_KEY,
            "317159",
            "Test@123",
            "173821682043",
            Amount::new(500.0),
            "INR",
            "REFUNDINIT",
        );
        assert_eq!(
            signature,
            "7f65c46c03b26e6c658312937fdc719a6146f8c447a802312322531dc83565e28da2f86942fec3bb4ad14434b73e03dad39b7fb0a1eb490729d20a1add1afcf7"
        );
    }

    #[test]
    fn signature_digest_is_lowercase_hex_of_sha512_width() {
        let signature = request_signature(
            REQ_HASH_KEY,
            "1",
            "p",
            "t",
            Amount::new(1.0),
            "INR",
            "TXNVERIFICATION",
        );
        assert_eq!(signature.len(), 128);
        assert!(signature
            .chars()
            .all(|c| c.is_ascii_digit() || c.is_ascii_lowercase()));
    }

    #[test]
    fn amount_enters_signature_with_two_decimals() {
        let whole = request_signature(
            REQ_HASH_KEY,
            "1",
            "p",
            "t",
            Amount::new(100.0),
            "INR",
            "REFUNDINIT",
        );
        let formatted = hmac_sha512_hex(REQ_HASH_KEY, "1pt100.00INRREFUNDINIT");
        assert_eq!(whole, formatted);
    }

    #[test]
    fn operation_name_distinguishes_signatures() {
        let status = request_signature(
            REQ_HASH_KEY,
            "1",
            "p",
            "t",
            Amount::new(1.0),
            "INR",
            "TXNVERIFICATION",
        );
        let refund = request_signature(
            REQ_HASH_KEY,
            "1",
            "p",
            "t",
            Amount::new(1.0),
            "INR",
            "REFUNDINIT",
        );
        assert_ne!(status, refund);
    }

    // ══════════════════════════════════════════════════════════════
    // Callback verification
    // ══════════════════════════════════════════════════════════════

    #[test]
    fn callback_concatenation_matches_reference_digest() {
        let callback = sample_callback("irrelevant");
        let check = verify_callback(RES_HASH_KEY, &callback);
        assert_eq!(check.calculated, SAMPLE_CALLBACK_DIGEST);
    }

    #[test]
    fn valid_signature_verifies() {
        let callback = sample_callback(SAMPLE_CALLBACK_DIGEST);
        let check = verify_callback(RES_HASH_KEY, &callback);
        assert!(check.is_valid);
        assert!(check.ensure_valid().is_ok());
    }

    #[test]
    fn single_character_tamper_is_rejected() {
        let mut tampered = SAMPLE_CALLBACK_DIGEST.to_string();
        // 9 -> 8 in the first position
        tampered.replace_range(0..1, "8");
        let callback = sample_callback(&tampered);

        let check = verify_callback(RES_HASH_KEY, &callback);
        assert!(!check.is_valid);
        assert!(matches!(
            check.ensure_valid(),
            Err(EnvelopeError::SignatureMismatch { .. })
        ));
    }

    #[test]
    fn check_exposes_both_digests_for_diagnostics() {
        let callback = sample_callback("deadbeef");
        let check = verify_callback(RES_HASH_KEY, &callback);
        assert!(!check.is_valid);
        assert_eq!(check.received, "deadbeef");
        assert_eq!(check.calculated, SAMPLE_CALLBACK_DIGEST);
    }

    #[test]
    fn wrong_verification_key_rejects() {
        let callback = sample_callback(SAMPLE_CALLBACK_DIGEST);
        let check = verify_callback(REQ_HASH_KEY, &callback);
        assert!(!check.is_valid);
    }

    #[test]
    fn tampered_amount_invalidates_signature() {
        let mut callback = sample_callback(SAMPLE_CALLBACK_DIGEST);
        callback.pay_details.total_amount = crate::domain::foundation::Amount::new(0.01);
        let check = verify_callback(RES_HASH_KEY, &callback);
        assert!(!check.is_valid);
    }
}
