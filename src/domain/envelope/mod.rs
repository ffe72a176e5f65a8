//! The cryptographic envelope at the boundary with the payment processor.
//!
//! One immutable component owns every cryptographic transformation the
//! integration needs: PBKDF2 key derivation feeding two directional
//! AES-256-CBC ciphers, plus the two directional HMAC-SHA512 signature
//! schemes. All operations are synchronous, CPU-bound pure functions over
//! the inputs and the pre-derived keys, so a [`CryptoEnvelope`] can be
//! shared freely across concurrent request handlers without coordination.
//!
//! # Module Structure
//!
//! - `keys` - PBKDF2-HMAC-SHA512 key derivation
//! - `cipher` - AES-256-CBC framing with the protocol's fixed IV
//! - `signature` - request signing and callback verification
//! - `error` - the non-retryable failure taxonomy

mod cipher;
mod error;
mod keys;
mod signature;

pub use cipher::PROTOCOL_IV;
pub use error::EnvelopeError;
pub use keys::{derive_key, DERIVED_KEY_LEN, PBKDF2_ROUNDS};
pub use signature::SignatureCheck;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::domain::foundation::Amount;
use crate::domain::payload::CallbackBody;

/// The credential bundle the envelope is keyed with.
///
/// Loaded once from configuration and immutable for the process lifetime.
/// The cipher key material and the HMAC keys are distinct secrets.
#[derive(Debug, Clone)]
pub struct MerchantCredentials {
    pub merch_id: String,
    pub password: String,
    pub req_enc_key: String,
    pub req_salt: String,
    pub req_hash_key: String,
    pub res_enc_key: String,
    pub res_salt: String,
    pub res_hash_key: String,
}

/// Stateless cryptographic core for the NDPS transport.
///
/// Construction derives both direction keys exactly once; the derivation is
/// expensive by design (65536 PBKDF2 rounds), so envelopes are built at
/// startup and reused for every subsequent operation.
pub struct CryptoEnvelope {
    merch_id: String,
    password: String,
    request_hash_key: String,
    response_hash_key: String,
    outbound_key: [u8; DERIVED_KEY_LEN],
    inbound_key: [u8; DERIVED_KEY_LEN],
}

impl CryptoEnvelope {
    /// Derives both cipher keys and fixes the signing keys.
    ///
    /// # Errors
    ///
    /// Returns [`EnvelopeError::KeyDerivation`] when derivation fails;
    /// treat that as a fatal initialization error, not a per-request one.
    pub fn new(credentials: MerchantCredentials) -> Result<Self, EnvelopeError> {
        let outbound_key = derive_key(
            credentials.req_enc_key.as_bytes(),
            credentials.req_salt.as_bytes(),
        )?;
        let inbound_key = derive_key(
            credentials.res_enc_key.as_bytes(),
            credentials.res_salt.as_bytes(),
        )?;

        Ok(Self {
            merch_id: credentials.merch_id,
            password: credentials.password,
            request_hash_key: credentials.req_hash_key,
            response_hash_key: credentials.res_hash_key,
            outbound_key,
            inbound_key,
        })
    }

    /// The merchant id embedded in outbound envelopes and payloads.
    pub fn merch_id(&self) -> &str {
        &self.merch_id
    }

    /// The merchant password. The protocol embeds it in every request
    /// payload, so payload builders need it in the clear.
    pub fn password(&self) -> &str {
        &self.password
    }

    /// Serializes the payload to JSON and encrypts it for the processor.
    ///
    /// Returns uppercase hex ciphertext. Deterministic: the protocol's
    /// fixed IV means identical payloads encrypt identically.
    pub fn encrypt<T: Serialize>(&self, payload: &T) -> Result<String, EnvelopeError> {
        let json = serde_json::to_vec(payload)
            .map_err(|e| EnvelopeError::MalformedPayload(e.to_string()))?;
        Ok(cipher::encrypt_bytes(&self.outbound_key, &json))
    }

    /// Decrypts an inbound hex ciphertext into a typed document.
    pub fn decrypt<T: DeserializeOwned>(&self, enc_data: &str) -> Result<T, EnvelopeError> {
        let plaintext = cipher::decrypt_bytes(&self.inbound_key, enc_data)?;
        serde_json::from_slice(&plaintext)
            .map_err(|e| EnvelopeError::MalformedPayload(e.to_string()))
    }

    /// Decrypts an inbound hex ciphertext into untyped JSON, for callers
    /// that only need to inspect individual fields.
    pub fn decrypt_value(&self, enc_data: &str) -> Result<serde_json::Value, EnvelopeError> {
        self.decrypt(enc_data)
    }

    /// Signs an outbound status-enquiry or refund-initiation request.
    pub fn sign_request(
        &self,
        merch_txn_id: &str,
        amount: Amount,
        currency: &str,
        operation: &str,
    ) -> String {
        signature::request_signature(
            self.request_hash_key.as_bytes(),
            &self.merch_id,
            &self.password,
            merch_txn_id,
            amount,
            currency,
            operation,
        )
    }

    /// Verifies the signature embedded in a decrypted callback.
    ///
    /// A failed check means the callback is unauthenticated and must be
    /// rejected regardless of the status it claims.
    pub fn verify_callback(&self, callback: &CallbackBody) -> SignatureCheck {
        signature::verify_callback(self.response_hash_key.as_bytes(), callback)
    }
}
