//! Envelope error taxonomy.
//!
//! None of these conditions is retryable: every operation in the envelope
//! is a pure function, so a failure reflects misconfiguration or an
//! upstream protocol violation, never a transient condition. The envelope
//! never falls back to an alternate key or partially trusts data after a
//! failed check; callers decide user-facing behavior.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum EnvelopeError {
    /// Key derivation failed during construction. Fatal: without derived
    /// keys no envelope operation can run, so this aborts startup.
    #[error("key derivation failed: {0}")]
    KeyDerivation(String),

    /// The ciphertext was not valid hexadecimal (odd length or non-hex
    /// characters).
    #[error("malformed ciphertext: {0}")]
    MalformedCiphertext(String),

    /// AES-CBC padding validation failed. Wrong key, corrupted ciphertext
    /// and truncated transmission are indistinguishable at this layer, and
    /// deliberately stay that way.
    #[error("decryption failed: inconsistent padding")]
    Decryption,

    /// Decrypted bytes were not the expected JSON document.
    #[error("malformed payload: {0}")]
    MalformedPayload(String),

    /// Calculated and received HMAC digests differ. The associated data is
    /// unauthenticated and must be rejected outright.
    #[error("signature mismatch")]
    SignatureMismatch {
        calculated: String,
        received: String,
    },
}
