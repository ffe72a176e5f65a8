//! Symmetric key derivation.
//!
//! Both cipher directions use PBKDF2-HMAC-SHA512 over ASCII key material
//! and salt, with an iteration count fixed by the processor's protocol.
//! At roughly tens of milliseconds per derivation the cost is deliberate;
//! keys must be derived once per direction and reused, never re-derived
//! per request.

use hmac::Hmac;
use sha2::Sha512;

use super::error::EnvelopeError;

/// PBKDF2 iteration count mandated by the protocol.
pub const PBKDF2_ROUNDS: u32 = 65_536;

/// Derived key length in bytes (AES-256).
pub const DERIVED_KEY_LEN: usize = 32;

/// Derives a 32-byte cipher key from a key-material/salt pair.
///
/// Deterministic: identical inputs always yield byte-identical output.
pub fn derive_key(
    material: &[u8],
    salt: &[u8],
) -> Result<[u8; DERIVED_KEY_LEN], EnvelopeError> {
    let mut key = [0u8; DERIVED_KEY_LEN];
    pbkdf2::pbkdf2::<Hmac<Sha512>>(material, salt, PBKDF2_ROUNDS, &mut key)
        .map_err(|e| EnvelopeError::KeyDerivation(e.to_string()))?;
    Ok(key)
}
