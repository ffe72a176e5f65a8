//! AES-256-CBC framing for the encrypted transport.
//!
//! The protocol fixes both the cipher mode and the IV: every message in
//! either direction is AES-256-CBC with PKCS#7 padding under a constant
//! 16-byte IV, hex-encoded uppercase. CBC carries no integrity tag here;
//! authenticity is established separately by the HMAC signature scheme on
//! selected payload fields. Both properties belong to the processor's
//! protocol and must be preserved bit-for-bit for interoperability.

use aes::cipher::{block_padding::Pkcs7, BlockDecryptMut, BlockEncryptMut, KeyIvInit};
use aes::Aes256;

use super::error::EnvelopeError;
use super::keys::DERIVED_KEY_LEN;

type Aes256CbcEnc = cbc::Encryptor<Aes256>;
type Aes256CbcDec = cbc::Decryptor<Aes256>;

/// Fixed initialization vector mandated by the processor for both cipher
/// directions: bytes 0..15 ascending. A protocol constant, not a
/// cryptographic recommendation; with a fixed IV identical plaintexts
/// produce identical ciphertexts.
pub const PROTOCOL_IV: [u8; 16] = [0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 15];

const BLOCK_SIZE: usize = 16;

/// Encrypts plaintext bytes and returns uppercase hex ciphertext.
pub fn encrypt_bytes(key: &[u8; DERIVED_KEY_LEN], plaintext: &[u8]) -> String {
    let ciphertext = Aes256CbcEnc::new(key.into(), &PROTOCOL_IV.into())
        .encrypt_padded_vec_mut::<Pkcs7>(plaintext);
    hex::encode_upper(ciphertext)
}

/// Decodes hex ciphertext and decrypts it back to plaintext bytes.
///
/// Fails with `MalformedCiphertext` when the hex encoding itself is broken
/// and with `Decryption` when the decrypted padding is inconsistent (wrong
/// key, corruption or truncation, indistinguishably).
pub fn decrypt_bytes(
    key: &[u8; DERIVED_KEY_LEN],
    hex_data: &str,
) -> Result<Vec<u8>, EnvelopeError> {
    let ciphertext = hex::decode(hex_data)
        .map_err(|e| EnvelopeError::MalformedCiphertext(e.to_string()))?;

    if ciphertext.is_empty() || ciphertext.len() % BLOCK_SIZE != 0 {
        return Err(EnvelopeError::Decryption);
    }

    Aes256CbcDec::new(key.into(), &PROTOCOL_IV.into())
        .decrypt_padded_vec_mut::<Pkcs7>(&ciphertext)
        .map_err(|_| EnvelopeError::Decryption)
}
