//! Gateway credential configuration.

use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;

use crate::domain::envelope::MerchantCredentials;

use super::error::ValidationError;

/// The merchant's NDPS credential bundle.
///
/// Loaded once at startup and immutable for the process lifetime. The
/// cipher key material and the HMAC keys are distinct secrets issued by
/// the processor per direction.
#[derive(Debug, Clone, Deserialize)]
pub struct GatewayConfig {
    /// Merchant identifier embedded in every request and envelope.
    pub merch_id: String,

    /// Merchant password embedded in request payloads and signatures.
    pub password: SecretString,

    /// Outbound cipher key material.
    pub req_enc_key: SecretString,

    /// Outbound cipher salt.
    pub req_salt: SecretString,

    /// Outbound signing key.
    pub req_hash_key: SecretString,

    /// Inbound cipher key material.
    pub res_enc_key: SecretString,

    /// Inbound cipher salt.
    pub res_salt: SecretString,

    /// Inbound signature verification key.
    pub res_hash_key: SecretString,
}

impl GatewayConfig {
    /// Validate that every credential is present.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.merch_id.is_empty() {
            return Err(ValidationError::MissingRequired("GATEWAY_MERCH_ID"));
        }
        let secrets: [(&SecretString, &'static str); 7] = [
            (&self.password, "GATEWAY_PASSWORD"),
            (&self.req_enc_key, "GATEWAY_REQ_ENC_KEY"),
            (&self.req_salt, "GATEWAY_REQ_SALT"),
            (&self.req_hash_key, "GATEWAY_REQ_HASH_KEY"),
            (&self.res_enc_key, "GATEWAY_RES_ENC_KEY"),
            (&self.res_salt, "GATEWAY_RES_SALT"),
            (&self.res_hash_key, "GATEWAY_RES_HASH_KEY"),
        ];
        for (secret, name) in secrets {
            if secret.expose_secret().is_empty() {
                return Err(ValidationError::MissingRequired(name));
            }
        }
        Ok(())
    }

    /// Exposes the bundle as the plain credential struct the envelope is
    /// keyed with. Call once at startup.
    pub fn credentials(&self) -> MerchantCredentials {
        MerchantCredentials {
            merch_id: self.merch_id.clone(),
            password: self.password.expose_secret().to_string(),
            req_enc_key: self.req_enc_key.expose_secret().to_string(),
            req_salt: self.req_salt.expose_secret().to_string(),
            req_hash_key: self.req_hash_key.expose_secret().to_string(),
            res_enc_key: self.res_enc_key.expose_secret().to_string(),
            res_salt: self.res_salt.expose_secret().to_string(),
            res_hash_key: self.res_hash_key.expose_secret().to_string(),
        }
    }
}
